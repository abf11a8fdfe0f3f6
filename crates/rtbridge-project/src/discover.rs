//! Discovery of application sub-projects.

use std::path::{Path, PathBuf};

use crate::error::{ProjectError, Result};
use crate::layout::{IGNORE_MARKER, MANIFEST_FILE};
use crate::manifest::read_package_name;

/// An application crate found under the applications directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProject {
    /// Declared `[package] name`.
    pub name: String,
    /// Directory containing the manifest.
    pub dir: PathBuf,
}

impl SubProject {
    /// The name as a Rust path segment (`-` becomes `_`).
    pub fn crate_ident(&self) -> String {
        self.name.replace('-', "_")
    }
}

/// Scan the immediate subdirectories of `apps_dir` for sub-projects.
///
/// A subdirectory qualifies when it contains a manifest and no ignore
/// marker. Results are ordered by directory name. A missing `apps_dir` yields
/// no sub-projects. Any manifest that cannot be parsed aborts the whole scan.
pub fn discover(apps_dir: &Path) -> Result<Vec<SubProject>> {
    let entries = match std::fs::read_dir(apps_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("cannot read applications directory {}: {e}", apps_dir.display());
            return Ok(Vec::new());
        }
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ProjectError::io(apps_dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut projects = Vec::new();
    for dir in dirs {
        let manifest = dir.join(MANIFEST_FILE);
        if !manifest.is_file() {
            continue;
        }
        if dir.join(IGNORE_MARKER).exists() {
            log::debug!("skipping {} ({IGNORE_MARKER} present)", dir.display());
            continue;
        }
        let name = read_package_name(&manifest).inspect_err(|e| {
            log::error!("failed to load application manifest: {e}");
        })?;
        log::info!("Rust add package: {name} [{}]", dir.display());
        projects.push(SubProject { name, dir });
    }
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_app(root: &Path, dir: &str, name: &str) -> PathBuf {
        let app = root.join(dir);
        fs::create_dir_all(app.join("src")).unwrap();
        fs::write(
            app.join("Cargo.toml"),
            format!("[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n"),
        )
        .unwrap();
        app
    }

    #[test]
    fn finds_apps_in_directory_order() {
        let dir = tempfile::tempdir().unwrap();
        write_app(dir.path(), "em_thread", "em_thread");
        write_app(dir.path(), "em_param", "em-param");
        write_app(dir.path(), "em_queue", "em_queue");

        let projects = discover(dir.path()).unwrap();
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["em-param", "em_queue", "em_thread"]);
        assert_eq!(projects[0].crate_ident(), "em_param");
        assert_eq!(projects[0].dir, dir.path().join("em_param"));
    }

    #[test]
    fn ignore_marker_excludes_app() {
        let dir = tempfile::tempdir().unwrap();
        write_app(dir.path(), "app_a", "app_a");
        let b = write_app(dir.path(), "app_b", "app_b");
        fs::write(b.join(".ignore"), "").unwrap();

        let projects = discover(dir.path()).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "app_a");
    }

    #[test]
    fn directories_without_manifest_and_plain_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"top\"\n").unwrap();
        write_app(dir.path(), "app", "app");

        let projects = discover(dir.path()).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "app");
    }

    #[test]
    fn missing_apps_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn parse_failure_aborts_scan() {
        let dir = tempfile::tempdir().unwrap();
        write_app(dir.path(), "good", "good");
        let bad = dir.path().join("bad");
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("Cargo.toml"), "[package\nname = ").unwrap();

        let err = discover(dir.path()).unwrap_err();
        assert!(matches!(err, ProjectError::ManifestParse { .. }));
    }

    #[test]
    fn ignored_app_with_broken_manifest_is_not_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad");
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("Cargo.toml"), "not toml [[[").unwrap();
        fs::write(bad.join(".ignore"), "").unwrap();

        assert!(discover(dir.path()).unwrap().is_empty());
    }
}
