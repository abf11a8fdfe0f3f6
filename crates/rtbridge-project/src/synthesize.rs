//! Wrapper crate generation.
//!
//! The wrapper manifest and entry source are regenerated in full on every
//! run. Nothing from a previous run is merged in.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rtbridge_toolchain::{Invocation, ProcessRunner};

use crate::discover::SubProject;
use crate::error::{ProjectError, Result};
use crate::layout::{ProjectLayout, RUNTIME_CRATE, WRAPPER_NAME};
use crate::manifest::WrapperManifest;

/// A wrapper crate that has been generated on disk.
///
/// Only [`synthesize`] hands these out, so holding one proves the manifest
/// was prepared before any feature is selected on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperHandle {
    dir: PathBuf,
    manifest: PathBuf,
    runtime_crate: String,
}

impl WrapperHandle {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    /// Package name of the runtime-support crate the wrapper depends on.
    pub fn runtime_crate(&self) -> &str {
        &self.runtime_crate
    }
}

/// Create the wrapper crate with `cargo new --lib` unless its manifest exists.
pub fn ensure_skeleton<R: ProcessRunner + ?Sized>(
    layout: &ProjectLayout,
    runner: &R,
) -> Result<()> {
    if layout.wrapper_manifest().is_file() {
        return Ok(());
    }

    fs::create_dir_all(&layout.package_dir).map_err(|e| ProjectError::io(&layout.package_dir, e))?;
    let invocation = Invocation::new("cargo")
        .args(["new", "--lib", WRAPPER_NAME])
        .current_dir(&layout.package_dir);
    log::info!("creating wrapper project: {invocation}");

    let output = runner.output(&invocation).map_err(|source| ProjectError::Spawn {
        command: invocation.to_string(),
        source,
    })?;
    if !output.success() {
        log::error!("`{invocation}` failed: {}", output.stderr.trim());
        return Err(ProjectError::SkeletonCreation {
            command: invocation.to_string(),
            code: output.code,
        });
    }
    Ok(())
}

/// Reject projects whose package name is the runtime crate's or another
/// project's.
fn check_package_names(projects: &[SubProject]) -> Result<()> {
    let mut seen = HashSet::from([RUNTIME_CRATE]);
    for project in projects {
        if !seen.insert(project.name.as_str()) {
            return Err(ProjectError::DuplicatePackage {
                name: project.name.clone(),
                dir: project.dir.clone(),
            });
        }
    }
    Ok(())
}

/// Build the wrapper manifest for `projects`.
///
/// Dependencies are exactly the runtime-support crate plus every project.
pub fn wrapper_manifest(
    layout: &ProjectLayout,
    projects: &[SubProject],
) -> Result<WrapperManifest> {
    check_package_names(projects)?;
    let mut manifest = WrapperManifest::template();
    manifest.add_path_dependency(RUNTIME_CRATE, layout.runtime_dir());
    for project in projects {
        manifest.add_path_dependency(project.name.clone(), project.dir.clone());
    }
    Ok(manifest)
}

/// Render the wrapper's `src/lib.rs`: one glob re-export for the runtime
/// crate, then one per project in discovery order.
pub fn entry_source(projects: &[SubProject]) -> String {
    let mut src = String::from("#![no_std]\n\n");
    src.push_str(&format!("extern crate {RUNTIME_CRATE};\n"));
    src.push_str(&format!("pub use {RUNTIME_CRATE}::*;\n"));
    for project in projects {
        src.push_str(&format!("pub use {}::*;\n", project.crate_ident()));
    }
    src
}

/// Write the wrapper manifest and entry source, replacing whatever was there.
pub fn synthesize(layout: &ProjectLayout, projects: &[SubProject]) -> Result<WrapperHandle> {
    let manifest_path = layout.wrapper_manifest();
    let entry_path = layout.wrapper_entry();

    let manifest = wrapper_manifest(layout, projects)?.to_toml()?;
    let source = entry_source(projects);

    if let Some(src_dir) = entry_path.parent() {
        fs::create_dir_all(src_dir).map_err(|e| ProjectError::io(src_dir, e))?;
    }
    fs::write(&entry_path, source).map_err(|e| ProjectError::io(&entry_path, e))?;
    fs::write(&manifest_path, manifest).map_err(|e| ProjectError::io(&manifest_path, e))?;

    Ok(WrapperHandle {
        dir: layout.wrapper_dir(),
        manifest: manifest_path,
        runtime_crate: RUNTIME_CRATE.to_string(),
    })
}

/// Make sure the wrapper crate exists, then regenerate it for `projects`.
pub fn aggregate<R: ProcessRunner + ?Sized>(
    layout: &ProjectLayout,
    projects: &[SubProject],
    runner: &R,
) -> Result<WrapperHandle> {
    check_package_names(projects)?;
    ensure_skeleton(layout, runner)?;
    let handle = synthesize(layout, projects)?;
    log::info!("imported {} Rust application(s)", projects.len());
    Ok(handle)
}
