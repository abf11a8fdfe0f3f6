//! `rtbridge clean`: remove generated crates and build output.

use anyhow::{Context, Result};
use rtbridge_project::ProjectLayout;

pub fn run(layout: &ProjectLayout) -> Result<()> {
    let removed = rtbridge_build::clean(layout)
        .with_context(|| format!("cleaning {}", layout.package_dir.display()))?;
    if removed.is_empty() {
        println!("Already clean: {}", layout.package_dir.display());
    }
    for path in removed {
        println!("Removed {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn clean_removes_build_output() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path(), dir.path().join("apps"));
        fs::create_dir_all(layout.output_dir()).unwrap();
        fs::write(layout.output_dir().join("librust.a"), b"data").unwrap();
        fs::create_dir_all(dir.path().join("build")).unwrap();

        run(&layout).unwrap();
        assert!(!layout.output_dir().exists());
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn clean_handles_already_clean() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path(), dir.path().join("apps"));
        run(&layout).unwrap();
    }
}
