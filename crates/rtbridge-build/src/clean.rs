//! Removes everything the build generates under the package directory.

use std::fs;
use std::path::PathBuf;

use rtbridge_project::ProjectLayout;

use crate::error::PipelineError;

/// Remove the wrapper crate, the cargo output and the host `build/`
/// directory. Returns the directories that were actually removed.
pub fn clean(layout: &ProjectLayout) -> Result<Vec<PathBuf>, PipelineError> {
    let targets = [
        layout.output_dir(),
        layout.wrapper_dir(),
        layout.package_dir.join("build"),
    ];

    let mut removed = Vec::new();
    for path in targets {
        if !path.exists() {
            log::debug!("already clean: {}", path.display());
            continue;
        }
        fs::remove_dir_all(&path).map_err(|source| PipelineError::Clean {
            path: path.clone(),
            source,
        })?;
        log::info!("removed {}", path.display());
        removed.push(path);
    }
    Ok(removed)
}
