//! Installs the built archive where the host build links it from.

use std::fs;
use std::path::PathBuf;

use rtbridge_project::ProjectLayout;
use rtbridge_toolchain::TargetSpec;

use crate::error::PipelineError;

/// Where cargo leaves the archive: `rust_out/<target>/release/librust.a`.
pub fn built_archive(layout: &ProjectLayout, target: &TargetSpec) -> PathBuf {
    layout
        .output_dir()
        .join(target.identifier())
        .join("release")
        .join(layout.archive_name())
}

/// Copy the archive into `rust_out/` and return its installed path.
pub fn install_artifact(
    layout: &ProjectLayout,
    target: &TargetSpec,
) -> Result<PathBuf, PipelineError> {
    let from = built_archive(layout, target);
    let to = layout.output_dir().join(layout.archive_name());
    fs::copy(&from, &to).map_err(|source| {
        log::error!("failed to copy {} to {}: {source}", from.display(), to.display());
        PipelineError::Install {
            from: from.clone(),
            to: to.clone(),
            source,
        }
    })?;
    log::info!("installed {}", to.display());
    Ok(to)
}
