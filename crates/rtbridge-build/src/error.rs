//! Pipeline errors.

use std::path::PathBuf;

use rtbridge_project::ProjectError;
use thiserror::Error;

/// Unrecoverable failures of the prebuild pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("unable to detect Rust target; check the architecture configuration")]
    UnresolvedTarget,

    #[error("Rust toolchain sysroot unavailable (`rustc --print sysroot` failed)")]
    SysrootUnavailable,

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("build command exited with {code:?}: `{command}`")]
    BuildFailed { command: String, code: Option<i32> },

    #[error("failed to install {} to {}: {source}", from.display(), to.display())]
    Install {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove {}: {source}", path.display())]
    Clean {
        path: PathBuf,
        source: std::io::Error,
    },
}
