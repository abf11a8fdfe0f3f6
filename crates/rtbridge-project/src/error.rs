//! Error types for project discovery and synthesis.

use std::path::PathBuf;

/// Errors that can occur while discovering or generating projects.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// I/O error on a project file or directory.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A sub-project manifest could not be parsed or has no package name.
    #[error("cannot parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The wrapper manifest could not be serialized.
    #[error("TOML serialization error: {0}")]
    ManifestSerialize(#[from] toml::ser::Error),

    /// An external command could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// `cargo new` for the wrapper skeleton exited unsuccessfully.
    #[error("creating the wrapper project failed: `{command}` exited with {code:?}")]
    SkeletonCreation { command: String, code: Option<i32> },

    /// Two dependencies of the wrapper crate would share a package name.
    #[error("application {} uses package name `{name}`, which is already taken", dir.display())]
    DuplicatePackage { name: String, dir: PathBuf },

    /// A feature was selected before the wrapper manifest was generated.
    #[error("wrapper manifest {} has not been prepared", path.display())]
    NotPrepared { path: PathBuf },

    /// The wrapper manifest's `[features]` table has an unexpected shape.
    #[error("invalid [features] in {}: {detail}", path.display())]
    InvalidFeatures { path: PathBuf, detail: String },
}

impl ProjectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProjectError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
