//! Manifest models: the minimal view of a sub-project manifest, and the full
//! generated wrapper manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, Result};
use crate::layout::{LIB_NAME, WRAPPER_NAME};

/// The part of a sub-project manifest discovery cares about.
#[derive(Debug, Deserialize)]
struct SubProjectManifest {
    package: SubProjectPackage,
}

#[derive(Debug, Deserialize)]
struct SubProjectPackage {
    name: String,
}

/// Read the declared package name from a manifest file.
pub fn read_package_name(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    let manifest: SubProjectManifest =
        toml::from_str(&content).map_err(|source| ProjectError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(manifest.package.name)
}

/// `[package]` of the wrapper crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperPackage {
    pub name: String,
    pub version: String,
    pub edition: String,
}

/// `[lib]` of the wrapper crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperLib {
    pub name: String,
    #[serde(rename = "crate-type")]
    pub crate_type: Vec<String>,
}

/// A `{ path = "..." }` dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathDependency {
    pub path: PathBuf,
}

/// The generated wrapper manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperManifest {
    pub package: WrapperPackage,
    pub lib: WrapperLib,
    #[serde(default)]
    pub dependencies: BTreeMap<String, PathDependency>,
}

impl WrapperManifest {
    /// An empty wrapper: `staticlib` named `rust`, no dependencies.
    pub fn template() -> Self {
        Self {
            package: WrapperPackage {
                name: WRAPPER_NAME.into(),
                version: "0.0.0".into(),
                edition: "2021".into(),
            },
            lib: WrapperLib {
                name: LIB_NAME.into(),
                crate_type: vec!["staticlib".into()],
            },
            dependencies: BTreeMap::new(),
        }
    }

    /// Add a path dependency, replacing any previous entry of the same name.
    pub fn add_path_dependency(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.dependencies
            .insert(name.into(), PathDependency { path: path.into() });
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a wrapper manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
        toml::from_str(&content).map_err(|source| ProjectError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
