//! On-disk layout of the Rust package directory.
//!
//! ```text
//! <package-dir>/
//!   rt-rust/            runtime-support crate (rt_rust)
//!   rust_dummy/         generated wrapper crate
//!     Cargo.toml
//!     src/lib.rs
//!   rust_out/           cargo target dir; librust.a is installed here
//! <apps-dir>/
//!   <app>/Cargo.toml    one sub-project per directory
//!   <app>/.ignore       opt-out marker
//! ```

use std::path::PathBuf;

/// Manifest file name of every crate.
pub const MANIFEST_FILE: &str = "Cargo.toml";
/// Marker that excludes an application directory from discovery.
pub const IGNORE_MARKER: &str = ".ignore";
/// Directory and package name of the wrapper crate.
pub const WRAPPER_NAME: &str = "rust_dummy";
/// `[lib] name` of the wrapper crate; the archive is `lib{LIB_NAME}.a`.
pub const LIB_NAME: &str = "rust";
/// Package name of the runtime-support crate.
pub const RUNTIME_CRATE: &str = "rt_rust";
/// Directory of the runtime-support crate.
pub const RUNTIME_DIR: &str = "rt-rust";
/// Cargo target directory and archive install location.
pub const OUTPUT_DIR: &str = "rust_out";

/// Paths of one package directory and its applications directory.
///
/// Both paths should be absolute: they end up in generated manifests and in
/// path-remapping flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub package_dir: PathBuf,
    pub apps_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(package_dir: impl Into<PathBuf>, apps_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
            apps_dir: apps_dir.into(),
        }
    }

    pub fn wrapper_dir(&self) -> PathBuf {
        self.package_dir.join(WRAPPER_NAME)
    }

    pub fn wrapper_manifest(&self) -> PathBuf {
        self.wrapper_dir().join(MANIFEST_FILE)
    }

    pub fn wrapper_entry(&self) -> PathBuf {
        self.wrapper_dir().join("src").join("lib.rs")
    }

    pub fn runtime_dir(&self) -> PathBuf {
        self.package_dir.join(RUNTIME_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.package_dir.join(OUTPUT_DIR)
    }

    /// File name of the produced static archive.
    pub fn archive_name(&self) -> String {
        format!("lib{LIB_NAME}.a")
    }
}
