//! The cargo command line that builds the wrapper crate.

use std::path::PathBuf;

use rtbridge_toolchain::TargetSpec;

/// Standard library crates rebuilt from source for targets without a
/// prebuilt standard library.
pub const BUILD_STD: &str = "core,alloc";
/// Feature set those crates are rebuilt with.
pub const BUILD_STD_FEATURES: &str = "compiler-builtins-mem";

/// A `cargo rustc` command line.
///
/// Every optional element is a single named field, so an element is emitted
/// at most once no matter how many times it is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoCommand {
    subcommand: String,
    build_std: Option<String>,
    target: String,
    release: bool,
    target_dir: PathBuf,
    build_std_features: Option<String>,
}

impl CargoCommand {
    /// Command for `target`, writing into `target_dir`.
    ///
    /// When the target has no prebuilt standard library, core and alloc are
    /// rebuilt from source together with their companion feature flag.
    pub fn new(target: &TargetSpec, target_dir: impl Into<PathBuf>) -> Self {
        let mut command = Self {
            subcommand: "rustc".to_string(),
            build_std: None,
            target: target.identifier().to_string(),
            release: true,
            target_dir: target_dir.into(),
            build_std_features: None,
        };
        if target.needs_build_std() {
            command.build_std = Some(BUILD_STD.to_string());
            command.set_build_std_features(BUILD_STD_FEATURES);
        }
        command
    }

    /// Set the `-Z build-std-features` value passed to rustc; replaces any
    /// previous value.
    pub fn set_build_std_features(&mut self, features: impl Into<String>) -> &mut Self {
        self.build_std_features = Some(features.into());
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Arguments after `cargo`, in order:
    /// subcommand, `-Z build-std`, `--target <id>`, `--release`,
    /// `--target-dir=<dir>`, `--`, `-Z build-std-features`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.subcommand.clone()];
        if let Some(crates) = &self.build_std {
            args.push("-Z".to_string());
            args.push(format!("build-std={crates}"));
        }
        args.push("--target".to_string());
        args.push(self.target.clone());
        if self.release {
            args.push("--release".to_string());
        }
        args.push(format!("--target-dir={}", self.target_dir.display()));
        args.push("--".to_string());
        if let Some(features) = &self.build_std_features {
            args.push("-Z".to_string());
            args.push(format!("build-std-features={features}"));
        }
        args
    }
}
