//! Toolchain presence and capability checks.
//!
//! Probing is read-only and never fails: anything that goes wrong while
//! talking to the toolchain degrades to "not available".

use std::cell::OnceCell;
use std::path::PathBuf;

use rtbridge_targets::{resolve_target, ArchProfile};

use crate::outcome::{TargetOutcome, TargetSpec};
use crate::process::{Invocation, ProcessRunner};

/// Queries rustc, cargo and rustup through a [`ProcessRunner`].
///
/// The installed-target list is fetched at most once per probe.
pub struct ToolchainProbe<'r, R: ProcessRunner + ?Sized> {
    runner: &'r R,
    installed: OnceCell<Option<Vec<String>>>,
}

impl<'r, R: ProcessRunner + ?Sized> ToolchainProbe<'r, R> {
    pub fn new(runner: &'r R) -> Self {
        Self {
            runner,
            installed: OnceCell::new(),
        }
    }

    /// First line of `<program> --version`, or `None` if it cannot be run
    /// or exits non-zero.
    pub fn version(&self, program: &str) -> Option<String> {
        let output = self
            .runner
            .output(&Invocation::new(program).arg("--version"))
            .ok()?;
        if !output.success() {
            return None;
        }
        Some(
            output
                .stdout
                .lines()
                .next()
                .unwrap_or("(unknown version)")
                .to_string(),
        )
    }

    /// Whether both the compiler and the package manager are callable.
    pub fn is_available(&self) -> bool {
        self.version("rustc").is_some() && self.version("cargo").is_some()
    }

    /// Targets with an installed standard library, per `rustup`.
    pub fn installed_targets(&self) -> Option<&[String]> {
        self.installed
            .get_or_init(|| {
                let invocation = Invocation::new("rustup").args(["target", "list", "--installed"]);
                match self.runner.output(&invocation) {
                    Ok(output) if output.success() => Some(
                        output
                            .stdout
                            .lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(str::to_string)
                            .collect(),
                    ),
                    Ok(output) => {
                        log::warn!("`{invocation}` exited with {:?}", output.code);
                        None
                    }
                    Err(e) => {
                        log::warn!("failed to query installed targets (rustup missing?): {e}");
                        None
                    }
                }
            })
            .as_deref()
    }

    /// Whether `target` has a prebuilt standard library.
    pub fn has_prebuilt_std(&self, target: &str) -> bool {
        if target.is_empty() {
            return false;
        }
        self.installed_targets()
            .is_some_and(|targets| targets.iter().any(|t| t == target))
    }

    /// The toolchain sysroot, if `rustc --print sysroot` names an existing
    /// directory.
    pub fn sysroot(&self) -> Option<PathBuf> {
        let output = self
            .runner
            .output(&Invocation::new("rustc").args(["--print", "sysroot"]))
            .ok()?;
        if !output.success() {
            log::error!("`rustc --print sysroot` exited with {:?}", output.code);
            return None;
        }
        let path = PathBuf::from(output.stdout.trim());
        if path.as_os_str().is_empty() || !path.exists() {
            log::error!("`rustc --print sysroot` reported a missing path: {}", path.display());
            return None;
        }
        Some(path)
    }

    /// Resolve `profile` and check the toolchain can build for the result.
    pub fn assess(&self, profile: &ArchProfile) -> TargetOutcome {
        if !self.is_available() {
            log::warn!("Rust toolchain not found; install it from https://rustup.rs");
            return TargetOutcome::ToolchainAbsent;
        }

        let Some(triple) = resolve_target(profile) else {
            log::error!("unable to detect Rust target; check the architecture configuration");
            return TargetOutcome::Unresolved;
        };
        log::info!("detected Rust target: {triple}");

        let std_prebuilt = self.has_prebuilt_std(triple.as_str());
        if !std_prebuilt {
            log::info!(
                "target '{triple}' has no installed standard library; core and alloc \
                 will be built from source (or run `rustup target add {triple}`)"
            );
        }
        TargetOutcome::Resolved(TargetSpec::new(triple, std_prebuilt))
    }
}
