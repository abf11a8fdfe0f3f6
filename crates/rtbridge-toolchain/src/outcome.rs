//! Typed result of target resolution plus toolchain probing.

use rtbridge_targets::TargetTriple;

/// A resolved (or deliberately unresolved) compilation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    /// `None` when no rule matched and the caller chose to continue anyway.
    pub triple: Option<TargetTriple>,
    /// Whether the toolchain ships a prebuilt standard library for the target.
    pub std_prebuilt: bool,
}

impl TargetSpec {
    pub fn new(triple: TargetTriple, std_prebuilt: bool) -> Self {
        Self {
            triple: Some(triple),
            std_prebuilt,
        }
    }

    /// Placeholder used when resolution failed: empty identifier, and no
    /// prebuilt standard library.
    pub fn unresolved() -> Self {
        Self {
            triple: None,
            std_prebuilt: false,
        }
    }

    /// The identifier passed to `--target`; empty when unresolved.
    pub fn identifier(&self) -> &'static str {
        self.triple.map(TargetTriple::as_str).unwrap_or("")
    }

    /// Whether core/alloc must be built from source.
    pub fn needs_build_std(&self) -> bool {
        !self.std_prebuilt
    }
}

/// Outcome of assessing the host profile against the installed toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    Resolved(TargetSpec),
    /// rustc or cargo is not callable.
    ToolchainAbsent,
    /// No resolution rule matched the profile.
    Unresolved,
}
