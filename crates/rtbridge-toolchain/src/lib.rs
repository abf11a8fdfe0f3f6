//! Toolchain probing and process execution for rtbridge.
//!
//! Every external program (rustc, cargo, rustup) is described by an
//! [`Invocation`]: a program, an ordered argument list, a working directory and
//! environment overrides. Invocations are executed through a [`ProcessRunner`]
//! without any shell in between.

pub mod outcome;
pub mod probe;
pub mod process;

#[cfg(any(test, feature = "testing"))]
pub mod fake;

pub use outcome::{TargetOutcome, TargetSpec};
pub use probe::ToolchainProbe;
pub use process::{Invocation, ProcessOutput, ProcessRunner, SystemRunner};
