//! Runs the wrapper build.

use std::path::Path;

use rtbridge_toolchain::{Invocation, ProcessRunner};

use crate::command::CargoCommand;
use crate::error::PipelineError;
use crate::flags::RustFlags;

/// Environment variable carrying the host source tree to build scripts.
pub const RTT_PATH_ENV: &str = "RTT_PATH";
/// Environment variable cargo reads the rustflags from, `0x1f`-separated.
pub const RUSTFLAGS_ENV: &str = "CARGO_ENCODED_RUSTFLAGS";

/// The full build invocation: `cargo <command>` inside the wrapper crate with
/// the host tree path and the rustflags in its environment.
pub fn build_invocation(
    command: &CargoCommand,
    flags: &RustFlags,
    wrapper_dir: &Path,
    rtt_root: &Path,
) -> Invocation {
    Invocation::new("cargo")
        .args(command.args())
        .current_dir(wrapper_dir)
        .env(RTT_PATH_ENV, format!("{}/../", rtt_root.display()))
        .env(RUSTFLAGS_ENV, flags.encoded())
}

/// Run `invocation` to completion with its output passed through.
pub fn invoke<R: ProcessRunner + ?Sized>(
    invocation: &Invocation,
    runner: &R,
) -> Result<(), PipelineError> {
    log::info!("building: {invocation}");
    let output = runner.run(invocation).map_err(|source| {
        log::error!("failed to start `{invocation}`: {source}");
        PipelineError::Spawn {
            command: invocation.to_string(),
            source,
        }
    })?;
    if !output.success() {
        log::error!("build command failed with {:?}: {invocation}", output.code);
        return Err(PipelineError::BuildFailed {
            command: invocation.to_string(),
            code: output.code,
        });
    }
    Ok(())
}
