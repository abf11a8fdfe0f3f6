//! `rtbridge build`: run the prebuild pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rtbridge_build::{prebuild, BuildResult, SkipReason};
use rtbridge_toolchain::ProcessRunner;

use crate::config::RtbridgeConfig;

/// Build every application and report the archive and link flags.
///
/// Skipped runs succeed; only a fatal pipeline result is an error.
pub fn run<R: ProcessRunner + ?Sized>(
    config: &RtbridgeConfig,
    root: &Path,
    env_root: Option<PathBuf>,
    runner: &R,
) -> Result<()> {
    let pipeline = config.pipeline_config(root, env_root);
    match prebuild(&pipeline, runner) {
        BuildResult::Success(artifact) => {
            println!("Built {} for {}", artifact.archive.display(), artifact.target.identifier());
            for app in &artifact.applications {
                println!("  {app}");
            }
            println!("Link flags: {}", artifact.link.flags().join(" "));
            Ok(())
        }
        BuildResult::Skipped(reason) => {
            println!("Rust build skipped: {}", describe(reason, config));
            Ok(())
        }
        BuildResult::Fatal(e) => Err(e).context("Rust build failed"),
    }
}

fn describe(reason: SkipReason, config: &RtbridgeConfig) -> String {
    match reason {
        SkipReason::Disabled => format!("{} is not set", config.build.enable_symbol),
        SkipReason::NoApplications => "no Rust applications found".to_string(),
        SkipReason::ToolchainAbsent => "Rust toolchain not installed".to_string(),
    }
}
