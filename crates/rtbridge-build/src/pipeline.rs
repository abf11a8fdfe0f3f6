//! The prebuild orchestrator.
//!
//! The toolchain check, discovery, target assessment, wrapper synthesis,
//! feature selection, the cargo build and installation run strictly in that
//! order. Every failure is
//! folded into [`BuildResult::Fatal`]; nothing else escapes [`prebuild`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use rtbridge_project::{aggregate, discover, select_feature, ProjectLayout};
use rtbridge_targets::ArchProfile;
use rtbridge_toolchain::{Invocation, ProcessRunner, TargetOutcome, TargetSpec, ToolchainProbe};

use crate::command::CargoCommand;
use crate::error::PipelineError;
use crate::flags::{path_remaps, RustFlags};
use crate::install::install_artifact;
use crate::invoke::{build_invocation, invoke};
use crate::link::LinkDirectives;

/// What to do when no target rule matches the host profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Continue with an empty target identifier and let cargo report it.
    #[default]
    Defer,
    /// Fail the pipeline before anything is written.
    Abort,
}

/// Inputs to one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub layout: ProjectLayout,
    pub profile: ArchProfile,
    /// Root of the host source tree, exported to build scripts.
    pub rtt_root: PathBuf,
    /// Features to enable on the wrapper crate, in order.
    pub features: Vec<String>,
    pub unresolved_target: UnresolvedPolicy,
    /// Whether Rust integration is switched on in the host configuration.
    pub enabled: bool,
}

/// Why a run did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    Disabled,
    NoApplications,
    ToolchainAbsent,
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    /// Installed `librust.a`.
    pub archive: PathBuf,
    pub target: TargetSpec,
    /// Package names of the folded applications, in discovery order.
    pub applications: Vec<String>,
    /// The build command that ran.
    pub command: Invocation,
    pub link: LinkDirectives,
}

/// Tri-state outcome of [`prebuild`].
#[derive(Debug)]
pub enum BuildResult {
    Success(BuildArtifact),
    Skipped(SkipReason),
    Fatal(PipelineError),
}

impl BuildResult {
    pub fn is_fatal(&self) -> bool {
        matches!(self, BuildResult::Fatal(_))
    }
}

/// Build every application under `config.layout.apps_dir` into one archive.
pub fn prebuild<R: ProcessRunner + ?Sized>(config: &PipelineConfig, runner: &R) -> BuildResult {
    match run(config, runner) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Rust build failed: {e}");
            BuildResult::Fatal(e)
        }
    }
}

fn run<R: ProcessRunner + ?Sized>(
    config: &PipelineConfig,
    runner: &R,
) -> Result<BuildResult, PipelineError> {
    if !config.enabled {
        log::info!("Rust integration disabled");
        return Ok(BuildResult::Skipped(SkipReason::Disabled));
    }

    let probe = ToolchainProbe::new(runner);
    if !probe.is_available() {
        log::warn!("Rust toolchain not found; skipping Rust build");
        return Ok(BuildResult::Skipped(SkipReason::ToolchainAbsent));
    }

    let layout = &config.layout;
    let projects = discover(&layout.apps_dir)?;
    if projects.is_empty() {
        log::info!("no Rust applications under {}", layout.apps_dir.display());
        return Ok(BuildResult::Skipped(SkipReason::NoApplications));
    }

    let target = match probe.assess(&config.profile) {
        TargetOutcome::Resolved(target) => target,
        TargetOutcome::ToolchainAbsent => {
            return Ok(BuildResult::Skipped(SkipReason::ToolchainAbsent));
        }
        TargetOutcome::Unresolved => match config.unresolved_target {
            UnresolvedPolicy::Abort => return Err(PipelineError::UnresolvedTarget),
            UnresolvedPolicy::Defer => {
                log::warn!("continuing without a Rust target; the build step will fail");
                TargetSpec::unresolved()
            }
        },
    };

    let wrapper = aggregate(layout, &projects, runner)?;
    for feature in &config.features {
        match select_feature(&wrapper, feature) {
            Ok(true) => log::info!("enabled feature '{feature}'"),
            Ok(false) => log::debug!("feature '{feature}' already enabled"),
            Err(e) => log::warn!("skipping feature '{feature}': {e}"),
        }
    }

    let sysroot = probe.sysroot().ok_or(PipelineError::SysrootUnavailable)?;
    let flags = RustFlags::for_target(&target, &config.profile.flags)
        .with_remaps(&path_remaps(&sysroot, layout));
    let command = CargoCommand::new(&target, layout.output_dir());
    let invocation = build_invocation(&command, &flags, wrapper.dir(), &config.rtt_root);
    invoke(&invocation, runner)?;

    let archive = install_artifact(layout, &target)?;
    Ok(BuildResult::Success(BuildArtifact {
        archive,
        target,
        applications: projects.into_iter().map(|p| p.name).collect(),
        command: invocation,
        link: LinkDirectives::for_layout(layout),
    }))
}
