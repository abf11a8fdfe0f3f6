//! `rtbridge target`: architecture profile and target resolution.

use anyhow::{Context, Result};
use rtbridge_targets::{resolve_target, ArchProfile, TargetTriple};
use serde::Serialize;

use crate::config::RtbridgeConfig;

/// The derived profile together with what it resolves to.
#[derive(Debug, Serialize)]
pub struct TargetReport {
    pub profile: ArchProfile,
    pub target: Option<TargetTriple>,
}

impl TargetReport {
    pub fn new(config: &RtbridgeConfig) -> Self {
        let profile = config.profile();
        let target = resolve_target(&profile);
        Self { profile, target }
    }
}

pub fn run(config: &RtbridgeConfig, json: bool) -> Result<()> {
    let report = TargetReport::new(config);
    if json {
        let text = serde_json::to_string_pretty(&report).context("serializing target report")?;
        println!("{text}");
        return Ok(());
    }

    let profile = &report.profile;
    println!("=== Architecture profile ===");
    println!("  Family: {}", profile.family.map_or("none".to_string(), |f| format!("{f:?}")));
    if let Some(core) = profile.core {
        println!("  Core:   Cortex-{core:?}");
    }
    if let Some(bits) = profile.bits {
        println!("  Bits:   {bits}");
    }
    if let Some(abi) = &profile.abi {
        println!("  ABI:    {abi}");
    }
    if let Some(march) = &profile.flags.march {
        println!("  March:  {march}");
    }
    println!(
        "  FPU:    arm-hard-float={} soft-float-abi={} riscv-fpu={}",
        profile.fpu.arm_hard_float, profile.fpu.soft_float_abi, profile.fpu.riscv_fpu
    );
    println!();
    match report.target {
        Some(triple) => println!("Rust target: {triple}"),
        None => println!("Rust target: unresolved"),
    }
    Ok(())
}
