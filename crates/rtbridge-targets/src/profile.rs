//! Architecture profile derived from host configuration.

use serde::Serialize;

use crate::flags::CompilerFlags;
use crate::symbols::ConfigSymbols;

const AARCH64_SYMBOLS: &[&str] = &["ARCH_AARCH64", "ARCH_ARMV8", "ARCH_ARM64"];
const ARM_FPU_SYMBOLS: &[&str] = &["ARCH_ARM_FPU", "ARCH_FPU_VFP"];
const RISCV_FPU_SYMBOLS: &[&str] = &["ARCH_RISCV_FPU", "ENABLE_FPU"];

/// Architecture family selected from configuration symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchFamily {
    /// 32-bit ARM with a recognised Cortex core.
    Arm,
    Aarch64,
    Riscv32,
    Riscv64,
}

/// Cortex core variant for the [`ArchFamily::Arm`] family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CortexCore {
    M3,
    M4,
    M7,
    M33,
    /// Any Cortex-A core.
    A,
}

impl CortexCore {
    /// Detect the core from `ARCH_ARM_CORTEX_*` symbols. First match wins.
    fn detect(symbols: &impl ConfigSymbols) -> Option<Self> {
        [
            ("ARCH_ARM_CORTEX_M3", CortexCore::M3),
            ("ARCH_ARM_CORTEX_M4", CortexCore::M4),
            ("ARCH_ARM_CORTEX_M7", CortexCore::M7),
            ("ARCH_ARM_CORTEX_M33", CortexCore::M33),
            ("ARCH_ARM_CORTEX_A", CortexCore::A),
        ]
        .into_iter()
        .find(|(symbol, _)| symbols.has(symbol))
        .map(|(_, core)| core)
    }
}

/// Floating-point hints collected from symbols and flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FpuFlags {
    /// ARM: `-mfloat-abi=hard`, `ARCH_ARM_FPU` or `ARCH_FPU_VFP`.
    pub arm_hard_float: bool,
    /// AArch64: `ARCH_CPU_FLOAT_ABI_SOFT`.
    pub soft_float_abi: bool,
    /// RISC-V: `ARCH_RISCV_FPU` or `ENABLE_FPU`.
    pub riscv_fpu: bool,
}

/// Everything the resolver needs to know about the hardware.
///
/// Built once per invocation with [`ArchProfile::detect`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArchProfile {
    pub family: Option<ArchFamily>,
    pub core: Option<CortexCore>,
    /// ABI string from `-mabi`, if given.
    pub abi: Option<String>,
    /// Register width. For RISC-V `-march` takes precedence over the symbols.
    pub bits: Option<u32>,
    pub fpu: FpuFlags,
    pub flags: CompilerFlags,
    /// Free-form architecture name from the host (e.g. `risc-v`).
    pub raw_arch: Option<String>,
}

impl ArchProfile {
    /// Derive a profile from host symbols, raw compiler flags, and an
    /// optional architecture string.
    ///
    /// Family priority follows resolution priority: ARM with a recognised
    /// core, then AArch64, then RISC-V. ARM without a recognised core gets
    /// no family and is left to the fallback rules.
    pub fn detect(symbols: &impl ConfigSymbols, cflags: &str, raw_arch: Option<&str>) -> Self {
        let flags = CompilerFlags::parse(cflags);

        let core = if symbols.has("ARCH_ARM") {
            CortexCore::detect(symbols)
        } else {
            None
        };

        let family = if core.is_some() {
            Some(ArchFamily::Arm)
        } else if symbols.has_any(AARCH64_SYMBOLS) {
            Some(ArchFamily::Aarch64)
        } else if symbols.has("ARCH_RISCV32") || symbols.has("ARCH_RISCV64") {
            let bits = flags
                .march_bits()
                .unwrap_or(if symbols.has("ARCH_RISCV32") { 32 } else { 64 });
            Some(if bits == 32 {
                ArchFamily::Riscv32
            } else {
                ArchFamily::Riscv64
            })
        } else {
            None
        };

        let bits = match family {
            Some(ArchFamily::Arm) | Some(ArchFamily::Riscv32) => Some(32),
            Some(ArchFamily::Aarch64) | Some(ArchFamily::Riscv64) => Some(64),
            None => flags.march_bits(),
        };

        let fpu = FpuFlags {
            arm_hard_float: flags.raw.contains("-mfloat-abi=hard")
                || symbols.has_any(ARM_FPU_SYMBOLS),
            soft_float_abi: symbols.has("ARCH_CPU_FLOAT_ABI_SOFT"),
            riscv_fpu: symbols.has_any(RISCV_FPU_SYMBOLS),
        };

        ArchProfile {
            family,
            core,
            abi: flags.mabi.clone(),
            bits,
            fpu,
            flags,
            raw_arch: raw_arch.map(str::to_string),
        }
    }
}
