//! Resolution of an [`ArchProfile`] to a Rust target identifier.
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. ARM Cortex core table
//! 2. AArch64 (soft-float variant when requested)
//! 3. RISC-V, with the ABI suffix deciding hard vs soft float
//! 4. the host's raw architecture string
//! 5. the raw compiler flags
//!
//! No match yields `None`; the caller decides what to do about it.

use crate::flags::CompilerFlags;
use crate::profile::{ArchFamily, ArchProfile, CortexCore};
use crate::triple::TargetTriple;

/// Resolve `profile` to a target identifier, or `None` when no rule matches.
pub fn resolve_target(profile: &ArchProfile) -> Option<TargetTriple> {
    let triple = match profile.family {
        Some(ArchFamily::Arm) => profile.core.map(|core| cortex(core, profile.fpu.arm_hard_float)),
        Some(ArchFamily::Aarch64) => Some(if profile.fpu.soft_float_abi {
            TargetTriple::Aarch64SoftFloat
        } else {
            TargetTriple::Aarch64
        }),
        Some(family @ (ArchFamily::Riscv32 | ArchFamily::Riscv64)) => {
            let hard = riscv_hard_float(
                &profile.flags,
                profile.fpu.riscv_fpu || profile.flags.march_has_float(),
            );
            Some(riscv(family == ArchFamily::Riscv32, hard))
        }
        None => None,
    };

    let triple = triple
        .or_else(|| profile.raw_arch.as_deref().and_then(from_arch_string))
        .or_else(|| from_flags(&profile.flags));

    match triple {
        Some(t) => log::debug!("resolved target {t}"),
        None => log::debug!("no target rule matched profile {profile:?}"),
    }
    triple
}

fn cortex(core: CortexCore, hard_float: bool) -> TargetTriple {
    match core {
        CortexCore::M3 => TargetTriple::Thumbv7m,
        CortexCore::M4 | CortexCore::M7 if hard_float => TargetTriple::Thumbv7emHf,
        CortexCore::M4 | CortexCore::M7 => TargetTriple::Thumbv7em,
        CortexCore::M33 => TargetTriple::Thumbv8mMain,
        CortexCore::A => TargetTriple::Armv7a,
    }
}

/// The ABI suffix governs the calling convention: an ISA with F/D but a
/// soft-float ABI is still soft-float. Without an ABI, `fallback` decides.
fn riscv_hard_float(flags: &CompilerFlags, fallback: bool) -> bool {
    flags.abi_declares_float().unwrap_or(fallback)
}

fn riscv(is_32: bool, hard_float: bool) -> TargetTriple {
    match (is_32, hard_float) {
        (true, true) => TargetTriple::Riscv32Imafc,
        (true, false) => TargetTriple::Riscv32Imac,
        (false, true) => TargetTriple::Riscv64Gc,
        (false, false) => TargetTriple::Riscv64Imac,
    }
}

fn from_arch_string(arch: &str) -> Option<TargetTriple> {
    let arch = arch.to_lowercase();
    if arch.contains("aarch64") {
        Some(TargetTriple::Aarch64)
    } else if arch == "arm" || arch.contains("armv7") {
        Some(TargetTriple::Armv7a)
    } else if arch.contains("riscv32") {
        Some(TargetTriple::Riscv32Imac)
    } else if arch.contains("riscv64") || arch.contains("risc-v") {
        // bare "risc-v" is ambiguous; 64-bit is the common case
        Some(TargetTriple::Riscv64Imac)
    } else {
        None
    }
}

/// Cortex-M core named by `-mcpu`, ignoring `+ext` modifiers.
fn mcpu_core(mcpu: &str) -> Option<CortexCore> {
    let name = mcpu.split('+').next().unwrap_or_default();
    match name {
        "cortex-m3" => Some(CortexCore::M3),
        "cortex-m4" => Some(CortexCore::M4),
        "cortex-m7" => Some(CortexCore::M7),
        _ => None,
    }
}

fn from_flags(flags: &CompilerFlags) -> Option<TargetTriple> {
    if let Some(core) = flags.mcpu.as_deref().and_then(mcpu_core) {
        let hard = flags.mfpu.is_some() && flags.hard_float_abi();
        return Some(cortex(core, hard));
    }

    let hard = riscv_hard_float(flags, flags.march_has_float());
    match flags.march_bits() {
        Some(32) => Some(riscv(true, hard)),
        Some(64) => Some(riscv(false, hard)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolSet;

    fn resolve(symbols: &[&str], cflags: &str, arch: Option<&str>) -> Option<TargetTriple> {
        let symbols: SymbolSet = symbols.iter().copied().collect();
        resolve_target(&ArchProfile::detect(&symbols, cflags, arch))
    }

    fn resolve_str(symbols: &[&str], cflags: &str, arch: Option<&str>) -> Option<&'static str> {
        resolve(symbols, cflags, arch).map(TargetTriple::as_str)
    }

    #[test]
    fn riscv64_double_abi_is_gc() {
        assert_eq!(
            resolve_str(&["ARCH_RISCV64"], "-march=rv64imafdc -mabi=lp64d", None),
            Some("riscv64gc-unknown-none-elf")
        );
    }

    #[test]
    fn riscv64_soft_abi_overrides_isa_letters() {
        assert_eq!(
            resolve_str(&["ARCH_RISCV64"], "-march=rv64imafdc -mabi=lp64", None),
            Some("riscv64imac-unknown-none-elf")
        );
        // an FPU symbol does not override an explicit soft-float ABI either
        assert_eq!(
            resolve_str(&["ARCH_RISCV64", "ARCH_RISCV_FPU"], "-march=rv64gc -mabi=lp64", None),
            Some("riscv64imac-unknown-none-elf")
        );
    }

    #[test]
    fn riscv32_float_abi() {
        for abi in ["ilp32f", "ilp32d"] {
            let cflags = format!("-march=rv32imafc -mabi={abi}");
            assert_eq!(
                resolve_str(&["ARCH_RISCV32"], &cflags, None),
                Some("riscv32imafc-unknown-none-elf")
            );
        }
        assert_eq!(
            resolve_str(&["ARCH_RISCV32"], "-march=rv32imafc -mabi=ilp32", None),
            Some("riscv32imac-unknown-none-elf")
        );
    }

    #[test]
    fn riscv_without_abi_falls_back_to_fpu_hints() {
        assert_eq!(
            resolve_str(&["ARCH_RISCV64", "ENABLE_FPU"], "", None),
            Some("riscv64gc-unknown-none-elf")
        );
        assert_eq!(
            resolve_str(&["ARCH_RISCV64"], "-march=rv64imafdc", None),
            Some("riscv64gc-unknown-none-elf")
        );
        assert_eq!(
            resolve_str(&["ARCH_RISCV64"], "", None),
            Some("riscv64imac-unknown-none-elf")
        );
    }

    #[test]
    fn riscv_width_from_march_beats_symbol() {
        assert_eq!(
            resolve_str(&["ARCH_RISCV64"], "-march=rv32imac -mabi=ilp32", None),
            Some("riscv32imac-unknown-none-elf")
        );
    }

    #[test]
    fn cortex_m4_m7_float_abi() {
        for core in ["ARCH_ARM_CORTEX_M4", "ARCH_ARM_CORTEX_M7"] {
            assert_eq!(
                resolve_str(&["ARCH_ARM", core, "ARCH_ARM_FPU"], "", None),
                Some("thumbv7em-none-eabihf")
            );
            assert_eq!(
                resolve_str(&["ARCH_ARM", core], "-mfloat-abi=hard", None),
                Some("thumbv7em-none-eabihf")
            );
            assert_eq!(
                resolve_str(&["ARCH_ARM", core], "-mfloat-abi=soft", None),
                Some("thumbv7em-none-eabi")
            );
        }
    }

    #[test]
    fn cortex_fixed_table() {
        assert_eq!(
            resolve(&["ARCH_ARM", "ARCH_ARM_CORTEX_M3"], "", None),
            Some(TargetTriple::Thumbv7m)
        );
        assert_eq!(
            resolve(&["ARCH_ARM", "ARCH_ARM_CORTEX_M33", "ARCH_ARM_FPU"], "", None),
            Some(TargetTriple::Thumbv8mMain)
        );
        assert_eq!(
            resolve(&["ARCH_ARM", "ARCH_ARM_CORTEX_A"], "", None),
            Some(TargetTriple::Armv7a)
        );
    }

    #[test]
    fn aarch64_variants() {
        assert_eq!(resolve(&["ARCH_ARMV8"], "", None), Some(TargetTriple::Aarch64));
        assert_eq!(
            resolve(&["ARCH_AARCH64", "ARCH_CPU_FLOAT_ABI_SOFT"], "", None),
            Some(TargetTriple::Aarch64SoftFloat)
        );
    }

    #[test]
    fn arm_without_core_falls_through_to_aarch64() {
        assert_eq!(
            resolve(&["ARCH_ARM", "ARCH_ARM64"], "", None),
            Some(TargetTriple::Aarch64)
        );
    }

    #[test]
    fn arch_string_fallback() {
        assert_eq!(resolve(&[], "", Some("AArch64")), Some(TargetTriple::Aarch64));
        assert_eq!(resolve(&[], "", Some("arm")), Some(TargetTriple::Armv7a));
        assert_eq!(resolve(&[], "", Some("ARMv7-A")), Some(TargetTriple::Armv7a));
        assert_eq!(resolve(&[], "", Some("riscv32")), Some(TargetTriple::Riscv32Imac));
        assert_eq!(resolve(&[], "", Some("risc-v")), Some(TargetTriple::Riscv64Imac));
        assert_eq!(resolve(&[], "", Some("RISCV64")), Some(TargetTriple::Riscv64Imac));
        // "arm" must match exactly; "armv8" alone is not a known name
        assert_eq!(resolve(&[], "", Some("armv8")), None);
    }

    #[test]
    fn arch_string_beats_flags() {
        assert_eq!(
            resolve(&[], "-march=rv32imafc -mabi=ilp32f", Some("aarch64")),
            Some(TargetTriple::Aarch64)
        );
    }

    #[test]
    fn flags_fallback_cortex() {
        assert_eq!(resolve(&[], "-mcpu=cortex-m3", None), Some(TargetTriple::Thumbv7m));
        assert_eq!(
            resolve(&[], "-mcpu=cortex-m7 -mfpu=fpv5-d16 -mfloat-abi=hard", None),
            Some(TargetTriple::Thumbv7emHf)
        );
        // hard-float ABI without an FPU selection stays soft
        assert_eq!(
            resolve(&[], "-mcpu=cortex-m4 -mfloat-abi=hard", None),
            Some(TargetTriple::Thumbv7em)
        );
    }

    #[test]
    fn flags_fallback_cortex_with_extensions() {
        assert_eq!(
            resolve(&[], "-mcpu=cortex-m7+nofp.dp -mthumb", None),
            Some(TargetTriple::Thumbv7em)
        );
        assert_eq!(
            resolve(&[], "-mcpu=cortex-m4+nofp -mthumb", None),
            Some(TargetTriple::Thumbv7em)
        );
        assert_eq!(
            resolve(&[], "-mcpu=cortex-m7+nodsp -mfpu=fpv5-sp-d16 -mfloat-abi=hard", None),
            Some(TargetTriple::Thumbv7emHf)
        );
        assert_eq!(resolve(&[], "-mcpu=cortex-m3+nodsp", None), Some(TargetTriple::Thumbv7m));
        // cortex-m33 is not a cortex-m3
        assert_eq!(resolve(&[], "-mcpu=cortex-m33", None), None);
        assert_eq!(resolve(&[], "-mcpu=cortex-m33+nodsp", None), None);
    }

    #[test]
    fn flags_fallback_riscv_uses_abi_policy() {
        assert_eq!(
            resolve(&[], "-march=rv64imafdc -mabi=lp64", None),
            Some(TargetTriple::Riscv64Imac)
        );
        assert_eq!(
            resolve(&[], "-march=rv64imac -mabi=lp64d", None),
            Some(TargetTriple::Riscv64Gc)
        );
        assert_eq!(
            resolve(&[], "-march=rv32imafc", None),
            Some(TargetTriple::Riscv32Imafc)
        );
        assert_eq!(
            resolve(&[], "-march=rv32imac", None),
            Some(TargetTriple::Riscv32Imac)
        );
    }

    #[test]
    fn nothing_matches() {
        assert_eq!(resolve(&[], "", None), None);
        assert_eq!(resolve(&["RT_USING_SMP"], "-O2 -g", Some("x86")), None);
    }
}
