//! Bare-metal Rust target identifiers.

use std::fmt;

use serde::{Serialize, Serializer};

/// A Rust target identifier this crate can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetTriple {
    Thumbv7m,
    Thumbv7em,
    Thumbv7emHf,
    Thumbv8mMain,
    Armv7a,
    Aarch64,
    Aarch64SoftFloat,
    Riscv32Imac,
    Riscv32Imafc,
    Riscv64Imac,
    Riscv64Gc,
}

impl TargetTriple {
    /// The canonical identifier passed to `--target`.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetTriple::Thumbv7m => "thumbv7m-none-eabi",
            TargetTriple::Thumbv7em => "thumbv7em-none-eabi",
            TargetTriple::Thumbv7emHf => "thumbv7em-none-eabihf",
            TargetTriple::Thumbv8mMain => "thumbv8m.main-none-eabi",
            TargetTriple::Armv7a => "armv7a-none-eabi",
            TargetTriple::Aarch64 => "aarch64-unknown-none",
            TargetTriple::Aarch64SoftFloat => "aarch64-unknown-none-softfloat",
            TargetTriple::Riscv32Imac => "riscv32imac-unknown-none-elf",
            TargetTriple::Riscv32Imafc => "riscv32imafc-unknown-none-elf",
            TargetTriple::Riscv64Imac => "riscv64imac-unknown-none-elf",
            TargetTriple::Riscv64Gc => "riscv64gc-unknown-none-elf",
        }
    }

    /// RISC-V 32 or 64.
    pub fn is_riscv(self) -> bool {
        matches!(
            self,
            TargetTriple::Riscv32Imac
                | TargetTriple::Riscv32Imafc
                | TargetTriple::Riscv64Imac
                | TargetTriple::Riscv64Gc
        )
    }

    /// Thumb (Cortex-M) targets.
    pub fn is_thumb(self) -> bool {
        matches!(
            self,
            TargetTriple::Thumbv7m
                | TargetTriple::Thumbv7em
                | TargetTriple::Thumbv7emHf
                | TargetTriple::Thumbv8mMain
        )
    }

    pub fn is_aarch64(self) -> bool {
        matches!(self, TargetTriple::Aarch64 | TargetTriple::Aarch64SoftFloat)
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TargetTriple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
