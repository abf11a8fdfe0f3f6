//! Extraction of architecture hints from a raw C compiler flag string.

use serde::Serialize;

/// Architecture-relevant options found in the host's C compiler flags.
///
/// When an option appears more than once the last occurrence wins, as it
/// does for the compiler itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompilerFlags {
    /// The unparsed flag string.
    #[serde(skip)]
    pub raw: String,
    /// `-march=` value (e.g. `rv64imafdc`).
    pub march: Option<String>,
    /// `-mabi=` value (e.g. `lp64d`).
    pub mabi: Option<String>,
    /// `-mcpu=` value (e.g. `cortex-m4`).
    pub mcpu: Option<String>,
    /// `-mfpu=` value (e.g. `fpv4-sp-d16`).
    pub mfpu: Option<String>,
    /// `-mfloat-abi=` value (`soft`, `softfp` or `hard`).
    pub float_abi: Option<String>,
}

impl CompilerFlags {
    /// Parse a whitespace-separated flag string.
    pub fn parse(cflags: &str) -> Self {
        let mut flags = CompilerFlags {
            raw: cflags.to_string(),
            ..Default::default()
        };
        for token in cflags.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            let slot = match key {
                "-march" => &mut flags.march,
                "-mabi" => &mut flags.mabi,
                "-mcpu" => &mut flags.mcpu,
                "-mfpu" => &mut flags.mfpu,
                "-mfloat-abi" => &mut flags.float_abi,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        flags
    }

    /// Register width implied by `-march`, if any.
    pub fn march_bits(&self) -> Option<u32> {
        let march = self.march.as_deref()?;
        if march.contains("rv32") {
            Some(32)
        } else if march.contains("rv64") {
            Some(64)
        } else {
            None
        }
    }

    /// Whether the `-march` ISA string includes the F or D extension.
    ///
    /// Only the single-letter base portion (before the first `_`) is
    /// considered; `g` implies both.
    pub fn march_has_float(&self) -> bool {
        let Some(march) = self.march.as_deref() else {
            return false;
        };
        let base = march.split('_').next().unwrap_or_default();
        let letters = base
            .strip_prefix("rv32")
            .or_else(|| base.strip_prefix("rv64"))
            .unwrap_or(base);
        letters.chars().any(|c| matches!(c, 'f' | 'd' | 'g'))
    }

    /// Whether `-mabi` declares a hard-float calling convention.
    ///
    /// `None` when no ABI was given at all.
    pub fn abi_declares_float(&self) -> Option<bool> {
        self.mabi
            .as_deref()
            .map(|abi| abi.ends_with('f') || abi.ends_with('d'))
    }

    /// Whether `-mfloat-abi=hard` was requested.
    pub fn hard_float_abi(&self) -> bool {
        self.float_abi.as_deref() == Some("hard")
    }

    /// The raw `-march=`/`-mabi=` tokens, in order of appearance.
    pub fn arch_tokens(&self) -> impl Iterator<Item = &str> {
        self.raw
            .split_whitespace()
            .filter(|t| t.starts_with("-march=") || t.starts_with("-mabi="))
    }
}
