//! rustc flags for the wrapper build, including reproducible path remaps.

use std::fmt;
use std::path::{Path, PathBuf};

use rtbridge_project::ProjectLayout;
use rtbridge_targets::CompilerFlags;
use rtbridge_toolchain::TargetSpec;

/// Location of the core library sources inside a toolchain sysroot.
pub const CORE_SRC: &str = "lib/rustlib/src/rust/library/core";
/// Location of the alloc library sources inside a toolchain sysroot.
pub const ALLOC_SRC: &str = "lib/rustlib/src/rust/library/alloc";

/// One `--remap-path-prefix` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRemap {
    pub from: PathBuf,
    pub to: String,
}

impl PathRemap {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn to_flag(&self) -> String {
        format!("--remap-path-prefix={}={}", self.from.display(), self.to)
    }
}

/// The four remaps that keep host-specific absolute paths out of the archive:
/// core sources, alloc sources, the applications directory, and the package
/// directory hosting the wrapper and runtime crates.
pub fn path_remaps(sysroot: &Path, layout: &ProjectLayout) -> [PathRemap; 4] {
    [
        PathRemap::new(sysroot.join(CORE_SRC), "core"),
        PathRemap::new(sysroot.join(ALLOC_SRC), "alloc"),
        PathRemap::new(&layout.apps_dir, "apps"),
        PathRemap::new(&layout.package_dir, ""),
    ]
}

/// Ordered rustc flag tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RustFlags {
    tokens: Vec<String>,
}

impl RustFlags {
    /// Codegen flags for `target`.
    ///
    /// Every target gets `opt-level=z`, `panic=abort` and a static relocation
    /// model. RISC-V adds the medium code model, `link-dead-code`, and the
    /// host's `-march`/`-mabi` as link args. Thumb and AArch64 add
    /// `-nostartfiles`.
    pub fn for_target(target: &TargetSpec, cflags: &CompilerFlags) -> Self {
        let mut flags = RustFlags::default();
        flags.codegen("opt-level=z");
        flags.codegen("panic=abort");
        flags.codegen("relocation-model=static");

        let Some(triple) = target.triple else {
            return flags;
        };

        if triple.is_riscv() {
            flags.codegen("code-model=medium");
            flags.codegen("link-dead-code");
            for token in cflags.arch_tokens() {
                flags.codegen(format!("link-arg={token}"));
            }
        }
        if triple.is_thumb() || triple.is_aarch64() {
            flags.codegen("link-arg=-nostartfiles");
        }
        flags
    }

    /// Append the remap flags.
    pub fn with_remaps(mut self, remaps: &[PathRemap]) -> Self {
        self.tokens.extend(remaps.iter().map(PathRemap::to_flag));
        self
    }

    fn codegen(&mut self, option: impl Into<String>) {
        self.tokens.push("-C".to_string());
        self.tokens.push(option.into());
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Encoding for `CARGO_ENCODED_RUSTFLAGS`: tokens separated by `0x1f`, so
    /// paths containing spaces survive intact.
    pub fn encoded(&self) -> String {
        self.tokens.join("\x1f")
    }
}

impl fmt::Display for RustFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtbridge_targets::TargetTriple;

    fn flags_for(triple: TargetTriple, cflags: &str) -> Vec<String> {
        RustFlags::for_target(&TargetSpec::new(triple, true), &CompilerFlags::parse(cflags))
            .tokens()
            .to_vec()
    }

    const BASELINE: [&str; 6] = [
        "-C",
        "opt-level=z",
        "-C",
        "panic=abort",
        "-C",
        "relocation-model=static",
    ];

    #[test]
    fn riscv_extras() {
        let tokens = flags_for(
            TargetTriple::Riscv64Gc,
            "-O2 -march=rv64imafdc -mabi=lp64d -mcmodel=medany",
        );
        assert_eq!(tokens[..6], BASELINE);
        assert_eq!(
            tokens[6..],
            [
                "-C",
                "code-model=medium",
                "-C",
                "link-dead-code",
                "-C",
                "link-arg=-march=rv64imafdc",
                "-C",
                "link-arg=-mabi=lp64d",
            ]
        );
    }

    #[test]
    fn thumb_and_aarch64_suppress_startfiles() {
        for triple in [TargetTriple::Thumbv7emHf, TargetTriple::Aarch64SoftFloat] {
            let tokens = flags_for(triple, "-mcpu=cortex-m4");
            assert_eq!(tokens[..6], BASELINE);
            assert_eq!(tokens[6..], ["-C", "link-arg=-nostartfiles"]);
        }
    }

    #[test]
    fn armv7a_has_baseline_only() {
        assert_eq!(flags_for(TargetTriple::Armv7a, ""), BASELINE);
    }

    #[test]
    fn unresolved_target_has_baseline_only() {
        let flags = RustFlags::for_target(
            &TargetSpec::unresolved(),
            &CompilerFlags::parse("-march=rv64gc"),
        );
        assert_eq!(flags.tokens(), BASELINE);
    }

    #[test]
    fn remaps_cover_sources_apps_and_package() {
        let layout = ProjectLayout::new("/bsp/rust", "/bsp/apps");
        let remaps = path_remaps(Path::new("/toolchain"), &layout);
        let flags: Vec<_> = remaps.iter().map(PathRemap::to_flag).collect();
        assert_eq!(
            flags,
            vec![
                "--remap-path-prefix=/toolchain/lib/rustlib/src/rust/library/core=core",
                "--remap-path-prefix=/toolchain/lib/rustlib/src/rust/library/alloc=alloc",
                "--remap-path-prefix=/bsp/apps=apps",
                "--remap-path-prefix=/bsp/rust=",
            ]
        );
    }

    #[test]
    fn encoded_keeps_paths_with_spaces_whole() {
        let layout = ProjectLayout::new("/my bsp/rust", "/my bsp/apps");
        let flags = RustFlags::for_target(&TargetSpec::unresolved(), &CompilerFlags::default())
            .with_remaps(&path_remaps(Path::new("/tc"), &layout));
        let parts: Vec<_> = flags.encoded().split('\x1f').map(str::to_string).collect();
        assert_eq!(parts.len(), 10);
        assert_eq!(parts[8], "--remap-path-prefix=/my bsp/apps=apps");
        assert!(flags.to_string().starts_with("-C opt-level=z -C panic=abort"));
    }
}
