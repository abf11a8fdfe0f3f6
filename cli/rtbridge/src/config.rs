//! `rtbridge.toml` parsing and project configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rtbridge_build::{PipelineConfig, UnresolvedPolicy};
use rtbridge_project::ProjectLayout;
use rtbridge_targets::{ArchProfile, ConfigSymbols, SymbolSet};
use serde::{Deserialize, Serialize};

/// File name searched for from the current directory upward.
pub const CONFIG_FILE: &str = "rtbridge.toml";

/// The top-level configuration of an rtbridge project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RtbridgeConfig {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

/// What the host build knows about the hardware.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HostConfig {
    /// Enabled configuration symbols.
    #[serde(default)]
    pub symbols: SymbolSet,
    /// Raw C compiler flags.
    #[serde(default)]
    pub cflags: String,
    /// Free-form architecture name (e.g. `risc-v`).
    #[serde(default)]
    pub arch: Option<String>,
    /// Root of the RT-Thread source tree.
    #[serde(default)]
    pub rtt_root: Option<PathBuf>,
}

/// Directory layout, relative to the directory holding `rtbridge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutConfig {
    #[serde(default = "default_package_dir")]
    pub package_dir: PathBuf,
    #[serde(default = "default_apps_dir")]
    pub apps_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            package_dir: default_package_dir(),
            apps_dir: default_apps_dir(),
        }
    }
}

fn default_package_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_apps_dir() -> PathBuf {
    PathBuf::from("apps")
}

/// Build switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Symbol that switches the Rust integration on.
    #[serde(default = "default_enable_symbol")]
    pub enable_symbol: String,
    /// Features always enabled on the wrapper crate.
    #[serde(default)]
    pub features: Vec<String>,
    /// Symbol -> feature enabled when the symbol is set.
    #[serde(default = "default_feature_rules")]
    pub feature_rules: BTreeMap<String, String>,
    #[serde(default)]
    pub unresolved_target: UnresolvedPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            enable_symbol: default_enable_symbol(),
            features: Vec::new(),
            feature_rules: default_feature_rules(),
            unresolved_target: UnresolvedPolicy::default(),
        }
    }
}

fn default_enable_symbol() -> String {
    "RT_USING_RUST".to_string()
}

fn default_feature_rules() -> BTreeMap<String, String> {
    BTreeMap::from([("RT_USING_SMP".to_string(), "smp".to_string())])
}

impl RtbridgeConfig {
    /// Search upward from `start_dir` for `rtbridge.toml`, parse it and return
    /// it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: RtbridgeConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing rtbridge.toml")
    }

    /// Replace host values with command-line overrides. Any `--symbol`
    /// replaces the configured symbol list.
    pub fn apply_overrides(
        &mut self,
        symbols: &[String],
        cflags: Option<&str>,
        arch: Option<&str>,
    ) {
        if !symbols.is_empty() {
            self.host.symbols = symbols.iter().cloned().collect();
        }
        if let Some(cflags) = cflags {
            self.host.cflags = cflags.to_string();
        }
        if let Some(arch) = arch {
            self.host.arch = Some(arch.to_string());
        }
    }

    pub fn profile(&self) -> ArchProfile {
        ArchProfile::detect(&self.host.symbols, &self.host.cflags, self.host.arch.as_deref())
    }

    pub fn is_enabled(&self) -> bool {
        self.host.symbols.has(&self.build.enable_symbol)
    }

    /// Explicit features followed by rule-enabled ones, without duplicates.
    pub fn features(&self) -> Vec<String> {
        let ruled = self
            .build
            .feature_rules
            .iter()
            .filter(|(symbol, _)| self.host.symbols.has(symbol))
            .map(|(_, feature)| feature);

        let mut features: Vec<String> = Vec::new();
        for feature in self.build.features.iter().chain(ruled) {
            if !features.contains(feature) {
                features.push(feature.clone());
            }
        }
        features
    }

    /// Absolute layout, with relative paths taken from `root`.
    pub fn layout(&self, root: &Path) -> ProjectLayout {
        ProjectLayout::new(
            absolute(root, &self.layout.package_dir),
            absolute(root, &self.layout.apps_dir),
        )
    }

    /// The configured RT-Thread root, else `env_root`, else `root`.
    pub fn rtt_root(&self, root: &Path, env_root: Option<PathBuf>) -> PathBuf {
        match (&self.host.rtt_root, env_root) {
            (Some(configured), _) => absolute(root, configured),
            (None, Some(env)) => env,
            (None, None) => root.to_path_buf(),
        }
    }

    pub fn pipeline_config(&self, root: &Path, env_root: Option<PathBuf>) -> PipelineConfig {
        PipelineConfig {
            layout: self.layout(root),
            profile: self.profile(),
            rtt_root: self.rtt_root(root, env_root),
            features: self.features(),
            unresolved_target: self.build.unresolved_target,
            enabled: self.is_enabled(),
        }
    }

    /// Generate the default template for `rtbridge init`.
    pub fn template() -> String {
        r#"[host]
# Configuration symbols enabled in the BSP (rtconfig.h).
symbols = ["RT_USING_RUST", "ARCH_RISCV64"]
cflags = "-march=rv64imafdc -mabi=lp64d -mcmodel=medany"
# rtt-root = "../../rt-thread"

[layout]
package-dir = "."
apps-dir = "apps"

[build]
enable-symbol = "RT_USING_RUST"
features = []
unresolved-target = "defer"

[build.feature-rules]
RT_USING_SMP = "smp"
"#
        .to_string()
    }
}

fn absolute(root: &Path, path: &Path) -> PathBuf {
    root.join(path).components().collect()
}
