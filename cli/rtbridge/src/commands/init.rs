//! `rtbridge init`: configuration scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::{RtbridgeConfig, CONFIG_FILE};

/// Write a template `rtbridge.toml` into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    fs::write(&path, RtbridgeConfig::template())
        .with_context(|| format!("writing {}", path.display()))?;

    let apps = dir.join("apps");
    fs::create_dir_all(&apps).with_context(|| format!("creating {}", apps.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("  {}", path.display());
    println!("  {}/", apps.display());
    Ok(())
}
