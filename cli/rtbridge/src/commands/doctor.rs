//! `rtbridge doctor`: toolchain diagnostics.

use std::path::Path;

use anyhow::Result;
use rtbridge_targets::resolve_target;
use rtbridge_toolchain::{ProcessRunner, ToolchainProbe};

use crate::config::RtbridgeConfig;

/// Print toolchain and project diagnostic information.
pub fn run<R: ProcessRunner + ?Sized>(
    config: &RtbridgeConfig,
    root: &Path,
    runner: &R,
) -> Result<()> {
    let probe = ToolchainProbe::new(runner);

    println!("=== rtbridge doctor ===");
    println!();
    println!("rtbridge version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Toolchain ---");
    for tool in ["rustc", "cargo", "rustup"] {
        match probe.version(tool) {
            Some(version) => println!("  {tool}: {version}"),
            None => println!("  {tool}: not found"),
        }
    }
    match probe.sysroot() {
        Some(sysroot) => println!("  sysroot: {}", sysroot.display()),
        None => println!("  sysroot: unavailable"),
    }
    println!();

    println!("--- Project ---");
    let layout = config.layout(root);
    println!("  Package dir: {}", layout.package_dir.display());
    println!("  Apps dir:    {}", layout.apps_dir.display());
    println!(
        "  Rust integration: {}",
        if config.is_enabled() {
            "enabled".to_string()
        } else {
            format!("disabled ({} not set)", config.build.enable_symbol)
        }
    );
    match rtbridge_project::discover(&layout.apps_dir) {
        Ok(apps) if apps.is_empty() => println!("  Applications: none"),
        Ok(apps) => {
            println!("  Applications:");
            for app in apps {
                println!("    {} ({})", app.name, app.dir.display());
            }
        }
        Err(e) => println!("  Applications: error: {e}"),
    }
    println!();

    println!("--- Target ---");
    let symbols = config.host.symbols.iter().collect::<Vec<_>>();
    if symbols.is_empty() {
        println!("  Symbols: none");
    } else {
        println!("  Symbols: {}", symbols.join(", "));
    }
    match resolve_target(&config.profile()) {
        Some(triple) => {
            println!("  Resolved: {triple}");
            let std = if probe.has_prebuilt_std(triple.as_str()) {
                "installed"
            } else {
                "missing (core and alloc are built from source)"
            };
            println!("  Prebuilt std: {std}");
        }
        None => println!("  Resolved: none (check [host] symbols and cflags)"),
    }

    Ok(())
}
