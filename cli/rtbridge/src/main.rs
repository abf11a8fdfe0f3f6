//! rtbridge CLI: folds Rust applications into one static archive for an
//! RT-Thread BSP build.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use rtbridge_toolchain::SystemRunner;

use config::RtbridgeConfig;

#[derive(Parser)]
#[command(name = "rtbridge", version, about = "Rust application builds for RT-Thread")]
struct Cli {
    /// Enable debug logging (overridden by RTBRIDGE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template rtbridge.toml in the current directory
    Init {
        /// Overwrite an existing rtbridge.toml
        #[arg(long)]
        force: bool,
    },
    /// Build all applications into librust.a
    Build {
        #[command(flatten)]
        host: HostArgs,
    },
    /// Remove the wrapper crate and build output
    Clean,
    /// Check toolchain and project status
    Doctor {
        #[command(flatten)]
        host: HostArgs,
    },
    /// Show the architecture profile and resolved Rust target
    Target {
        #[command(flatten)]
        host: HostArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Overrides for the `[host]` section of rtbridge.toml.
#[derive(Args)]
struct HostArgs {
    /// Enabled configuration symbol (repeatable; replaces the configured list)
    #[arg(long = "symbol", value_name = "SYMBOL")]
    symbols: Vec<String>,
    /// C compiler flags
    #[arg(long, allow_hyphen_values = true)]
    cflags: Option<String>,
    /// Architecture name
    #[arg(long)]
    arch: Option<String>,
}

impl HostArgs {
    fn apply(&self, config: &mut RtbridgeConfig) {
        config.apply_overrides(&self.symbols, self.cflags.as_deref(), self.arch.as_deref());
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("RTBRIDGE_LOG", default))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let runner = SystemRunner;

    match cli.command {
        Commands::Init { force } => commands::init::run(&cwd, force),

        Commands::Build { host } => {
            let (mut config, root) = load_config(&cwd)?;
            host.apply(&mut config);
            let env_root = std::env::var_os("RTT_ROOT").map(PathBuf::from);
            commands::build::run(&config, &root, env_root, &runner)
        }

        Commands::Clean => {
            let (config, root) = load_config(&cwd)?;
            commands::clean::run(&config.layout(&root))
        }

        Commands::Doctor { host } => {
            let (mut config, root) = load_config(&cwd)?;
            host.apply(&mut config);
            commands::doctor::run(&config, &root, &runner)
        }

        Commands::Target { host, json } => {
            let (mut config, _) = load_config(&cwd)?;
            host.apply(&mut config);
            commands::target::run(&config, json)
        }
    }
}

/// Load rtbridge.toml from the current directory upward, falling back to
/// defaults rooted at `cwd` when there is none.
fn load_config(cwd: &Path) -> anyhow::Result<(RtbridgeConfig, PathBuf)> {
    match RtbridgeConfig::find_and_load(cwd)? {
        Some((config, dir)) => Ok((config, dir)),
        None => {
            log::debug!("no {} found; using defaults", config::CONFIG_FILE);
            Ok((RtbridgeConfig::default(), cwd.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn host_overrides_parse() {
        let cli = Cli::try_parse_from([
            "rtbridge",
            "target",
            "--symbol",
            "ARCH_RISCV64",
            "--symbol",
            "RT_USING_RUST",
            "--cflags",
            "-march=rv64gc -mabi=lp64d",
            "--json",
        ])
        .unwrap();
        let Commands::Target { host, json } = cli.command else {
            panic!("expected target command");
        };
        assert!(json);
        assert_eq!(host.symbols, vec!["ARCH_RISCV64", "RT_USING_RUST"]);
        assert_eq!(host.cflags.as_deref(), Some("-march=rv64gc -mabi=lp64d"));

        let mut config = RtbridgeConfig::default();
        host.apply(&mut config);
        assert!(config.is_enabled());
    }

    #[test]
    fn load_config_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, root) = load_config(dir.path()).unwrap();
        assert_eq!(root, dir.path());
        assert!(!config.is_enabled());
    }
}
