use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "gsv")]
#[command(about = "Storage contract scheduling and valuation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a contract and value it against the configured price model
    Value {
        /// Layered config paths in merge order (base -> overrides)
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        /// Write run artifacts under <out>/<run_id>/
        #[arg(long)]
        out: Option<PathBuf>,

        /// Treat unused config keys as an error instead of a warning
        #[arg(long, default_value_t = false)]
        strict_keys: bool,
    },

    /// Simulate a contract and print its inventory trajectory
    Schedule {
        /// Layered config paths in merge order (base -> overrides)
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        /// Write run artifacts under <out>/<run_id>/
        #[arg(long)]
        out: Option<PathBuf>,

        /// Treat unused config keys as an error instead of a warning
        #[arg(long, default_value_t = false)]
        strict_keys: bool,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Value {
            config_paths,
            out,
            strict_keys,
        } => commands::value::run(&config_paths, out.as_deref(), strict_keys),
        Commands::Schedule {
            config_paths,
            out,
            strict_keys,
        } => commands::schedule::run(&config_paths, out.as_deref(), strict_keys),
        Commands::ConfigHash { paths } => {
            let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = gsv_config::load_layered_yaml(&refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr; stdout carries only key=value output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
