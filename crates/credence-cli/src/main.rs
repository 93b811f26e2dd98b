//! Credence CLI - consolidate and trust-grade extracted assertions.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use credence_cli::{commands, Cli, Command, Config, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => Config::default(),
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Consolidate(args) => {
            commands::execute_consolidate(args, &config, &formatter)?;
        }
        Command::Promote(args) => {
            commands::execute_promote(args, &config, &formatter)?;
        }
        Command::Value(args) => {
            commands::execute_value(args, &formatter)?;
        }
    }

    Ok(())
}
