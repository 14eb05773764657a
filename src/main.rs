use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;

mod bootstrap;
mod bundle;
mod cli;
mod commands;
mod config;
mod error;

use cli::{Cli, Commands, OutputFormat};
use config::{Config, LogLevel};

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    let log_level = if verbose { LogLevel::Debug } else { config.log_level };

    // RUST_LOG env var takes precedence, otherwise use --verbose / config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(match log_level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        });
    }

    match &config.log_file {
        Some(path) => {
            let log_file = Config::expand_path(path);
            if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("Failed to create log directory")?;
            }
            let target = Box::new(
                fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&log_file)
                    .context("Failed to open log file")?,
            );
            builder.target(env_logger::Target::Pipe(target)).init();
            info!("Logging initialized, writing to: {}", log_file.display());
        }
        None => {
            builder.target(env_logger::Target::Stderr).init();
        }
    }

    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else if verbose { "--verbose" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        None => commands::build::run(false, &config, quiet),
        Some(Commands::Build { dry_run }) => commands::build::run(dry_run, &config, quiet),
        Some(Commands::Bootstrap(args)) => commands::bootstrap::run(args, &config, quiet),
        Some(Commands::Bundle(args)) => commands::bundle::run(args, &config, quiet),
        Some(Commands::Check { format }) => commands::check::run(OutputFormat::resolve(format), &config),
        Some(Commands::Config { action }) => commands::config::run(action, &config),
        Some(Commands::Completions { shell }) => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration before logging; skipped config files are reported below
    let (config, skipped) = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config, cli.verbose).context("Failed to setup logging")?;

    for message in &skipped {
        eprintln!("{} {}", "⚠".yellow(), message);
        if config.log_file.is_some() {
            warn!("{}", message);
        }
    }

    info!("Starting ammbuild with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")
}
