//! secplus_gdo configuration resolver
//!
//! Loads a device configuration, resolves its secplus_gdo declarations and
//! prints what would be registered on each opener root.
//!
//! # Usage
//!
//! ```bash
//! # Resolve garage.yaml in the current directory
//! secplus-gdo garage.yaml
//!
//! # Resolve from a config directory and print JSON
//! secplus-gdo --config-dir /config --format json garage.yaml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gdo_config::ConfigDocument;
use gdo_resolver::{resolve_document, ClosedSet, GdoComponent, Resolution};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Resolve the secplus_gdo part of a device configuration
#[derive(Parser, Debug)]
#[command(name = "secplus-gdo")]
#[command(version)]
#[command(about = "Resolve secplus_gdo garage door opener declarations", long_about = None)]
struct Args {
    /// Configuration file, relative to the config directory
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Directory holding the configuration and secrets.yaml
    #[arg(short, long, default_value = ".")]
    config_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_root(root: &GdoComponent) {
    let settings = &root.settings;
    println!("{}", root.id);
    println!(
        "  uart: tx={} rx={} (inverted: {})",
        settings.uart_tx_pin, settings.uart_rx_pin, settings.invert_uart
    );
    if let Some(pin) = settings.obstruction_input_pin {
        println!("  obstruction input: {}", pin);
    }
    println!(
        "  obstruction from status: {}, auto start: {}",
        settings.obstruction_from_status, settings.auto_start
    );
    println!(
        "  min command interval: {}, sync retry interval: {}",
        settings.min_command_interval, settings.sync_retry_interval
    );
    for record in root.registrations() {
        println!(
            "  {:<40} {:<14} {}",
            record.method,
            record.platform.as_str(),
            record.entity
        );
    }
}

fn print_text(resolution: &Resolution) {
    for root in resolution.roots.values() {
        print_root(root);
    }
    for script in &resolution.scripts {
        let actions = script
            .then
            .bound_actions()
            .iter()
            .map(|action| format!("{}({})", action.command.as_str(), action.target))
            .collect::<Vec<_>>();
        println!("script {}: {}", script.id, actions.join(", "));
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let document = ConfigDocument::load(args.config_dir.clone(), &args.file)
        .with_context(|| format!("Failed to load {:?} from {:?}", args.file, args.config_dir))?;
    let resolution = resolve_document(&document)
        .with_context(|| format!("Failed to resolve {:?}", args.file))?;

    info!(
        "Resolved {} root(s) from {:?}",
        resolution.roots.len(),
        args.file
    );

    match args.format {
        Format::Text => print_text(&resolution),
        Format::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
    }

    Ok(())
}
