//! mdminecraft-protocol - inspect the item component and particle registries
//!
//! Builds both catalogs once, then lists them or encodes particle payloads.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ProtocolConfig;
use mdminecraft_net::ProtocolRegistries;
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, reload, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect mdminecraft protocol registries", long_about = None)]
struct Args {
    /// Configuration file (defaults to config/protocol.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List item components with their ids and channels
    Components,
    /// List particle types with their ids and payload kinds
    Particles,
    /// Print a particle prototype's payload bytes as hex
    Encode {
        /// Particle name, e.g. `dust` or `minecraft:vibration`
        name: String,
    },
    /// Write the effective configuration back to the config path
    WriteConfig,
}

fn main() -> Result<()> {
    // WARN by default; RUST_LOG wins over the config file's filter.
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_override = from_env.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("warn")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ProtocolConfig::load_from_path(path),
        None => ProtocolConfig::load(),
    };
    if !env_override {
        match EnvFilter::try_new(&config.log_filter) {
            Ok(filter) => {
                if let Err(err) = filter_handle.reload(filter) {
                    warn!("Failed to apply log filter: {err}");
                }
            }
            Err(err) => warn!("Ignoring log_filter {:?}: {err}", config.log_filter),
        }
    }

    info!("Starting mdminecraft-protocol v{}", env!("CARGO_PKG_VERSION"));

    let output = match &args.command {
        Command::Components => commands::render_components(&*registries()?, &config)?,
        Command::Particles => commands::render_particles(&*registries()?, &config)?,
        Command::Encode { name } => {
            let encoded = commands::encode_particle(&*registries()?, &config, name)
                .with_context(|| format!("encoding {name}"))?;
            commands::render_encoded(&encoded, &config)?
        }
        Command::WriteConfig => {
            let path = args
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
            config.save_to_path(&path)?;
            format!("wrote {}", path.display())
        }
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn registries() -> Result<Arc<ProtocolRegistries>> {
    ProtocolRegistries::vanilla().context("building protocol registries")
}
