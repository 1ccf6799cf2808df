//! Gateway CLI
//!
//! Offline checks for transfer bundles and configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use gateway::memory::InMemoryStore;
use gateway::transfer::TransferCoordinator;
use gateway::{telemetry, GatewayConfig};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Gateway - section and topic relationship tooling")]
#[command(version)]
struct Cli {
  /// Configuration file (YAML or JSON)
  #[arg(short, long, global = true, env = "GATEWAY_CONFIG")]
  config: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Import a transfer bundle into an empty in-memory store to prove it is loadable
  Verify {
    /// Exported topics payload
    topics: PathBuf,
    /// Exported sections payload
    sections: PathBuf,
    /// Exported section topics payload
    section_topics: PathBuf,
  },
  /// Print the effective configuration
  Config,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = GatewayConfig::load(cli.config.as_deref())?;
  telemetry::init(&config, cli.verbose);

  match cli.command {
    Command::Verify { topics, sections, section_topics } => verify(&[topics, sections, section_topics]).await,
    Command::Config => {
      println!("{}", serde_yaml::to_string(&config)?);
      Ok(())
    }
  }
}

async fn verify(paths: &[PathBuf]) -> Result<()> {
  let payloads = paths.iter().map(|path| read_payload(path)).collect::<Result<Vec<_>>>()?;

  let store = InMemoryStore::new();
  let coordinator = TransferCoordinator::new(store.sections(), store.topics(), store.section_topics());

  if let Err(e) = coordinator.import(payloads).await {
    eprintln!("{} {}", "✗".red().bold(), "Bundle could not be imported".red());
    return Err(e.into());
  }

  let state = store.snapshot().await;
  println!("{} {}", "✓".green().bold(), "Bundle imports cleanly".green());
  println!("  {:<16} {}", "topics".cyan(), state.topics.len());
  println!("  {:<16} {}", "sections".cyan(), state.sections.len());
  println!("  {:<16} {}", "section topics".cyan(), state.section_topics.len());
  Ok(())
}

fn read_payload(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
