//! Command-line configuration and ring assembly.

use crate::commands::Command;
use anyhow::{Context, Result};
use clap::Parser;
use corelib::{HashRing, NodeSpec, PartitionerKind, RingConfig};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Inspect key placement on a consistent hash ring.
#[derive(Debug, Parser)]
#[command(name = "ringctl", version)]
pub struct CliConfig {
    /// JSON ring config (`{"replicas": 160, "partitioner": "xxh3"}`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Vnodes per node at weight 100; overrides the config file.
    #[arg(long, global = true)]
    pub replicas: Option<usize>,

    /// Hash function: xxh3 or sip13; overrides the config file.
    #[arg(long, global = true)]
    pub partitioner: Option<PartitionerKind>,

    /// Node to place on the ring, as `name` or `name:weight`. Repeatable.
    #[arg(long = "node", short = 'n', global = true)]
    pub nodes: Vec<NodeSpec>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log ring mutations at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);

        let ring = self.build_ring()?;
        debug!(?ring, "ring ready");

        let result = self.command.execute(&ring);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{result}");
        }
        Ok(())
    }

    /// Resolve the effective ring settings: file first, then flags.
    pub fn ring_config(&self) -> Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RingConfig::default(),
        };
        if let Some(replicas) = self.replicas {
            config.replicas = replicas;
        }
        if let Some(partitioner) = self.partitioner {
            config.partitioner = partitioner;
        }
        Ok(config)
    }

    pub fn build_ring(&self) -> Result<HashRing> {
        let config = self.ring_config()?;
        let ring = self
            .nodes
            .iter()
            .cloned()
            .fold(config.builder::<String>(), |builder, spec| builder.add_spec(spec))
            .build();
        Ok(ring)
    }
}

fn load_config(path: &Path) -> Result<RingConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading ring config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing ring config {}", path.display()))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when run from tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
