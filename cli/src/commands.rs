pub mod probe;
pub mod regions;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use latmap_common::{catalog::Catalog, config, geo::Coordinates};
use tracing::info;

const MAX_DEADLINE_SECS: u64 = 86_400;
const MAX_CONCURRENCY: u64 = 4_096;

#[derive(Parser)]
#[command(name = "latmap")]
#[command(about = "Measures how close you are to a catalog of network endpoints.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output (-q no headers, -qq summary only)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every endpoint of the catalog and report latencies
    #[command(alias = "p")]
    Probe(ProbeArgs),
    /// List the endpoints of the catalog
    #[command(alias = "r")]
    Regions {
        /// JSON endpoint catalog (defaults to the built-in AWS regions)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct ProbeArgs {
    /// JSON endpoint catalog (defaults to the built-in AWS regions)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Your position as "lat,lon", used to show distances
    #[arg(long, allow_hyphen_values = true)]
    pub location: Option<Coordinates>,

    /// Round trips per endpoint
    #[arg(long, default_value_t = config::DEFAULT_SAMPLES, value_parser = clap::value_parser!(u8).range(1..))]
    pub samples: u8,

    /// Timeout for a single round trip in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_PROBE_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// Deadline for the whole batch in seconds
    #[arg(long, default_value_t = config::DEFAULT_DEADLINE.as_secs(), value_parser = clap::value_parser!(u64).range(1..=MAX_DEADLINE_SECS))]
    pub deadline_secs: u64,

    /// Endpoints probed at the same time
    #[arg(long, default_value_t = config::DEFAULT_CONCURRENCY, value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_CONCURRENCY))]
    pub concurrency: usize,

    /// Port for TCP handshake probing
    #[arg(long, default_value_t = config::DEFAULT_TCP_PORT)]
    pub port: u16,

    /// Never use raw ICMP sockets, even as root
    #[arg(long)]
    pub unprivileged: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Loads the catalog at `path`, or the built-in AWS regions.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::aws_regions());
    };
    let catalog: Catalog =
        Catalog::load(path).with_context(|| format!("loading catalog {}", path.display()))?;
    info!("Loaded {} endpoints from {}", catalog.len(), path.display());
    Ok(catalog)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
