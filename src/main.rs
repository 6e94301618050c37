use anyhow::Result;
use clap::Parser;
use shard_pipeline::config::{PipelineConfig, DEFAULT_WORKER_COUNT};
use shard_pipeline::executor::types::ScanPolicy;
use shard_pipeline::ingestion::io::{load_change_set, load_dataset, write_output};
use shard_pipeline::storage::partitioner::NODE_COUNT;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Apply a change set to a sharded mixtape dataset.
#[derive(Debug, Parser)]
#[command(name = "shard-pipeline", version, about)]
struct Cli {
    /// Source dataset with users, playlists and songs.
    #[arg(long, env = "SHARD_INPUT")]
    input: PathBuf,

    /// Change set with a `tasks` array.
    #[arg(long, env = "SHARD_CHANGES")]
    changes: PathBuf,

    /// Where to write the flattened result.
    #[arg(long, env = "SHARD_OUTPUT")]
    output: PathBuf,

    /// Shards per collection.
    #[arg(long, env = "SHARD_NODES", default_value_t = NODE_COUNT)]
    nodes: usize,

    /// Simulated workers.
    #[arg(long, env = "SHARD_WORKERS", default_value_t = DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// Worker selection scan.
    #[arg(long, env = "SHARD_SCAN", value_enum, default_value_t = ScanPolicy::ForwardOnly)]
    scan: ScanPolicy,

    /// Seed for worker selection (random if omitted).
    #[arg(long, env = "SHARD_SEED")]
    seed: Option<u64>,

    /// Indent the output JSON.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn config(&self) -> PipelineConfig {
        let config = PipelineConfig::new()
            .with_node_count(self.nodes)
            .with_worker_count(self.workers)
            .with_scan_policy(self.scan);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    tracing::info!("Starting run with {:?}", config);

    let dataset = load_dataset(&cli.input).await?;
    let changes = load_change_set(&cli.changes).await?;

    let output = shard_pipeline::run(dataset, changes, &config)?;
    tracing::info!(
        "Applied {} changes: {} created, {} updated, {} deleted, {} missing, {} ignored",
        output.report.applied(),
        output.report.created,
        output.report.updated,
        output.report.deleted,
        output.report.not_found,
        output.report.ignored
    );

    write_output(&cli.output, &output.dataset, cli.pretty).await?;
    Ok(())
}
