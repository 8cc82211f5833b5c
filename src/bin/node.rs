//! Stub host binary

use anyhow::Result;
use clap::Parser;
use cluster_group::common::{Config, NodeConfig};
use cluster_group::NodeServer;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cluster-group-node")]
#[command(about = "Stub cluster host serving the /v1/group/ contract")]
#[command(version)]
struct Args {
    /// Node ID
    #[arg(short, long, default_value = "node-1")]
    id: String,

    /// Bind address (overrides config `node.bind_addr`)
    #[arg(short, long)]
    bind: Option<String>,

    /// Config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let log_level = args.log_level.unwrap_or(config.log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut node_config: NodeConfig = config.node;
    if let Some(bind) = args.bind {
        node_config.bind_addr = bind.parse()?;
    }

    NodeServer::new(node_config, args.id).serve().await?;

    Ok(())
}
