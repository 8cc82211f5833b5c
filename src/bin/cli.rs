//! CLI for group operations

use clap::{Parser, Subcommand};
use cluster_group::common::{parse_duration, Config, Host};
use cluster_group::GroupCoordinator;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cluster-group")]
#[command(about = "Create and delete groups across cluster hosts")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./cluster-group.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host base URLs, in order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    hosts: Vec<String>,

    /// Per-attempt timeout (e.g. "10s", "500ms")
    #[arg(long)]
    timeout: Option<String>,

    /// Attempts per host operation
    #[arg(long)]
    attempts: Option<u32>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a group on every host, rolling back on failure
    Create {
        /// Group ID
        group_id: String,
    },

    /// Delete a group from every host
    Delete {
        /// Group ID
        group_id: String,
    },

    /// Create a group, then delete it again
    Demo {
        /// Group ID
        #[arg(default_value = "example_group")]
        group_id: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // Load config from file and env, then override with CLI arguments
    let mut config = Config::load(cli.config.as_deref())?;
    if !cli.hosts.is_empty() {
        config.hosts = cli.hosts.iter().map(|h| Host::new(h.as_str())).collect();
    }
    if let Some(timeout) = &cli.timeout {
        config.retry.timeout_ms = parse_duration(timeout)?.as_millis() as u64;
    }
    if let Some(attempts) = cli.attempts {
        config.retry.max_attempts = attempts;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let coordinator = GroupCoordinator::from_config(&config)?;

    match cli.command {
        Commands::Create { group_id } => {
            let report = coordinator.create_group_with_report(&group_id).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.success {
                println!("Group {} created on all {} hosts", group_id, config.hosts.len());
            } else {
                println!("Group {} creation failed and was rolled back", group_id);
                if let Some((phase, host)) = &report.failed_at {
                    println!("  Failed step: {} on {}", phase, host);
                }
                if let Some(rollback) = &report.rollback {
                    println!("  Compensated: {}", rollback.compensated.len());
                    for host in &rollback.failed {
                        println!("  Group may remain on: {}", host);
                    }
                }
            }
            if !report.success {
                std::process::exit(1);
            }
        }

        Commands::Delete { group_id } => {
            let remaining = coordinator.delete_group(&group_id).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&remaining)?);
            } else if remaining.is_empty() {
                println!("Group {} deleted from all hosts", group_id);
            } else {
                println!("Group {} could not be deleted from:", group_id);
                for host in &remaining {
                    println!("  {}", host);
                }
            }
            if !remaining.is_empty() {
                std::process::exit(1);
            }
        }

        Commands::Demo { group_id } => {
            if coordinator.create_group(&group_id).await {
                tracing::info!("Group created successfully on all nodes.");
            } else {
                tracing::info!("Group creation failed and rolled back.");
            }

            let remaining = coordinator.delete_group(&group_id).await;
            if remaining.is_empty() {
                tracing::info!("Group deleted from all nodes.");
            } else {
                tracing::warn!("Group still present on {} nodes", remaining.len());
            }
        }
    }

    Ok(())
}
