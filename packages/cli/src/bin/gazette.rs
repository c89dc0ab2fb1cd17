use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process;

use gazette_cli::config::Config;
use gazette_cli::{init_tracing, run_server};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "Gazette - articles and tags JSON API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Address to bind (overrides HOST)")]
        host: Option<IpAddr>,
        #[arg(long, help = "SQLite database file (overrides DATABASE_PATH)")]
        database: Option<PathBuf>,
    },
    /// Apply pending database migrations and exit
    Migrate {
        #[arg(long, help = "SQLite database file (overrides DATABASE_PATH)")]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();
    let mut config = Config::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Serve {
            port,
            host,
            database,
        } => {
            if let Some(port) = port {
                anyhow::ensure!(port != 0, "Port must be between 1 and 65535");
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(database) = database {
                config.database_path = database;
            }

            println!(
                "{} http://{}",
                "Starting Gazette API on".green().bold(),
                config.socket_addr()
            );
            run_server(config).await
        }
        Commands::Migrate { database } => {
            if let Some(database) = database {
                config.database_path = database;
            }

            let pool = gazette_storage::connect(&config.database_config())
                .await
                .with_context(|| {
                    format!("Failed to migrate {}", config.database_path.display())
                })?;
            pool.close().await;

            println!(
                "{} {}",
                "Database is up to date:".green().bold(),
                config.database_path.display()
            );
            Ok(())
        }
    }
}
