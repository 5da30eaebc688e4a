use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use paralympics::config::ServerConfig;
use paralympics::server;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// TOML file with server settings
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
        /// Directory holding noc_regions.csv and paralympic_events.csv
        #[clap(long)]
        data_dir: Option<PathBuf>,
        #[clap(long)]
        cors_origin: Option<String>,
        /// Do not load seed data into empty tables
        #[clap(long)]
        no_seed: bool,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    /// Create the tables if they are missing
    Init {
        #[clap(short, long)]
        database: Option<String>,
    },
    /// Fill empty tables from the seed CSV files
    Seed {
        #[clap(short, long)]
        database: Option<String>,
        #[clap(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let mut config = ServerConfig::load(args.config.as_deref())?;

    match args.command {
        Commands::Serve {
            port,
            database,
            data_dir,
            cors_origin,
            no_seed,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database = database;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            if cors_origin.is_some() {
                config.cors_origin = cors_origin;
            }
            if no_seed {
                config.seed = false;
            }

            info!("Starting server on port {}", config.port);
            server::start_server(&config).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                if let Some(database) = database {
                    config.database = database;
                }
                info!("Initializing database: {}", config.database);
                server::open_database(&config.database).await?;
            }
            DbCommands::Seed { database, data_dir } => {
                if let Some(database) = database {
                    config.database = database;
                }
                if let Some(data_dir) = data_dir {
                    config.data_dir = data_dir;
                }
                info!("Seeding database: {}", config.database);
                let db = server::open_database(&config.database).await?;
                server::seed_database(&db, &config).await?;
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("hyper=off,{}", log_level)))
        .init();
}
