//! items-api - Small JSON CRUD service over a single SQLite-backed collection of named items

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use items_api::api::{self, AppState};
use items_api::config::Config;
use items_api::store::{ItemRepository, ItemStore};

#[derive(Parser)]
#[command(name = "items-api")]
#[command(about = "Small JSON CRUD service over a single SQLite-backed collection of named items")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Create the database file and save the resolved config
    Init {
        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// List all items
    List {
        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("items_api={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    // `init` may be pointed at a config file it is about to create
    let config = match (&cli.command, &cli.config) {
        (Commands::Init { .. }, Some(path)) if !path.exists() => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };

    match cli.command {
        Commands::Serve { host, port, db } => {
            let mut config = with_db_override(config, db);
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let store = ItemStore::open(&config.db_path)?;
            let state = AppState::new(Arc::new(store));
            let router = api::create_router(state);

            let addr = config.bind_addr()?;
            let listener = tokio::net::TcpListener::bind(addr).await?;

            tracing::info!("Starting HTTP server on {}", addr);
            println!("items-api running at http://{}", addr);
            println!("  Items:    http://{}/items", addr);
            println!("  Database: {}", config.db_path.display());

            axum::serve(listener, router).await?;
        }

        Commands::Init { db } => {
            let config = with_db_override(config, db);

            tracing::info!("Initializing database at {:?}", config.db_path);
            ItemStore::open(&config.db_path)?;

            let config_path = cli
                .config
                .or_else(Config::default_path)
                .ok_or_else(|| anyhow::anyhow!("Could not determine a config file location"))?;
            config.save(&config_path)?;

            println!("✓ Database ready at {}", config.db_path.display());
            println!("✓ Config saved to {}", config_path.display());
        }

        Commands::List { db } => {
            let config = with_db_override(config, db);
            let store = ItemStore::open(&config.db_path)?;
            let items = store.list_all().await?;

            if items.is_empty() {
                println!("No items found");
            } else {
                for item in items {
                    println!("{:>6}  {}", item.id, item.name);
                }
            }
        }
    }

    Ok(())
}

/// Command-line database path takes precedence over the config file
fn with_db_override(mut config: Config, db: Option<PathBuf>) -> Config {
    if let Some(db) = db {
        config.db_path = db;
    }
    config
}
