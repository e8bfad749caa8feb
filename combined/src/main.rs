//! Developer binary - seeds the record store and queries the catalog.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use combined::{open_store, seed, MarketConfig, Marketplace};
use domain::CatalogCriteria;

#[derive(Parser)]
#[command(name = "marketplace")]
#[command(about = "Marketplace developer tools")]
struct Cli {
    /// JSON document used by the file store backend
    #[arg(long, global = true, env = "MARKET_STORE_PATH")]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install demo orders, offers and notifications into absent keys
    Seed,
    /// Print active orders passing the catalog filter as JSON
    Catalog {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        price_min: String,
        #[arg(long, default_value = "")]
        price_max: String,
        #[arg(long, default_value = "")]
        color: String,
        #[arg(long, default_value = "")]
        size: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = MarketConfig::from_env()?;
    if let Some(path) = cli.store_path {
        config.store.path = path;
    }

    match cli.command {
        Commands::Seed => {
            let store = open_store(&config.store).await?;
            let written = seed::install(store.as_ref()).await?;
            info!("Seeded {} keys", written);
        }
        Commands::Catalog {
            search,
            price_min,
            price_max,
            color,
            size,
        } => {
            let criteria = CatalogCriteria::from_form(&search, &price_min, &price_max, &color, &size)?;
            let marketplace = Marketplace::open(&config).await?;
            let orders = marketplace.orders().browse_catalog(&criteria).await?;
            info!("{} orders match", orders.len());
            println!("{}", serde_json::to_string_pretty(&orders)?);
        }
    }

    Ok(())
}
