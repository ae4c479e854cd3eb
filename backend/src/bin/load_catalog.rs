//! Operator CLI that bulk-loads catalog data from a JSON file.
//!
//! ```text
//! load-catalog --kind ingredients --file data/ingredients.json
//! load-catalog --kind tags --file data/tags.json
//! ```
//!
//! Each file holds a JSON array of records: `{name, measurement_unit}` for
//! ingredients, `{name, slug}` for tags. The batch is validated up front and
//! inserted atomically; an invalid record or duplicate fails the whole run.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::catalog::{IngredientRecord, TagRecord};
use backend::domain::CatalogService;
use backend::outbound::persistence::{DbPool, DieselCatalogRepository, PoolConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CatalogKind {
    Ingredients,
    Tags,
}

/// Load ingredient or tag reference data into the database.
#[derive(Debug, Parser)]
#[command(name = "load-catalog")]
struct Args {
    /// Which catalog the file holds.
    #[arg(long, value_enum)]
    kind: CatalogKind,

    /// Path to a JSON array of catalog records.
    #[arg(long)]
    file: PathBuf,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

fn fail(message: String) -> std::io::Error {
    std::io::Error::other(message)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.file)
        .map_err(|e| fail(format!("failed to read {}: {e}", args.file.display())))?;

    let pool = DbPool::new(PoolConfig::new(args.database_url))
        .await
        .map_err(|e| fail(format!("failed to build database pool: {e}")))?;
    let service = CatalogService::new(Arc::new(DieselCatalogRepository::new(pool)));

    let count = match args.kind {
        CatalogKind::Ingredients => {
            let records: Vec<IngredientRecord> = serde_json::from_str(&raw)
                .map_err(|e| fail(format!("{} is not a valid ingredient file: {e}", args.file.display())))?;
            service
                .load_ingredients(records)
                .await
                .map_err(|e| fail(e.message().to_owned()))?
        }
        CatalogKind::Tags => {
            let records: Vec<TagRecord> = serde_json::from_str(&raw)
                .map_err(|e| fail(format!("{} is not a valid tag file: {e}", args.file.display())))?;
            service
                .load_tags(records)
                .await
                .map_err(|e| fail(e.message().to_owned()))?
        }
    };

    println!("loaded {count} records");
    Ok(())
}
