//! # Seed and Inspect
//!
//! Opens the configured database, runs load-or-seed for both stores and
//! prints an inventory report.
//!
//! ## Usage
//! ```bash
//! # Use almox.toml / environment settings
//! cargo run -p almox-db --bin seed
//!
//! # Specific database file, wiping whatever it holds first
//! cargo run -p almox-db --bin seed -- --db ./data/almox.db --reset
//! ```

use std::env;
use std::path::PathBuf;

use almox_core::DEFAULT_RECENT_LIMIT;
use almox_db::migrations::migration_status;
use almox_db::{AppConfig, Database, IdentityStore, InventoryStore};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,almox=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--reset" => reset = true,
            "--help" | "-h" => {
                println!("Almox Seed and Inspect");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (overrides config)");
                println!("  -c, --config <PATH>   Config file (default: platform almox.toml)");
                println!("      --reset           Delete all stored data before seeding");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    init_tracing();

    let mut config = AppConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.storage.database_path = path;
    }

    println!("🌱 Almox Seed");
    println!("=============");
    println!("Database: {}", config.storage.database_path.display());
    println!("Sample data: {}", config.seed.sample_data);
    println!();

    let db = Database::new(config.db_config()).await?;
    println!("✓ Connected to database");
    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", applied, total);

    if reset {
        let removed = db.kv().clear().await?;
        println!("✓ Reset: removed {} stored collections", removed);
    }

    let identity = IdentityStore::open(&db).await?;
    let inventory = InventoryStore::open_with(&db, config.seed.sample_data).await?;

    println!();
    println!("Stored keys:");
    for key in db.kv().keys().await? {
        println!("  {}", key);
    }

    println!();
    println!("Accounts:");
    for user in identity.list_accounts() {
        println!("  {:<28} {:?}", user.email, user.role);
    }

    let summary = inventory.summary(DEFAULT_RECENT_LIMIT);
    println!();
    println!("Inventory:");
    println!("  Products:    {}", summary.total_products);
    println!("  Units:       {}", summary.total_units);
    println!("  Available:   {}", summary.available);
    println!("  In use:      {}", summary.in_use);
    println!("  Maintenance: {}", summary.maintenance);
    println!("  Discarded:   {}", summary.discarded);

    if !summary.units_by_category.is_empty() {
        println!();
        println!("Units by category:");
        for total in &summary.units_by_category {
            println!("  {:<12} {}", total.category.as_str(), total.units);
        }
    }

    let low = inventory.low_stock();
    if !low.is_empty() {
        println!();
        println!("⚠ Low stock:");
        for product in low {
            println!(
                "  {} ({} left, alarm at {})",
                product.name,
                product.quantity,
                product.alarm_quantity.unwrap_or_default()
            );
        }
    }

    if !summary.recent_movements.is_empty() {
        println!();
        println!("Recent movements:");
        for movement in &summary.recent_movements {
            println!(
                "  {}  {:<28} {}",
                movement.created_at.format("%Y-%m-%d"),
                inventory.product_name_for(movement),
                movement.description
            );
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
