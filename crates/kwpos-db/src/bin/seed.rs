//! # Seed Data Loader
//!
//! Loads the stock catalog for development and first deployment.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p kwpos-db --bin seed
//!
//! # Specify database path
//! cargo run -p kwpos-db --bin seed -- --db ./data/kwpos.db
//! ```
//!
//! ## Seeded Items
//! The three bulk materials the yard stocks, priced per CBM.

use std::env;

use kwpos_core::Cashier;
use kwpos_db::repository::item::NewItem;
use kwpos_db::{Database, DbConfig};

/// The stock catalog: (name_en, name_ar, price_fils per cbm).
const CATALOG: &[(&str, &str, i64)] = &[
    ("Washed Sand", "رمل مغسول", 15_500),
    ("Sand", "رمل", 12_000),
    ("Gatch", "جص", 18_750),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kwpos_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("KWPOS Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kwpos_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 KWPOS Seed Data Loader");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().list(false).await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} items", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let seeder = Cashier {
        id: "seed".to_string(),
        name: "Seed Loader".to_string(),
        role: "admin".to_string(),
    };

    println!();
    println!("Loading catalog...");
    for (name_en, name_ar, price_fils) in CATALOG {
        let item = db
            .items()
            .create(
                NewItem {
                    name_en: name_en.to_string(),
                    name_ar: name_ar.to_string(),
                    unit: "cbm".to_string(),
                    price_fils: *price_fils,
                },
                &seeder,
            )
            .await?;
        println!("  + {} ({}) at {}", item.name_en, item.name_ar, item.price());
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
