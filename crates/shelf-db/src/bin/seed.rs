//! # Seed Data Generator
//!
//! Populates a products database with sample rows for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default) into ./Products.db3
//! cargo run -p shelf-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p shelf-db --bin seed -- --db ./data/Products.db3
//! ```
//!
//! Each product gets a name built from a base item and a variant, and a
//! deterministic price between 0.99 and 24.99.

use std::env;

use shelf_core::{Money, Product, ProductStore};
use shelf_db::{Database, DbConfig, DATABASE_FILE_NAME};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 50;

/// Base item names.
const ITEMS: &[&str] = &[
    "Widget", "Gadget", "Sprocket", "Gizmo", "Bracket", "Hinge", "Spring", "Valve", "Lever",
    "Pulley", "Gear", "Washer",
];

/// Variants combined with each item.
const VARIANTS: &[&str] = &["Mini", "Standard", "Large", "Pro", "Steel", "Brass"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = format!("./{}", DATABASE_FILE_NAME);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: ./{DATABASE_FILE_NAME})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %db_path, count, "Seeding products");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products, skipping seed");
        db.close().await;
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;
    for seed in 0..count {
        let product = generate_product(seed);
        if let Err(e) = products.insert(&product).await {
            warn!(name = %product.name, error = %e, "Failed to insert product");
            continue;
        }
        generated += 1;
    }

    info!(
        generated,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

/// Generates a single product from its sequence number.
fn generate_product(seed: usize) -> Product {
    let item = ITEMS[seed % ITEMS.len()];
    let variant = VARIANTS[(seed / ITEMS.len()) % VARIANTS.len()];
    let round = seed / (ITEMS.len() * VARIANTS.len());

    let name = if round == 0 {
        format!("{} {}", variant, item)
    } else {
        format!("{} {} #{}", variant, item, round + 1)
    };

    // 0.99 - 24.99
    let price_cents = 99 + ((seed * 37) % 2401) as i64;

    Product::with_details(name, Money::from_cents(price_cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_are_unique() {
        let count = ITEMS.len() * VARIANTS.len() * 2;
        let mut names: Vec<String> = (0..count).map(|s| generate_product(s).name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_generated_prices_in_range() {
        for seed in 0..500 {
            let product = generate_product(seed);
            assert!(product.is_new());
            assert!((99..=2499).contains(&product.price_cents));
        }
    }
}
