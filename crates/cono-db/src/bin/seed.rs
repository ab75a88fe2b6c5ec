//! # Seed Data Generator
//!
//! Populates the database with sample cone orders for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 orders (default)
//! cargo run -p cono-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p cono-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p cono-db --bin seed -- --db ./data/cono.db
//! ```
//!
//! ## Generated Orders
//! Each order gets a customer name from a fixed roster, a variant/size
//! cycled deterministically, and 0-4 toppings drawn from the catalog (with
//! the occasional deliberate duplicate, since duplicates are each priced).
//! Deterministic per index: the same count produces the same data.

use std::env;

use cono_core::toppings;
use cono_core::types::Size;
use cono_core::{NewConeOrder, Variant};
use cono_db::{Database, DbConfig};

/// Roster of sample customers.
const CUSTOMERS: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elena", "Fabio", "Gabriela", "Hugo", "Irene", "Javier",
    "Karla", "Luis", "Maria", "Nico", "Olivia", "Pablo",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./cono_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
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
                println!("Cono Orders Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of orders to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./cono_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Cono Orders Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!("Orders:   {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing orders
    let existing = db.orders().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} orders", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating orders...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    for index in 0..count {
        let order = generate_order(index);

        if let Err(e) = db.orders().insert(&order).await {
            eprintln!("Failed to insert order for {}: {}", order.customer, e);
            continue;
        }

        generated += 1;

        if generated % 25 == 0 {
            println!("  Generated {} orders...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} orders in {:?}", generated, elapsed);

    let total = db.orders().count().await?;
    println!("  Orders in database: {}", total);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single order, deterministic per index.
fn generate_order(index: usize) -> NewConeOrder {
    let customer = CUSTOMERS[index % CUSTOMERS.len()].to_string();
    let variant = Variant::ALL[index % Variant::ALL.len()];
    let size = Size::ALL[(index / 3) % Size::ALL.len()];

    // 0-4 toppings, stepping through the catalog at a co-prime stride so
    // consecutive orders don't share selections.
    let catalog: Vec<&str> = toppings::topping_names().collect();
    let topping_count = index % 5;
    let mut selected: Vec<String> = (0..topping_count)
        .map(|t| catalog[(index * 7 + t * 5) % catalog.len()].to_string())
        .collect();

    // Every 11th order doubles its first topping to exercise the
    // per-entry pricing rule.
    if index % 11 == 0 {
        if let Some(first) = selected.first().cloned() {
            selected.push(first);
        }
    }

    NewConeOrder {
        customer,
        variant: variant.name().to_string(),
        size: size.name().to_string(),
        toppings: selected,
    }
}
