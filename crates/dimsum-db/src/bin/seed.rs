//! # Seed Data Generator
//!
//! Populates the database with sample transactions for development, so
//! the dashboard and report screens have something to show.
//!
//! ## Usage
//! ```bash
//! # Generate 200 transactions over the trailing 7 days (default)
//! cargo run -p dimsum-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p dimsum-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p dimsum-db --bin seed -- --db ./data/dimsum.db
//! ```
//!
//! Transactions are spread across the trailing week with varying
//! payment methods, cart sizes, and outlets, all derived from a fixed
//! arithmetic sequence so reseeding a fresh database is reproducible.

use chrono::{Duration, Utc};
use std::env;

use dimsum_core::checkout::generate_order_number;
use dimsum_core::{CartLine, Money, PaymentMethod, StoredTransaction};
use dimsum_db::{Database, DbConfig};
use uuid::Uuid;

/// Menu sampled by the generator: (name, variant, unit price).
const MENU: &[(&str, &str, i64)] = &[
    ("Dimsum Ayam", "Besar", 18_000),
    ("Dimsum Ayam", "Kecil", 12_000),
    ("Dimsum Udang", "Besar", 25_000),
    ("Dimsum Udang", "Kecil", 17_000),
    ("Siomay", "Besar", 15_000),
    ("Pangsit Goreng", "Besar", 15_000),
    ("Bakpao Ayam", "Besar", 10_000),
    ("Es Teh", "Besar", 8_000),
    ("Es Jeruk", "Besar", 10_000),
];

const BRANCHES: &[(&str, &str)] = &[("b1", "Outlet 1"), ("b2", "Outlet 2")];

const METHODS: &[PaymentMethod] = &[
    PaymentMethod::Cash,
    PaymentMethod::Cash,
    PaymentMethod::Qris,
    PaymentMethod::Debit,
    PaymentMethod::Transfer,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug surfaces the pool and repository logs.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./dimsum_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
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
                println!("Dimsum POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of transactions to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./dimsum_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🥟 Dimsum POS Seed Data Generator");
    println!("=================================");
    println!("Database:     {}", db_path);
    println!("Transactions: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.transactions().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} transactions", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating transactions...");

    let repo = db.transactions();
    let start = std::time::Instant::now();

    for seed in 0..count {
        let tx = generate_transaction(seed);
        repo.insert(&tx).await?;

        if (seed + 1) % 50 == 0 {
            println!("  Generated {} transactions...", seed + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} transactions in {:?}", count, elapsed);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single transaction, spread over the trailing 7 days.
fn generate_transaction(seed: usize) -> StoredTransaction {
    // Walk backwards through the week, opening hours 09:00-20:00.
    let days_back = (seed % 7) as i64;
    let hour = 9 + (seed % 12) as u32;
    let minute = (seed * 7 % 60) as u32;
    let created_at = (Utc::now() - Duration::days(days_back))
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .expect("valid seed time")
        .and_utc();

    let (branch_id, branch) = BRANCHES[seed % BRANCHES.len()];
    let payment_method = METHODS[seed % METHODS.len()];

    // 1-3 distinct lines per order.
    let line_count = 1 + seed % 3;
    let items: Vec<CartLine> = (0..line_count)
        .map(|offset| {
            let (name, variant, price) = MENU[(seed + offset * 3) % MENU.len()];
            CartLine {
                line_id: format!("v-{}-{}", seed, offset),
                menu_item_id: format!("m-{}", (seed + offset * 3) % MENU.len()),
                name: name.to_string(),
                variant: variant.to_string(),
                unit_price: Money::from_rupiah(price),
                quantity: 1 + (seed % 3) as u32,
            }
        })
        .collect();

    let subtotal: Money = items.iter().map(|l| l.line_total()).sum();
    let total = subtotal;

    // Cash customers round up to the next 10.000.
    let (cash_amount, change_amount) = match payment_method {
        PaymentMethod::Cash => {
            let rounded = ((total.rupiah() + 9_999) / 10_000) * 10_000;
            let tendered = Money::from_rupiah(rounded);
            (tendered, tendered - total)
        }
        _ => (total, Money::zero()),
    };

    StoredTransaction {
        id: Uuid::new_v4().to_string(),
        order_number: generate_order_number(created_at),
        branch: branch.to_string(),
        branch_id: branch_id.to_string(),
        items,
        subtotal,
        tax: Money::zero(),
        total,
        payment_method,
        cash_amount,
        change_amount,
        created_at,
    }
}
