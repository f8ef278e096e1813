//! # Seed Data Generator
//!
//! Populates a fresh database with the default staff accounts and a small
//! hardware catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./pernos.db
//! cargo run -p pernos-web --bin seed
//!
//! # Specify database path and the password for both accounts
//! cargo run -p pernos-web --bin seed -- --db ./data/pernos.db --password s3cret-pass
//! ```
//!
//! ## Generated Data
//! - `admin@pernos.local` (administrator) and `seller@pernos.local` (seller)
//! - Categories: screws, nuts, washers, anchors
//! - Two suppliers
//! - A dozen fasteners, some of them already under their minimum stock
//!
//! A database that already has users is left untouched.

use std::env;

use anyhow::Context;

use pernos_core::input::{NewCategory, ProductInput, SupplierInput};
use pernos_core::Role;
use pernos_db::{Database, DbConfig};
use pernos_web::auth::hash_password;

const DEFAULT_PASSWORD: &str = "pernos123";

/// (email, name, role)
const ACCOUNTS: &[(&str, &str, Role)] = &[
    ("admin@pernos.local", "Administrator", Role::Administrator),
    ("seller@pernos.local", "Seller", Role::Seller),
];

/// (name, description)
const CATEGORIES: &[(&str, &str)] = &[
    ("Screws", "Machine, wood and self-tapping screws"),
    ("Nuts", "Hex, lock and wing nuts"),
    ("Washers", "Flat, spring and fender washers"),
    ("Anchors", "Wall plugs and expansion anchors"),
];

/// (tax id, company, contact, phone)
const SUPPLIERS: &[(&str, &str, &str, &str)] = &[
    ("1790012345001", "Ferretera Andina S.A.", "Lucia Paredes", "022345678"),
    ("0990123456001", "Pernos del Pacifico Cia. Ltda.", "Marco Vera", "042987654"),
];

/// (code, name, material, thread, size, category, supplier, purchase, sale, stock, minimum)
type SeedProduct = (
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static str,
    usize,
    usize,
    i64,
    i64,
    i64,
    i64,
);

const PRODUCTS: &[SeedProduct] = &[
    ("TOR-M6-20", "Hex bolt M6 x 20", "Zinc-plated steel", Some("Metric coarse"), "M6 x 20mm", 0, 0, 8, 15, 500, 100),
    ("TOR-M8-30", "Hex bolt M8 x 30", "Zinc-plated steel", Some("Metric coarse"), "M8 x 30mm", 0, 0, 14, 25, 320, 100),
    ("TOR-M10-50", "Hex bolt M10 x 50", "Galvanized steel", Some("Metric coarse"), "M10 x 50mm", 0, 1, 32, 55, 60, 80),
    ("TOR-INOX-M8", "Socket cap screw M8 x 25", "Stainless steel A2", Some("Metric coarse"), "M8 x 25mm", 0, 1, 40, 70, 150, 50),
    ("TOR-MAD-8", "Wood screw #8 x 1 1/4", "Yellow zinc steel", None, "#8 x 1-1/4in", 0, 0, 3, 6, 2000, 300),
    ("TUE-M6", "Hex nut M6", "Zinc-plated steel", Some("Metric coarse"), "M6", 1, 0, 2, 5, 1200, 200),
    ("TUE-M8", "Hex nut M8", "Zinc-plated steel", Some("Metric coarse"), "M8", 1, 0, 3, 7, 900, 200),
    ("TUE-SEG-M10", "Nylon lock nut M10", "Zinc-plated steel", Some("Metric coarse"), "M10", 1, 1, 9, 18, 40, 50),
    ("TUE-MAR-M8", "Wing nut M8", "Zinc-plated steel", Some("Metric coarse"), "M8", 1, 1, 12, 22, 8, 10),
    ("ARA-M8", "Flat washer M8", "Zinc-plated steel", None, "8.4mm ID", 2, 0, 1, 3, 3000, 500),
    ("ARA-PRE-M10", "Spring washer M10", "Spring steel", None, "10.2mm ID", 2, 1, 2, 4, 100, 150),
    ("TAR-F8", "Nylon wall plug 8mm", "Nylon", None, "8 x 40mm", 3, 0, 4, 8, 1500, 200),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./pernos.db");
    let mut password = String::from(DEFAULT_PASSWORD);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--password" | "-p" => {
                if i + 1 < args.len() {
                    password = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pernos POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>          Database file path (default: ./pernos.db)");
                println!("  -p, --password <PASS>    Password for both accounts (default: {DEFAULT_PASSWORD})");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    pernos_core::validation::validate_password(&password)?;

    println!("🌱 Pernos POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("Failed to open {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing accounts
    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating accounts...");
    for (email, name, role) in ACCOUNTS {
        let hash = hash_password(&password)?;
        db.users().insert(email, name, &hash, *role).await?;
        println!("  {email} ({role})");
    }

    println!("Creating categories...");
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let input = NewCategory {
            name: name.to_string(),
            description: Some(description.to_string()),
        }
        .validate()?;
        category_ids.push(db.categories().insert(&input).await?.id);
    }

    println!("Creating suppliers...");
    let mut supplier_ids = Vec::with_capacity(SUPPLIERS.len());
    for (tax_id, company, contact, phone) in SUPPLIERS {
        let input = SupplierInput {
            tax_id: tax_id.to_string(),
            company_name: company.to_string(),
            contact_name: contact.to_string(),
            phone: phone.to_string(),
            email: None,
            address: None,
        }
        .validate()?;
        supplier_ids.push(db.suppliers().insert(&input).await?.id);
    }

    println!("Creating products...");
    let mut generated = 0;
    for &(code, name, material, thread, size, category, supplier, purchase, sale, stock, minimum) in
        PRODUCTS
    {
        let input = ProductInput {
            code: code.to_string(),
            name: name.to_string(),
            description: None,
            material: material.to_string(),
            thread_type: thread.map(str::to_string),
            size: size.to_string(),
            unit_of_measure: "unit".to_string(),
            purchase_price_cents: purchase,
            sale_price_cents: sale,
            stock_actual: stock,
            stock_minimum: minimum,
            supplier_id: supplier_ids.get(supplier).copied(),
            category_id: category_ids.get(category).copied(),
        }
        .validate()?;

        if let Err(e) = db.products().insert(&input).await {
            eprintln!("Failed to insert {}: {}", code, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Generated {} products", generated);

    let low = db.products().low_stock().await?;
    println!("  Low-stock report: {} products", low.len());

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
