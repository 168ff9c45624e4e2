//! # Sample Catalog Generator
//!
//! Fills an empty `products.json` with the shop's everyday lines so the
//! storefront has something to show in development.
//!
//! ## Usage
//! ```bash
//! # Default path (./data/products.json or $JOBICA_CATALOG_PATH)
//! cargo run -p jobica-store --bin seed
//!
//! # Custom path
//! cargo run -p jobica-store --bin seed -- --path /tmp/products.json
//! ```
//!
//! The tool refuses to touch a catalog that already has products.

use clap::Parser;
use jobica_core::{ProductInput, ProductUnit};
use jobica_store::{Catalog, CatalogConfig};

#[derive(Debug, Parser)]
#[command(name = "seed")]
#[command(about = "Write a sample JOBICA FOODS catalog")]
struct Args {
    /// Catalog file to create.
    #[arg(long, env = "JOBICA_CATALOG_PATH", default_value = "./data/products.json")]
    path: std::path::PathBuf,
}

/// (name, brand, category, unit, size, unit ₦, row ₦, half-row ₦, tags)
type SampleRow = (
    &'static str,
    Option<&'static str>,
    &'static str,
    ProductUnit,
    Option<&'static str>,
    i64,
    Option<i64>,
    Option<i64>,
    &'static [&'static str],
);

#[rustfmt::skip]
const SAMPLES: &[SampleRow] = &[
    ("Gino Tomato Paste", Some("Gino"), "Tomato Products", ProductUnit::Sachet, Some("70g"), 150, None, Some(400), &["tomato", "stew"]),
    ("Tasty Tom Tomato Mix", Some("Tasty Tom"), "Tomato Products", ProductUnit::Sachet, Some("70g"), 150, None, Some(400), &["tomato"]),
    ("Derica Tomato Paste", Some("Derica"), "Tomato Products", ProductUnit::Tin, Some("210g"), 900, None, None, &["tomato", "tin"]),
    ("Larsor Chicken Seasoning", Some("Larsor"), "Seasoning & Spices", ProductUnit::Sachet, Some("10g"), 200, Some(800), None, &["seasoning", "chicken"]),
    ("Knorr Chicken Cubes", Some("Knorr"), "Seasoning & Spices", ProductUnit::Pack, Some("50 cubes"), 1_200, None, None, &["seasoning", "cubes"]),
    ("Maggi Star Cubes", Some("Maggi"), "Seasoning & Spices", ProductUnit::Pack, Some("100 cubes"), 1_500, None, None, &["seasoning", "cubes"]),
    ("Golden Penny Spaghetti", Some("Golden Penny"), "Noodles & Pasta", ProductUnit::Pack, Some("500g"), 1_100, Some(5_300), None, &["pasta"]),
    ("Indomie Chicken Noodles", Some("Indomie"), "Noodles & Pasta", ProductUnit::Carton, Some("40 x 70g"), 9_800, None, None, &["noodles", "carton"]),
    ("Kings Vegetable Oil", Some("Kings"), "Cooking Oil", ProductUnit::Bottle, Some("1L"), 2_900, None, None, &["oil"]),
    ("Local Rice", None, "Grains & Foodstuff", ProductUnit::Bag, Some("50kg"), 85_000, None, None, &["rice", "bag"]),
    ("Honeywell Semovita", Some("Honeywell"), "Grains & Foodstuff", ProductUnit::Pack, Some("1kg"), 1_800, None, None, &["swallow"]),
    ("Fresh Eggs", None, "Eggs & Protein", ProductUnit::Crate, Some("30 eggs"), 4_800, None, None, &["eggs"]),
    ("Mr Chef Mayonnaise", Some("Mr Chef"), "Condiments", ProductUnit::Bottle, Some("443ml"), 2_300, None, None, &["mayo"]),
    ("Hypo Bleach", Some("Hypo"), "Non-Food", ProductUnit::Bottle, Some("1L"), 1_000, None, None, &["cleaning"]),
    ("Nylon Bags", None, "Others", ProductUnit::Nylon, None, 0, None, None, &[]),
];

fn sample_input(row: &SampleRow) -> ProductInput {
    let (name, brand, category, unit, size, unit_naira, row_naira, half_row_naira, tags) = *row;
    ProductInput {
        name: name.to_string(),
        brand: brand.map(str::to_string),
        category: category.to_string(),
        unit,
        size: size.map(str::to_string),
        selling_price_kobo: unit_naira * 100,
        row_price_kobo: row_naira.map(|n| n * 100),
        half_row_price_kobo: half_row_naira.map(|n| n * 100),
        price_per_unit_kobo: None,
        cost_price_kobo: None,
        image_url: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        notes: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    println!("🌱 JOBICA FOODS Sample Catalog");
    println!("==============================");
    println!("Catalog: {}", args.path.display());
    println!();

    let catalog = Catalog::open(CatalogConfig::new(&args.path)).await?;
    let repo = catalog.products();

    let existing = repo.count().await;
    if existing > 0 {
        println!("⚠ Catalog already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the catalog file to regenerate.");
        return Ok(());
    }

    for row in SAMPLES {
        let product = repo.insert(sample_input(row)).await?;
        let price = product
            .display_price()
            .map_or_else(|| "price not set".to_string(), |p| p.to_string());
        println!("  + {} ({})", product.name, price);
    }

    println!();
    println!("✓ Wrote {} products", repo.count().await);
    Ok(())
}
