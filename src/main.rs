use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use chandlery_scraper::{Scraper, ScraperConfig, api, archiver};

#[derive(Parser)]
#[command(name = "chandlery")]
#[command(about = "Scrape products and categories from the Nautichandler storefront")]
#[command(version)]
struct Cli {
    /// JSON configuration file; environment overrides apply when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also archive the response to this file
    #[arg(short, long)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the category catalog
    Categories,

    /// List products of a category, or featured products
    Products {
        /// Category slug; omit for the homepage selection
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Search products by name
    Search { query: String },

    /// Scrape a single product page
    Detail { url: String },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ScraperConfig::load(path)?,
        None => ScraperConfig::from_env(),
    };
    let scraper = Scraper::new(config)?;

    match &cli.command {
        Commands::Categories => emit("categories", &api::list_categories(&scraper), &cli)?,
        Commands::Products { category, page } => emit(
            "products",
            &api::list_products(&scraper, category.as_deref(), *page),
            &cli,
        )?,
        Commands::Search { query } => emit("search", &api::search(&scraper, query), &cli)?,
        Commands::Detail { url } => {
            let product = scraper.scrape_product_detail(url)?;
            emit("detail", &product, &cli)?
        }
    }
    Ok(())
}

fn emit<T: Serialize>(kind: &str, data: &T, cli: &Cli) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    if let Some(path) = &cli.out {
        archiver::save_snapshot(kind, data, path)?;
        log::info!("archived {kind} to {}", path.display());
    }
    Ok(())
}
