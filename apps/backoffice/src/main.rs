//! # Mostrador Backoffice Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mostrador Backoffice                             │
//! │                                                                         │
//! │  main.rs ────► tracing, config, state, first catalog load               │
//! │                                                                         │
//! │  lib.rs ─────► Backoffice bundle, init_tracing                          │
//! │                                                                         │
//! │  commands/ ──► search_products, quote_price, add_to_cart, ...           │
//! │                                                                         │
//! │  state/ ─────► CatalogState, CartState, PricingState, ConfigState       │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    Remote REST backend                                  │
//! │              GET /products        GET /categories                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```text
//! mostrador-backoffice [--config <path>]
//! ```

use std::error::Error;
use std::path::PathBuf;

use mostrador_backoffice::commands::product::stock_report;
use mostrador_backoffice::{init_tracing, AppConfig, Backoffice};
use tracing::{error, info};

fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(config_path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config_path = parse_args()?;
    let config = AppConfig::load(config_path.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.backend.url,
        "Starting Mostrador backoffice"
    );

    let app = Backoffice::connect(config)?;

    match app.catalog.refresh().await {
        Ok(summary) => {
            let depleted = stock_report(&app.catalog, true).len();
            info!(
                products = summary.products,
                variations = summary.variations,
                categories = summary.categories,
                depleted,
                "Catalog ready"
            );
        }
        Err(e) => {
            error!(error = %e, "Initial catalog load failed");
            return Err(e.into());
        }
    }

    Ok(())
}
