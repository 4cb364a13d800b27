//! # Mostrador Backoffice Library
//!
//! Wires configuration, state, and commands for the backoffice binary.
//!
//! ## Module Organization
//! ```text
//! backoffice/src/
//! ├── lib.rs       ◄─── You are here (Backoffice bundle, tracing setup)
//! ├── main.rs      ◄─── Binary entry point
//! ├── error.rs     ◄─── ApiError returned by every command
//! ├── commands/    ◄─── Operations exposed to the UI
//! │   ├── product.rs
//! │   ├── category.rs
//! │   ├── pricing.rs
//! │   ├── cart.rs
//! │   └── config.rs
//! └── state/       ◄─── Catalog, cart, pricing, config state
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `AppConfig` (defaults, file, environment)
//! 3. Build the backend client from `[backend]`
//! 4. Create state objects (CatalogState, CartState, PricingState, ConfigState)
//! 5. Load the catalog

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use mostrador_client::{Backend, CatalogSource};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode};
pub use state::{AppConfig, CartState, CatalogState, ConfigError, ConfigState, PricingState};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,mostrador=debug,reqwest=warn";

/// Every state object the commands need.
///
/// Commands take the individual states, never the bundle, so each one
/// declares exactly what it touches.
#[derive(Debug, Clone)]
pub struct Backoffice {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub pricing: PricingState,
    pub config: ConfigState,
}

impl Backoffice {
    /// Builds the state over `source`.
    ///
    /// ## Errors
    /// [`ConfigError::Pricing`] when the `[pricing]` bounds are invalid.
    pub fn new(config: AppConfig, source: Arc<dyn CatalogSource>) -> Result<Self, ConfigError> {
        let markup = config.pricing.markup_config()?;
        let store = config.store.default_store_id.clone();

        info!(
            source = %source.describe(),
            default_store = ?store,
            locale = %config.display.locale,
            "Backoffice state initialized"
        );

        Ok(Backoffice {
            catalog: CatalogState::new(source),
            cart: CartState::with_store(store),
            pricing: PricingState::new(markup),
            config: ConfigState::new(config),
        })
    }

    /// Builds the state over the HTTP backend named in `[backend]`.
    pub fn connect(config: AppConfig) -> Result<Self, ConfigError> {
        let backend = Backend::new(config.backend_config())?;
        Self::new(config, Arc::new(backend))
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use mostrador_client::StaticCatalog;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_seeds_state_from_config() {
        let mut config = AppConfig::default();
        config.store.default_store_id = Some("s1".to_string());
        config.pricing.max_markup = dec!(2.5);

        let app = Backoffice::new(config, Arc::new(StaticCatalog::default())).unwrap();
        assert_eq!(app.cart.store_id().as_deref(), Some("s1"));
        assert_eq!(app.pricing.get().max_markup, dec!(2.5));
        assert!(!app.catalog.is_loaded());
    }

    #[test]
    fn test_invalid_pricing_is_rejected() {
        let mut config = AppConfig::default();
        config.pricing.min_floating = dec!(0);
        assert!(matches!(
            Backoffice::new(config, Arc::new(StaticCatalog::default())),
            Err(ConfigError::Pricing(_))
        ));
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let mut config = AppConfig::default();
        config.backend.url = "localhost:8080".to_string();
        assert!(matches!(Backoffice::connect(config), Err(ConfigError::Backend(_))));
    }
}
