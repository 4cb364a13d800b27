//! # State Module
//!
//! Application state for the backoffice.
//!
//! Each concern gets its own state type so a command takes exactly the
//! state it touches and independent states never block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Backoffice                                 │   │
//! │  │  built once at startup from AppConfig + CatalogSource           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │       ┌──────────────┬───────┴───────┬────────────────┐                 │
//! │       ▼              ▼               ▼                ▼                 │
//! │  ┌──────────┐  ┌────────────┐  ┌────────────┐  ┌─────────────┐          │
//! │  │ Catalog  │  │ CartState  │  │ Pricing    │  │ ConfigState │          │
//! │  │ State    │  │            │  │ State      │  │             │          │
//! │  │ RwLock<  │  │ Arc<Mutex< │  │ RwLock<    │  │ locale      │          │
//! │  │ Snapshot>│  │ Session>>  │  │ Markup>    │  │ symbol      │          │
//! │  └──────────┘  └────────────┘  └────────────┘  └─────────────┘          │
//! │                                                                         │
//! │  ConfigState is read-only after initialization.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod pricing;

pub use cart::{CartSession, CartState, CartSummary};
pub use catalog::{CatalogSnapshot, CatalogState, RefreshSummary};
pub use config::{
    AppConfig, BackendSettings, ConfigError, ConfigResult, ConfigState, DisplaySettings,
    PricingSettings, StoreSettings,
};
pub use pricing::PricingState;
