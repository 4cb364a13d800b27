//! # mostrador-core: Pure Retail Computation
//!
//! Turns the backend's nested product/variation/store records into
//! sellable, priced, stock-aware units, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mostrador Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/backoffice                              │   │
//! │  │    list_products, quote_price, add_to_cart, submit_sale ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ mostrador-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐     │   │
//! │  │  │ format │ │ stock  │ │ catalog │ │ markup │ │ category │     │   │
//! │  │  │ prices │ │  sums  │ │ flatten │ │ 1.19 × │ │ resolve  │     │   │
//! │  │  └────────┘ └────────┘ └─────────┘ └────────┘ └──────────┘     │   │
//! │  │                          ┌────────┐                             │   │
//! │  │                          │  cart  │  (the only stateful part)   │   │
//! │  │                          └────────┘                             │   │
//! │  │   NO I/O • NO NETWORK • NO FILES                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │             mostrador-client (backend boundary)                 │   │
//! │  │        GET /products, GET /categories, payload validation       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`format`] - Locale-aware integer price formatting
//! - [`stock`] - Store stock aggregation and reconciliation
//! - [`catalog`] - Product flattening, sellable units, search
//! - [`markup`] - Third-party markup pricing and purchase orders
//! - [`category`] - Accent-insensitive category resolution
//! - [`cart`] - Sale cart with stock ceilings
//! - [`money`] - Integer money
//! - [`types`] - Domain types
//! - [`validation`] - Catalog rules applied at the boundary
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mostrador_core::format::{format_price, NumberLocale};
//! use mostrador_core::markup::{quote, MarkupConfig};
//! use rust_decimal::Decimal;
//!
//! let q = quote(Decimal::from(100), Decimal::from(600), &MarkupConfig::default()).unwrap();
//! assert!(q.clamped);
//! assert_eq!(format_price(q.gross_price, NumberLocale::EsCl).unwrap(), "238");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod category;
pub mod error;
pub mod format;
pub mod markup;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, CartLineItem, CartNotifier, SaleCart, SaleTicket, TracingNotifier};
pub use catalog::SellableUnit;
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::NumberLocale;
pub use markup::{MarkupConfig, MarkupQuote};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
