//! # Commands Module
//!
//! Every operation the backoffice UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Catalog refresh, listing, search, stock report
//! ├── category.rs  ◄─── Category tree, resolution, filter ids
//! ├── pricing.rs   ◄─── Markup bounds, price and purchase-order quotes
//! ├── cart.rs      ◄─── Store selection, cart manipulation, sale submit
//! └── config.rs    ◄─── Configuration and price formatting
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI                                                                     │
//! │  ──                                                                     │
//! │  search_products({ query: 'zapatilla', limit: 20 })                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Backoffice                                                        │
//! │  ───────────────                                                        │
//! │  fn search_products(                                                    │
//! │      catalog: &CatalogState,   ◄── only the state it reads              │
//! │      config: &ConfigState,                                              │
//! │      query: &str,                                                       │
//! │      limit: Option<u32>,                                                │
//! │  ) -> Result<Vec<ProductRow>, ApiError>                                 │
//! │         │                                                               │
//! │         │ (JSON serialization, camelCase)                               │
//! │         ▼                                                               │
//! │  UI receives: ProductRow[] or { code, message }                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState, config: &ConfigState)
//!
//! // Needs catalog and cart
//! fn add_to_cart(catalog: &CatalogState, cart: &CartState, config: &ConfigState, id: &str)
//! ```

pub mod cart;
pub mod category;
pub mod config;
pub mod pricing;
pub mod product;
