//! # Repository Module
//!
//! Read-only repositories over the remote backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Backoffice command                                                     │
//! │       │                                                                 │
//! │       │  backend.products().list()                                      │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  └── list(&self)   GET /products  ──► Vec<RawProduct>                   │
//! │       │                                                                 │
//! │       │  payload::into_products (parse numbers, validate catalog)       │
//! │       ▼                                                                 │
//! │  Vec<mostrador_core::Product>                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product list with variations and stock
//! - [`CategoryRepository`](category::CategoryRepository) - Category tree

pub mod category;
pub mod product;
