//! # mostrador-client: Backend-Access Layer for Mostrador
//!
//! This crate talks to the remote REST backend and turns its loosely-typed
//! JSON into validated `mostrador_core` types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mostrador Data Flow                              │
//! │                                                                         │
//! │  Backoffice command (list_products)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 mostrador-client (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Backend     │    │  Repositories │    │   Payload    │   │   │
//! │  │   │ (backend.rs)  │◄───│  Product      │───►│  RawProduct  │   │   │
//! │  │   │ reqwest       │    │  Category     │    │  RawNumber   │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Remote REST backend                         │   │
//! │  │              GET /products        GET /categories               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - HTTP client creation and configuration
//! - [`payload`] - Raw schemas and conversion into core types
//! - [`repository`] - Product and category reads
//! - [`source`] - The `CatalogSource` abstraction
//! - [`error`] - Client error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mostrador_client::{Backend, BackendConfig};
//!
//! let backend = Backend::new(BackendConfig::new("https://api.example.cl/v1"))?;
//! let products = backend.products().list().await?;
//! let categories = backend.categories().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod payload;
pub mod repository;
pub mod source;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{Backend, BackendConfig};
pub use error::{ClientError, ClientResult};
pub use source::{CatalogSource, StaticCatalog};

pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
