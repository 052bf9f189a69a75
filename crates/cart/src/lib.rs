//! RocketShoes cart state container.
//!
//! Holds the list of cart line items, exposes the three mutation operations,
//! validates each mutation against external stock levels, and mirrors the
//! result to durable storage.
//!
//! # Architecture
//!
//! - [`store::CartStore`] - the state container itself
//! - [`catalog`] - stock and product lookups against the storefront API
//! - [`storage`] - durable key-value persistence (the localStorage analog)
//! - [`config`] - environment-driven configuration
//!
//! The store is generic over its two collaborators, so callers inject the
//! HTTP catalog and file storage in production and in-memory fakes in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartConfig, CartStore, HttpCatalog, JsonFileStorage};
//! use rocket_shoes_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::new(
//!     HttpCatalog::new(&config.api_base_url),
//!     JsonFileStorage::new(config.storage_path),
//! );
//!
//! store.add_product(ProductId::new(1)).await?;
//! for item in &store.cart() {
//!     println!("{} x{}", item.name, item.amount);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use catalog::{CatalogError, HttpCatalog, Product, ProductCatalog, StockInfo};
pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use storage::{CART_STORAGE_KEY, CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
