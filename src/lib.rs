//! Bodega - shop inventory catalog
//!
//! Turns scraped per-town shop documents into one normalized, searchable
//! catalog of items, and answers filter/sort/page queries against it.

pub mod error;
pub mod source;
pub mod items;
pub mod catalog;
pub mod query;
pub mod config;
pub mod cli;

// Re-export commonly used types
pub use error::{CatalogError, ConfigError, FetchError, NormalizeError};
pub use items::{Item, ItemProperties, ItemType};
pub use catalog::{Catalog, LoadStats};
pub use query::{query, FilterSpec, QueryResult, QuerySession, SortSpec};
pub use config::CatalogConfig;
