//! Source documents and how they are fetched

pub mod raw;
pub mod fetch;

pub use raw::{SourceDocument, RawShop, RawRoom, RawItem, RawDetails, RawId, Numeric, Enhancive};
pub use fetch::{Source, Fetcher};
