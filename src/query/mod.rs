//! Query engine
//!
//! Pure functions over a catalog plus the session state a front end keeps
//! between interactions.

pub mod filter;
pub mod sort;
pub mod page;
pub mod engine;
pub mod session;
pub mod format;

pub use filter::{FilterSpec, Matcher, PriceRange, Toggles};
pub use sort::{SortDirection, SortField, SortSpec};
pub use page::{paginate, PageInfo, DEFAULT_PAGE_SIZE};
pub use engine::{filter_items, query, sort_items, QueryResult};
pub use session::QuerySession;
pub use format::{display_price, price_format, property_summary, property_tags, tag_label};
