//! Item system

pub mod item;
pub mod extract;
pub mod normalize;

pub use item::{Item, ItemType, ItemProperties, SPECIAL_TAGS};
pub use extract::{extract_from, extract_properties, PropertyUpdate, PropertyScan, WEAPON_SKILLS};
pub use normalize::{normalize, normalize_item, extract_price, extract_shop_name, Location, UNKNOWN_SHOP};
