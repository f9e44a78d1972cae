//! Item definitions
//!
//! The canonical catalog item and its category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::source::Enhancive;

/// Tags the scraper emits that the catalog knows how to filter on
pub const SPECIAL_TAGS: [&str; 5] = ["max_light", "max_deep", "persists", "crumbly", "holy"];

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Container,
    Armor,
    Shield,
    Weapon,
    Jewelry,
    #[default]
    Miscellaneous,
}

impl ItemType {
    /// Resolution order when several category flags are set (first wins)
    pub const PRIORITY: [ItemType; 6] = [
        ItemType::Container,
        ItemType::Armor,
        ItemType::Shield,
        ItemType::Weapon,
        ItemType::Jewelry,
        ItemType::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Container => "container",
            ItemType::Armor => "armor",
            ItemType::Shield => "shield",
            ItemType::Weapon => "weapon",
            ItemType::Jewelry => "jewelry",
            ItemType::Miscellaneous => "miscellaneous",
        }
    }

    /// Get display name
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Container => "Container",
            ItemType::Armor => "Armor",
            ItemType::Shield => "Shield",
            ItemType::Weapon => "Weapon",
            ItemType::Jewelry => "Jewelry",
            ItemType::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ItemType::PRIORITY
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted || (wanted == "misc" && *t == ItemType::Miscellaneous))
            .ok_or_else(|| format!("unknown item type '{}'", s))
    }
}

/// Properties read out of an item's narrative text and skill
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProperties {
    /// The full line that described storage capacity
    pub capacity: Option<String>,
    pub capacity_level: Option<String>,
    pub armor_type: Option<String>,
    pub weapon_type: Option<String>,
    pub shield_type: Option<String>,
    pub item_type: ItemType,
    pub wear_location: Option<String>,
    pub flares: Vec<String>,
    pub is_weapon: bool,
    pub is_armor: bool,
    pub is_shield: bool,
    pub is_container: bool,
    pub is_jewelry: bool,
    /// Kept as scraped ("12", "a few")
    pub charges: Option<String>,
    pub spell: Option<String>,
    pub blessing: Option<String>,
    /// Lowercased training skill
    pub skill: Option<String>,
}

/// A normalized shop inventory entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub town: String,
    pub shop_id: String,
    pub shop_name: String,
    /// The shop's raw preamble text
    pub shop_location: String,
    pub room: String,
    pub branch: String,

    pub price: Option<u64>,
    pub enchant: Option<i64>,

    pub material: Option<String>,
    pub weight: Option<f64>,

    pub enhancives: Vec<Enhancive>,
    pub tags: Vec<String>,
    pub raw: Vec<String>,

    #[serde(flatten)]
    pub properties: ItemProperties,

    /// Lowercased haystack for text search, built once
    #[serde(skip)]
    pub search_text: String,
}

impl Item {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_enhancives(&self) -> bool {
        !self.enhancives.is_empty()
    }

    pub fn item_type(&self) -> ItemType {
        self.properties.item_type
    }

    /// Tags from the recognized special set, in item order
    pub fn special_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| SPECIAL_TAGS.contains(t))
    }
}
