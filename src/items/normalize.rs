//! Raw item normalization
//!
//! Turns a scraped item plus the shop and room it was found in into a catalog
//! `Item`.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::extract::extract_properties;
use super::item::Item;
use crate::error::NormalizeError;
use crate::source::{RawDetails, RawItem, RawRoom, RawShop};

/// Shop name used when the preamble gives nothing away
pub const UNKNOWN_SHOP: &str = "Unknown Shop";

lazy_static! {
    static ref PRICE_LINE: Regex = Regex::new(r"will cost ([\d,]+) coins").unwrap();

    static ref SHOP_NAME: [Regex; 3] = [
        Regex::new(r"(?i)^(.*?)(?:'s)? Shop").unwrap(),
        Regex::new(r"(?i)^(.*?) is located").unwrap(),
        Regex::new(r"^(.*?),").unwrap(),
    ];
}

/// Where an item was found
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    pub town: &'a str,
    pub shop: &'a RawShop,
    pub room: &'a RawRoom,
}

/// Normalize one item straight from its document JSON
pub fn normalize(value: &Value, location: &Location<'_>) -> Result<Item, NormalizeError> {
    let raw = RawItem::from_value(value)?;
    Ok(normalize_item(&raw, location))
}

/// Build the catalog item for an already-decoded raw item
pub fn normalize_item(raw: &RawItem, location: &Location<'_>) -> Item {
    let empty = RawDetails::default();
    let details = raw.details.as_ref().unwrap_or(&empty);
    let preamble = location.shop.preamble();

    Item {
        id: raw.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        name: raw.name().to_string(),
        town: location.town.to_string(),
        shop_id: location.shop.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        shop_name: extract_shop_name(preamble),
        shop_location: preamble.to_string(),
        room: location.room.title().to_string(),
        branch: location.room.branch.clone().unwrap_or_default(),

        price: extract_price(details),
        enchant: details.enchant.as_ref().and_then(|e| e.as_int()),

        material: details.material.clone(),
        weight: details.weight.as_ref().and_then(|w| w.as_f64()),

        enhancives: details.enhancives().to_vec(),
        tags: details.tags().to_vec(),
        raw: details.raw().to_vec(),

        properties: extract_properties(details.raw(), details.skill.as_deref()),
        search_text: build_search_text(raw.name(), details, location),
    }
}

/// Structured cost first, then the first "will cost N coins" line
pub fn extract_price(details: &RawDetails) -> Option<u64> {
    let structured = details
        .cost
        .as_ref()
        .and_then(|c| c.as_int())
        .and_then(|c| u64::try_from(c).ok());

    structured.or_else(|| {
        details
            .raw()
            .iter()
            .find_map(|line| PRICE_LINE.captures(line))
            .and_then(|caps| caps[1].replace(',', "").parse().ok())
    })
}

/// Shop display name from the preamble text
pub fn extract_shop_name(preamble: &str) -> String {
    if preamble.is_empty() {
        return UNKNOWN_SHOP.to_string();
    }

    SHOP_NAME
        .iter()
        .find_map(|p| p.captures(preamble))
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| UNKNOWN_SHOP.to_string())
}

/// Everything a text search should see, lowercased once
pub fn build_search_text(name: &str, details: &RawDetails, location: &Location<'_>) -> String {
    let mut parts: Vec<String> = vec![
        name.to_string(),
        location.town.to_string(),
        location.shop.preamble().to_string(),
        location.room.title().to_string(),
    ];
    parts.extend(details.raw().iter().cloned());
    parts.extend(details.tags().iter().cloned());
    parts.push(details.material.clone().unwrap_or_default());
    parts.extend(
        details
            .enhancives()
            .iter()
            .map(|e| format!("{} {}", e.ability, e.boost)),
    );

    parts.join(" ").to_lowercase()
}
