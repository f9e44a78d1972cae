//! Display helpers shared by every renderer

use crate::items::Item;

/// Compact silver amount: "1.2k", "3.0M", "950"
///
/// The decimal is truncated, never rounded up.
pub fn price_format(price: u64) -> String {
    if price >= 1_000_000 {
        let tenths = price / 100_000;
        format!("{}.{}M", tenths / 10, tenths % 10)
    } else if price >= 1_000 {
        let tenths = price / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        price.to_string()
    }
}

pub fn display_price(price: Option<u64>) -> String {
    match price {
        None | Some(0) => "Free".to_string(),
        Some(p) => price_format(p),
    }
}

/// "max_light" → "max light"
pub fn tag_label(tag: &str) -> String {
    tag.replacen('_', " ", 1)
}

/// Badges for the notable properties of an item
pub fn property_tags(item: &Item) -> Vec<String> {
    let p = &item.properties;
    let mut tags: Vec<String> = item.special_tags().map(tag_label).collect();

    if item.has_enhancives() {
        tags.push("enhancive".to_string());
    }
    if !p.flares.is_empty() {
        tags.push("flares".to_string());
    }
    if let Some(spell) = &p.spell {
        tags.push(format!("spell: {}", spell));
    }
    if p.blessing.is_some() && !item.has_tag("holy") {
        tags.push("blessed".to_string());
    }
    tags
}

/// One-line description of type-specific properties
pub fn property_summary(item: &Item) -> String {
    let p = &item.properties;
    let mut parts = vec![p.item_type.label().to_string()];

    let detail = p
        .capacity_level
        .as_ref()
        .map(|c| format!("{} capacity", c))
        .or_else(|| p.armor_type.as_ref().map(|a| format!("{} armor", a)))
        .or_else(|| p.shield_type.as_ref().map(|s| format!("{} shield", s)))
        .or_else(|| p.weapon_type.clone());
    parts.extend(detail);

    if let Some(wear) = &p.wear_location {
        parts.push(format!("worn on {}", wear));
    }
    if let Some(charges) = &p.charges {
        parts.push(format!("{} charges", charges));
    }
    parts.join(", ")
}
