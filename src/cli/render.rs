//! Plain-text views

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Catalog, LocationTree, TownSummary};
use crate::items::Item;
use crate::query::{display_price, property_summary, property_tags, tag_label, QueryResult};

const NAME_WIDTH: usize = 40;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// One page of search results with a "showing" footer
pub fn render_results(result: &QueryResult<'_>) -> String {
    let mut out = String::new();
    if result.total_matched == 0 {
        out.push_str("No items match.\n");
        return out;
    }

    for item in &result.items {
        let _ = writeln!(
            out,
            "{:>6}  {:<width$}  {:>8}  {:<13}  {} / {} / {}",
            item.id,
            truncate(&item.name, NAME_WIDTH),
            display_price(item.price),
            item.item_type().label(),
            item.town,
            item.shop_name,
            item.room,
            width = NAME_WIDTH,
        );
    }

    let page = &result.page;
    match page.shown() {
        Some((first, last)) => {
            let _ = writeln!(
                out,
                "Showing {}-{} of {} (page {}/{})",
                first, last, result.total_matched, page.page, page.total_pages
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Page {} is past the end; {} items over {} pages",
                page.page, result.total_matched, page.total_pages
            );
        }
    }
    out
}

/// Every known field of one item
pub fn render_item(item: &Item) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", item.name, item.id);
    let _ = writeln!(out, "  {}", property_summary(item));
    let _ = writeln!(out, "  Price:    {}", display_price(item.price));
    let _ = writeln!(out, "  Location: {} / {} / {}", item.town, item.shop_name, item.room);
    if !item.shop_location.is_empty() {
        let _ = writeln!(out, "  Shop:     {}", item.shop_location);
    }

    if let Some(enchant) = item.enchant {
        let _ = writeln!(out, "  Enchant:  {:+}", enchant);
    }
    if let Some(material) = &item.material {
        let _ = writeln!(out, "  Material: {}", material);
    }
    if let Some(weight) = item.weight {
        let _ = writeln!(out, "  Weight:   {} lbs", weight);
    }
    if let Some(skill) = &item.properties.skill {
        let _ = writeln!(out, "  Skill:    {}", skill);
    }

    if !item.tags.is_empty() {
        let tags: Vec<String> = item.tags.iter().map(|t| tag_label(t)).collect();
        let _ = writeln!(out, "  Tags:     {}", tags.join(", "));
    }
    let badges = property_tags(item);
    if !badges.is_empty() {
        let _ = writeln!(out, "  Flags:    {}", badges.join(", "));
    }
    for enhancive in &item.enhancives {
        let _ = write!(out, "  Enhancive: {} +{}", enhancive.ability, enhancive.boost);
        if let Some(level) = &enhancive.level {
            let _ = write!(out, " (level {})", level);
        }
        out.push('\n');
    }
    for flare in &item.properties.flares {
        let _ = writeln!(out, "  Flare:    {}", flare);
    }

    if !item.raw.is_empty() {
        out.push('\n');
        for line in &item.raw {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}

/// Hierarchy listing, narrowed to a town, shop or room when given
pub fn render_tree(
    tree: &LocationTree<'_>,
    town: Option<&str>,
    shop: Option<&str>,
    room: Option<&str>,
) -> String {
    let mut out = String::new();

    for (town_name, town_node) in tree.towns().filter(|(name, _)| town.map_or(true, |t| t == *name)) {
        let _ = writeln!(
            out,
            "{} ({} shops, {} items)",
            town_name,
            town_node.shop_count(),
            town_node.item_count()
        );
        if town.is_none() {
            continue;
        }

        for (shop_name, shop_node) in town_node.shops().filter(|(name, _)| shop.map_or(true, |s| s == *name)) {
            let _ = writeln!(out, "  {} ({} items)", shop_name, shop_node.item_count());
            if shop.is_none() {
                continue;
            }

            for (room_name, items) in shop_node.rooms().filter(|(name, _)| room.map_or(true, |r| r == *name)) {
                let _ = writeln!(out, "    {} ({} items)", room_name, items.len());
                for item in items {
                    let _ = writeln!(out, "      {:>6}  {}  {}", item.id, item.name, display_price(item.price));
                }
            }
        }
    }

    if out.is_empty() {
        out.push_str("Nothing found at that location.\n");
    }
    out
}

/// Catalog totals in a serializable shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub items: usize,
    pub shops: usize,
    pub towns: Vec<TownSummary>,
    pub last_updated: Option<DateTime<Utc>>,
    pub loaded: usize,
    pub expected: usize,
    pub dropped_items: usize,
}

impl CatalogStats {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let stats = catalog.load_stats();
        Self {
            items: catalog.len(),
            shops: catalog.shop_count(),
            towns: catalog.town_summaries(),
            last_updated: catalog.last_updated(),
            loaded: stats.loaded,
            expected: stats.expected,
            dropped_items: stats.dropped_items,
        }
    }
}

pub fn render_stats(stats: &CatalogStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} items in {} shops across {} towns",
        stats.items,
        stats.shops,
        stats.towns.len()
    );
    if let Some(updated) = stats.last_updated {
        let _ = writeln!(out, "Last updated {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    if stats.loaded < stats.expected {
        let _ = writeln!(out, "Warning: only {} of {} towns loaded", stats.loaded, stats.expected);
    }
    if stats.dropped_items > 0 {
        let _ = writeln!(out, "{} malformed items skipped", stats.dropped_items);
    }

    out.push('\n');
    for town in &stats.towns {
        let _ = writeln!(
            out,
            "  {:<24} {:>6} items  {:>3} shops  {:>3} rooms",
            town.town, town.items, town.shops, town.rooms
        );
    }
    out
}
