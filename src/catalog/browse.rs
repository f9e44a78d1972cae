//! Town → shop → room grouping
//!
//! Built on demand from the catalog's items; nothing here touches raw data.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::items::{Item, UNKNOWN_SHOP};

pub const UNKNOWN_TOWN: &str = "Unknown Town";
pub const MAIN_ROOM: &str = "Main Room";

fn key<'a>(value: &'a str, fallback: &'static str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Items of one shop, by room title
#[derive(Debug, Clone, Default)]
pub struct ShopNode<'a> {
    rooms: BTreeMap<&'a str, Vec<&'a Item>>,
}

impl<'a> ShopNode<'a> {
    pub fn rooms(&self) -> impl Iterator<Item = (&'a str, &[&'a Item])> + '_ {
        self.rooms.iter().map(|(name, items)| (*name, items.as_slice()))
    }

    pub fn room(&self, name: &str) -> Option<&[&'a Item]> {
        self.rooms.get(name).map(Vec::as_slice)
    }

    /// Every item of the shop, rooms in sorted order
    pub fn items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.rooms.values().flat_map(|items| items.iter().copied())
    }

    pub fn item_count(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

/// Shops of one town, by display name
#[derive(Debug, Clone, Default)]
pub struct TownNode<'a> {
    shops: BTreeMap<&'a str, ShopNode<'a>>,
}

impl<'a> TownNode<'a> {
    pub fn shops(&self) -> impl Iterator<Item = (&'a str, &ShopNode<'a>)> + '_ {
        self.shops.iter().map(|(name, shop)| (*name, shop))
    }

    pub fn shop(&self, name: &str) -> Option<&ShopNode<'a>> {
        self.shops.get(name)
    }

    pub fn item_count(&self) -> usize {
        self.shops.values().map(ShopNode::item_count).sum()
    }

    pub fn shop_count(&self) -> usize {
        self.shops.len()
    }

    pub fn room_count(&self) -> usize {
        self.shops.values().map(ShopNode::room_count).sum()
    }
}

/// The whole catalog grouped for hierarchical browsing
#[derive(Debug, Clone, Default)]
pub struct LocationTree<'a> {
    towns: BTreeMap<&'a str, TownNode<'a>>,
}

impl<'a> LocationTree<'a> {
    /// Group items; within a room they keep the order given
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut tree = LocationTree::default();
        for item in items {
            tree.towns
                .entry(key(&item.town, UNKNOWN_TOWN))
                .or_default()
                .shops
                .entry(key(&item.shop_name, UNKNOWN_SHOP))
                .or_default()
                .rooms
                .entry(key(&item.room, MAIN_ROOM))
                .or_default()
                .push(item);
        }
        tree
    }

    pub fn towns(&self) -> impl Iterator<Item = (&'a str, &TownNode<'a>)> + '_ {
        self.towns.iter().map(|(name, town)| (*name, town))
    }

    pub fn town(&self, name: &str) -> Option<&TownNode<'a>> {
        self.towns.get(name)
    }

    pub fn shop(&self, town: &str, shop: &str) -> Option<&ShopNode<'a>> {
        self.town(town)?.shop(shop)
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    /// Per-town counts, towns in sorted order
    pub fn summaries(&self) -> Vec<TownSummary> {
        self.towns()
            .map(|(name, town)| TownSummary {
                town: name.to_string(),
                items: town.item_count(),
                shops: town.shop_count(),
                rooms: town.room_count(),
            })
            .collect()
    }
}

/// Aggregate counts for one town
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TownSummary {
    pub town: String,
    pub items: usize,
    pub shops: usize,
    pub rooms: usize,
}
