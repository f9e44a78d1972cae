//! The session catalog
//!
//! Built once from every document that loaded, then only read. A reload builds
//! a new catalog from scratch.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::browse::{LocationTree, TownSummary};
use crate::error::CatalogError;
use crate::items::{normalize, Item, Location};
use crate::source::{Fetcher, Source, SourceDocument};

/// How much of the requested data made it into the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Documents requested
    pub expected: usize,
    /// Documents that loaded and were folded in
    pub loaded: usize,
    /// Items dropped because they could not be normalized
    pub dropped_items: usize,
}

impl LoadStats {
    pub fn is_partial(&self) -> bool {
        self.loaded < self.expected
    }
}

/// Immutable collection of normalized items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    towns: Vec<String>,
    shop_count: usize,
    last_updated: Option<DateTime<Utc>>,
    stats: LoadStats,
}

impl Catalog {
    /// Fetch every source concurrently and build from whatever loaded
    pub async fn load_all(sources: &[Source], fetcher: &Fetcher) -> Result<Self, CatalogError> {
        log::info!("Loading {} shop documents...", sources.len());
        let results = fetcher.fetch_all(sources).await;

        let documents: Vec<SourceDocument> = sources
            .iter()
            .zip(results)
            .filter_map(|(source, result)| match result {
                Ok(doc) => Some(doc),
                Err(e) => {
                    log::warn!("Failed to load {}: {}", source, e);
                    None
                }
            })
            .collect();

        if documents.is_empty() {
            return Err(CatalogError::Empty { expected: sources.len() });
        }

        let mut catalog = Self::from_documents(documents);
        catalog.stats.expected = sources.len();

        if catalog.stats.is_partial() {
            log::warn!(
                "Only {} of {} towns loaded",
                catalog.stats.loaded,
                catalog.stats.expected
            );
        }
        Ok(catalog)
    }

    /// Fold documents into a catalog, in document order
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = SourceDocument>,
    {
        let mut catalog = Catalog::default();
        let mut towns = BTreeSet::new();

        for doc in documents {
            catalog.stats.loaded += 1;
            catalog.shop_count += doc.shops.len();
            towns.insert(doc.town.clone());

            if let Some(updated) = doc.created_at.as_deref().and_then(parse_timestamp) {
                catalog.last_updated = Some(match catalog.last_updated {
                    Some(oldest) if oldest <= updated => oldest,
                    _ => updated,
                });
            }

            catalog.fold_document(&doc);
        }

        catalog.stats.expected = catalog.stats.loaded;
        catalog.towns = towns.into_iter().collect();

        log::info!(
            "Loaded {} items from {} towns ({} shops)",
            catalog.items.len(),
            catalog.towns.len(),
            catalog.shop_count
        );
        catalog
    }

    fn fold_document(&mut self, doc: &SourceDocument) {
        for shop in &doc.shops {
            for room in &shop.inv {
                let location = Location { town: &doc.town, shop, room };
                for value in &room.items {
                    match normalize(value, &location) {
                        Ok(item) => self.items.push(item),
                        Err(e) => {
                            log::warn!("Error processing item '{}': {}", e.item_name(), e);
                            self.stats.dropped_items += 1;
                        }
                    }
                }
            }
        }
    }

    /// All items, in source order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct town names, sorted
    pub fn towns(&self) -> &[String] {
        &self.towns
    }

    /// Shops across every loaded document
    pub fn shop_count(&self) -> usize {
        self.shop_count
    }

    /// Oldest scrape time among loaded towns
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn load_stats(&self) -> LoadStats {
        self.stats
    }

    /// First item with this id
    pub fn item_by_id(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn grouped_by_location(&self) -> LocationTree<'_> {
        LocationTree::from_items(&self.items)
    }

    pub fn town_summaries(&self) -> Vec<TownSummary> {
        self.grouped_by_location().summaries()
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("Ignoring unparseable timestamp {:?}: {}", text, e);
            None
        }
    }
}
