//! Filter specification
//!
//! Every option defaults to "no constraint". An item passes when it satisfies
//! every active option.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::items::{Item, ItemType};

/// Inclusive price bounds; either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl PriceRange {
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: u64) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }

    /// Unknown prices are never excluded
    pub fn admits(&self, price: Option<u64>) -> bool {
        price.map_or(true, |p| self.contains(p))
    }
}

impl FromStr for PriceRange {
    type Err = String;

    /// `"min-max"`, where either side may be left empty
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(PriceRange::default());
        }

        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| format!("price range '{}' should look like MIN-MAX", s))?;
        let bound = |text: &str| -> Result<Option<u64>, String> {
            let text: String = text.trim().chars().filter(|c| *c != ',').collect();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| format!("'{}' is not a price", text))
        };

        Ok(PriceRange::new(bound(min)?, bound(max)?))
    }
}

/// Independent yes/no requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggles {
    pub enhancive: bool,
    pub max_light: bool,
    pub max_deep: bool,
    pub persists: bool,
    pub crumbly: bool,
    pub flares: bool,
    pub spell: bool,
    pub blessed: bool,
}

impl Toggles {
    pub fn admits(&self, item: &Item) -> bool {
        let p = &item.properties;
        (!self.enhancive || item.has_enhancives())
            && (!self.max_light || item.has_tag("max_light"))
            && (!self.max_deep || item.has_tag("max_deep"))
            && (!self.persists || item.has_tag("persists"))
            && (!self.crumbly || item.has_tag("crumbly"))
            && (!self.flares || !p.flares.is_empty())
            && (!self.spell || is_set(&p.spell))
            && (!self.blessed || is_set(&p.blessing))
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.is_empty())
}

/// Declarative item filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive substring of the item's search text
    pub text: String,
    /// Allowed towns; empty allows all
    pub towns: BTreeSet<String>,
    pub price: PriceRange,
    pub min_enchant: Option<i64>,
    pub item_type: Option<ItemType>,
    pub capacity_level: Option<String>,
    /// Exact match
    pub armor_type: Option<String>,
    pub shield_type: Option<String>,
    pub wear_location: Option<String>,
    pub skill: Option<String>,
    pub toggles: Toggles,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_town(mut self, town: impl Into<String>) -> Self {
        self.towns.insert(town.into());
        self
    }

    pub fn with_price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    /// True when nothing is constrained
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterSpec::default()
    }

    /// Prepare the filter for repeated matching
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher {
            spec: self,
            text: lowered(Some(self.text.as_str())),
            shield_type: lowered(self.shield_type.as_deref()),
            wear_location: lowered(self.wear_location.as_deref()),
            skill: lowered(self.skill.as_deref()),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matcher().matches(item)
    }
}

/// Trimmed, lowercased, and dropped when empty
fn lowered(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_lowered(haystack: Option<&str>, needle: &str) -> bool {
    haystack.map_or(false, |h| h.to_lowercase().contains(needle))
}

/// A filter with its text options normalized once
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    spec: &'a FilterSpec,
    text: Option<String>,
    shield_type: Option<String>,
    wear_location: Option<String>,
    skill: Option<String>,
}

impl Matcher<'_> {
    pub fn matches(&self, item: &Item) -> bool {
        let spec = self.spec;
        let p = &item.properties;

        if let Some(text) = &self.text {
            if !item.search_text.contains(text.as_str()) {
                return false;
            }
        }

        if !spec.towns.is_empty() && !spec.towns.contains(&item.town) {
            return false;
        }

        if !spec.price.admits(item.price) {
            return false;
        }

        if let Some(min) = spec.min_enchant.filter(|m| *m > 0) {
            if item.enchant.map_or(true, |e| e < min) {
                return false;
            }
        }

        if let Some(item_type) = spec.item_type {
            if p.item_type != item_type {
                return false;
            }
        }

        if let Some(level) = non_empty(&spec.capacity_level) {
            if p.capacity_level.as_deref() != Some(level) {
                return false;
            }
        }

        if let Some(armor) = non_empty(&spec.armor_type) {
            if p.armor_type.as_deref() != Some(armor) {
                return false;
            }
        }

        if let Some(shield) = &self.shield_type {
            if !contains_lowered(p.shield_type.as_deref(), shield) {
                return false;
            }
        }

        if let Some(wear) = &self.wear_location {
            if !contains_lowered(p.wear_location.as_deref(), wear) {
                return false;
            }
        }

        if let Some(skill) = &self.skill {
            if !contains_lowered(p.skill.as_deref(), skill) {
                return false;
            }
        }

        spec.toggles.admits(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    fn names(filter: &FilterSpec) -> Vec<String> {
        let catalog = sample_catalog();
        let matcher = filter.matcher();
        catalog
            .items()
            .iter()
            .filter(|i| matcher.matches(i))
            .map(|i| i.name.clone())
            .collect()
    }

    #[test]
    fn test_default_filter_passes_everything() {
        let catalog = sample_catalog();
        let filter = FilterSpec::default();
        assert!(filter.is_unconstrained());
        assert!(catalog.items().iter().all(|i| filter.matches(i)));
    }

    #[test]
    fn test_text_search_case_insensitive() {
        assert_eq!(names(&FilterSpec::new().with_text("  BROADSWORD ")), vec!["a steel broadsword"]);
        // shop preamble and room title are searchable too
        assert_eq!(names(&FilterSpec::new().with_text("armory")).len(), 1);
        assert_eq!(names(&FilterSpec::new().with_text("bramblefoot")).len(), 3);
        // enhancive descriptions
        assert_eq!(names(&FilterSpec::new().with_text("strength base 2")), vec!["a gold ring"]);
    }

    #[test]
    fn test_towns() {
        let filter = FilterSpec::new().with_town("Solhaven");
        assert_eq!(names(&filter), vec!["a blessed cloak", "a chain hauberk"]);
    }

    #[test]
    fn test_null_price_always_passes() {
        let filter = FilterSpec::new().with_price(PriceRange::new(Some(1_000), Some(4_000)));
        assert_eq!(
            names(&filter),
            vec!["a leather backpack", "a blessed cloak", "a chain hauberk"]
        );

        let none = FilterSpec::new().with_price(PriceRange::new(Some(u64::MAX), None));
        assert_eq!(names(&none), vec!["a blessed cloak"]);
    }

    #[test]
    fn test_min_enchant_excludes_null() {
        let filter = FilterSpec { min_enchant: Some(3), ..Default::default() };
        assert_eq!(names(&filter), vec!["a steel broadsword"]);

        let zero = FilterSpec { min_enchant: Some(0), ..Default::default() };
        assert_eq!(names(&zero).len(), 6);
    }

    #[test]
    fn test_exact_and_substring_filters() {
        let by_type = FilterSpec::new().with_item_type(ItemType::Armor);
        assert_eq!(names(&by_type), vec!["a chain hauberk"]);

        let capacity = FilterSpec { capacity_level: Some("moderate".into()), ..Default::default() };
        assert_eq!(names(&capacity), vec!["a leather backpack"]);

        let armor_exact = FilterSpec { armor_type: Some("chai".into()), ..Default::default() };
        assert!(names(&armor_exact).is_empty());

        let shield = FilterSpec { shield_type: Some("TOW".into()), ..Default::default() };
        assert_eq!(names(&shield), vec!["a bronze tower shield"]);

        let wear = FilterSpec { wear_location: Some("Shoulder".into()), ..Default::default() };
        assert_eq!(names(&wear), vec!["a blessed cloak"]);

        let skill = FilterSpec { skill: Some("edged".into()), ..Default::default() };
        assert_eq!(names(&skill), vec!["a steel broadsword"]);

        let blank = FilterSpec { skill: Some("   ".into()), ..Default::default() };
        assert_eq!(names(&blank).len(), 6);
    }

    #[test]
    fn test_toggles() {
        let check = |toggles: Toggles| names(&FilterSpec { toggles, ..Default::default() });

        assert_eq!(check(Toggles { enhancive: true, ..Default::default() }), vec!["a gold ring"]);
        assert_eq!(check(Toggles { max_light: true, ..Default::default() }), vec!["a gold ring"]);
        assert!(check(Toggles { max_deep: true, ..Default::default() }).is_empty());
        assert_eq!(check(Toggles { persists: true, ..Default::default() }), vec!["a leather backpack"]);
        assert_eq!(check(Toggles { crumbly: true, ..Default::default() }), vec!["a bronze tower shield"]);
        assert_eq!(check(Toggles { flares: true, ..Default::default() }), vec!["a steel broadsword"]);
        assert_eq!(check(Toggles { spell: true, ..Default::default() }), vec!["a steel broadsword"]);
        assert_eq!(
            check(Toggles { blessed: true, ..Default::default() }),
            vec!["a steel broadsword", "a blessed cloak"]
        );
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let filter = FilterSpec {
            toggles: Toggles { blessed: true, ..Default::default() },
            ..FilterSpec::new().with_town("Solhaven")
        };
        assert_eq!(names(&filter), vec!["a blessed cloak"]);
    }

    #[test]
    fn test_price_range_parse() {
        assert_eq!("1000-5000".parse(), Ok(PriceRange::new(Some(1000), Some(5000))));
        assert_eq!("1,000,000-".parse(), Ok(PriceRange::new(Some(1_000_000), None)));
        assert_eq!("-500".parse(), Ok(PriceRange::new(None, Some(500))));
        assert_eq!("".parse(), Ok(PriceRange::default()));
        assert!("cheap".parse::<PriceRange>().is_err());
        assert!("a-b".parse::<PriceRange>().is_err());
    }
}
