//! Result ordering
//!
//! One field, one direction, stable. Missing values always go last, whichever
//! way the sort runs.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::items::Item;

/// Fields results can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    Price,
    Enchant,
    Town,
    ShopName,
    Room,
    ItemType,
    CapacityLevel,
    Weight,
    Material,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "enchant" => Ok(SortField::Enchant),
            "town" => Ok(SortField::Town),
            "shop" | "shopname" => Ok(SortField::ShopName),
            "room" => Ok(SortField::Room),
            "type" | "itemtype" => Ok(SortField::ItemType),
            "capacity" | "capacitylevel" => Ok(SortField::CapacityLevel),
            "weight" => Ok(SortField::Weight),
            "material" => Ok(SortField::Material),
            other => Err(format!("cannot sort by '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Comparable form of a field value
#[derive(Debug, Clone, PartialEq)]
enum SortKey<'a> {
    Text(String),
    Static(&'a str),
    Number(f64),
}

impl SortKey<'_> {
    fn text(&self) -> Option<&str> {
        match self {
            SortKey::Text(s) => Some(s),
            SortKey::Static(s) => Some(s),
            SortKey::Number(_) => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => self.text().cmp(&other.text()),
        }
    }
}

fn folded(value: &str) -> SortKey<'static> {
    SortKey::Text(value.to_lowercase())
}

fn sort_key(item: &Item, field: SortField) -> Option<SortKey<'static>> {
    let p = &item.properties;
    match field {
        SortField::Name => Some(folded(&item.name)),
        SortField::Price => item.price.map(|v| SortKey::Number(v as f64)),
        SortField::Enchant => item.enchant.map(|v| SortKey::Number(v as f64)),
        SortField::Town => Some(folded(&item.town)),
        SortField::ShopName => Some(folded(&item.shop_name)),
        SortField::Room => Some(folded(&item.room)),
        SortField::ItemType => Some(SortKey::Static(p.item_type.as_str())),
        SortField::CapacityLevel => p.capacity_level.as_deref().map(folded),
        SortField::Weight => item.weight.map(SortKey::Number),
        SortField::Material => item.material.as_deref().map(folded),
    }
}

/// Field plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Named orderings offered by the sort dropdown
    pub fn preset(name: &str) -> Option<Self> {
        let spec = match name.trim() {
            "name" => Self::asc(SortField::Name),
            "price-asc" => Self::asc(SortField::Price),
            "price-desc" => Self::desc(SortField::Price),
            "enchant-desc" => Self::desc(SortField::Enchant),
            "town" => Self::asc(SortField::Town),
            "type" => Self::asc(SortField::ItemType),
            "capacity" => Self::asc(SortField::CapacityLevel),
            _ => return None,
        };
        Some(spec)
    }

    /// Preset by name, falling back to name ascending
    pub fn from_preset(name: &str) -> Self {
        Self::preset(name).unwrap_or_default()
    }

    fn compare_keys(&self, a: &Option<SortKey<'_>>, b: &Option<SortKey<'_>>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ord = a.compare(b);
                match self.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        self.compare_keys(&sort_key(a, self.field), &sort_key(b, self.field))
    }

    /// Stable in-place sort; equal keys keep their incoming order
    pub fn sort(&self, items: &mut Vec<&Item>) {
        let mut keyed: Vec<(Option<SortKey<'static>>, &Item)> = items
            .iter()
            .map(|item| (sort_key(item, self.field), *item))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| self.compare_keys(a, b));
        items.clear();
        items.extend(keyed.into_iter().map(|(_, item)| item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    fn sorted_names(spec: SortSpec) -> Vec<String> {
        let catalog = sample_catalog();
        let mut items: Vec<&Item> = catalog.items().iter().collect();
        spec.sort(&mut items);
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_default_is_name_asc() {
        assert_eq!(SortSpec::default(), SortSpec::asc(SortField::Name));
        assert_eq!(
            sorted_names(SortSpec::default()),
            vec![
                "a blessed cloak",
                "a bronze tower shield",
                "a chain hauberk",
                "a gold ring",
                "a leather backpack",
                "a steel broadsword",
            ]
        );
    }

    #[test]
    fn test_price_nulls_last_both_ways() {
        let asc = sorted_names(SortSpec::asc(SortField::Price));
        let desc = sorted_names(SortSpec::desc(SortField::Price));

        assert_eq!(asc.last().unwrap(), "a blessed cloak");
        assert_eq!(desc.last().unwrap(), "a blessed cloak");

        let mut reversed = asc[..5].to_vec();
        reversed.reverse();
        assert_eq!(desc[..5], reversed[..]);
        assert_eq!(asc[0], "a leather backpack");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // Only the backpack has a capacity; everything else ties at "missing"
        let asc = sorted_names(SortSpec::asc(SortField::CapacityLevel));
        let desc = sorted_names(SortSpec::desc(SortField::CapacityLevel));
        let rest = vec![
            "a gold ring",
            "a steel broadsword",
            "a bronze tower shield",
            "a blessed cloak",
            "a chain hauberk",
        ];
        assert_eq!(asc[0], "a leather backpack");
        assert_eq!(asc[1..], rest[..]);
        assert_eq!(desc[1..], rest[..]);

        let towns = sorted_names(SortSpec::desc(SortField::Town));
        assert_eq!(towns[..4], ["a leather backpack", "a gold ring", "a steel broadsword", "a bronze tower shield"]);
    }

    #[test]
    fn test_case_insensitive_text() {
        let catalog = sample_catalog();
        let mut a = catalog.items()[0].clone();
        let mut b = catalog.items()[1].clone();
        a.name = "apple".into();
        b.name = "Banana".into();
        assert_eq!(SortSpec::asc(SortField::Name).compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_presets() {
        assert_eq!(SortSpec::from_preset("price-desc"), SortSpec::desc(SortField::Price));
        assert_eq!(SortSpec::from_preset("type"), SortSpec::asc(SortField::ItemType));
        assert_eq!(SortSpec::from_preset("bogus"), SortSpec::default());
        assert_eq!("shop".parse::<SortField>(), Ok(SortField::ShopName));
    }
}
