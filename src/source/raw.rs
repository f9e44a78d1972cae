//! Raw shop documents
//!
//! Serde model of the per-town JSON dumps produced by the in-game scraper.
//! Items are kept as untyped JSON at the document level so that one malformed
//! item can be dropped without rejecting its whole town.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NormalizeError;

/// One town's worth of shops, as scraped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub town: String,
    /// ISO 8601 scrape timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub shops: Vec<RawShop>,
}

/// A player shop with its rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawShop {
    #[serde(default)]
    pub id: Option<RawId>,
    /// Free text the game prints when entering the shop
    #[serde(default)]
    pub preamble: Option<String>,
    #[serde(default)]
    pub inv: Vec<RawRoom>,
}

impl RawShop {
    pub fn preamble(&self) -> &str {
        self.preamble.as_deref().unwrap_or("")
    }
}

/// A room inside a shop, holding its items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoom {
    #[serde(default)]
    pub room_title: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub items: Vec<Value>,
}

impl RawRoom {
    pub fn title(&self) -> &str {
        self.room_title.as_deref().unwrap_or("")
    }
}

/// Identifiers show up both as numbers and as strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A number that may have been scraped as a JSON number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Integer value, reading text the way the scraper writes it ("1,250", "+5")
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Numeric::Int(n) => Some(*n),
            Numeric::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Numeric::Float(_) => None,
            Numeric::Text(s) => leading_int(s),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Int(n) => Some(*n as f64),
            Numeric::Float(f) if f.is_finite() => Some(*f),
            Numeric::Float(_) => None,
            Numeric::Text(s) => leading_float(s),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(n) => write!(f, "{}", n),
            Numeric::Float(x) => write!(f, "{}", x),
            Numeric::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a leading signed integer, ignoring digit-group commas
fn leading_int(text: &str) -> Option<i64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let (sign, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().ok()
}

/// A stat-boosting property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enhancive {
    pub ability: String,
    pub boost: Numeric,
    /// Training level needed to benefit from the boost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Numeric>,
}

/// Structured details the scraper managed to pull out of an item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDetails {
    #[serde(default)]
    pub cost: Option<Numeric>,
    #[serde(default)]
    pub enchant: Option<Numeric>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub weight: Option<Numeric>,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub enhancives: Option<Vec<Enhancive>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Narrative lines from inspecting the item, in game order
    #[serde(default)]
    pub raw: Option<Vec<String>>,
}

impl RawDetails {
    pub fn enhancives(&self) -> &[Enhancive] {
        self.enhancives.as_deref().unwrap_or(&[])
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn raw(&self) -> &[String] {
        self.raw.as_deref().unwrap_or(&[])
    }
}

/// An item exactly as scraped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<RawDetails>,
}

impl RawItem {
    /// Decode one item from its document JSON
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        RawItem::deserialize(value).map_err(|source| NormalizeError::Malformed {
            name: value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>")
                .to_string(),
            source,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn raw_lines(&self) -> &[String] {
        self.details.as_ref().map(RawDetails::raw).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_text_forms() {
        assert_eq!(Numeric::Text("1,250".into()).as_int(), Some(1250));
        assert_eq!(Numeric::Text("+5".into()).as_int(), Some(5));
        assert_eq!(Numeric::Text("12 coins".into()).as_int(), Some(12));
        assert_eq!(Numeric::Text("lots".into()).as_int(), None);
        assert_eq!(Numeric::Float(3.9).as_int(), Some(3));
        assert_eq!(Numeric::Text("2.5 pounds".into()).as_f64(), Some(2.5));
    }

    #[test]
    fn test_document_tolerates_nulls() {
        let doc: SourceDocument = serde_json::from_value(json!({
            "town": "Solhaven",
            "created_at": "2024-05-01T12:00:00Z",
            "shops": [{
                "id": 7,
                "preamble": null,
                "inv": [{ "room_title": "Entry", "branch": null, "items": [] }]
            }]
        }))
        .unwrap();

        assert_eq!(doc.shops[0].preamble(), "");
        assert_eq!(doc.shops[0].inv[0].title(), "Entry");
        assert_eq!(doc.shops[0].id.as_ref().unwrap().to_string(), "7");
    }

    #[test]
    fn test_malformed_item_keeps_name() {
        let err = RawItem::from_value(&json!({
            "id": 1,
            "name": "a battered shield",
            "details": "not an object"
        }))
        .unwrap_err();

        assert_eq!(err.item_name(), "a battered shield");
    }

    #[test]
    fn test_item_without_details() {
        let item = RawItem::from_value(&json!({ "id": "abc", "name": "a rock" })).unwrap();
        assert_eq!(item.name(), "a rock");
        assert!(item.raw_lines().is_empty());
    }
}
