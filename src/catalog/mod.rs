//! In-memory item catalog and its derived views

pub mod collection;
pub mod browse;

pub use collection::{Catalog, LoadStats};
pub use browse::{LocationTree, TownNode, ShopNode, TownSummary, UNKNOWN_TOWN, MAIN_ROOM};

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::source::SourceDocument;
    use serde_json::json;

    /// Two towns, three shops, six good items and one malformed one
    pub fn sample_documents() -> Vec<SourceDocument> {
        let landing = json!({
            "town": "Wehnimer's Landing",
            "created_at": "2024-05-02T10:00:00Z",
            "shops": [
                {
                    "id": 1,
                    "preamble": "Bramblefoot's Shop is located near the town square.",
                    "inv": [
                        {
                            "room_title": "Entry",
                            "branch": "main",
                            "items": [
                                {
                                    "id": 101,
                                    "name": "a leather backpack",
                                    "details": {
                                        "tags": ["persists"],
                                        "raw": [
                                            "You can store a moderate amount of items.",
                                            "It will cost 1,250 coins to buy this."
                                        ]
                                    }
                                },
                                {
                                    "id": 102,
                                    "name": "a gold ring",
                                    "details": {
                                        "cost": 5000,
                                        "tags": ["max_light"],
                                        "enhancives": [{ "ability": "Strength Base", "boost": 2 }],
                                        "raw": ["It could be slid onto a finger as a ring"]
                                    }
                                }
                            ]
                        },
                        {
                            "room_title": "Armory",
                            "branch": "east",
                            "items": [
                                {
                                    "id": 103,
                                    "name": "a steel broadsword",
                                    "details": {
                                        "cost": 20000,
                                        "enchant": 4,
                                        "skill": "Edged Weapons",
                                        "material": "steel",
                                        "raw": [
                                            "It is imbedded with the Fire Spirit spell.",
                                            "It occasionally flares with holy fire."
                                        ]
                                    }
                                }
                            ]
                        }
                    ]
                },
                {
                    "id": 2,
                    "preamble": "Golden Griffin, a bright stall.",
                    "inv": [
                        {
                            "room_title": "Counter",
                            "branch": "main",
                            "items": [
                                {
                                    "id": 104,
                                    "name": "a bronze tower shield",
                                    "details": {
                                        "cost": 120000,
                                        "skill": "shield use",
                                        "tags": ["crumbly"],
                                        "raw": ["It is a tower shield that protects well."]
                                    }
                                },
                                { "id": 199, "name": "a broken thing", "details": "oops" }
                            ]
                        }
                    ]
                }
            ]
        });

        let solhaven = json!({
            "town": "Solhaven",
            "created_at": "2024-04-20T08:00:00Z",
            "shops": [
                {
                    "id": 3,
                    "preamble": "",
                    "inv": [
                        {
                            "room_title": null,
                            "branch": "main",
                            "items": [
                                {
                                    "id": 201,
                                    "name": "a blessed cloak",
                                    "details": {
                                        "material": "wool",
                                        "raw": [
                                            "It has been blessed by a priestess.",
                                            "It could be draped from your shoulders as a cloak"
                                        ]
                                    }
                                },
                                {
                                    "id": 202,
                                    "name": "a chain hauberk",
                                    "details": {
                                        "cost": 3000,
                                        "enchant": 2,
                                        "skill": "armor use",
                                        "raw": ["This is chain armor that covers the torso."]
                                    }
                                }
                            ]
                        }
                    ]
                }
            ]
        });

        vec![
            serde_json::from_value(landing).unwrap(),
            serde_json::from_value(solhaven).unwrap(),
        ]
    }

    pub fn sample_catalog() -> Catalog {
        Catalog::from_documents(sample_documents())
    }
}
