//! Free-text property extraction
//!
//! Each narrative line is run through every rule group on its own and yields a
//! `PropertyUpdate`. Updates are then folded in line order into a
//! `PropertyScan`, which applies the skill refinement and settles the final
//! item type.

use lazy_static::lazy_static;
use regex::Regex;

use super::item::{ItemProperties, ItemType};

/// Skills that make an item a weapon
pub const WEAPON_SKILLS: [&str; 8] = [
    "edged weapons",
    "blunt weapons",
    "two handed weapons",
    "twohanded weapons",
    "polearms",
    "ranged weapons",
    "thrown weapons",
    "brawling",
];

/// How a wear rule names the location
enum WearLocation {
    /// Use the first capture group, trimmed
    Captured,
    Fixed(&'static str),
}

struct WearRule {
    pattern: Regex,
    location: WearLocation,
}

/// Category cues that only flag, never capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Shield,
    Flare,
    Jewelry,
    Container,
    Blessing,
}

struct CueRule {
    cue: Cue,
    patterns: Vec<Regex>,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

fn wear(pattern: &str, location: WearLocation) -> WearRule {
    WearRule { pattern: re(pattern), location }
}

lazy_static! {
    static ref CAPACITY: Regex = re(r"(?i)can store a (.*?) amount");

    static ref ARMOR: [Regex; 2] = [
        re(r"(?i)\bis (.*?) armor that"),
        re(r"(?i)The .* is (.*?) armor"),
    ];

    static ref SHIELD_TYPE: Regex = re(r"(?i)\bis a (.*?) shield");

    static ref SPELL: Regex = re(r"(?i)imbedded with the (.*?) spell");

    static ref CHARGES: [Regex; 2] = [
        re(r"(?i)(\d+) charges? remaining"),
        re(r"(?i)looks to have (.*?) charges"),
    ];

    // Coverage phrases first, then the game's worn-as messaging.
    static ref WEAR_RULES: Vec<WearRule> = vec![
        wear(r"(?i)covers the (.*?)[.,]", WearLocation::Captured),
        wear(r"(?i)worn (.*?)[.,]", WearLocation::Captured),
        wear(r"(?i)around the (.*?)[.,]", WearLocation::Captured),
        wear(r"(?i)over the (.*?)[.,]", WearLocation::Captured),
        wear(r"(?i)put on.*as a (helm|hat|cap|crown)", WearLocation::Fixed("head")),
        wear(r"(?i)put on.*as (boots|shoes|sandals)", WearLocation::Fixed("feet")),
        wear(r"(?i)put on.*as (gloves|gauntlets)", WearLocation::Fixed("hands")),
        wear(r"(?i)put on.*as a (belt)", WearLocation::Fixed("waist")),
        wear(r"(?i)hung around.*as (necklace|pendant)", WearLocation::Fixed("neck")),
        wear(r"(?i)slid onto.*as a (ring)", WearLocation::Fixed("finger")),
        wear(r"(?i)attached to.*as a (bracelet)", WearLocation::Fixed("wrist")),
        wear(r"(?i)attached to.*as an (anklet)", WearLocation::Fixed("ankle")),
        wear(r"(?i)hung from.*as.*earring", WearLocation::Fixed("earlobe")),
        wear(r"(?i)draped from.*as a (cloak|cape)", WearLocation::Fixed("shoulders")),
        wear(r"(?i)slung over.*as a (shield)", WearLocation::Fixed("shoulder")),
        wear(r"(?i)worked into.*as (armor)", WearLocation::Fixed("torso")),
        wear(r"(?i)put over.*as an (apron)", WearLocation::Fixed("front")),
        wear(r"(?i)put in.*as.*barrette", WearLocation::Fixed("hair")),
        wear(r"(?i)attached to.*as.*pouch", WearLocation::Fixed("belt")),
    ];

    static ref CUE_RULES: Vec<CueRule> = vec![
        CueRule {
            cue: Cue::Shield,
            patterns: vec![re(r"(?i)shield that protects"), re(r"(?i)is a.*shield")],
        },
        CueRule {
            cue: Cue::Flare,
            patterns: vec![
                re(r"(?i)infused.*power"),
                re(r"(?i)flare"),
                re(r"(?i)holy.*fire"),
                re(r"(?i)blessed.*undead"),
            ],
        },
        CueRule {
            cue: Cue::Jewelry,
            patterns: vec![
                re(r"(?i)is.*jewelry"),
                re(r"(?i)\b(ring|necklace|bracelet|earring|pendant|amulet|brooch|pin)\b"),
            ],
        },
        CueRule {
            cue: Cue::Container,
            patterns: vec![
                re(r"(?i)can store.*amount"),
                re(r"(?i)container.*capacity"),
                re(r"(?i)\b(bag|sack|backpack|pouch|satchel|chest|box|case|trunk|basket)\b"),
            ],
        },
        CueRule {
            cue: Cue::Blessing,
            patterns: vec![re(r"(?i)blessed"), re(r"(?i)holy")],
        },
    ];
}

/// What one line says about an item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyUpdate {
    pub capacity: Option<String>,
    pub capacity_level: Option<String>,
    pub armor_type: Option<String>,
    pub shield_type: Option<String>,
    pub wear_location: Option<String>,
    pub flare: Option<String>,
    pub spell: Option<String>,
    pub charges: Option<String>,
    pub blessed: bool,
    pub is_armor: bool,
    pub is_shield: bool,
    pub is_container: bool,
    pub is_jewelry: bool,
    /// Category suggested by a text cue; container cues are applied after jewelry
    pub tentative_type: Option<ItemType>,
}

fn capture(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn first_capture(patterns: &[Regex], line: &str) -> Option<String> {
    patterns.iter().find_map(|p| capture(p, line))
}

/// First wear rule that matches the line, in table order. A captured rule
/// whose capture is blank does not count as a match.
fn wear_location(line: &str) -> Option<String> {
    WEAR_RULES.iter().find_map(|rule| {
        let caps = rule.pattern.captures(line)?;
        match rule.location {
            WearLocation::Captured => caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .filter(|loc| !loc.is_empty()),
            WearLocation::Fixed(loc) => Some(loc.to_string()),
        }
    })
}

/// Test a single line against every rule group
pub fn extract_from(line: &str) -> PropertyUpdate {
    let mut update = PropertyUpdate::default();

    if let Some(level) = capture(&CAPACITY, line) {
        update.capacity = Some(line.trim().to_string());
        update.capacity_level = Some(level.to_lowercase());
        update.is_container = true;
    }

    if let Some(armor) = first_capture(ARMOR.as_slice(), line) {
        update.armor_type = Some(armor.to_lowercase());
        update.is_armor = true;
    }

    update.wear_location = wear_location(line);
    update.spell = capture(&SPELL, line);
    update.charges = first_capture(CHARGES.as_slice(), line);

    for rule in CUE_RULES.iter() {
        if !rule.patterns.iter().any(|p| p.is_match(line)) {
            continue;
        }
        match rule.cue {
            Cue::Shield => {
                update.is_shield = true;
                update.shield_type = capture(&SHIELD_TYPE, line).map(|s| s.to_lowercase());
            }
            Cue::Flare => update.flare = Some(line.trim().to_string()),
            Cue::Jewelry => {
                update.is_jewelry = true;
                update.tentative_type = Some(ItemType::Jewelry);
            }
            Cue::Container => {
                update.is_container = true;
                update.tentative_type = Some(ItemType::Container);
            }
            Cue::Blessing => update.blessed = true,
        }
    }

    update
}

/// Accumulates line updates for one item
#[derive(Debug, Clone, Default)]
pub struct PropertyScan {
    props: ItemProperties,
    tentative_type: Option<ItemType>,
}

impl PropertyScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the next line's update. Wear location keeps the first line that set
    /// it; other single values take the latest line.
    pub fn apply(&mut self, update: PropertyUpdate) {
        let p = &mut self.props;

        if update.capacity.is_some() {
            p.capacity = update.capacity;
            p.capacity_level = update.capacity_level;
        }
        if update.armor_type.is_some() {
            p.armor_type = update.armor_type;
        }
        if update.shield_type.is_some() {
            p.shield_type = update.shield_type;
        }
        if p.wear_location.is_none() {
            p.wear_location = update.wear_location;
        }
        if let Some(flare) = update.flare {
            p.flares.push(flare);
        }
        if update.spell.is_some() {
            p.spell = update.spell;
        }
        if update.charges.is_some() {
            p.charges = update.charges;
        }
        if update.blessed {
            p.blessing = Some("holy".to_string());
        }

        p.is_armor |= update.is_armor;
        p.is_shield |= update.is_shield;
        p.is_container |= update.is_container;
        p.is_jewelry |= update.is_jewelry;

        if update.tentative_type.is_some() {
            self.tentative_type = update.tentative_type;
        }
    }

    /// Apply the structured skill field
    pub fn refine_with_skill(&mut self, skill: Option<&str>) {
        let Some(skill) = skill.map(str::to_lowercase) else {
            return;
        };
        let p = &mut self.props;

        if WEAPON_SKILLS.contains(&skill.as_str()) {
            p.is_weapon = true;
            p.weapon_type = Some(skill.clone());
        }
        match skill.as_str() {
            "shield use" => {
                p.is_shield = true;
                p.shield_type.get_or_insert_with(|| "shield".to_string());
            }
            "armor use" => {
                p.is_armor = true;
                p.armor_type.get_or_insert_with(|| "armor".to_string());
            }
            _ => {}
        }
        p.skill = Some(skill);
    }

    /// Settle the item type and hand back the properties
    pub fn finish(mut self) -> ItemProperties {
        self.props.item_type = self
            .tentative_type
            .unwrap_or_else(|| resolve_item_type(&self.props));
        self.props
    }
}

/// Category from the flags alone, by fixed priority
pub fn resolve_item_type(props: &ItemProperties) -> ItemType {
    let flags = [
        props.is_container,
        props.is_armor,
        props.is_shield,
        props.is_weapon,
        props.is_jewelry,
    ];
    flags
        .iter()
        .zip(ItemType::PRIORITY)
        .find(|(set, _)| **set)
        .map(|(_, item_type)| item_type)
        .unwrap_or(ItemType::Miscellaneous)
}

/// Run every line through the rules, then refine by skill
pub fn extract_properties(lines: &[String], skill: Option<&str>) -> ItemProperties {
    let mut scan = lines
        .iter()
        .map(|line| extract_from(line))
        .fold(PropertyScan::new(), |mut scan, update| {
            scan.apply(update);
            scan
        });
    scan.refine_with_skill(skill);
    scan.finish()
}
