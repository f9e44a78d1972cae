//! Command-line interface
//!
//! Argument definitions and the plain-text views the binary prints.

pub mod render;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::items::ItemType;
use crate::query::{FilterSpec, PriceRange, Toggles};

pub use render::{render_item, render_results, render_stats, render_tree, CatalogStats};

#[derive(Debug, Parser)]
#[command(name = "bodega")]
#[command(author, version, about = "Search scraped shop inventories across every town")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Load these documents instead of the configured ones (path or URL, repeatable)
    #[arg(long = "source", global = true)]
    pub sources: Vec<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter, sort and page through items
    Search(SearchArgs),

    /// Walk the town / shop / room hierarchy
    Browse {
        #[arg(long)]
        town: Option<String>,

        /// Requires --town
        #[arg(long, requires = "town")]
        shop: Option<String>,

        /// Requires --shop
        #[arg(long, requires = "shop")]
        room: Option<String>,
    },

    /// Show every detail of one item
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Catalog totals and load health
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Write the default config for editing
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Text to look for in names, details, shops and rooms
    pub text: Option<String>,

    /// Only these towns (repeatable)
    #[arg(long = "town")]
    pub towns: Vec<String>,

    /// Price range as MIN-MAX; either side may be empty
    #[arg(long)]
    pub price: Option<PriceRange>,

    #[arg(long)]
    pub min_enchant: Option<i64>,

    /// container, armor, shield, weapon, jewelry or misc
    #[arg(long = "type")]
    pub item_type: Option<ItemType>,

    #[arg(long)]
    pub capacity: Option<String>,

    #[arg(long)]
    pub armor: Option<String>,

    #[arg(long)]
    pub shield: Option<String>,

    #[arg(long)]
    pub wear: Option<String>,

    #[arg(long)]
    pub skill: Option<String>,

    #[arg(long)]
    pub enhancive: bool,
    #[arg(long)]
    pub max_light: bool,
    #[arg(long)]
    pub max_deep: bool,
    #[arg(long)]
    pub persists: bool,
    #[arg(long)]
    pub crumbly: bool,
    #[arg(long)]
    pub flares: bool,
    #[arg(long)]
    pub spell: bool,
    #[arg(long)]
    pub blessed: bool,

    /// name, price-asc, price-desc, enchant-desc, town, type or capacity
    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn filter(&self) -> FilterSpec {
        FilterSpec {
            text: self.text.clone().unwrap_or_default(),
            towns: self.towns.iter().cloned().collect::<BTreeSet<_>>(),
            price: self.price.unwrap_or_default(),
            min_enchant: self.min_enchant,
            item_type: self.item_type,
            capacity_level: self.capacity.clone(),
            armor_type: self.armor.clone(),
            shield_type: self.shield.clone(),
            wear_location: self.wear.clone(),
            skill: self.skill.clone(),
            toggles: Toggles {
                enhancive: self.enhancive,
                max_light: self.max_light,
                max_deep: self.max_deep,
                persists: self.persists,
                crumbly: self.crumbly,
                flares: self.flares,
                spell: self.spell,
                blessed: self.blessed,
            },
        }
    }
}
