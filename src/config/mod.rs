//! User configuration

pub mod settings;

pub use settings::{config_path, write_default_config, CatalogConfig, CONFIG_FILE, DEFAULT_DOCUMENTS};
