//! Catalog settings
//!
//! Stored as RON next to the user's other configuration. Every field has a
//! default, so a partial file only overrides what it names.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::query::{SortSpec, DEFAULT_PAGE_SIZE};
use crate::source::Source;

pub const CONFIG_FILE: &str = "bodega.ron";

/// Town documents published by the scraper
pub const DEFAULT_DOCUMENTS: [&str; 9] = [
    "icemule_trace.json",
    "mist_harbor.json",
    "rivers_rest.json",
    "solhaven.json",
    "ta_illistim.json",
    "ta_vaalor.json",
    "teras_isle.json",
    "wehnimers_landing.json",
    "zul_logoth.json",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory or URL prefix the documents live under
    pub base: String,
    pub documents: Vec<String>,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    /// Sort preset applied to new sessions
    pub default_sort: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base: "data".to_string(),
            documents: DEFAULT_DOCUMENTS.iter().map(|d| d.to_string()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
            default_sort: "name".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Every configured document, resolved against the base
    pub fn sources(&self) -> Vec<Source> {
        self.documents
            .iter()
            .map(|name| Source::resolve(&self.base, name))
            .collect()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn sort(&self) -> SortSpec {
        if SortSpec::preset(&self.default_sort).is_none() {
            log::warn!("Unknown sort preset '{}', sorting by name", self.default_sort);
        }
        SortSpec::from_preset(&self.default_sort)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the file if there is one; anything wrong with it means defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Config loaded from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let content = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Config saved to {:?}", path);
        Ok(())
    }
}

/// Export the defaults so they can be edited
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    CatalogConfig::default().save(path)
}

/// Where the config lives when no path is given
pub fn config_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "bodega", "Bodega") {
        proj_dirs.config_dir().join(CONFIG_FILE)
    } else {
        PathBuf::from(".").join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortField;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.documents.len(), 9);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.sort(), SortSpec::default());
        assert_eq!(
            config.sources()[3],
            Source::File(PathBuf::from("data").join("solhaven.json"))
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = CatalogConfig {
            base: "https://example.com/shops/".into(),
            documents: vec!["solhaven.json".into()],
            default_sort: "price-desc".into(),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = CatalogConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.sources(),
            vec![Source::Url("https://example.com/shops/solhaven.json".into())]
        );
        assert_eq!(loaded.sort(), SortSpec::desc(SortField::Price));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "(page_size: 25)").unwrap();

        let config = CatalogConfig::load_or_default(&path);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.base, "data");
        assert_eq!(config.documents.len(), 9);
    }

    #[test]
    fn test_broken_or_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ron");
        assert_eq!(CatalogConfig::load_or_default(&missing), CatalogConfig::default());

        let broken = dir.path().join("broken.ron");
        fs::write(&broken, "(page_size: \"lots\"").unwrap();
        assert!(matches!(CatalogConfig::load(&broken), Err(ConfigError::Parse { .. })));
        assert_eq!(CatalogConfig::load_or_default(&broken), CatalogConfig::default());
    }

    #[test]
    fn test_write_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        write_default_config(&path).unwrap();
        assert_eq!(CatalogConfig::load(&path).unwrap(), CatalogConfig::default());
    }
}
