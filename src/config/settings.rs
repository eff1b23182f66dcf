//! Application settings loaded from a TOML file.
//!
//! Every field has a default, so an empty or missing file yields a working
//! configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "sako.toml";

/// Application settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Currency prefix used when rendering prices (e.g., `"Rp"`)
    pub currency_symbol: String,
    /// Number of entries in the ranked product list
    pub top_products_limit: usize,
    /// Key under which the monthly summary is shared with the widget
    pub widget_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "Rp".to_string(),
            top_products_limit: crate::core::aggregator::DEFAULT_TOP_PRODUCTS,
            widget_key: crate::core::widget::DEFAULT_WIDGET_KEY.to_string(),
        }
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Loading settings from {}", path_ref.display());
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads settings from `path` if it exists, defaults otherwise.
///
/// A file that exists but fails to parse is still an error.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_settings(path_ref)
    } else {
        info!(
            "No settings file at {}, using defaults",
            path_ref.display()
        );
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            currency_symbol = "IDR"
            top_products_limit = 5
            widget_key = "recap"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.currency_symbol, "IDR");
        assert_eq!(settings.top_products_limit, 5);
        assert_eq!(settings.widget_key, "recap");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = toml::from_str("top_products_limit = 3").unwrap();
        assert_eq!(settings.currency_symbol, "Rp");
        assert_eq!(settings.top_products_limit, 3);
        assert_eq!(settings.widget_key, "monthlyRevenue");
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_symbol = \"$\"").unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.top_products_limit, 10);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_products_limit = \"many\"").unwrap();

        let result = load_settings(file.path());
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
