// Configuration loading for sitekit.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::services::archive_fetcher::DEFAULT_ARCHIVE_HOST;
use crate::services::bower_command::DEFAULT_BOWER_PROGRAM;
use crate::services::components_reset::PRESERVED_COMPONENT_FILES;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{if_present_check_type, ValueType};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sitekit.toml";

const KNOWN_KEYS: &[&str] = &[
    "site_dir",
    "components_dir",
    "manifest",
    "archive_host",
    "bower",
    "preserve",
];

/// Resolved build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Generated site root
    pub site_dir: PathBuf,
    /// Installed components directory reset by `reset`
    pub components_dir: PathBuf,
    /// Legacy dependency manifest
    pub manifest: PathBuf,
    /// Host serving repository archives
    pub archive_host: String,
    /// Package manager executable
    pub bower: String,
    /// Paths under `components_dir` that survive a reset
    pub preserve: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let site_dir = PathBuf::from("_site");
        Self {
            components_dir: site_dir.join("bower_components"),
            site_dir,
            manifest: PathBuf::from("bower.json"),
            archive_host: DEFAULT_ARCHIVE_HOST.to_string(),
            bower: DEFAULT_BOWER_PROGRAM.to_string(),
            preserve: PRESERVED_COMPONENT_FILES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// On-disk shape; every key is optional
#[derive(Debug, Default, Deserialize)]
struct SiteConfigFile {
    site_dir: Option<PathBuf>,
    components_dir: Option<PathBuf>,
    manifest: Option<PathBuf>,
    archive_host: Option<String>,
    bower: Option<String>,
    preserve: Option<Vec<String>>,
}

impl From<SiteConfigFile> for SiteConfig {
    fn from(file: SiteConfigFile) -> Self {
        let defaults = SiteConfig::default();
        let site_dir = file.site_dir.unwrap_or(defaults.site_dir);
        let components_dir = file
            .components_dir
            .unwrap_or_else(|| site_dir.join("bower_components"));

        Self {
            site_dir,
            components_dir,
            manifest: file.manifest.unwrap_or(defaults.manifest),
            archive_host: file.archive_host.unwrap_or(defaults.archive_host),
            bower: file.bower.unwrap_or(defaults.bower),
            preserve: file.preserve.unwrap_or(defaults.preserve),
        }
    }
}

/// Configuration parsing and validation utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Load the configuration at `path`; a missing file yields the defaults
    pub fn load_site_config<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(SiteConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SiteError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_site_config(&content)
    }

    /// Parse configuration from TOML, checking field types before deserializing
    pub fn parse_site_config(content: &str) -> Result<SiteConfig> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| SiteError::Config(format!("Invalid TOML syntax: {}", e)))?;

        let value = serde_json::to_value(&table)
            .map_err(|e| SiteError::Config(format!("Unsupported configuration value: {}", e)))?;

        Self::validate_fields(&value)?;

        let file: SiteConfigFile = serde_json::from_value(value)
            .map_err(|e| SiteError::Config(format!("Invalid configuration: {}", e)))?;

        Ok(SiteConfig::from(file))
    }

    fn validate_fields(value: &Value) -> Result<()> {
        for key in ["site_dir", "components_dir", "manifest", "archive_host", "bower"] {
            if_present_check_type(ValueType::String, key, value.get(key))?;
        }

        if_present_check_type(ValueType::Array, "preserve", value.get("preserve"))?;
        if let Some(Value::Array(entries)) = value.get("preserve") {
            for (index, entry) in entries.iter().enumerate() {
                if_present_check_type(ValueType::String, &format!("preserve[{}]", index), Some(entry))?;
            }
        }

        if let Value::Object(map) = value {
            for key in map.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
                log::warn!("Ignoring unknown configuration key '{}'", key);
            }
        }

        Ok(())
    }
}
