//! Configuration handling for ordo.
//! Loads host settings (`ordo.json`, `ordo.yml`, `ordo.yaml`) and event-type
//! bundles. Both accept JSON or YAML; JSON is tried first.

use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builders::DomainRecord;
use crate::constants::{
    DEFAULT_LOOKUP_TIMEOUT_MS, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_MARGIN, DEFAULT_PAGE_WIDTH,
};
use crate::document::Language;
use crate::error::{Error, Result};
use crate::resolver::StaticLookup;
use crate::schema::EventType;
use crate::substitute::Parish;
use crate::validator::{validate_event_type, ValidationContext, ValidationReport};

/// Page geometry in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            margin: DEFAULT_PAGE_MARGIN,
        }
    }
}

/// Host settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub lookup_timeout_ms: u64,
    pub page: PageSettings,
    pub parish: Option<Parish>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
            page: PageSettings::default(),
            parish: None,
        }
    }
}

impl Settings {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

/// Reads the first configuration file found in `dir`.
///
/// # Arguments
/// * `dir` - Directory to search
/// * `config_files` - Candidate file names, in priority order
///
/// # Returns
/// * `Result<Option<String>>` - Contents of the first file found, `None` if there is none
///
/// # Errors
/// * `Error::IoError` if a found file cannot be read
pub fn load_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }
    Ok(None)
}

/// Parses JSON, falling back to YAML.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
///   for the target type
pub fn parse_document<T: DeserializeOwned>(content: &str, what: &str) -> Result<T> {
    match serde_json::from_str(content) {
        Ok(v) => Ok(v),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid {what} format: {e}"))),
    }
}

/// Loads settings from `dir`, using defaults when no settings file exists.
pub fn load_settings<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Settings> {
    match load_config(&dir, config_files)? {
        Some(content) => parse_document(&content, "settings"),
        None => {
            debug!(
                "No settings file in {} (tried: {}), using defaults",
                dir.as_ref().display(),
                config_files.join(", ")
            );
            Ok(Settings::default())
        }
    }
}

fn new_bundle_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// An event type together with one instance's data.
///
/// `values` maps property names to stored raw values; `entities` holds the
/// records those values may point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default = "new_bundle_id")]
    pub id: String,
    pub event_type: EventType,
    #[serde(default)]
    pub values: IndexMap<String, Value>,
    #[serde(default)]
    pub entities: StaticLookup,
    #[serde(flatten)]
    pub context: ValidationContext,
    #[serde(default)]
    pub parish: Option<Parish>,
    /// A domain record rendered through the template registries.
    #[serde(default)]
    pub record: Option<DomainRecord>,
}

impl Bundle {
    pub fn validate(&self) -> ValidationReport {
        validate_event_type(
            &self.event_type,
            &self.context.filter_tags,
            &self.context.list_ids,
        )
    }
}

/// Loads a bundle file.
///
/// # Errors
/// * `Error::IoError` if the file cannot be read
/// * `Error::ConfigError` if it is not a valid bundle
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<Bundle> {
    let path = path.as_ref();
    debug!("Loading bundle from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, "bundle")
}
