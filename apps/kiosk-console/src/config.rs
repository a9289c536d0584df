//! # Kiosk Configuration
//!
//! Everything that used to be a compiled-in constant: the admin PIN, the
//! attempt limit, price and charity bounds, keys, package labels and the
//! event name.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KIOSK_PIN=7781                                                     │
//! │     KIOSK_EVENT_NAME="the Spring Gala"                                 │
//! │     KIOSK_MAX_ATTEMPTS=3                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $KIOSK_CONFIG, or                                                  │
//! │     ~/.config/kiosk/kiosk.toml (Linux)                                 │
//! │     ~/Library/Application Support/org.charity.kiosk/kiosk.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [event]
//! name = "the Denver Nuggets game"
//!
//! [admin]
//! pin = "4932"
//! max_attempts = 4
//!
//! [pricing]
//! min_price = 10.0
//! max_price = 500.0
//! min_charity_percent = 9.99   # exclusive
//! max_charity_percent = 30.0   # inclusive
//!
//! [input]
//! max_length = 10
//! quit_key = "Q"
//! yes_key = "Y"
//! no_key = "N"
//!
//! [packages]
//! labels = ["Single Pack", "Double Pack", "Triple Pack", "Family Pack"]
//! ```

use kiosk_core::validation::{normalize_case, NumericRange};
use kiosk_core::{PackageSet, DEFAULT_PACKAGE_LABELS, MAX_PACKAGES, ZIP_CODE_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::console::ConfirmKeys;

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// The event tickets are sold for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    /// Shown on the pricing sheet and every receipt.
    #[serde(default = "default_event_name")]
    pub name: String,
}

fn default_event_name() -> String {
    "the Denver Nuggets game".to_string()
}

impl Default for EventConfig {
    fn default() -> Self {
        EventConfig {
            name: default_event_name(),
        }
    }
}

/// PIN gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_pin")]
    pub pin: String,

    /// Tries allowed per PIN check.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_pin() -> String {
    "4932".to_string()
}

fn default_max_attempts() -> u32 {
    4
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            pin: default_pin(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Price and charity bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Lowest ticket price (inclusive).
    #[serde(default = "default_min_price")]
    pub min_price: f64,

    /// Highest ticket price (inclusive).
    #[serde(default = "default_max_price")]
    pub max_price: f64,

    /// Charity percentage must be strictly above this.
    #[serde(default = "default_min_charity")]
    pub min_charity_percent: f64,

    /// Charity percentage may equal this.
    #[serde(default = "default_max_charity")]
    pub max_charity_percent: f64,
}

fn default_min_price() -> f64 {
    10.0
}
fn default_max_price() -> f64 {
    500.0
}
fn default_min_charity() -> f64 {
    9.99
}
fn default_max_charity() -> f64 {
    30.0
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            min_price: default_min_price(),
            max_price: default_max_price(),
            min_charity_percent: default_min_charity(),
            max_charity_percent: default_max_charity(),
        }
    }
}

/// Line protocol settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Longest accepted line, in characters. Longer lines are rejected.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    #[serde(default = "default_quit_key")]
    pub quit_key: char,

    #[serde(default = "default_yes_key")]
    pub yes_key: char,

    #[serde(default = "default_no_key")]
    pub no_key: char,
}

fn default_max_length() -> usize {
    10
}
fn default_quit_key() -> char {
    'Q'
}
fn default_yes_key() -> char {
    'Y'
}
fn default_no_key() -> char {
    'N'
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            max_length: default_max_length(),
            quit_key: default_quit_key(),
            yes_key: default_yes_key(),
            no_key: default_no_key(),
        }
    }
}

/// Ticket packages on offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagesConfig {
    /// Label of package 1, 2, 3, ... in order.
    #[serde(default = "default_package_labels")]
    pub labels: Vec<String>,
}

fn default_package_labels() -> Vec<String> {
    DEFAULT_PACKAGE_LABELS.iter().map(|l| l.to_string()).collect()
}

impl Default for PackagesConfig {
    fn default() -> Self {
        PackagesConfig {
            labels: default_package_labels(),
        }
    }
}

// =============================================================================
// Main Kiosk Configuration
// =============================================================================

/// Complete kiosk configuration, passed into the admin and purchase flows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub event: EventConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub packages: PackagesConfig,
}

impl KioskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading kiosk config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        info!(
            event = %config.event.name,
            max_attempts = config.admin.max_attempts,
            packages = config.packages.labels.len(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Parses a TOML file without applying overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.event.name.trim().is_empty() {
            return Err(ConfigError::Invalid("event name must not be empty".into()));
        }

        if self.admin.pin.trim().is_empty() {
            return Err(ConfigError::Invalid("admin pin must not be empty".into()));
        }

        if self.admin.pin.chars().count() > self.input.max_length {
            return Err(ConfigError::Invalid(format!(
                "admin pin is longer than input max_length ({})",
                self.input.max_length
            )));
        }

        if self.admin.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be greater than 0".into(),
            ));
        }

        if !self.price_range().is_valid() || self.pricing.min_price <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "price range {}..={} is empty or not positive",
                self.pricing.min_price, self.pricing.max_price
            )));
        }

        if !self.charity_range().is_valid() || self.pricing.min_charity_percent < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "charity range ({}, {}] is empty or negative",
                self.pricing.min_charity_percent, self.pricing.max_charity_percent
            )));
        }

        if self.pricing.max_charity_percent > 100.0 {
            return Err(ConfigError::Invalid(
                "max_charity_percent cannot exceed 100".into(),
            ));
        }

        if self.input.max_length < ZIP_CODE_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "input max_length must be at least {} to accept a zip code",
                ZIP_CODE_LENGTH
            )));
        }

        let keys = [self.quit_key(), self.yes_key(), self.no_key()];
        if keys.iter().any(|k| !k.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid(
                "quit, yes and no keys must be letters".into(),
            ));
        }
        if self.yes_key() == self.no_key() {
            return Err(ConfigError::Invalid("yes and no keys must differ".into()));
        }

        if self.packages.labels.is_empty() || self.packages.labels.len() > MAX_PACKAGES {
            return Err(ConfigError::Invalid(format!(
                "between 1 and {} packages are required",
                MAX_PACKAGES
            )));
        }
        self.package_set()?;

        Ok(())
    }

    /// Applies overrides looked up by environment variable name.
    ///
    /// Takes the lookup as a closure so tests don't have to touch the
    /// process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pin) = lookup("KIOSK_PIN") {
            debug!("Overriding admin pin from environment");
            self.admin.pin = pin;
        }

        if let Some(name) = lookup("KIOSK_EVENT_NAME") {
            debug!(event = %name, "Overriding event name from environment");
            self.event.name = name;
        }

        if let Some(attempts) = lookup("KIOSK_MAX_ATTEMPTS") {
            match attempts.parse::<u32>() {
                Ok(n) => self.admin.max_attempts = n,
                Err(_) => warn!(value = %attempts, "Ignoring non-numeric KIOSK_MAX_ATTEMPTS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "charity", "kiosk")
            .map(|dirs| dirs.config_dir().join("kiosk.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The PIN as it looks after input normalization.
    pub fn normalized_pin(&self) -> String {
        normalize_case(self.admin.pin.trim())
    }

    /// Closed range accepted for section prices.
    pub fn price_range(&self) -> NumericRange {
        NumericRange::inclusive(self.pricing.min_price, self.pricing.max_price)
    }

    /// Half-open range accepted for the charity percentage.
    pub fn charity_range(&self) -> NumericRange {
        NumericRange::exclusive_min(
            self.pricing.min_charity_percent,
            self.pricing.max_charity_percent,
        )
    }

    /// Keys are compared against normalized (upper-cased) single-letter input.
    pub fn quit_key(&self) -> char {
        self.input.quit_key.to_ascii_uppercase()
    }

    pub fn yes_key(&self) -> char {
        self.input.yes_key.to_ascii_uppercase()
    }

    pub fn no_key(&self) -> char {
        self.input.no_key.to_ascii_uppercase()
    }

    /// Keys for every yes/no question.
    pub fn confirm_keys(&self) -> ConfirmKeys {
        ConfirmKeys {
            yes: self.yes_key(),
            no: self.no_key(),
        }
    }

    /// The configured packages.
    pub fn package_set(&self) -> ConfigResult<PackageSet> {
        PackageSet::from_labels(self.packages.labels.as_slice())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_matches_kiosk_constants() {
        let config = KioskConfig::default();
        assert!(config.validate().is_ok());

        assert_eq!(config.event.name, "the Denver Nuggets game");
        assert_eq!(config.admin.pin, "4932");
        assert_eq!(config.admin.max_attempts, 4);
        assert_eq!(config.price_range(), NumericRange::inclusive(10.0, 500.0));
        assert_eq!(config.charity_range(), NumericRange::exclusive_min(9.99, 30.0));
        assert_eq!(config.quit_key(), 'Q');
        assert_eq!(config.package_set().unwrap().len(), 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: KioskConfig = toml::from_str(
            r#"
            [event]
            name = "the Spring Gala"

            [pricing]
            max_price = 250.0

            [input]
            quit_key = "x"
            "#,
        )
        .unwrap();

        assert_eq!(config.event.name, "the Spring Gala");
        assert_eq!(config.pricing.max_price, 250.0);
        assert_eq!(config.pricing.min_price, 10.0);
        assert_eq!(config.admin.pin, "4932");
        assert_eq!(config.quit_key(), 'X');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = KioskConfig::default();
        config.admin.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.pricing.min_price = 600.0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.pricing.min_charity_percent = 30.0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.input.yes_key = 'n';
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.input.max_length = 4;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.packages.labels.clear();
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.admin.pin = "12345678901".to_string();
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.packages.labels = vec!["Solo".to_string(), " ".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("KIOSK_PIN", "7781"),
            ("KIOSK_EVENT_NAME", "the Spring Gala"),
            ("KIOSK_MAX_ATTEMPTS", "2"),
        ]
        .into_iter()
        .collect();

        let mut config = KioskConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.admin.pin, "7781");
        assert_eq!(config.event.name, "the Spring Gala");
        assert_eq!(config.admin.max_attempts, 2);
    }

    #[test]
    fn test_bad_attempts_override_is_ignored() {
        let mut config = KioskConfig::default();
        config.apply_overrides(|key| (key == "KIOSK_MAX_ATTEMPTS").then(|| "lots".to_string()));
        assert_eq!(config.admin.max_attempts, 4);
    }

    #[test]
    fn test_normalized_pin() {
        let mut config = KioskConfig::default();
        config.admin.pin = "abc1".to_string();
        assert_eq!(config.normalized_pin(), "Abc1");
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("kiosk-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[admin]\npin = \"1111\"\nmax_attempts = 3\n").unwrap();

        let config = KioskConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.admin.pin, "1111");
        assert_eq!(config.admin.max_attempts, 3);
        assert_eq!(config.pricing.max_price, 500.0);
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let err = toml::from_str::<KioskConfig>("[admin]\nmax_attempts = \"four\"")
            .map_err(ConfigError::from)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let config = KioskConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[admin]"));
        assert!(toml_str.contains("[packages]"));
    }
}
