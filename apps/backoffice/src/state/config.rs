//! # Configuration State
//!
//! Backoffice configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MOSTRADOR_BACKEND_URL=https://api.example.cl/v1                    │
//! │     MOSTRADOR_STORE_ID=s1                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/mostrador/backoffice.toml (Linux)                        │
//! │     ~/Library/Application Support/cl.mostrador.backoffice/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost backend, es-CL, markup 1.5× .. 3.0×, floating 1.4×       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # backoffice.toml
//! [backend]
//! url = "https://api.example.cl/v1"
//! api_token = "..."
//! timeout_secs = 15
//!
//! [store]
//! default_store_id = "s1"
//!
//! [display]
//! locale = "es-CL"
//! currency_symbol = "$"
//!
//! [pricing]
//! min_markup = 1.5
//! max_markup = 3.0
//! min_floating = 1.4
//! ```
//!
//! Configuration is read-only after startup. Markup bounds are only the
//! initial values of [`PricingState`](super::PricingState), which the
//! operator can change per session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mostrador_client::{BackendConfig, ClientError};
use mostrador_core::format::{format_currency, NumberLocale};
use mostrador_core::{CoreError, MarkupConfig, Money, DEFAULT_CURRENCY_SYMBOL};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] CoreError),

    #[error("Cannot create backend client: {0}")]
    Backend(#[from] ClientError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[backend]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Bearer token, if the backend requires one.
    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            url: default_backend_url(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[store]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Store selected when the backoffice starts; `None` means the operator
    /// must pick one before adding to the cart.
    #[serde(default)]
    pub default_store_id: Option<String>,
}

/// `[display]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub locale: NumberLocale,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            locale: NumberLocale::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// `[pricing]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_min_markup")]
    pub min_markup: Decimal,

    #[serde(default = "default_max_markup")]
    pub max_markup: Decimal,

    #[serde(default = "default_min_floating")]
    pub min_floating: Decimal,
}

fn default_min_markup() -> Decimal {
    MarkupConfig::default().min_markup
}

fn default_max_markup() -> Decimal {
    MarkupConfig::default().max_markup
}

fn default_min_floating() -> Decimal {
    MarkupConfig::default().min_floating
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            min_markup: default_min_markup(),
            max_markup: default_max_markup(),
            min_floating: default_min_floating(),
        }
    }
}

impl PricingSettings {
    /// Validated markup bounds.
    pub fn markup_config(&self) -> Result<MarkupConfig, CoreError> {
        MarkupConfig::new(self.min_markup, self.max_markup, self.min_floating)
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete backoffice configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub pricing: PricingSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Steps
    /// 1. Start from defaults
    /// 2. Read `config_path` (or the platform default) if it exists
    /// 3. Apply `MOSTRADOR_*` environment overrides
    /// 4. Validate
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses one TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading backoffice config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text. Missing sections and keys take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.backend.url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "Backend URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("currency_symbol must not be empty".into()));
        }

        self.pricing.markup_config()?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `MOSTRADOR_*` overrides read through `lookup`.
    ///
    /// Values that do not parse are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("MOSTRADOR_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.url = url;
        }

        if let Some(token) = lookup("MOSTRADOR_API_TOKEN") {
            self.backend.api_token = Some(token);
        }

        if let Some(store) = lookup("MOSTRADOR_STORE_ID") {
            debug!(store_id = %store, "Overriding default store from environment");
            self.store.default_store_id = Some(store);
        }

        if let Some(locale) = lookup("MOSTRADOR_LOCALE") {
            match locale.parse() {
                Ok(parsed) => self.display.locale = parsed,
                Err(_) => warn!(locale = %locale, "Unknown locale in environment"),
            }
        }

        let decimal = |key: &str| -> Option<Decimal> {
            let raw = lookup(key)?;
            match raw.trim().parse::<Decimal>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring non-numeric override");
                    None
                }
            }
        };

        if let Some(value) = decimal("MOSTRADOR_MIN_MARKUP") {
            self.pricing.min_markup = value;
        }
        if let Some(value) = decimal("MOSTRADOR_MAX_MARKUP") {
            self.pricing.max_markup = value;
        }
        if let Some(value) = decimal("MOSTRADOR_MIN_FLOATING") {
            self.pricing.min_floating = value;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("cl", "mostrador", "backoffice")
            .map(|dirs| dirs.config_dir().join("backoffice.toml"))
    }

    /// Backend client settings.
    pub fn backend_config(&self) -> BackendConfig {
        let config = BackendConfig::new(self.backend.url.trim())
            .timeout(Duration::from_secs(self.backend.timeout_secs));
        match &self.backend.api_token {
            Some(token) => config.api_token(token.clone()),
            None => config,
        }
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Display settings shared by commands.
///
/// Read-only after initialization, so no mutex.
#[derive(Debug, Clone)]
pub struct ConfigState {
    config: AppConfig,
}

impl ConfigState {
    pub fn new(config: AppConfig) -> Self {
        ConfigState { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn locale(&self) -> NumberLocale {
        self.config.display.locale
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config.display.currency_symbol
    }

    /// Formats money with the configured locale and symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_minor(19_990)), "$19.990");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        // Integer money always formats
        format_currency(amount, self.locale(), self.currency_symbol())
            .unwrap_or_else(|_| amount.minor().to_string())
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::new(AppConfig::default())
    }
}
