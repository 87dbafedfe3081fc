//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKCART_OFFERS_URL=https://books.example                          │
//! │     BOOKCART_CART_KEY=cpascher_cart                                    │
//! │     BOOKCART_CART_TTL_DAYS=1                                           │
//! │     BOOKCART_STORE_DIR=/var/lib/bookcart                               │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/bookcart/config.toml (Linux)                             │
//! │     ~/Library/Application Support/com.bookcart.bookcart/config.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [offers]
//! base_url = "http://henri-potier.xebia.fr"
//!
//! [cart]
//! key = "cpascher_cart"
//! ttl_days = 1
//!
//! [store]
//! dir = "/home/me/.local/share/bookcart"
//! ```

use std::path::PathBuf;

use bookcart_core::{CART_TTL_DAYS, DEFAULT_CART_KEY};
use bookcart_offers::OffersConfig;
use bookcart_store::validate_key;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Sections
// =============================================================================

/// Where and for how long the cart is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Store key the cart is saved under.
    #[serde(default = "default_cart_key")]
    pub key: String,

    /// Days a cart survives after its last write.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u32,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            key: default_cart_key(),
            ttl_days: default_ttl_days(),
        }
    }
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_ttl_days() -> u32 {
    CART_TTL_DAYS
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the file store. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub offers: OffersConfig,

    #[serde(default)]
    pub cart: CartConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Loads configuration from file, then applies environment overrides
    /// and validates the result.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads the config file alone. A missing file yields the defaults.
    pub fn from_file(config_path: Option<PathBuf>) -> CliResult<Self> {
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(&path).map_err(CliError::ConfigRead)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> CliResult<()> {
        self.offers.validate()?;

        validate_key(&self.cart.key)
            .map_err(|e| CliError::InvalidConfig(format!("cart key: {e}")))?;

        if self.cart.ttl_days == 0 {
            return Err(CliError::InvalidConfig(
                "cart ttl_days must be at least 1".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("BOOKCART_OFFERS_URL") {
            debug!(url = %url, "Overriding offers URL from environment");
            self.offers.base_url = url;
        }

        if let Some(key) = var("BOOKCART_CART_KEY") {
            debug!(key = %key, "Overriding cart key from environment");
            self.cart.key = key;
        }

        if let Some(ttl) = var("BOOKCART_CART_TTL_DAYS") {
            match ttl.parse::<u32>() {
                Ok(days) => self.cart.ttl_days = days,
                Err(_) => warn!(value = %ttl, "Ignoring non-numeric BOOKCART_CART_TTL_DAYS"),
            }
        }

        if let Some(dir) = var("BOOKCART_STORE_DIR") {
            self.store.dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Directory the file store writes carts into.
    pub fn store_dir(&self) -> PathBuf {
        self.store
            .dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".bookcart"))
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "bookcart", "bookcart")
}
