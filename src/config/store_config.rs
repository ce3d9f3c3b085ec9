use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the persisted storage files
    pub data_dir: PathBuf,

    /// Storage key for the cart snapshot
    pub cart_key: String,

    /// Storage key for the order history
    pub orders_key: String,

    /// Storage key for the logged-in session
    pub session_key: String,

    /// Sales tax applied to the subtotal at checkout
    pub tax_rate: f64,

    pub free_shipping: bool,

    /// Shipping charged per order when `free_shipping` is off
    pub flat_shipping: f64,

    /// Simulated payment processing time (in milliseconds)
    pub payment_delay_ms: u64,

    pub currency_symbol: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cart_key: "cart".to_string(),
            orders_key: "orders".to_string(),
            session_key: "session".to_string(),
            tax_rate: 0.08,
            free_shipping: true,
            flat_shipping: 0.0,
            payment_delay_ms: 2000,
            currency_symbol: "$".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from the user's config directory, writing the
    /// defaults there on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            Ok(default_config)
        }
    }

    /// Like [`StoreConfig::load`], but never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Falling back to default store configuration");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("storefront").join("config.toml"))
    }

    pub fn shipping_cost(&self) -> f64 {
        if self.free_shipping { 0.0 } else { self.flat_shipping }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storefront")
}
