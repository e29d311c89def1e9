//! Stocktrack configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default low-stock threshold
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 10;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    /// Directory holding both snapshots and the log file
    pub data_dir: PathBuf,

    /// Inventory snapshot file name
    pub inventory_file: String,

    /// Account snapshot file name
    pub users_file: String,

    /// Log file name
    pub log_file: String,

    /// Threshold offered when the low-stock prompt is left blank
    pub low_stock_threshold: u64,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            inventory_file: "inventory.json".to_string(),
            users_file: "users.json".to_string(),
            log_file: "inventory_app.log".to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StockConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the default low-stock threshold
    pub fn with_low_stock_threshold(mut self, threshold: u64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(&self.inventory_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }

    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let read = || -> Result<Self> {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        };
        read().with_context(|| format!("reading config {}", path.display()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_data_layout() {
        let config = StockConfig::default();
        assert_eq!(config.inventory_path(), Path::new("data/inventory.json"));
        assert_eq!(config.users_path(), Path::new("data/users.json"));
        assert_eq!(config.log_path(), Path::new("data/inventory_app.log"));
        assert_eq!(config.low_stock_threshold, 10);
    }

    #[test]
    fn test_builder() {
        let config = StockConfig::new()
            .with_data_dir("/srv/stock")
            .with_low_stock_threshold(3);
        assert_eq!(config.inventory_path(), Path::new("/srv/stock/inventory.json"));
        assert_eq!(config.low_stock_threshold, 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stocktrack.json");
        std::fs::write(&path, r#"{"low_stock_threshold": 4}"#).unwrap();

        let config = StockConfig::from_file(&path).unwrap();
        assert_eq!(config.low_stock_threshold, 4);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_file_round_trip_and_missing_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stocktrack.json");

        assert_eq!(
            StockConfig::from_file_or_default(&path).unwrap(),
            StockConfig::default()
        );

        let config = StockConfig::new().with_data_dir("elsewhere");
        config.to_file(&path).unwrap();
        assert_eq!(StockConfig::from_file_or_default(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stocktrack.json");
        std::fs::write(&path, "{").unwrap();

        let err = StockConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
