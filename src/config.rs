//! Configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Transaction storage configuration
    pub store: StoreConfig,
    /// Items offered by the shop front-end
    pub catalog: Vec<String>,
    /// Clustering configuration
    pub kmeans: KMeansConfig,
    /// Association-rule mining configuration
    pub apriori: AprioriConfig,
}

/// Transaction storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the persisted transaction file
    pub path: String,
}

/// Clustering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters
    pub clusters: usize,
    /// Iteration cap
    pub max_iters: usize,
    /// Convergence tolerance on total centroid shift
    pub tolerance: f64,
    /// Fixed RNG seed; unset draws from entropy
    pub seed: Option<u64>,
}

/// Association-rule mining configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AprioriConfig {
    /// Minimum itemset support
    pub min_support: f64,
    /// Minimum rule confidence
    pub min_confidence: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                path: "transactions.json".to_string(),
            },
            catalog: crate::data::DEFAULT_CATALOG
                .iter()
                .map(|s| s.to_string())
                .collect(),
            kmeans: KMeansConfig {
                clusters: 2,
                max_iters: 100,
                tolerance: 1e-4,
                seed: None,
            },
            apriori: AprioriConfig {
                min_support: 0.3,
                min_confidence: 0.7,
            },
        }
    }
}

impl Config {
    /// Create new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from environment variables (with prefix)
    pub fn from_env(prefix: &str) -> Self {
        let mut config = Self::default();

        // Override with environment variables
        if let Ok(path) = std::env::var(format!("{}_STORE_PATH", prefix)) {
            config.store.path = path;
        }

        if let Ok(clusters) = std::env::var(format!("{}_CLUSTERS", prefix)) {
            if let Ok(v) = clusters.parse() {
                config.kmeans.clusters = v;
            }
        }

        if let Ok(seed) = std::env::var(format!("{}_SEED", prefix)) {
            if let Ok(v) = seed.parse() {
                config.kmeans.seed = Some(v);
            }
        }

        if let Ok(support) = std::env::var(format!("{}_MIN_SUPPORT", prefix)) {
            if let Ok(v) = support.parse() {
                config.apriori.min_support = v;
            }
        }

        if let Ok(confidence) = std::env::var(format!("{}_MIN_CONFIDENCE", prefix)) {
            if let Ok(v) = confidence.parse() {
                config.apriori.min_confidence = v;
            }
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.is_empty() {
            return Err(ConfigError::Validation(
                "Store path must not be empty".to_string(),
            ));
        }

        if self.catalog.is_empty() {
            return Err(ConfigError::Validation("No catalog items configured".to_string()));
        }

        if self.kmeans.clusters < 1 {
            return Err(ConfigError::Validation(
                "Cluster count must be at least 1".to_string(),
            ));
        }

        if self.kmeans.max_iters < 1 {
            return Err(ConfigError::Validation(
                "Iteration cap must be at least 1".to_string(),
            ));
        }

        if self.kmeans.tolerance < 0.0 {
            return Err(ConfigError::Validation(
                "Tolerance must not be negative".to_string(),
            ));
        }

        if self.apriori.min_support <= 0.0 || self.apriori.min_support > 1.0 {
            return Err(ConfigError::Validation(
                "Minimum support must be between 0 and 1".to_string(),
            ));
        }

        if self.apriori.min_confidence <= 0.0 || self.apriori.min_confidence > 1.0 {
            return Err(ConfigError::Validation(
                "Minimum confidence must be between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.len(), 10);
        assert_eq!(config.kmeans.clusters, 2);
        assert!((config.apriori.min_support - 0.3).abs() < 1e-12);
        assert!((config.apriori.min_confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut invalid = Config::default();
        invalid.catalog.clear();
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.apriori.min_support = 1.5;
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.kmeans.clusters = 0;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.catalog.len(), parsed.catalog.len());
        assert_eq!(config.store.path, parsed.store.path);
    }
}
