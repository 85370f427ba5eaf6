use anyhow::{Context, Result};
use qosmesh_routing::{
    CostWeights, RoutingPolicy, DEFAULT_ANT_COUNT, DEFAULT_ITERATIONS, DEFAULT_MAX_PATH_LENGTH,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub optimizer: OptimizerConfig,
    pub weights: WeightsConfig,
    #[serde(default)]
    pub random_path: RandomPathConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(skip)]
    config_file_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub ant_count: usize,
    pub iterations: usize,
    /// Fixed seed for reproducible runs; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            ant_count: DEFAULT_ANT_COUNT,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsConfig {
    /// Named preset; overrides the explicit weights when set
    #[serde(default)]
    pub preset: Option<RoutingPolicy>,
    pub delay: f64,
    pub reliability: f64,
    pub bandwidth: f64,
}

impl WeightsConfig {
    pub fn cost_weights(&self) -> CostWeights {
        match self.preset {
            Some(policy) => policy.weights(),
            None => CostWeights {
                delay: self.delay,
                reliability: self.reliability,
                bandwidth: self.bandwidth,
            },
        }
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        let weights = CostWeights::default();
        Self {
            preset: None,
            delay: weights.delay,
            reliability: weights.reliability,
            bandwidth: weights.bandwidth,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomPathConfig {
    pub max_length: usize,
}

impl Default for RandomPathConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_PATH_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            optimizer: OptimizerConfig::default(),
            weights: WeightsConfig::default(),
            random_path: RandomPathConfig::default(),
            logging: LoggingConfig::default(),
            config_file_path: Self::default_config_path(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            anyhow::bail!(
                "Configuration file not found: {}\nRun `qosmesh init-config` to create one",
                config_path.display()
            );
        }

        let contents =
            fs::read_to_string(&config_path).context("Failed to read configuration file")?;

        let mut config: Config =
            serde_yaml::from_str(&contents).context("Failed to parse configuration file")?;
        config.config_file_path = config_path;
        config.validate()?;

        Ok(config)
    }

    /// Load an explicit configuration file, or fall back to the default
    /// location and finally to built-in defaults
    pub fn load_or_default(config_path: Option<PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load(Some(path)),
            None if Self::default_config_path().exists() => Self::load(None),
            None => Ok(Self::default()),
        }
    }

    /// Write a default configuration file
    pub fn create_default(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(Self::default_config_path);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create configuration directory")?;
        }

        let config = Config {
            config_file_path: config_path.clone(),
            ..Config::default()
        };

        let yaml = serde_yaml::to_string(&config)?;
        fs::write(&config_path, yaml).context("Failed to write configuration file")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.optimizer.ant_count == 0 {
            anyhow::bail!("optimizer.ant_count must be at least 1");
        }
        if self.optimizer.iterations == 0 {
            anyhow::bail!("optimizer.iterations must be at least 1");
        }
        if self.random_path.max_length == 0 {
            anyhow::bail!("random_path.max_length must be at least 1");
        }
        self.weights
            .cost_weights()
            .validate()
            .context("Invalid weights section")?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_file_path
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qosmesh")
            .join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.optimizer.ant_count, DEFAULT_ANT_COUNT);
        assert_eq!(config.weights.cost_weights(), CostWeights::default());
    }

    #[test]
    fn test_preset_overrides_explicit_weights() {
        let weights = WeightsConfig {
            preset: Some(RoutingPolicy::LowLatency),
            delay: 0.0,
            reliability: 0.0,
            bandwidth: 0.0,
        };
        assert_eq!(weights.cost_weights(), RoutingPolicy::LowLatency.weights());
    }

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
optimizer:
  ant_count: 8
  iterations: 4
  seed: 99
weights:
  preset: high_reliability
  delay: 1.0
  reliability: 1.0
  bandwidth: 1.0
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.optimizer.seed, Some(99));
        assert_eq!(config.random_path.max_length, DEFAULT_MAX_PATH_LENGTH);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.weights.cost_weights(),
            RoutingPolicy::HighReliability.weights()
        );
    }

    #[test]
    fn test_rejects_zero_ants() {
        let mut config = Config::default();
        config.optimizer.ant_count = 0;
        assert!(config.validate().is_err());
    }
}
