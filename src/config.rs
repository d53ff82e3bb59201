use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;

pub const DEFAULT_SLOT_NAME: &str = "newcool-cerebro-storage";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub slot_name: String,
    pub log_filter: String,
    pub simulation: SimulationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("."),
            slot_name: DEFAULT_SLOT_NAME.to_string(),
            log_filter: "info".to_string(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Path of the JSON file backing the persisted state slot.
    pub fn state_file(&self) -> PathBuf {
        self.storage_dir.join(format!("{}.json", self.slot_name))
    }
}

/// Timer periods for the demo metric simulation in the dashboard.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub community_tick_ms: u64,
    pub neural_tick_ms: u64,
    pub quantum_tick_ms: u64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            community_tick_ms: 3000,
            neural_tick_ms: 2000,
            quantum_tick_ms: 2000,
            seed: None,
        }
    }
}

pub fn parse_config(contents: &str) -> Result<Config> {
    Ok(toml::from_str::<Config>(contents)?)
}

/// Loads `config.toml`. A missing file is not an error: the defaults apply.
pub fn load_config_from_file(file_path: &Path) -> Result<Config> {
    if !file_path.exists() {
        debug!("No config at {:?}, using defaults", file_path);
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(file_path)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {:?}", file_path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CerebroError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.slot_name, DEFAULT_SLOT_NAME);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.simulation, SimulationConfig::default());
        assert_eq!(
            config.state_file(),
            PathBuf::from(".").join("newcool-cerebro-storage.json")
        );
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
            storage_dir = "/tmp/cerebro"
            [simulation]
            neural_tick_ms = 500
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/cerebro"));
        assert_eq!(config.simulation.neural_tick_ms, 500);
        assert_eq!(config.simulation.community_tick_ms, 3000);
        assert_eq!(config.simulation.seed, Some(7));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let err = parse_config("storage_dir = [1, 2").unwrap_err();
        assert!(matches!(err, CerebroError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load_config_from_file(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(config.slot_name, DEFAULT_SLOT_NAME);
    }
}
