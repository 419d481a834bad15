use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::AppError;
use crate::settings::Settings;

/// One configured algorithm invocation: its type name and settings block.
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmEntry {
    pub algorithm: String,
    #[serde(default)]
    pub settings: Settings,
}

/// The pipeline file: an ordered list of algorithms to run per event.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub algorithms: Vec<AlgorithmEntry>,
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: Config = serde_json::from_str(raw)?;

        if config.algorithms.is_empty() {
            return Err(AppError::invalid_parameter(
                "pipeline must configure at least one algorithm",
            ));
        }

        Ok(config)
    }
}
