//! Typed reads over an algorithm's settings block.
//!
//! A settings block is a flat JSON object keyed by configuration name. Absent
//! keys fall back to the caller's default; present keys with an unexpected
//! type are a hard configuration error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    entries: Map<String, Value>,
}

impl Settings {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn read_value<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, AppError> {
        match self.entries.get(key) {
            None => Ok(default),
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                AppError::invalid_parameter(format!("setting {key} has an unexpected type"))
            }),
        }
    }

    pub fn read_string_vector(&self, key: &str) -> Result<Vec<String>, AppError> {
        self.read_value(key, Vec::new())
    }
}

/// Splits `input` on `delimiter`, trimming tokens and discarding empty ones.
pub fn tokenize(input: &str, delimiter: char) -> Vec<String> {
    input
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
