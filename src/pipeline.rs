//! Sequential per-event execution of the configured algorithms.

use tracing::info;

use crate::algorithms::{build_algorithm, Algorithm};
use crate::config::Config;
use crate::display::EventDisplay;
use crate::errors::AppError;
use crate::event::store::EventStore;

#[derive(Debug)]
pub struct Pipeline {
    algorithms: Vec<(String, Box<dyn Algorithm>)>,
}

impl Pipeline {
    /// Builds every configured algorithm up front; the first invalid settings
    /// block fails the whole pipeline.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let mut algorithms = Vec::with_capacity(config.algorithms.len());
        for entry in &config.algorithms {
            let algorithm = build_algorithm(&entry.algorithm, &entry.settings)?;
            algorithms.push((entry.algorithm.clone(), algorithm));
        }

        Ok(Self { algorithms })
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Invokes each algorithm once, in configured order, propagating the
    /// first failure.
    pub fn run_event(
        &self,
        store: &mut EventStore,
        display: &dyn EventDisplay,
    ) -> Result<(), AppError> {
        for (label, algorithm) in &self.algorithms {
            info!(algorithm = %label, "running algorithm");
            algorithm.run(store, display)?;
        }

        Ok(())
    }
}
