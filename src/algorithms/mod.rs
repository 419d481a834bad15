//! Content algorithms invoked once per event by the pipeline.

pub mod cluster_preparation;
pub mod visual_monitoring;

pub use cluster_preparation::ClusterPreparationAlgorithm;
pub use visual_monitoring::VisualMonitoringAlgorithm;

use crate::display::EventDisplay;
use crate::errors::AppError;
use crate::event::store::EventStore;
use crate::settings::Settings;

pub trait Algorithm: Send + Sync + std::fmt::Debug {
    fn run(&self, store: &mut EventStore, display: &dyn EventDisplay) -> Result<(), AppError>;
}

/// Builds an algorithm from its configured type name, validating its settings
/// up front.
pub fn build_algorithm(kind: &str, settings: &Settings) -> Result<Box<dyn Algorithm>, AppError> {
    match kind {
        "VisualMonitoring" => Ok(Box::new(VisualMonitoringAlgorithm::from_settings(settings)?)),
        "ClusterPreparation" => Ok(Box::new(ClusterPreparationAlgorithm::from_settings(
            settings,
        )?)),
        _ => Err(AppError::invalid_parameter(format!(
            "unknown algorithm type {kind}"
        ))),
    }
}
