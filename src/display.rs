//! Event-display seam.
//!
//! Rendering itself is out of scope; implementations of [`EventDisplay`]
//! receive the object collections an algorithm chose to show and do whatever
//! "display" means for them. The default implementation serializes each call
//! as one JSON record on a writer.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;
use crate::event::types::{
    Cluster, McParticle, OrderedCaloHitList, PdgEnergyMap, Pfo, Track,
};

/// Color hint forwarded with each displayed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Auto,
    Gray,
}

pub trait EventDisplay: Send + Sync {
    fn show_mc_particles(
        &self,
        name: &str,
        particles: &[McParticle],
        suppression: &PdgEnergyMap,
    ) -> Result<(), AppError>;

    fn show_calo_hits(
        &self,
        name: &str,
        hits: &OrderedCaloHitList,
        color: Color,
    ) -> Result<(), AppError>;

    fn show_tracks(&self, name: &str, tracks: &[Track], color: Color) -> Result<(), AppError>;

    fn show_clusters(&self, name: &str, clusters: &[Cluster], color: Color)
        -> Result<(), AppError>;

    fn show_pfos(&self, name: &str, pfos: &[Pfo], color: Color) -> Result<(), AppError>;

    /// Renders everything accumulated for the event.
    fn view_event(&self) -> Result<(), AppError>;
}

/// Writes one timestamped JSON record per display call.
pub struct JsonDisplay<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, record: serde_json::Value) -> Result<(), AppError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *writer, &record)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn is_suppressed(particle: &McParticle, suppression: &PdgEnergyMap) -> bool {
    suppression
        .get(&particle.pdg_code)
        .is_some_and(|threshold| particle.energy < *threshold)
}

fn generated_at_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl<W: Write + Send> EventDisplay for JsonDisplay<W> {
    fn show_mc_particles(
        &self,
        name: &str,
        particles: &[McParticle],
        suppression: &PdgEnergyMap,
    ) -> Result<(), AppError> {
        let visible: Vec<&McParticle> = particles
            .iter()
            .filter(|particle| !is_suppressed(particle, suppression))
            .collect();

        self.write_record(json!({
            "category": "mc_particles",
            "name": name,
            "color": Color::Auto,
            "count": visible.len(),
            "suppressed": particles.len() - visible.len(),
            "objects": visible,
            "generated_at_utc": generated_at_utc(),
        }))
    }

    fn show_calo_hits(
        &self,
        name: &str,
        hits: &OrderedCaloHitList,
        color: Color,
    ) -> Result<(), AppError> {
        let count: usize = hits.values().map(Vec::len).sum();

        self.write_record(json!({
            "category": "calo_hits",
            "name": name,
            "color": color,
            "count": count,
            "objects": hits,
            "generated_at_utc": generated_at_utc(),
        }))
    }

    fn show_tracks(&self, name: &str, tracks: &[Track], color: Color) -> Result<(), AppError> {
        self.write_record(json!({
            "category": "tracks",
            "name": name,
            "color": color,
            "count": tracks.len(),
            "objects": tracks,
            "generated_at_utc": generated_at_utc(),
        }))
    }

    fn show_clusters(
        &self,
        name: &str,
        clusters: &[Cluster],
        color: Color,
    ) -> Result<(), AppError> {
        self.write_record(json!({
            "category": "clusters",
            "name": name,
            "color": color,
            "count": clusters.len(),
            "objects": clusters,
            "generated_at_utc": generated_at_utc(),
        }))
    }

    fn show_pfos(&self, name: &str, pfos: &[Pfo], color: Color) -> Result<(), AppError> {
        self.write_record(json!({
            "category": "pfos",
            "name": name,
            "color": color,
            "count": pfos.len(),
            "objects": pfos,
            "generated_at_utc": generated_at_utc(),
        }))
    }

    fn view_event(&self) -> Result<(), AppError> {
        self.write_record(json!({
            "category": "event_display",
            "generated_at_utc": generated_at_utc(),
        }))?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    McParticles {
        name: String,
        uids: Vec<String>,
        suppression: PdgEnergyMap,
    },
    CaloHits {
        name: String,
        uids: Vec<String>,
        color: Color,
    },
    Tracks {
        name: String,
        uids: Vec<String>,
        color: Color,
    },
    Clusters {
        name: String,
        uids: Vec<String>,
        color: Color,
    },
    Pfos {
        name: String,
        uids: Vec<String>,
        color: Color,
    },
    ViewEvent,
}

/// Records display calls for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    calls: Mutex<Vec<DisplayCall>>,
}

#[cfg(test)]
impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: DisplayCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[cfg(test)]
impl EventDisplay for RecordingDisplay {
    fn show_mc_particles(
        &self,
        name: &str,
        particles: &[McParticle],
        suppression: &PdgEnergyMap,
    ) -> Result<(), AppError> {
        self.record(DisplayCall::McParticles {
            name: name.to_string(),
            uids: particles.iter().map(|p| p.uid.clone()).collect(),
            suppression: suppression.clone(),
        });
        Ok(())
    }

    fn show_calo_hits(
        &self,
        name: &str,
        hits: &OrderedCaloHitList,
        color: Color,
    ) -> Result<(), AppError> {
        self.record(DisplayCall::CaloHits {
            name: name.to_string(),
            uids: hits
                .values()
                .flatten()
                .map(|hit| hit.uid.clone())
                .collect(),
            color,
        });
        Ok(())
    }

    fn show_tracks(&self, name: &str, tracks: &[Track], color: Color) -> Result<(), AppError> {
        self.record(DisplayCall::Tracks {
            name: name.to_string(),
            uids: tracks.iter().map(|t| t.uid.clone()).collect(),
            color,
        });
        Ok(())
    }

    fn show_clusters(
        &self,
        name: &str,
        clusters: &[Cluster],
        color: Color,
    ) -> Result<(), AppError> {
        self.record(DisplayCall::Clusters {
            name: name.to_string(),
            uids: clusters.iter().map(|c| c.uid.clone()).collect(),
            color,
        });
        Ok(())
    }

    fn show_pfos(&self, name: &str, pfos: &[Pfo], color: Color) -> Result<(), AppError> {
        self.record(DisplayCall::Pfos {
            name: name.to_string(),
            uids: pfos.iter().map(|p| p.uid.clone()).collect(),
            color,
        });
        Ok(())
    }

    fn view_event(&self) -> Result<(), AppError> {
        self.record(DisplayCall::ViewEvent);
        Ok(())
    }
}
