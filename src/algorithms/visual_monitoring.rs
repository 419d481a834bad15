//! Diagnostic display of the event's reconstruction state.
//!
//! Each show flag gates one object category; collections left empty after
//! filtering are not forwarded to the display. Truth particles can be
//! suppressed per species below a configured energy via
//! `SuppressMCParticles` entries of the form `"<pdgCode>:<energyThreshold>"`.

use tracing::{debug, warn};

use crate::algorithms::Algorithm;
use crate::display::{Color, EventDisplay};
use crate::errors::AppError;
use crate::event::store::{remove_unavailable_calo_hits, EventStore};
use crate::event::types::{PdgEnergyMap, Track};
use crate::settings::{tokenize, Settings};

#[derive(Debug)]
pub struct VisualMonitoringAlgorithm {
    cluster_list_names: Vec<String>,
    show_mc_particles: bool,
    show_current_pfos: bool,
    show_current_clusters: bool,
    show_current_calo_hits: bool,
    show_current_tracks: bool,
    only_available: bool,
    display_event: bool,
    suppression: PdgEnergyMap,
}

impl VisualMonitoringAlgorithm {
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let cluster_list_names = settings.read_string_vector("ClusterListNames")?;
        let show_mc_particles = settings.read_value("ShowMCParticles", false)?;
        let show_current_pfos = settings.read_value("ShowCurrentPfos", true)?;
        let show_current_clusters = settings.read_value("ShowCurrentClusters", true)?;
        let show_current_calo_hits = settings.read_value("ShowCurrentCaloHits", false)?;
        let show_current_tracks = settings.read_value("ShowCurrentTracks", false)?;
        let only_available = settings.read_value("ShowOnlyAvailable", false)?;
        let display_event = settings.read_value("DisplayEvent", true)?;

        let suppression =
            parse_suppression_entries(&settings.read_string_vector("SuppressMCParticles")?)?;

        Ok(Self {
            cluster_list_names,
            show_mc_particles,
            show_current_pfos,
            show_current_clusters,
            show_current_calo_hits,
            show_current_tracks,
            only_available,
            display_event,
            suppression,
        })
    }
}

pub fn parse_suppression_entries(entries: &[String]) -> Result<PdgEnergyMap, AppError> {
    let mut suppression = PdgEnergyMap::new();

    for entry in entries {
        let tokens = tokenize(entry, ':');
        if tokens.len() != 2 {
            return Err(AppError::invalid_parameter(format!(
                "suppression entry {entry} must have the form <pdgCode>:<energyThreshold>"
            )));
        }

        let pdg_code: i32 = tokens[0].parse().map_err(|_| {
            AppError::invalid_parameter(format!(
                "suppression entry {entry} has a non-numeric pdg code"
            ))
        })?;
        let energy: f64 = tokens[1].parse().map_err(|_| {
            AppError::invalid_parameter(format!(
                "suppression entry {entry} has a non-numeric energy threshold"
            ))
        })?;

        suppression.insert(pdg_code, energy);
    }

    Ok(suppression)
}

impl Algorithm for VisualMonitoringAlgorithm {
    fn run(&self, store: &mut EventStore, display: &dyn EventDisplay) -> Result<(), AppError> {
        if self.show_mc_particles {
            let particles = store.mc_particles()?;
            if !particles.is_empty() {
                display.show_mc_particles("MCParticles", particles, &self.suppression)?;
            }
        }

        if self.show_current_calo_hits {
            let mut hits = store.ordered_calo_hits()?.clone();
            if self.only_available {
                hits = remove_unavailable_calo_hits(&hits);
            }
            if !hits.is_empty() {
                display.show_calo_hits("currentHits", &hits, Color::Gray)?;
            }
        }

        if self.show_current_tracks {
            let tracks: Vec<Track> = store
                .tracks()?
                .iter()
                .filter(|track| !(track.has_associated_cluster && self.only_available))
                .cloned()
                .collect();
            if !tracks.is_empty() {
                display.show_tracks("currentTracks", &tracks, Color::Gray)?;
            }
        }

        for name in &self.cluster_list_names {
            match store.cluster_list(name) {
                Ok(clusters) if !clusters.is_empty() => {
                    display.show_clusters(name, clusters, Color::Auto)?;
                }
                Ok(_) => debug!(list = %name, "cluster list is empty, nothing to show"),
                Err(_) => warn!(list = %name, "cluster list not found"),
            }
        }

        if self.show_current_clusters {
            match store.current_cluster_list() {
                Ok(clusters) if !clusters.is_empty() => {
                    display.show_clusters("currentClusters", clusters, Color::Auto)?;
                }
                Ok(_) => debug!("current cluster list is empty, nothing to show"),
                Err(_) => debug!("no current cluster list to show"),
            }
        }

        if self.show_current_pfos {
            match store.pfos() {
                Ok(pfos) if !pfos.is_empty() => {
                    display.show_pfos("currentPfos", pfos, Color::Auto)?;
                }
                Ok(_) => debug!("current pfo list is empty, nothing to show"),
                Err(_) => debug!("no current pfo list to show"),
            }
        }

        if self.display_event {
            display.view_event()?;
        }

        Ok(())
    }
}
