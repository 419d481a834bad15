//! In-memory registry of the per-event object lists the algorithms operate on.
//!
//! Holds one "current" list per object category plus named cluster lists, and
//! provides the save/merge and replace-current operations used when preparing
//! cluster lists for particle-flow object creation.

use std::collections::BTreeMap;

use crate::errors::AppError;
use crate::event::types::{
    order_calo_hits, Cluster, EventFile, McParticle, OrderedCaloHitList, Pfo, Track,
};

#[derive(Debug, Default)]
pub struct EventStore {
    mc_particles: Option<Vec<McParticle>>,
    calo_hits: Option<OrderedCaloHitList>,
    tracks: Option<Vec<Track>>,
    pfos: Option<Vec<Pfo>>,
    cluster_lists: BTreeMap<String, Vec<Cluster>>,
    current_cluster_list: Option<String>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_event(event: EventFile) -> Self {
        Self {
            mc_particles: Some(event.mc_particles),
            calo_hits: Some(order_calo_hits(event.calo_hits)),
            tracks: Some(event.tracks),
            pfos: Some(event.pfos),
            cluster_lists: event.cluster_lists,
            current_cluster_list: event.current_cluster_list,
        }
    }

    pub fn set_mc_particles(&mut self, particles: Vec<McParticle>) {
        self.mc_particles = Some(particles);
    }

    pub fn set_calo_hits(&mut self, hits: OrderedCaloHitList) {
        self.calo_hits = Some(hits);
    }

    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = Some(tracks);
    }

    pub fn set_pfos(&mut self, pfos: Vec<Pfo>) {
        self.pfos = Some(pfos);
    }

    pub fn create_cluster_list(&mut self, name: impl Into<String>, clusters: Vec<Cluster>) {
        self.cluster_lists.insert(name.into(), clusters);
    }

    pub fn mc_particles(&self) -> Result<&[McParticle], AppError> {
        self.mc_particles
            .as_deref()
            .ok_or_else(|| AppError::list_not_found("mc particles"))
    }

    pub fn ordered_calo_hits(&self) -> Result<&OrderedCaloHitList, AppError> {
        self.calo_hits
            .as_ref()
            .ok_or_else(|| AppError::list_not_found("calo hits"))
    }

    pub fn tracks(&self) -> Result<&[Track], AppError> {
        self.tracks
            .as_deref()
            .ok_or_else(|| AppError::list_not_found("tracks"))
    }

    pub fn pfos(&self) -> Result<&[Pfo], AppError> {
        self.pfos
            .as_deref()
            .ok_or_else(|| AppError::list_not_found("pfos"))
    }

    pub fn cluster_list(&self, name: &str) -> Result<&[Cluster], AppError> {
        self.cluster_lists
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::list_not_found(name))
    }

    pub fn current_cluster_list_name(&self) -> Option<&str> {
        self.current_cluster_list.as_deref()
    }

    pub fn current_cluster_list(&self) -> Result<&[Cluster], AppError> {
        let name = self
            .current_cluster_list
            .as_deref()
            .ok_or_else(|| AppError::list_not_found("current clusters"))?;
        self.cluster_list(name)
    }

    /// Moves the clusters of `source` into `target`, creating the target list
    /// if needed and removing the drained source from the registry. A saved
    /// cluster belongs to exactly one named list.
    pub fn save_cluster_list(&mut self, source: &str, target: &str) -> Result<(), AppError> {
        if source == target {
            return Err(AppError::already_initialized(format!(
                "cluster list {source} cannot be saved onto itself"
            )));
        }

        let Some(drained) = self.cluster_lists.remove(source) else {
            return Err(AppError::list_not_found(source));
        };

        if drained.is_empty() {
            self.cluster_lists.insert(source.to_string(), drained);
            return Err(AppError::not_initialized(format!(
                "cluster list {source} has no clusters to save"
            )));
        }

        if self.current_cluster_list.as_deref() == Some(source) {
            self.current_cluster_list = None;
        }

        self.cluster_lists
            .entry(target.to_string())
            .or_default()
            .extend(drained);
        Ok(())
    }

    /// Promotes the named list to be the current cluster list for downstream
    /// algorithms.
    pub fn replace_current_cluster_list(&mut self, name: &str) -> Result<(), AppError> {
        if !self.cluster_lists.contains_key(name) {
            return Err(AppError::list_not_found(name));
        }

        self.current_cluster_list = Some(name.to_string());
        Ok(())
    }
}

/// Filters an ordered calo-hit list down to hits still marked available,
/// dropping pseudo-layers left empty.
pub fn remove_unavailable_calo_hits(hits: &OrderedCaloHitList) -> OrderedCaloHitList {
    hits.iter()
        .filter_map(|(layer, layer_hits)| {
            let available: Vec<_> = layer_hits
                .iter()
                .filter(|hit| hit.is_available)
                .cloned()
                .collect();
            (!available.is_empty()).then_some((*layer, available))
        })
        .collect()
}
