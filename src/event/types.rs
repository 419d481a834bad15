use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps a PDG particle code to the energy below which that species is
/// suppressed from truth-particle displays.
pub type PdgEnergyMap = BTreeMap<i32, f64>;

/// Calorimeter hits grouped by pseudo-layer, iterated in ascending layer order.
pub type OrderedCaloHitList = BTreeMap<u32, Vec<CaloHit>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McParticle {
    pub uid: String,
    pub pdg_code: i32,
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloHit {
    pub uid: String,
    pub pseudo_layer: u32,
    pub energy: f64,
    /// Cleared once the hit has been consumed by a cluster.
    #[serde(default = "default_available")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub uid: String,
    pub momentum: f64,
    #[serde(default)]
    pub has_associated_cluster: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub uid: String,
    #[serde(default)]
    pub hit_uids: Vec<String>,
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pfo {
    pub uid: String,
    pub pdg_code: i32,
    pub energy: f64,
}

/// Serde-loadable event fixture consumed by the binary to populate an
/// `EventStore`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFile {
    #[serde(default)]
    pub mc_particles: Vec<McParticle>,
    #[serde(default)]
    pub calo_hits: Vec<CaloHit>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub cluster_lists: BTreeMap<String, Vec<Cluster>>,
    #[serde(default)]
    pub current_cluster_list: Option<String>,
    #[serde(default)]
    pub pfos: Vec<Pfo>,
}

pub fn order_calo_hits(hits: Vec<CaloHit>) -> OrderedCaloHitList {
    let mut ordered = OrderedCaloHitList::new();
    for hit in hits {
        ordered.entry(hit.pseudo_layer).or_default().push(hit);
    }
    ordered
}

fn default_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::{order_calo_hits, CaloHit};

    fn hit(uid: &str, pseudo_layer: u32) -> CaloHit {
        CaloHit {
            uid: uid.to_string(),
            pseudo_layer,
            energy: 0.1,
            is_available: true,
        }
    }

    #[test]
    fn orders_hits_by_ascending_pseudo_layer() {
        let ordered = order_calo_hits(vec![hit("c", 7), hit("a", 2), hit("b", 2)]);

        let layers: Vec<u32> = ordered.keys().copied().collect();
        assert_eq!(layers, vec![2, 7]);
        assert_eq!(ordered[&2].len(), 2);
        assert_eq!(ordered[&7][0].uid, "c");
    }

    #[test]
    fn calo_hits_default_to_available() {
        let hit: CaloHit =
            serde_json::from_str(r#"{"uid":"h1","pseudo_layer":3,"energy":0.2}"#)
                .expect("hit should deserialize");
        assert!(hit.is_available);
    }

    #[test]
    fn tracks_default_to_unassociated() {
        let track: super::Track =
            serde_json::from_str(r#"{"uid":"t1","momentum":12.5}"#)
                .expect("track should deserialize");
        assert!(!track.has_associated_cluster);
    }
}
