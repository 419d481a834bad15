//! Merges candidate cluster lists into the list used for particle-flow
//! object creation and promotes it to be the current cluster list.

use tracing::debug;

use crate::algorithms::Algorithm;
use crate::display::EventDisplay;
use crate::errors::AppError;
use crate::event::store::EventStore;
use crate::settings::Settings;

pub const DEFAULT_MERGED_LIST_NAME: &str = "PfoCreation";

#[derive(Debug)]
pub struct ClusterPreparationAlgorithm {
    candidate_list_names: Vec<String>,
    merged_candidate_list_name: String,
}

impl ClusterPreparationAlgorithm {
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let candidate_list_names = settings.read_string_vector("CandidateListNames")?;
        if candidate_list_names.is_empty() {
            return Err(AppError::invalid_parameter(
                "CandidateListNames must name at least one cluster list",
            ));
        }

        let merged_candidate_list_name = settings.read_value(
            "MergedCandidateListName",
            DEFAULT_MERGED_LIST_NAME.to_string(),
        )?;

        Ok(Self {
            candidate_list_names,
            merged_candidate_list_name,
        })
    }
}

impl Algorithm for ClusterPreparationAlgorithm {
    fn run(&self, store: &mut EventStore, _display: &dyn EventDisplay) -> Result<(), AppError> {
        for name in &self.candidate_list_names {
            if store.cluster_list(name).is_err() {
                debug!(list = %name, "candidate cluster list not found, skipping");
                continue;
            }

            match store.save_cluster_list(name, &self.merged_candidate_list_name) {
                Ok(()) => {}
                // An empty candidate list contributes nothing; that is fine.
                Err(AppError::NotInitialized { .. }) => {}
                Err(err) => return Err(err),
            }
        }

        store.replace_current_cluster_list(&self.merged_candidate_list_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClusterPreparationAlgorithm, DEFAULT_MERGED_LIST_NAME};
    use crate::algorithms::Algorithm;
    use crate::display::RecordingDisplay;
    use crate::errors::AppError;
    use crate::event::store::EventStore;
    use crate::event::types::Cluster;
    use crate::settings::Settings;

    fn settings(raw: &str) -> Settings {
        serde_json::from_str(raw).expect("settings should parse")
    }

    fn cluster(uid: &str) -> Cluster {
        Cluster {
            uid: uid.to_string(),
            hit_uids: vec![],
            energy: 1.0,
        }
    }

    #[test]
    fn empty_candidate_names_fail_configuration() {
        let error = ClusterPreparationAlgorithm::from_settings(&Settings::empty())
            .expect_err("expected missing candidates");
        assert!(matches!(error, AppError::InvalidParameter { .. }));

        let error = ClusterPreparationAlgorithm::from_settings(&settings(
            r#"{"CandidateListNames": []}"#,
        ))
        .expect_err("expected empty candidates");
        assert!(matches!(error, AppError::InvalidParameter { .. }));
    }

    #[test]
    fn merged_list_name_defaults_to_pfo_creation() {
        let algorithm = ClusterPreparationAlgorithm::from_settings(&settings(
            r#"{"CandidateListNames": ["photons"]}"#,
        ))
        .expect("settings should build");

        assert_eq!(
            algorithm.merged_candidate_list_name,
            DEFAULT_MERGED_LIST_NAME
        );
    }

    #[test]
    fn merged_list_name_is_overridable() {
        let algorithm = ClusterPreparationAlgorithm::from_settings(&settings(
            r#"{"CandidateListNames": ["photons"], "MergedCandidateListName": "Final"}"#,
        ))
        .expect("settings should build");

        assert_eq!(algorithm.merged_candidate_list_name, "Final");
    }

    #[test]
    fn merges_candidates_in_order_and_promotes_current() {
        let algorithm = ClusterPreparationAlgorithm::from_settings(&settings(
            r#"{"CandidateListNames": ["photons", "neutralHadrons"]}"#,
        ))
        .expect("settings should build");
        let mut store = EventStore::new();
        store.create_cluster_list("photons", vec![cluster("c1")]);
        store.create_cluster_list("neutralHadrons", vec![cluster("c2"), cluster("c3")]);
        let display = RecordingDisplay::new();

        algorithm
            .run(&mut store, &display)
            .expect("run should succeed");

        assert_eq!(
            store.current_cluster_list_name(),
            Some(DEFAULT_MERGED_LIST_NAME)
        );
        let merged = store.current_cluster_list().expect("current exists");
        let uids: Vec<&str> = merged.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(uids, vec!["c1", "c2", "c3"]);
        assert!(store.cluster_list("photons").is_err());
        assert!(store.cluster_list("neutralHadrons").is_err());
    }

    #[test]
    fn missing_candidates_are_skipped() {
        let algorithm = ClusterPreparationAlgorithm::from_settings(&settings(
            r#"{"CandidateListNames": ["missing", "photons"]}"#,
        ))
        .expect("settings should build");
        let mut store = EventStore::new();
        store.create_cluster_list("photons", vec![cluster("c1")]);
        let display = RecordingDisplay::new();

        algorithm
            .run(&mut store, &display)
            .expect("run should succeed");

        let merged = store.current_cluster_list().expect("current exists");
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn empty_candidate_lists_are_tolerated() {
        let algorithm = ClusterPreparationAlgorithm::from_settings(&settings(
            r#"{"CandidateListNames": ["empty", "photons"]}"#,
        ))
        .expect("settings should build");
        let mut store = EventStore::new();
        store.create_cluster_list("empty", vec![]);
        store.create_cluster_list("photons", vec![cluster("c1")]);
        let display = RecordingDisplay::new();

        algorithm
            .run(&mut store, &display)
            .expect("run should succeed");

        let merged = store.current_cluster_list().expect("current exists");
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn failing_to_promote_merged_list_is_fatal() {
        let algorithm = ClusterPreparationAlgorithm::from_settings(&settings(
            r#"{"CandidateListNames": ["missing"]}"#,
        ))
        .expect("settings should build");
        let mut store = EventStore::new();
        let display = RecordingDisplay::new();

        let error = algorithm
            .run(&mut store, &display)
            .expect_err("expected promotion failure");
        assert!(matches!(error, AppError::ListNotFound { .. }));
    }
}
