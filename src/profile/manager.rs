//! Stateful profile registry
//!
//! Wraps the directory loader behind read accessors, an explicit reload
//! operation, and a persisted summary index. The in-memory mapping is only
//! ever replaced wholesale, never mutated in place; readers take a full
//! snapshot, so no half-updated state is observable between calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use super::error::ProfileError;
use super::event::{ProfileEvent, ProfileEventSink};
use super::{loader, Profile, ProfileSummary};
use crate::Result;

/// Default file name for the persisted summary index.
pub const DEFAULT_INDEX_FILE: &str = "metadata.json";

/// Persisted summary index, rewritten wholesale on every load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIndex {
    pub profile_count: usize,
    pub profiles: Vec<ProfileSummary>,
}

/// In-memory profile registry over a directory of markdown files.
pub struct ProfileManager {
    path: PathBuf,
    index_file: String,
    profiles: ArcSwap<HashMap<String, Arc<Profile>>>,
    sinks: RwLock<Vec<Arc<dyn ProfileEventSink>>>,
}

impl ProfileManager {
    /// Create a manager over `path`. The mapping stays empty until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            profiles: ArcSwap::from_pointee(HashMap::new()),
            sinks: RwLock::new(Vec::new()),
        }
    }

    /// Override the persisted index file name.
    pub fn with_index_file(mut self, name: impl Into<String>) -> Self {
        self.index_file = name.into();
        self
    }

    /// Register a sink for reload events.
    pub fn add_event_sink(&self, sink: Arc<dyn ProfileEventSink>) {
        self.sinks.write().unwrap().push(sink);
    }

    /// Directory this manager loads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the directory, publish the mapping, and write the persisted
    /// index. Calling it again behaves like a reload, minus the event.
    pub async fn initialize(&self) -> Result<()> {
        self.load_and_publish().await?;
        Ok(())
    }

    /// Re-run the directory load, atomically replace the mapping, rewrite
    /// the persisted index, and notify registered sinks. Returns the new
    /// summaries.
    pub async fn reload_profiles(&self) -> Result<Vec<ProfileSummary>> {
        let summaries = self.load_and_publish().await?;
        self.notify(ProfileEvent::ProfilesReloaded {
            summaries: summaries.clone(),
        })
        .await;
        Ok(summaries)
    }

    /// Summaries for all loaded profiles, ordered by id.
    pub fn list_profiles(&self) -> Vec<ProfileSummary> {
        let current = self.profiles.load();
        let mut summaries: Vec<ProfileSummary> =
            current.values().map(|profile| profile.summary()).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Summary for one profile, or `None` if the id is not loaded.
    pub fn get_profile(&self, id: &str) -> Option<ProfileSummary> {
        self.profiles.load().get(id).map(|profile| profile.summary())
    }

    /// Verbatim source text of one profile.
    pub fn get_profile_content(&self, id: &str) -> Option<String> {
        self.profiles
            .load()
            .get(id)
            .map(|profile| profile.raw_content.clone())
    }

    /// Checklist of one profile. `None` means the id is unknown; an empty
    /// vector means the profile exists but carries no checklist items.
    pub fn get_profile_checklist(&self, id: &str) -> Option<Vec<String>> {
        self.profiles
            .load()
            .get(id)
            .map(|profile| profile.checklist.clone())
    }

    /// Drop all loaded profiles and registered sinks. The manager is not
    /// reusable afterwards.
    pub fn shutdown(&self) {
        self.sinks.write().unwrap().clear();
        self.profiles.store(Arc::new(HashMap::new()));
        tracing::debug!(path = %self.path.display(), "profile manager shut down");
    }

    async fn load_and_publish(&self) -> Result<Vec<ProfileSummary>> {
        let loaded = loader::load_directory(&self.path).await;
        tracing::debug!(
            path = %self.path.display(),
            count = loaded.len(),
            "loaded profile directory"
        );
        self.profiles.store(Arc::new(loaded));

        // The index write happens after the swap; a write failure surfaces
        // to the caller but never rolls back the in-memory mapping.
        let summaries = self.list_profiles();
        self.write_index(&summaries).await?;
        Ok(summaries)
    }

    async fn write_index(&self, summaries: &[ProfileSummary]) -> Result<()> {
        if !self.path.is_dir() {
            // Nothing to persist into; the absent directory is a valid
            // initial state, not an error.
            tracing::debug!(
                path = %self.path.display(),
                "profile directory absent, skipping index write"
            );
            return Ok(());
        }

        let index = ProfileIndex {
            profile_count: summaries.len(),
            profiles: summaries.to_vec(),
        };
        let body = serde_json::to_vec_pretty(&index)?;
        let index_path = self.path.join(&self.index_file);
        tokio::fs::write(&index_path, body)
            .await
            .map_err(|e| ProfileError::IndexWrite {
                path: index_path.display().to_string(),
                reason: e.to_string(),
                hint: Some("Check that the profile directory is writable.".to_string()),
            })?;
        Ok(())
    }

    async fn notify(&self, event: ProfileEvent) {
        let sinks: Vec<Arc<dyn ProfileEventSink>> = self.sinks.read().unwrap().clone();
        for sink in sinks {
            if let Err(e) = sink.emit(event.clone()).await {
                tracing::warn!(event = event.name(), error = %e, "profile event sink failed");
            }
        }
    }
}
