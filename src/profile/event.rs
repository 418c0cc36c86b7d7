//! Reload notification sinks
//!
//! Provides the ProfileEventSink trait plus the no-op and in-memory sinks.
//! Delivery is fire-and-forget: the manager logs and swallows sink errors, so
//! a listener can never fail or roll back a reload.

use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::ProfileSummary;

/// Events emitted by the profile manager.
#[derive(Debug, Clone)]
pub enum ProfileEvent {
    /// Raised exactly once per successful reload, carrying the new summaries.
    ProfilesReloaded { summaries: Vec<ProfileSummary> },
}

impl ProfileEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ProfileEvent::ProfilesReloaded { .. } => "profiles-reloaded",
        }
    }
}

/// Destination for profile events. Implementations should return quickly;
/// the manager awaits each sink in turn during a reload.
#[async_trait]
pub trait ProfileEventSink: Send + Sync {
    async fn emit(&self, event: ProfileEvent) -> Result<()>;
}

/// Default sink that drops every event.
pub struct NoopEventSink;

#[async_trait]
impl ProfileEventSink for NoopEventSink {
    async fn emit(&self, _: ProfileEvent) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink for testing.
#[derive(Default)]
pub struct InMemoryEventSink {
    events: Arc<RwLock<Vec<ProfileEvent>>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProfileEvent> {
        self.events.read().unwrap().clone()
    }

    /// Summaries carried by the most recent reload event, if any.
    pub fn last_reload(&self) -> Option<Vec<ProfileSummary>> {
        self.events.read().unwrap().iter().rev().find_map(|event| match event {
            ProfileEvent::ProfilesReloaded { summaries } => Some(summaries.clone()),
        })
    }
}

#[async_trait]
impl ProfileEventSink for InMemoryEventSink {
    async fn emit(&self, event: ProfileEvent) -> Result<()> {
        self.events.write().unwrap().push(event);
        Ok(())
    }
}
