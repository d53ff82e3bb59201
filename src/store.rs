//! The single owner of identity, profile and community metrics.
//!
//! Every action always succeeds: missing prerequisites turn it into a no-op,
//! and persistence problems are logged, never returned. Each action that
//! changes state writes a full snapshot through the injected [`StateStorage`].

use tracing::{debug, info, warn};

use crate::events::{evolution_index_for_nps, EventSubscriber, T12Event};
use crate::profile::{
    CerebroState, CommunityMetrics, CommunityMetricsUpdate, LearningProfile, UserIdentity,
};
use crate::profile_io::StateStorage;

pub struct CommunityStore {
    state: CerebroState,
    storage: Box<dyn StateStorage>,
}

impl CommunityStore {
    /// Loads the persisted slot, falling back to the built-in defaults when it
    /// is empty or unreadable.
    pub fn open(storage: Box<dyn StateStorage>) -> Self {
        let state = match storage.load() {
            Ok(Some(mut state)) => {
                debug!("Loaded state from {}", storage.describe());
                state.sanitize();
                state
            }
            Ok(None) => {
                info!("No persisted state in {}, starting from defaults", storage.describe());
                CerebroState::default()
            }
            Err(e) => {
                warn!(
                    "Discarding unreadable state in {}: {}. Starting from defaults",
                    storage.describe(),
                    e
                );
                CerebroState::default()
            }
        };
        Self { state, storage }
    }

    pub fn state(&self) -> &CerebroState {
        &self.state
    }

    pub fn user_identity(&self) -> Option<&UserIdentity> {
        self.state.user_identity.as_ref()
    }

    pub fn learning_profile(&self) -> Option<&LearningProfile> {
        self.state.learning_profile.as_ref()
    }

    pub fn community_metrics(&self) -> &CommunityMetrics {
        &self.state.community_metrics
    }

    pub fn set_user_identity(&mut self, identity: UserIdentity) {
        debug!("Setting user identity '{}'", identity.id);
        self.state.user_identity = Some(identity);
        self.persist();
    }

    pub fn set_learning_profile(&mut self, profile: LearningProfile) {
        debug!("Setting learning profile for '{}'", profile.user_id);
        self.state.learning_profile = Some(profile);
        self.persist();
    }

    pub fn update_community_metrics(&mut self, update: CommunityMetricsUpdate) {
        if update.is_empty() {
            return;
        }
        self.state.community_metrics.apply(&update);
        self.persist();
    }

    /// Adds `seconds` to the running total for `concept`.
    ///
    /// Negative or non-finite durations are dropped so totals never shrink.
    pub fn track_progress(&mut self, concept: &str, seconds: f64) {
        if !seconds.is_finite() || seconds < 0.0 {
            warn!("Ignoring invalid duration {} for concept '{}'", seconds, concept);
            return;
        }
        let Some(profile) = self.state.learning_profile.as_mut() else {
            debug!("track_progress('{}') without a learning profile", concept);
            return;
        };
        let total = profile
            .learning_history
            .time_spent_per_concept
            .entry(concept.to_string())
            .or_insert(0.0);
        let updated = *total + seconds;
        if !updated.is_finite() {
            warn!("Total time for concept '{}' would overflow, ignoring {}", concept, seconds);
            return;
        }
        *total = updated;
        self.persist();
    }

    pub fn complete_track(&mut self, track_id: &str) {
        let Some(profile) = self.state.learning_profile.as_mut() else {
            debug!("complete_track('{}') without a learning profile", track_id);
            return;
        };
        if !profile
            .learning_history
            .completed_tracks
            .insert(track_id.to_string())
        {
            return;
        }
        info!("Track '{}' completed", track_id);
        self.persist();
    }

    /// Back to the built-in defaults, persisted.
    pub fn reset(&mut self) {
        info!("Resetting state to defaults");
        self.state = CerebroState::default();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.state) {
            warn!("Failed to persist state to {}: {}", self.storage.describe(), e);
        }
    }
}

impl EventSubscriber for CommunityStore {
    fn on_event(&mut self, event: &T12Event) {
        match event {
            T12Event::NpsSubmitted(payload) => {
                let score = payload.nps_metrics.score;
                info!("Received NPS update: score {}", score);
                if let Some(index) = evolution_index_for_nps(score) {
                    self.update_community_metrics(CommunityMetricsUpdate::evolution_index(index));
                }
            }
            T12Event::Other { event_type, .. } => {
                debug!("Ignoring event '{}'", event_type);
            }
        }
    }
}
