use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

pub const EVOLUTION_INDEX_MAX: f64 = 1000.0;
/// Emotion score assumed when a profile has no affect signal yet.
pub const NEUTRAL_EMOTION: f64 = 0.5;

// --- Identity ---

/// Learning archetype the user picked. Only ever replaced as a whole.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: String,
    pub suggested_age: String,
}

impl Default for UserIdentity {
    fn default() -> Self {
        Self {
            id: "constructores".to_string(),
            title: "Constructores".to_string(),
            icon: "📚".to_string(),
            color: "from-green-500 to-emerald-500".to_string(),
            suggested_age: "10-12 años".to_string(),
        }
    }
}

// --- Emotion score ---

/// Most recent affect signal, always inside [0, 1].
///
/// Values coming from outside (persisted blobs, callers) are clamped rather
/// than rejected so a bad upstream reading never poisons the whole state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
#[serde(from = "f64", into = "f64")]
pub struct EmotionScore(f64);

impl EmotionScore {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            warn!("NaN emotion score, using neutral {}", NEUTRAL_EMOTION);
            return Self(NEUTRAL_EMOTION);
        }
        if !(0.0..=1.0).contains(&value) {
            warn!("Emotion score {} outside [0, 1], clamping", value);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for EmotionScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<EmotionScore> for f64 {
    fn from(score: EmotionScore) -> Self {
        score.0
    }
}

// --- Learning profile ---

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LearningHistory {
    /// Set semantics: a track id is either completed or not.
    #[serde(default)]
    pub completed_tracks: BTreeSet<String>,
    /// Accumulated seconds per concept key. Only ever grows.
    #[serde(default)]
    pub time_spent_per_concept: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_emotion_score: Option<EmotionScore>,
}

impl LearningHistory {
    pub fn completed_count(&self) -> usize {
        self.completed_tracks.len()
    }

    pub fn total_time_spent(&self) -> f64 {
        self.time_spent_per_concept.values().sum()
    }

    pub fn emotion_or_neutral(&self) -> f64 {
        self.last_emotion_score
            .map(EmotionScore::value)
            .unwrap_or(NEUTRAL_EMOTION)
    }

    pub fn time_spent_on(&self, concept: &str) -> f64 {
        self.time_spent_per_concept.get(concept).copied().unwrap_or(0.0)
    }
}

/// Read-only inputs for the derivations; nothing in the core mutates these.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub preferred_content_types: Vec<String>,
    pub difficulty_level: u32,
    pub interests: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LearningProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "identityId")]
    pub identity_id: String,
    #[serde(default)]
    pub learning_history: LearningHistory,
    #[serde(default)]
    pub preferences: Preferences,
}

impl LearningProfile {
    /// A profile with no history at all.
    pub fn empty(user_id: &str, identity_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            identity_id: identity_id.to_string(),
            learning_history: LearningHistory::default(),
            preferences: Preferences::default(),
        }
    }
}

impl Default for LearningProfile {
    fn default() -> Self {
        Self {
            user_id: "demo-user".to_string(),
            identity_id: "constructores".to_string(),
            learning_history: LearningHistory {
                completed_tracks: BTreeSet::new(),
                time_spent_per_concept: BTreeMap::new(),
                last_emotion_score: Some(EmotionScore::new(0.7)),
            },
            preferences: Preferences {
                preferred_content_types: vec!["game".to_string(), "song".to_string()],
                difficulty_level: 3,
                interests: vec!["matematicas".to_string(), "ciencias".to_string()],
            },
        }
    }
}

// --- Community metrics ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommunityMetrics {
    pub total_pioneers: u64,
    pub evolution_index: f64,
    pub collective_progress: f64,
    pub neural_connections: u64,
    pub user_contribution: f64,
}

impl Default for CommunityMetrics {
    fn default() -> Self {
        Self {
            total_pioneers: 2847,
            evolution_index: 456.0,
            collective_progress: 67.0,
            neural_connections: 156789,
            user_contribution: 23.0,
        }
    }
}

impl CommunityMetrics {
    /// Shallow merge: every field present in `update` overwrites, the rest stay.
    pub fn apply(&mut self, update: &CommunityMetricsUpdate) {
        if let Some(total_pioneers) = update.total_pioneers {
            self.total_pioneers = total_pioneers;
        }
        if let Some(evolution_index) = update.evolution_index {
            if evolution_index.is_nan() {
                warn!("Ignoring NaN evolution index update");
            } else {
                self.evolution_index = clamp_evolution_index(evolution_index);
            }
        }
        if let Some(collective_progress) =
            finite_or_warn("collective progress", update.collective_progress)
        {
            self.collective_progress = collective_progress;
        }
        if let Some(neural_connections) = update.neural_connections {
            self.neural_connections = neural_connections;
        }
        if let Some(user_contribution) =
            finite_or_warn("user contribution", update.user_contribution)
        {
            self.user_contribution = user_contribution;
        }
    }
}

/// Non-finite values serialize as `null` and would make the saved slot unreadable.
fn finite_or_warn(field: &str, value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if !v.is_finite() => {
            warn!("Ignoring non-finite {} update {}", field, v);
            None
        }
        other => other,
    }
}

pub fn clamp_evolution_index(value: f64) -> f64 {
    value.clamp(0.0, EVOLUTION_INDEX_MAX)
}

/// Partial community metrics; `None` fields leave the current value alone.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunityMetricsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pioneers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collective_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neural_connections: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_contribution: Option<f64>,
}

impl CommunityMetricsUpdate {
    pub fn evolution_index(value: f64) -> Self {
        Self {
            evolution_index: Some(value),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// --- Aggregate ---

/// Everything the store owns and persists into its slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CerebroState {
    pub user_identity: Option<UserIdentity>,
    pub learning_profile: Option<LearningProfile>,
    pub community_metrics: CommunityMetrics,
}

impl Default for CerebroState {
    fn default() -> Self {
        Self {
            user_identity: Some(UserIdentity::default()),
            learning_profile: Some(LearningProfile::default()),
            community_metrics: CommunityMetrics::default(),
        }
    }
}

impl CerebroState {
    /// Re-establishes invariants on data that came from outside the store.
    pub fn sanitize(&mut self) {
        let index = self.community_metrics.evolution_index;
        if index.is_nan() {
            warn!("Persisted evolution index is NaN, resetting to 0");
            self.community_metrics.evolution_index = 0.0;
        } else if !(0.0..=EVOLUTION_INDEX_MAX).contains(&index) {
            warn!("Persisted evolution index {} out of range, clamping", index);
            self.community_metrics.evolution_index = clamp_evolution_index(index);
        }
        if let Some(profile) = self.learning_profile.as_mut() {
            let before = profile.learning_history.time_spent_per_concept.len();
            profile
                .learning_history
                .time_spent_per_concept
                .retain(|_, seconds| seconds.is_finite() && *seconds >= 0.0);
            let dropped = before - profile.learning_history.time_spent_per_concept.len();
            if dropped > 0 {
                warn!("Dropped {} invalid time entries from persisted profile", dropped);
            }
        }
    }
}
