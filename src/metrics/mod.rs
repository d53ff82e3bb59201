//! Pure derivations from a learning profile to the numbers the dashboard shows.
//!
//! Every function here reduces the profile to the same three quantities
//! ([`ProfileInputs`]) and then applies its own formulas. Nothing in this
//! module mutates state, does I/O or touches randomness.

pub mod cognitive_skills;
pub mod collective;
pub mod evolution_index;
pub mod missions;
pub mod neuro_map;
pub mod predictions;

use serde::Serialize;

use crate::profile::{CerebroState, LearningProfile, NEUTRAL_EMOTION};

pub use cognitive_skills::{cognitive_skills, CognitiveSkill, SkillKind, SkillSet};
pub use collective::{connections_per_pioneer, ConsciousnessLevel};
pub use evolution_index::{evolution_index, EvolutionIndexReport, EvolutionStage};
pub use missions::{evolutionary_missions, Difficulty, Mission, MissionBoard, MissionId};
pub use neuro_map::{evolution_level, BrainArea, EvolutionLevel, NeuroNode, NEURO_NODES};
pub use predictions::{
    next_leaps, potential_predictions, NextLeap, Prediction, PredictionKind, QuantumFieldLevel,
};

/// The three quantities every formula is written in terms of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileInputs {
    pub completed_tracks: f64,
    pub emotion_score: f64,
    pub time_spent: f64,
}

impl ProfileInputs {
    /// Absent profile means no tracks, no time and a neutral emotion score.
    pub fn from_profile(profile: Option<&LearningProfile>) -> Self {
        match profile {
            Some(profile) => {
                let history = &profile.learning_history;
                Self {
                    completed_tracks: history.completed_count() as f64,
                    emotion_score: history.emotion_or_neutral(),
                    time_spent: history.total_time_spent(),
                }
            }
            None => Self::default(),
        }
    }
}

impl Default for ProfileInputs {
    fn default() -> Self {
        Self {
            completed_tracks: 0.0,
            emotion_score: NEUTRAL_EMOTION,
            time_spent: 0.0,
        }
    }
}

pub(crate) fn floor_u32(value: f64) -> u32 {
    value.max(0.0).floor() as u32
}

pub(crate) fn floor_u64(value: f64) -> u64 {
    value.max(0.0).floor() as u64
}

/// Every derived metric for one state snapshot, in one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub inputs: ProfileInputs,
    pub evolution: EvolutionIndexReport,
    pub skills: SkillSet,
    pub missions: MissionBoard,
    pub predictions: Vec<Prediction>,
    pub evolution_level: EvolutionLevel,
    pub consciousness: ConsciousnessLevel,
    pub connections_per_pioneer: u64,
}

pub fn build_report(state: &CerebroState) -> DashboardReport {
    let profile = state.learning_profile.as_ref();
    let identity = state.user_identity.as_ref();
    let metrics = &state.community_metrics;
    DashboardReport {
        inputs: ProfileInputs::from_profile(profile),
        evolution: evolution_index(profile),
        skills: cognitive_skills(profile),
        missions: evolutionary_missions(identity, profile),
        predictions: potential_predictions(profile),
        evolution_level: evolution_level(profile),
        consciousness: ConsciousnessLevel::from_progress(metrics.collective_progress),
        connections_per_pioneer: connections_per_pioneer(metrics),
    }
}
