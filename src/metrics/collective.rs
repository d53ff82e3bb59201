use serde::Serialize;

use crate::profile::CommunityMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsciousnessLevel {
    InitialAwakening,
    EmergentResonance,
    AcceleratedAwakening,
    MentalRevolution,
    CollectiveTranscendence,
}

impl ConsciousnessLevel {
    pub fn from_progress(progress: f64) -> Self {
        if progress >= 90.0 {
            ConsciousnessLevel::CollectiveTranscendence
        } else if progress >= 75.0 {
            ConsciousnessLevel::MentalRevolution
        } else if progress >= 50.0 {
            ConsciousnessLevel::AcceleratedAwakening
        } else if progress >= 25.0 {
            ConsciousnessLevel::EmergentResonance
        } else {
            ConsciousnessLevel::InitialAwakening
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsciousnessLevel::InitialAwakening => "Initial Awakening",
            ConsciousnessLevel::EmergentResonance => "Emergent Resonance",
            ConsciousnessLevel::AcceleratedAwakening => "Accelerated Awakening",
            ConsciousnessLevel::MentalRevolution => "Mental Revolution",
            ConsciousnessLevel::CollectiveTranscendence => "Collective Transcendence",
        }
    }
}

pub fn connections_per_pioneer(metrics: &CommunityMetrics) -> u64 {
    metrics
        .neural_connections
        .checked_div(metrics.total_pioneers)
        .unwrap_or(0)
}
