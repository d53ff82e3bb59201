use serde::Serialize;

use super::ProfileInputs;
use crate::profile::LearningProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    Breakthrough,
    Evolution,
    Transcendence,
}

impl PredictionKind {
    pub const ALL: [PredictionKind; 3] = [
        PredictionKind::Breakthrough,
        PredictionKind::Evolution,
        PredictionKind::Transcendence,
    ];

    /// Upper bound on the probability this kind of prediction can claim.
    pub fn probability_cap(self) -> f64 {
        match self {
            PredictionKind::Breakthrough => 95.0,
            PredictionKind::Evolution => 90.0,
            PredictionKind::Transcendence => 85.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub kind: PredictionKind,
    pub title: &'static str,
    pub description: &'static str,
    /// Percentage, capped per kind.
    pub probability: f64,
    pub timeframe: &'static str,
    pub recommendations: [&'static str; 3],
}

/// Blends tracks, emotion and time into the single score the templates use.
pub fn user_score(inputs: &ProfileInputs) -> f64 {
    inputs.completed_tracks * 10.0 + inputs.emotion_score * 100.0 + inputs.time_spent
}

pub fn potential_predictions(profile: Option<&LearningProfile>) -> Vec<Prediction> {
    compute(ProfileInputs::from_profile(profile))
}

pub(crate) fn compute(inputs: ProfileInputs) -> Vec<Prediction> {
    PredictionKind::ALL
        .iter()
        .map(|kind| prediction(*kind, &inputs))
        .collect()
}

fn prediction(kind: PredictionKind, inputs: &ProfileInputs) -> Prediction {
    let score = user_score(inputs);
    let raw = match kind {
        PredictionKind::Breakthrough => 60.0 + inputs.emotion_score * 35.0,
        PredictionKind::Evolution => 45.0 + score / 10.0,
        PredictionKind::Transcendence => 30.0 + score / 8.0,
    };
    let probability = raw.clamp(0.0, kind.probability_cap());

    match kind {
        PredictionKind::Breakthrough => Prediction {
            kind,
            title: "Mathematical Quantum Leap",
            description: "Your brain is getting ready for a breakthrough in how it understands fractions.",
            probability,
            timeframe: "3-7 days",
            recommendations: [
                "Complete every fraction mini-game",
                "Meditate for 5 minutes before each session",
                "Picture numbers as living things",
            ],
        },
        PredictionKind::Evolution => Prediction {
            kind,
            title: "Neuroplastic Creativity Awakening",
            description: "Your neural connections are forming patterns that will unlock new creative abilities.",
            probability,
            timeframe: "1-2 weeks",
            recommendations: [
                "Explore STEAM areas you haven't tried",
                "Combine music with visualization",
                "Practice lateral thinking every day",
            ],
        },
        PredictionKind::Transcendence => Prediction {
            kind,
            title: "Complete Cognitive Metamorphosis",
            description: "You are getting close to a state where learning becomes a transcendent experience.",
            probability,
            timeframe: "2-4 weeks",
            recommendations: [
                "Keep your practice consistent",
                "Connect with other pioneers",
                "Bring what you learn into daily life",
            ],
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextLeap {
    pub area: &'static str,
    pub potential: u32,
    pub catalyst: &'static str,
    pub time_to_unlock: &'static str,
    pub description: &'static str,
}

pub fn next_leaps() -> Vec<NextLeap> {
    vec![
        NextLeap {
            area: "Quantum Mathematics",
            potential: 87,
            catalyst: "Complete the advanced fractions series",
            time_to_unlock: "5 days",
            description: "Intuitive grasp of complex mathematical concepts",
        },
        NextLeap {
            area: "Educational Synesthesia",
            potential: 72,
            catalyst: "Combine music with STEAM visualization",
            time_to_unlock: "12 days",
            description: "\"Seeing\" sounds and \"hearing\" colors",
        },
        NextLeap {
            area: "Multidimensional Thinking",
            potential: 65,
            catalyst: "Explore every archetype area",
            time_to_unlock: "18 days",
            description: "Processing information on several layers at once",
        },
    ]
}

/// Band for a quantum-field reading in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantumFieldLevel {
    Stable,
    Active,
    Elevated,
    Transcendental,
}

impl QuantumFieldLevel {
    pub fn from_reading(field: f64) -> Self {
        if field >= 80.0 {
            QuantumFieldLevel::Transcendental
        } else if field >= 60.0 {
            QuantumFieldLevel::Elevated
        } else if field >= 40.0 {
            QuantumFieldLevel::Active
        } else {
            QuantumFieldLevel::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuantumFieldLevel::Stable => "Stable",
            QuantumFieldLevel::Active => "Active",
            QuantumFieldLevel::Elevated => "Elevated",
            QuantumFieldLevel::Transcendental => "Transcendental",
        }
    }
}
