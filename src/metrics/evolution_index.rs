use serde::Serialize;

use super::{floor_u32, ProfileInputs};
use crate::profile::{LearningProfile, EVOLUTION_INDEX_MAX};

const SUB_SCORE_MAX: f64 = 100.0;
const INDEX_SCALE: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionStage {
    HomoSapiens,
    HomoSapiensPlus,
    HomoCreativus,
    HomoEvolutis,
}

impl EvolutionStage {
    /// Highest threshold first; the first band the index reaches wins.
    const BANDS: [(u32, EvolutionStage); 3] = [
        (800, EvolutionStage::HomoEvolutis),
        (600, EvolutionStage::HomoCreativus),
        (400, EvolutionStage::HomoSapiensPlus),
    ];

    pub fn from_index(iem: u32) -> Self {
        Self::BANDS
            .iter()
            .find(|(threshold, _)| iem >= *threshold)
            .map(|(_, stage)| *stage)
            .unwrap_or(EvolutionStage::HomoSapiens)
    }

    pub fn name(self) -> &'static str {
        match self {
            EvolutionStage::HomoSapiens => "Homo Sapiens",
            EvolutionStage::HomoSapiensPlus => "Homo Sapiens Plus",
            EvolutionStage::HomoCreativus => "Homo Creativus",
            EvolutionStage::HomoEvolutis => "Homo Evolutis",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EvolutionStage::HomoSapiens => "Cognitive base established",
            EvolutionStage::HomoSapiensPlus => "Mental awakening started",
            EvolutionStage::HomoCreativus => "Creative revolution in progress",
            EvolutionStage::HomoEvolutis => "Cognitive transcendence reached",
        }
    }

    pub fn next_milestone(self) -> &'static str {
        match self {
            EvolutionStage::HomoSapiens => "Mental awakening",
            EvolutionStage::HomoSapiensPlus => "Creative revolution",
            EvolutionStage::HomoCreativus => "Cognitive transcendence",
            EvolutionStage::HomoEvolutis => "Universal mastery",
        }
    }

    pub fn outlook(self) -> &'static str {
        match self {
            EvolutionStage::HomoSapiens => {
                "Your brain is waking up. Keep exploring different areas of knowledge to speed up your evolution."
            }
            EvolutionStage::HomoSapiensPlus => {
                "You are in full cognitive transformation. Your ability to connect ideas is expanding fast."
            }
            EvolutionStage::HomoCreativus => {
                "You reached the creative revolution. Your mind works at a higher frequency."
            }
            EvolutionStage::HomoEvolutis => {
                "You went past the usual cognitive limits. You are a pioneer of the new humanity."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionIndexReport {
    /// Mental evolution index in [0, 1000].
    pub iem: u32,
    pub processing_speed: u32,
    pub mental_flexibility: u32,
    pub critical_thinking: u32,
    pub creativity: u32,
    pub stage: EvolutionStage,
}

fn sub_score(value: f64) -> f64 {
    value.clamp(0.0, SUB_SCORE_MAX)
}

pub fn evolution_index(profile: Option<&LearningProfile>) -> EvolutionIndexReport {
    compute(ProfileInputs::from_profile(profile))
}

pub(crate) fn compute(inputs: ProfileInputs) -> EvolutionIndexReport {
    let ProfileInputs {
        completed_tracks,
        emotion_score,
        time_spent,
    } = inputs;

    let processing_speed = sub_score(completed_tracks * 15.0 + emotion_score * 50.0);
    let mental_flexibility = sub_score(emotion_score * 100.0);
    // ten points per minute invested
    let critical_thinking = sub_score(time_spent / 60.0 * 10.0);
    let creativity = sub_score(completed_tracks * 20.0 + emotion_score * 30.0);

    let total = processing_speed + mental_flexibility + critical_thinking + creativity;
    let iem = floor_u32((total * INDEX_SCALE).min(EVOLUTION_INDEX_MAX));

    EvolutionIndexReport {
        iem,
        processing_speed: floor_u32(processing_speed),
        mental_flexibility: floor_u32(mental_flexibility),
        critical_thinking: floor_u32(critical_thinking),
        creativity: floor_u32(creativity),
        stage: EvolutionStage::from_index(iem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EmotionScore;

    fn inputs(completed_tracks: f64, emotion_score: f64, time_spent: f64) -> ProfileInputs {
        ProfileInputs {
            completed_tracks,
            emotion_score,
            time_spent,
        }
    }

    #[test]
    fn test_empty_profile_index() {
        let report = evolution_index(None);
        // (25 + 50 + 0 + 15) * 2.5
        assert_eq!(report.iem, 225);
        assert_eq!(report.processing_speed, 25);
        assert_eq!(report.mental_flexibility, 50);
        assert_eq!(report.critical_thinking, 0);
        assert_eq!(report.creativity, 15);
        assert_eq!(report.stage, EvolutionStage::HomoSapiens);
    }

    #[test]
    fn test_profile_without_emotion_matches_default() {
        let profile = LearningProfile::empty("u", "i");
        assert_eq!(evolution_index(Some(&profile)), evolution_index(None));
    }

    #[test]
    fn test_sub_scores_cap_at_100() {
        let report = compute(inputs(10.0, 1.0, 6000.0));
        assert_eq!(report.processing_speed, 100);
        assert_eq!(report.mental_flexibility, 100);
        assert_eq!(report.critical_thinking, 100);
        assert_eq!(report.creativity, 100);
        assert_eq!(report.iem, 1000);
        assert_eq!(report.stage, EvolutionStage::HomoEvolutis);
    }

    #[test]
    fn test_mid_profile() {
        // ps = 2*15 + 25 = 55, mf = 50, ct = 120/60*10 = 20, cr = 40 + 15 = 55
        let report = compute(inputs(2.0, 0.5, 120.0));
        assert_eq!(report.iem, 450);
        assert_eq!(report.stage, EvolutionStage::HomoSapiensPlus);
    }

    #[test]
    fn test_stage_bands() {
        assert_eq!(EvolutionStage::from_index(0), EvolutionStage::HomoSapiens);
        assert_eq!(EvolutionStage::from_index(399), EvolutionStage::HomoSapiens);
        assert_eq!(EvolutionStage::from_index(400), EvolutionStage::HomoSapiensPlus);
        assert_eq!(EvolutionStage::from_index(600), EvolutionStage::HomoCreativus);
        assert_eq!(EvolutionStage::from_index(799), EvolutionStage::HomoCreativus);
        assert_eq!(EvolutionStage::from_index(800), EvolutionStage::HomoEvolutis);
        assert_eq!(EvolutionStage::from_index(1000), EvolutionStage::HomoEvolutis);
    }

    #[test]
    fn test_low_emotion_profile() {
        let mut profile = LearningProfile::empty("u", "i");
        profile.learning_history.last_emotion_score = Some(EmotionScore::new(0.0));
        let report = evolution_index(Some(&profile));
        assert_eq!(report.iem, 0);
        assert_eq!(report.stage.name(), "Homo Sapiens");
    }
}
