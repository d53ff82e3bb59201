use serde::Serialize;

use super::{floor_u32, ProfileInputs};
use crate::profile::{LearningProfile, UserIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionId {
    Explorer,
    FractionMaster,
    DreamArchitect,
    MentalRevolutionary,
    NeuroAlchemist,
}

impl MissionId {
    pub const ALL: [MissionId; 5] = [
        MissionId::Explorer,
        MissionId::FractionMaster,
        MissionId::DreamArchitect,
        MissionId::MentalRevolutionary,
        MissionId::NeuroAlchemist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MissionId::Explorer => "explorer",
            MissionId::FractionMaster => "fraction-master",
            MissionId::DreamArchitect => "dream-architect",
            MissionId::MentalRevolutionary => "mental-revolutionary",
            MissionId::NeuroAlchemist => "neuro-alchemist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Initiate,
    Evolutionary,
    Transcendental,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mission {
    pub id: MissionId,
    pub title: &'static str,
    pub description: &'static str,
    pub progress: u32,
    pub max_progress: u32,
    pub difficulty: Difficulty,
    pub reward_xp: u64,
    pub reward_title: &'static str,
    pub is_completed: bool,
    pub is_unlocked: bool,
    pub requirements: &'static [&'static str],
}

impl Mission {
    pub fn progress_percent(&self) -> u32 {
        self.progress * 100 / self.max_progress
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionBoard {
    pub missions: Vec<Mission>,
    pub completed_count: usize,
    /// Reward XP summed over completed missions only.
    pub total_xp: u64,
}

impl MissionBoard {
    pub fn get(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|mission| mission.id == id)
    }
}

pub fn evolutionary_missions(
    identity: Option<&UserIdentity>,
    profile: Option<&LearningProfile>,
) -> MissionBoard {
    compute(identity.is_some(), ProfileInputs::from_profile(profile))
}

pub(crate) fn compute(has_identity: bool, inputs: ProfileInputs) -> MissionBoard {
    let missions: Vec<Mission> = MissionId::ALL
        .iter()
        .map(|id| mission(*id, has_identity, &inputs))
        .collect();
    let completed: Vec<&Mission> = missions.iter().filter(|m| m.is_completed).collect();
    MissionBoard {
        completed_count: completed.len(),
        total_xp: completed.iter().map(|m| m.reward_xp).sum(),
        missions,
    }
}

fn mission(id: MissionId, has_identity: bool, inputs: &ProfileInputs) -> Mission {
    let ct = inputs.completed_tracks;
    let e = inputs.emotion_score;
    let t = inputs.time_spent;

    let (raw_progress, max_progress, is_completed, is_unlocked) = match id {
        MissionId::Explorer => (ct, 5, ct >= 5.0, true),
        MissionId::FractionMaster => ((e * 4.0).floor(), 4, e >= 0.9, ct >= 2.0),
        // playlist building isn't tracked, so this one never completes
        MissionId::DreamArchitect => (if has_identity { 1.0 } else { 0.0 }, 3, false, ct >= 3.0),
        MissionId::MentalRevolutionary => ((t / 30.0).floor(), 10, t >= 300.0, e >= 0.7),
        MissionId::NeuroAlchemist => {
            let mastery = ct + e * 10.0;
            ((mastery / 3.0).floor(), 7, mastery >= 21.0, ct >= 5.0 && e >= 0.8)
        }
    };

    let (title, description, difficulty, reward_xp, reward_title, requirements) = catalog(id);
    Mission {
        id,
        title,
        description,
        progress: floor_u32(raw_progress).min(max_progress),
        max_progress,
        difficulty,
        reward_xp,
        reward_title,
        is_completed,
        is_unlocked,
        requirements,
    }
}

const NO_REQUIREMENTS: &[&str] = &[];
const DREAM_ARCHITECT_REQUIREMENTS: &[&str] =
    &["Complete at least 3 songs", "Have a learning identity"];
const MENTAL_REVOLUTIONARY_REQUIREMENTS: &[&str] =
    &["High mental evolution level", "Significant contribution"];

type CatalogEntry = (
    &'static str,
    &'static str,
    Difficulty,
    u64,
    &'static str,
    &'static [&'static str],
);

fn catalog(id: MissionId) -> CatalogEntry {
    match id {
        MissionId::Explorer => (
            "Cosmic Explorer",
            "Discover every STEAM area and widen your interdisciplinary awareness",
            Difficulty::Initiate,
            500,
            "Star Navigator",
            NO_REQUIREMENTS,
        ),
        MissionId::FractionMaster => (
            "Quantum Fraction Master",
            "Master every math mini-game with neural precision",
            Difficulty::Evolutionary,
            750,
            "Mathematical Architect",
            NO_REQUIREMENTS,
        ),
        MissionId::DreamArchitect => (
            "Dream Architect",
            "Build a playlist that mixes 3+ different learning archetypes",
            Difficulty::Evolutionary,
            1000,
            "Reality Weaver",
            DREAM_ARCHITECT_REQUIREMENTS,
        ),
        MissionId::MentalRevolutionary => (
            "Mental Revolutionary",
            "Have a positive influence on the collective evolution of other pioneers",
            Difficulty::Transcendental,
            2000,
            "Consciousness Catalyst",
            MENTAL_REVOLUTIONARY_REQUIREMENTS,
        ),
        MissionId::NeuroAlchemist => (
            "Neural Alchemist",
            "Turn limiting thought patterns into transcendent wisdom",
            Difficulty::Transcendental,
            3000,
            "Master of Transformation",
            NO_REQUIREMENTS,
        ),
    }
}
