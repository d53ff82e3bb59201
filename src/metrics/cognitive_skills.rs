use serde::Serialize;

use super::{floor_u32, floor_u64, ProfileInputs};
use crate::profile::LearningProfile;

pub const SKILL_MAX_LEVEL: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    SynapticSpeed,
    Neuroplasticity,
    CreativeResonance,
    QuantumCoherence,
}

impl SkillKind {
    pub const ALL: [SkillKind; 4] = [
        SkillKind::SynapticSpeed,
        SkillKind::Neuroplasticity,
        SkillKind::CreativeResonance,
        SkillKind::QuantumCoherence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkillKind::SynapticSpeed => "Synaptic Speed",
            SkillKind::Neuroplasticity => "Neuroplasticity",
            SkillKind::CreativeResonance => "Creative Resonance",
            SkillKind::QuantumCoherence => "Quantum Coherence",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillKind::SynapticSpeed => "How fast new information gets processed",
            SkillKind::Neuroplasticity => "Capacity to form new neural connections",
            SkillKind::CreativeResonance => "Ability to come up with novel solutions",
            SkillKind::QuantumCoherence => "Keeping several cognitive processes in sync",
        }
    }

    pub fn next_level_xp(self) -> u64 {
        match self {
            SkillKind::SynapticSpeed => 500,
            SkillKind::Neuroplasticity => 750,
            SkillKind::CreativeResonance => 600,
            SkillKind::QuantumCoherence => 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CognitiveSkill {
    pub kind: SkillKind,
    pub level: u32,
    pub max_level: u32,
    pub xp: u64,
    pub next_level_xp: u64,
    pub neural_connections: u64,
}

impl CognitiveSkill {
    fn derive(kind: SkillKind, inputs: &ProfileInputs) -> Self {
        let ct = inputs.completed_tracks;
        let e = inputs.emotion_score;
        let t = inputs.time_spent;

        let (raw_level, xp, neural_connections) = match kind {
            SkillKind::SynapticSpeed => (
                (ct / 2.0 + e * 5.0).floor(),
                floor_u64(ct * 25.0) + floor_u64(e * 100.0),
                floor_u64(ct * 10.0 + e * 50.0),
            ),
            SkillKind::Neuroplasticity => (
                (t / 10.0 + e * 3.0).floor(),
                floor_u64(t * 2.0) + floor_u64(e * 75.0),
                floor_u64(t * 2.0 + e * 30.0),
            ),
            SkillKind::CreativeResonance => (
                (ct / 3.0).floor() + (e * 4.0).floor(),
                floor_u64(ct * 30.0) + floor_u64(e * 120.0),
                floor_u64(ct * 8.0 + e * 40.0),
            ),
            SkillKind::QuantumCoherence => (
                (ct / 4.0 + t / 15.0).floor(),
                floor_u64(ct * 20.0) + floor_u64(t * 3.0),
                floor_u64(ct * 6.0 + t * 1.5),
            ),
        };

        Self {
            kind,
            level: floor_u32(raw_level).min(SKILL_MAX_LEVEL),
            max_level: SKILL_MAX_LEVEL,
            xp,
            next_level_xp: kind.next_level_xp(),
            neural_connections,
        }
    }

    pub fn efficiency_percent(&self) -> u32 {
        self.level * 100 / self.max_level
    }

    pub fn xp_remaining(&self) -> u64 {
        self.next_level_xp.saturating_sub(self.xp)
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillSet {
    pub skills: Vec<CognitiveSkill>,
    pub total_level: u32,
    pub max_total_level: u32,
}

impl SkillSet {
    pub fn get(&self, kind: SkillKind) -> Option<&CognitiveSkill> {
        self.skills.iter().find(|skill| skill.kind == kind)
    }
}

pub fn cognitive_skills(profile: Option<&LearningProfile>) -> SkillSet {
    compute(ProfileInputs::from_profile(profile))
}

pub(crate) fn compute(inputs: ProfileInputs) -> SkillSet {
    let skills: Vec<CognitiveSkill> = SkillKind::ALL
        .iter()
        .map(|kind| CognitiveSkill::derive(*kind, &inputs))
        .collect();
    SkillSet {
        total_level: skills.iter().map(|skill| skill.level).sum(),
        max_total_level: skills.iter().map(|skill| skill.max_level).sum(),
        skills,
    }
}
