use serde::Serialize;

use super::ProfileInputs;
use crate::profile::LearningProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrainArea {
    Prefrontal,
    Temporal,
    Parietal,
    Occipital,
    Cerebellum,
    Brainstem,
}

impl BrainArea {
    /// Areas shown in the map legend.
    pub const LEGEND: [BrainArea; 5] = [
        BrainArea::Prefrontal,
        BrainArea::Temporal,
        BrainArea::Parietal,
        BrainArea::Occipital,
        BrainArea::Cerebellum,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BrainArea::Prefrontal => "Prefrontal",
            BrainArea::Temporal => "Temporal",
            BrainArea::Parietal => "Parietal",
            BrainArea::Occipital => "Occipital",
            BrainArea::Cerebellum => "Cerebellum",
            BrainArea::Brainstem => "Brainstem",
        }
    }
}

/// A region on the map. Positions are percentages of the map's width/height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuroNode {
    pub id: &'static str,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub area: BrainArea,
    pub skill: &'static str,
    pub connections: &'static [&'static str],
}

#[rustfmt::skip]
pub const NEURO_NODES: &[NeuroNode] = &[
    NeuroNode { id: "pfc-1", x: 50.0, y: 25.0, size: 25.0, area: BrainArea::Prefrontal, skill: "Leadership", connections: &["pfc-2", "temp-1"] },
    NeuroNode { id: "pfc-2", x: 45.0, y: 20.0, size: 20.0, area: BrainArea::Prefrontal, skill: "Critical Thinking", connections: &["pfc-1", "par-1"] },
    NeuroNode { id: "temp-1", x: 30.0, y: 45.0, size: 22.0, area: BrainArea::Temporal, skill: "Musical Processing", connections: &["temp-2", "occ-1"] },
    NeuroNode { id: "temp-2", x: 25.0, y: 50.0, size: 18.0, area: BrainArea::Temporal, skill: "Language Comprehension", connections: &["temp-1", "par-2"] },
    NeuroNode { id: "par-1", x: 60.0, y: 35.0, size: 24.0, area: BrainArea::Parietal, skill: "Mathematical Reasoning", connections: &["par-2", "occ-1"] },
    NeuroNode { id: "par-2", x: 70.0, y: 45.0, size: 20.0, area: BrainArea::Parietal, skill: "Spatial Perception", connections: &["par-1", "temp-2"] },
    NeuroNode { id: "occ-1", x: 80.0, y: 60.0, size: 21.0, area: BrainArea::Occipital, skill: "Visual Creativity", connections: &["occ-2", "temp-1"] },
    NeuroNode { id: "occ-2", x: 75.0, y: 70.0, size: 19.0, area: BrainArea::Occipital, skill: "Visual Processing", connections: &["occ-1", "cer-1"] },
    NeuroNode { id: "cer-1", x: 65.0, y: 80.0, size: 16.0, area: BrainArea::Cerebellum, skill: "Motor Coordination", connections: &["cer-2"] },
    NeuroNode { id: "cer-2", x: 55.0, y: 85.0, size: 14.0, area: BrainArea::Cerebellum, skill: "Automation", connections: &["cer-1"] },
    NeuroNode { id: "brain-1", x: 50.0, y: 90.0, size: 12.0, area: BrainArea::Brainstem, skill: "Basic Processes", connections: &["cer-1", "cer-2"] },
];

pub fn find_node(id: &str) -> Option<&'static NeuroNode> {
    NEURO_NODES.iter().find(|node| node.id == id)
}

/// Every (from, to) synapse whose endpoints both exist.
pub fn synapses() -> Vec<(&'static NeuroNode, &'static NeuroNode)> {
    NEURO_NODES
        .iter()
        .flat_map(|node| {
            node.connections
                .iter()
                .filter_map(move |target| find_node(target).map(|to| (node, to)))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvolutionLevel {
    pub name: &'static str,
    pub percentage: u32,
}

pub fn evolution_level(profile: Option<&LearningProfile>) -> EvolutionLevel {
    compute(ProfileInputs::from_profile(profile))
}

pub(crate) fn compute(inputs: ProfileInputs) -> EvolutionLevel {
    let total = inputs.completed_tracks * 10.0 + inputs.emotion_score * 100.0;
    if total > 500.0 {
        EvolutionLevel {
            name: "Homo Evolutis",
            percentage: 95,
        }
    } else if total > 200.0 {
        EvolutionLevel {
            name: "Homo Creativus",
            percentage: 70,
        }
    } else {
        EvolutionLevel {
            name: "Homo Sapiens",
            percentage: 35,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_connections_resolve() {
        assert_eq!(NEURO_NODES.len(), 11);
        for node in NEURO_NODES {
            for target in node.connections {
                assert!(find_node(target).is_some(), "{} -> {}", node.id, target);
            }
        }
        let edge_count: usize = NEURO_NODES.iter().map(|n| n.connections.len()).sum();
        assert_eq!(synapses().len(), edge_count);
    }

    #[test]
    fn test_evolution_level_bands() {
        let level = evolution_level(None);
        assert_eq!(level.name, "Homo Sapiens");
        assert_eq!(level.percentage, 35);

        // 160 + 50
        let level = compute(ProfileInputs {
            completed_tracks: 16.0,
            emotion_score: 0.5,
            time_spent: 0.0,
        });
        assert_eq!(level.name, "Homo Creativus");
        assert_eq!(level.percentage, 70);

        let level = compute(ProfileInputs {
            completed_tracks: 45.0,
            emotion_score: 1.0,
            time_spent: 0.0,
        });
        assert_eq!(level.name, "Homo Evolutis");
        assert_eq!(level.percentage, 95);
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        // exactly 200 stays in the lowest band
        let level = compute(ProfileInputs {
            completed_tracks: 15.0,
            emotion_score: 0.5,
            time_spent: 0.0,
        });
        assert_eq!(level.percentage, 35);
        // exactly 500 stays below the top band
        let level = compute(ProfileInputs {
            completed_tracks: 40.0,
            emotion_score: 1.0,
            time_spent: 0.0,
        });
        assert_eq!(level.percentage, 70);
    }
}
