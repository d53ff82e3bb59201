use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

use crate::metrics::{Prediction, NEURO_NODES};

#[derive(Debug, Clone, PartialEq)]
pub struct NeuralActivity {
    /// Ids of the lit-up map nodes. Draws are with replacement, so this can
    /// hold fewer ids than were drawn.
    pub active_nodes: BTreeSet<&'static str>,
    /// Activity gauge in [0, 100).
    pub level: f64,
}

impl NeuralActivity {
    pub fn is_active(&self, node_id: &str) -> bool {
        self.active_nodes.contains(node_id)
    }

    /// A synapse lights up when either endpoint is active.
    pub fn is_synapse_active(&self, from: &str, to: &str) -> bool {
        self.is_active(from) || self.is_active(to)
    }
}

pub fn neural_activity_tick<R: Rng + ?Sized>(rng: &mut R) -> NeuralActivity {
    let draws = rng.gen_range(2..=5);
    let mut active_nodes = BTreeSet::new();
    for _ in 0..draws {
        if let Some(node) = NEURO_NODES.choose(rng) {
            active_nodes.insert(node.id);
        }
    }
    NeuralActivity {
        active_nodes,
        level: rng.gen::<f64>() * 100.0,
    }
}

pub fn quantum_field_reading<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 100.0
}

/// Uniform pick among the prediction templates.
pub fn pick_prediction<'a, R: Rng + ?Sized>(
    predictions: &'a [Prediction],
    rng: &mut R,
) -> Option<&'a Prediction> {
    predictions.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{potential_predictions, PredictionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_activity_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let activity = neural_activity_tick(&mut rng);
            assert!(!activity.active_nodes.is_empty());
            assert!(activity.active_nodes.len() <= 5);
            assert!((0.0..100.0).contains(&activity.level));
            for id in &activity.active_nodes {
                assert!(NEURO_NODES.iter().any(|node| node.id == *id));
            }
        }
    }

    #[test]
    fn test_synapse_activity() {
        let activity = NeuralActivity {
            active_nodes: ["pfc-1"].into_iter().collect(),
            level: 10.0,
        };
        assert!(activity.is_synapse_active("pfc-1", "temp-1"));
        assert!(activity.is_synapse_active("pfc-2", "pfc-1"));
        assert!(!activity.is_synapse_active("cer-1", "cer-2"));
    }

    #[test]
    fn test_prediction_pick_covers_all_templates() {
        let predictions = potential_predictions(None);
        let mut rng = StdRng::seed_from_u64(21);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            let picked = pick_prediction(&predictions, &mut rng).unwrap();
            seen.insert(format!("{:?}", picked.kind));
        }
        assert_eq!(seen.len(), PredictionKind::ALL.len());
    }

    #[test]
    fn test_pick_from_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_prediction(&[], &mut rng).is_none());
    }

    #[test]
    fn test_quantum_field_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let reading = quantum_field_reading(&mut rng);
            assert!((0.0..100.0).contains(&reading));
        }
    }
}
