//! Demo behavior driven by randomness: community metric jitter, neural
//! activity on the brain map, the quantum-field gauge and the random pick of
//! a "current" prediction.
//!
//! None of this is part of the reproducible core. Every function takes the
//! RNG as a parameter so tests can pin it with a seeded generator.

pub mod activity;
pub mod community;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::config::SimulationConfig;
use crate::metrics::Prediction;

pub use activity::{neural_activity_tick, pick_prediction, quantum_field_reading, NeuralActivity};
pub use community::{community_tick, daily_new_pioneers, CommunityTick};

/// Owns the RNG the dashboard's timers draw from.
pub struct DemoSimulator {
    rng: StdRng,
}

impl DemoSimulator {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                debug!("Demo simulation seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn community_tick(&mut self) -> CommunityTick {
        community_tick(&mut self.rng)
    }

    pub fn neural_activity(&mut self) -> NeuralActivity {
        neural_activity_tick(&mut self.rng)
    }

    pub fn quantum_field(&mut self) -> f64 {
        quantum_field_reading(&mut self.rng)
    }

    pub fn daily_new_pioneers(&mut self) -> u32 {
        daily_new_pioneers(&mut self.rng)
    }

    pub fn pick_prediction<'a>(&mut self, predictions: &'a [Prediction]) -> Option<&'a Prediction> {
        pick_prediction(predictions, &mut self.rng)
    }
}
