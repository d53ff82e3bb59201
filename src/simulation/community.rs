use rand::Rng;

use crate::profile::CommunityMetricsUpdate;

const PIONEERS_BASE: f64 = 2847.0;
const EVOLUTION_BASE: f64 = 456.0;
const PROGRESS_BASE: f64 = 67.0;
const CONNECTIONS_BASE: f64 = 156789.0;
const CONTRIBUTION_BASE: f64 = 23.0;
/// Chance that a tick also fires the resonance pulse.
const PULSE_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct CommunityTick {
    pub update: CommunityMetricsUpdate,
    pub pulse: bool,
}

/// One jitter step of the synthetic community numbers around their baselines.
pub fn community_tick<R: Rng + ?Sized>(rng: &mut R) -> CommunityTick {
    let update = CommunityMetricsUpdate {
        total_pioneers: Some((PIONEERS_BASE + rng.gen::<f64>() * 10.0).floor() as u64),
        evolution_index: Some((EVOLUTION_BASE + rng.gen::<f64>() * 20.0).floor()),
        collective_progress: Some((PROGRESS_BASE + rng.gen::<f64>() * 5.0).min(100.0)),
        neural_connections: Some((CONNECTIONS_BASE + rng.gen::<f64>() * 1000.0).floor() as u64),
        user_contribution: Some((CONTRIBUTION_BASE + rng.gen::<f64>() * 3.0).min(100.0)),
    };
    let pulse = rng.gen_bool(PULSE_PROBABILITY);
    CommunityTick { update, pulse }
}

/// The "+N in the last 24h" figure, somewhere in [10, 60).
pub fn daily_new_pioneers<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    (rng.gen::<f64>() * 50.0 + 10.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tick_stays_in_jitter_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let tick = community_tick(&mut rng);
            let update = tick.update;
            let pioneers = update.total_pioneers.unwrap();
            assert!((2847..2857).contains(&pioneers));
            let index = update.evolution_index.unwrap();
            assert!((456.0..476.0).contains(&index));
            let progress = update.collective_progress.unwrap();
            assert!((67.0..=72.0).contains(&progress));
            let connections = update.neural_connections.unwrap();
            assert!((156789..157789).contains(&connections));
            let contribution = update.user_contribution.unwrap();
            assert!((23.0..=26.0).contains(&contribution));
        }
    }

    #[test]
    fn test_pulse_fires_sometimes() {
        let mut rng = StdRng::seed_from_u64(7);
        let pulses = (0..500).filter(|_| community_tick(&mut rng).pulse).count();
        assert!(pulses > 50 && pulses < 300, "pulses = {}", pulses);
    }

    #[test]
    fn test_daily_new_pioneers_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let n = daily_new_pioneers(&mut rng);
            assert!((10..60).contains(&n));
        }
    }
}
