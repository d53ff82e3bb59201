use std::sync::Arc;

use cerebro_dashboard::metrics::{
    cognitive_skills, evolution_index, evolutionary_missions, MissionId, SkillKind,
};
use cerebro_dashboard::{
    build_report, CerebroState, CommunityMetricsUpdate, CommunityStore, EmotionScore,
    LearningProfile, MemoryStorage, UserIdentity,
};
use proptest::prelude::*;

fn store_with_profile() -> CommunityStore {
    let mut store = CommunityStore::open(Box::new(Arc::new(MemoryStorage::new())));
    store.set_learning_profile(LearningProfile::empty("u", "constructores"));
    store
}

fn profile(tracks: usize, emotion: f64, seconds: f64) -> LearningProfile {
    let mut profile = LearningProfile::empty("u", "constructores");
    let history = &mut profile.learning_history;
    for i in 0..tracks {
        history.completed_tracks.insert(format!("track-{}", i));
    }
    if seconds > 0.0 {
        history.time_spent_per_concept.insert("c".to_string(), seconds);
    }
    history.last_emotion_score = Some(EmotionScore::new(emotion));
    profile
}

proptest! {
    #[test]
    fn prop_track_progress_is_additive(
        durations in prop::collection::vec(0.0f64..500.0, 1..20)
    ) {
        let mut store = store_with_profile();
        for seconds in &durations {
            store.track_progress("fracciones", *seconds);
        }
        let total: f64 = durations.iter().sum();
        let recorded = store
            .learning_profile()
            .unwrap()
            .learning_history
            .time_spent_on("fracciones");
        prop_assert!((recorded - total).abs() < 1e-6);
    }

    #[test]
    fn prop_time_totals_never_shrink(
        durations in prop::collection::vec(-100.0f64..100.0, 1..30)
    ) {
        let mut store = store_with_profile();
        let mut previous = 0.0;
        for seconds in durations {
            store.track_progress("c", seconds);
            let now = store.learning_profile().unwrap().learning_history.total_time_spent();
            prop_assert!(now >= previous);
            previous = now;
        }
    }

    #[test]
    fn prop_complete_track_is_idempotent(track in "[a-z0-9-]{1,12}", repeats in 1usize..5) {
        let mut store = store_with_profile();
        store.complete_track(&track);
        let once = store.state().clone();
        for _ in 0..repeats {
            store.complete_track(&track);
        }
        prop_assert_eq!(store.state(), &once);
        prop_assert_eq!(
            store.learning_profile().unwrap().learning_history.completed_count(),
            1
        );
    }

    #[test]
    fn prop_evolution_index_update_is_clamped(index in -5000.0f64..5000.0) {
        let mut store = store_with_profile();
        let before = store.community_metrics().clone();
        store.update_community_metrics(CommunityMetricsUpdate::evolution_index(index));
        let after = store.community_metrics();
        prop_assert!((0.0..=1000.0).contains(&after.evolution_index));
        prop_assert_eq!(after.total_pioneers, before.total_pioneers);
        prop_assert_eq!(after.collective_progress, before.collective_progress);
        prop_assert_eq!(after.neural_connections, before.neural_connections);
        prop_assert_eq!(after.user_contribution, before.user_contribution);
    }

    #[test]
    fn prop_derivations_are_pure(
        tracks in 0usize..60,
        emotion in 0.0f64..=1.0,
        seconds in 0.0f64..5000.0,
    ) {
        let profile = profile(tracks, emotion, seconds);
        prop_assert_eq!(evolution_index(Some(&profile)), evolution_index(Some(&profile)));
        prop_assert_eq!(cognitive_skills(Some(&profile)), cognitive_skills(Some(&profile)));
        let state = CerebroState {
            learning_profile: Some(profile),
            ..CerebroState::default()
        };
        prop_assert_eq!(build_report(&state), build_report(&state));
    }

    #[test]
    fn prop_report_stays_in_bounds(
        tracks in 0usize..200,
        emotion in 0.0f64..=1.0,
        seconds in 0.0f64..100_000.0,
    ) {
        let profile = profile(tracks, emotion, seconds);
        let report = evolution_index(Some(&profile));
        prop_assert!(report.iem <= 1000);
        for sub in [
            report.processing_speed,
            report.mental_flexibility,
            report.critical_thinking,
            report.creativity,
        ] {
            prop_assert!(sub <= 100);
        }
        let skills = cognitive_skills(Some(&profile));
        for skill in &skills.skills {
            prop_assert!(skill.level <= skill.max_level);
        }
        let board = evolutionary_missions(Some(&UserIdentity::default()), Some(&profile));
        for mission in &board.missions {
            prop_assert!(mission.progress <= mission.max_progress);
        }
    }
}

#[test]
fn test_empty_profile_boundary() {
    let empty = LearningProfile::empty("u", "constructores");
    let report = evolution_index(Some(&empty));
    assert_eq!(report.iem, 225);
    assert_eq!(report, evolution_index(None));
}

#[test]
fn test_explorer_scenario() {
    let mut store = store_with_profile();
    for i in 0..5 {
        store.complete_track(&format!("track-{}", i));
    }
    let mut profile = store.learning_profile().unwrap().clone();
    profile.learning_history.last_emotion_score = Some(EmotionScore::new(0.9));
    store.set_learning_profile(profile);

    let report = build_report(store.state());
    let explorer = report.missions.get(MissionId::Explorer).unwrap();
    assert_eq!(explorer.progress, 5);
    assert_eq!(explorer.progress, explorer.max_progress);
    assert!(explorer.is_completed);
    let fractions = report.missions.get(MissionId::FractionMaster).unwrap();
    assert!(fractions.is_unlocked);
    assert!(fractions.is_completed);

    let speed = report.skills.get(SkillKind::SynapticSpeed).unwrap();
    // floor(5/2 + 0.9*5)
    assert_eq!(speed.level, 7);
}
