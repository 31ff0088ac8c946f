//! Multi-session overload behavior.

use chrono::{Duration, TimeZone, Utc};
use liftquest_core::{
    BodyPart, Grade, OverloadConfig, OverloadRecommendationEngine, ProgressionType, WorkoutRecord,
};
use proptest::prelude::*;

fn session(weight_kg: f64, reps: u32, sets: u32, rpe: Option<f64>, day: i64) -> WorkoutRecord {
    WorkoutRecord {
        id: format!("w{day}"),
        user_id: "u1".into(),
        exercise_id: "overhead_press".into(),
        body_part: BodyPart::Shoulder,
        sets,
        reps,
        weight_kg,
        rpe,
        prescribed_reps: None,
        workout_date: Utc.with_ymd_and_hms(2026, 4, 1, 6, 30, 0).unwrap() + Duration::days(day),
        estimated_one_rm: 0.0,
        grade: Grade::Bronze,
        exp_gained: 0.0,
        verified: false,
    }
}

/// Log exactly what was recommended, with a fixed RPE.
fn follow(engine: &OverloadRecommendationEngine, start: WorkoutRecord, rpe: f64, sessions: i64) -> Vec<WorkoutRecord> {
    let mut history = vec![start];
    for day in 1..=sessions {
        let rec = engine.recommend_next(&history).unwrap();
        history.insert(
            0,
            session(rec.next_weight_kg, rec.next_reps, rec.next_sets, Some(rpe), day * 3),
        );
        history.truncate(5);
    }
    history
}

#[test]
fn moderate_effort_cycles_reps_then_weight() {
    let engine = OverloadRecommendationEngine::default();
    let history = follow(&engine, session(40.0, 10, 3, Some(8.0), 0), 8.0, 3);
    // 10 -> 11 -> 12 reps, then +2.5% and back to 8
    assert_eq!(history[0].reps, 8);
    assert_eq!(history[0].weight_kg, 41.0);
    assert_eq!(history[1].reps, 12);
}

#[test]
fn easy_sessions_compound_weight() {
    let engine = OverloadRecommendationEngine::default();
    let history = follow(&engine, session(40.0, 5, 5, Some(6.0), 0), 6.0, 2);
    assert_eq!(history[1].weight_kg, 41.0);
    assert_eq!(history[0].weight_kg, 42.0);
}

#[test]
fn repeated_grinding_deloads_to_the_floor_then_holds() {
    let engine = OverloadRecommendationEngine::default();
    let history = follow(&engine, session(60.0, 5, 3, Some(9.5), 0), 9.5, 4);
    assert_eq!((history[0].reps, history[0].sets), (3, 1));
    let rec = engine.recommend_next(&history).unwrap();
    assert_eq!(rec.progression_type, ProgressionType::Hold);
    assert!(rec.warnings.iter().any(|w| w.contains("plateau")));
}

#[test]
fn custom_cut_points_shift_the_decision() {
    let engine = OverloadRecommendationEngine::new(&OverloadConfig {
        easy_rpe_below: 8.5,
        ..Default::default()
    })
    .unwrap();
    let rec = engine.recommend_next(&[session(50.0, 6, 3, Some(8.0), 0)]).unwrap();
    assert_eq!(rec.progression_type, ProgressionType::Linear);
}

proptest! {
    #[test]
    fn expected_rpe_stays_on_scale(
        weight in 0.0f64..300.0,
        reps in 1u32..30,
        sets in 1u32..10,
        rpe in proptest::option::of(6.0f64..=10.0),
    ) {
        let engine = OverloadRecommendationEngine::default();
        let rec = engine.recommend_next(&[session(weight, reps, sets, rpe, 0)]).unwrap();
        prop_assert!((6.0..=10.0).contains(&rec.expected_rpe));
        prop_assert!(rec.next_sets >= 1 && rec.next_reps >= 1);
        prop_assert!(rec.next_weight_kg >= 0.0);
    }

    #[test]
    fn easy_loaded_sessions_always_add_weight(
        tenths in 1u32..3000,
        reps in 1u32..12,
        rpe in 6.0f64..7.0,
    ) {
        let weight = tenths as f64 / 10.0;
        let engine = OverloadRecommendationEngine::default();
        let rec = engine.recommend_next(&[session(weight, reps, 3, Some(rpe), 0)]).unwrap();
        prop_assert_eq!(rec.progression_type, ProgressionType::Linear);
        prop_assert!(rec.next_weight_kg > weight, "{} -> {}", weight, rec.next_weight_kg);
    }

    #[test]
    fn window_length_never_changes_the_prescription(
        weight in 20.0f64..200.0,
        reps in 1u32..15,
        rpe in 6.0f64..=10.0,
        extra in 1usize..5,
    ) {
        let engine = OverloadRecommendationEngine::default();
        let latest = session(weight, reps, 3, Some(rpe), 30);
        let mut window = vec![latest.clone()];
        for i in 0..extra {
            window.push(session(weight * 0.9, reps, 3, Some(7.5), 20 - i as i64));
        }
        let single = engine.recommend_next(&[latest]).unwrap();
        let longer = engine.recommend_next(&window).unwrap();
        prop_assert_eq!(single.next_weight_kg, longer.next_weight_kg);
        prop_assert_eq!(single.next_reps, longer.next_reps);
        prop_assert_eq!(single.next_sets, longer.next_sets);
        prop_assert_eq!(single.progression_type, longer.progression_type);
        prop_assert_eq!(single.expected_rpe, longer.expected_rpe);
    }
}
