//! Per-workout composition of the engines.
//!
//! A recorded workout flows through 1RM estimation, grading, experience and
//! leveling, and gets a calorie estimate on the side; the results reach the store as one [`ProgressionChanges`] bundle,
//! so a caller sees either a full [`WorkoutOutcome`] or an error with nothing
//! written.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::store::{ExpectedProgress, ProgressionChanges, ProgressionStore};
use crate::calories::{CalorieCalculator, CalorieEstimate, CalorieInput};
use crate::catalog::BodyPart;
use crate::error::{CoreError, Result};
use crate::experience::{ExperienceBreakdown, ExperienceCalculator, ExperienceInput};
use crate::grading::{standard_thresholds, Classification, GradeThresholdEngine, GradeThresholds};
use crate::leveling::{BodyPartProgress, Character, LevelRewards, LevelUpResult, LevelingEngine};
use crate::overload::{OverloadRecommendationEngine, Recommendation};
use crate::storage::Config;
use crate::strength::{bodyweight_percentage, estimate_one_rm};
use crate::workout::{WorkoutRecord, WorkoutSubmission};

/// Records the overload engine looks back over.
pub const HISTORY_WINDOW: usize = 5;

/// Everything a recorded workout produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutOutcome {
    pub workout: WorkoutRecord,
    /// 1RM as a percentage of bodyweight
    pub strength_ratio: f64,
    pub classification: Classification,
    pub is_personal_record: bool,
    pub experience: ExperienceBreakdown,
    pub level_up: LevelUpResult,
    /// Updated aggregate, only when a level-up happened
    pub character: Option<Character>,
    /// Not persisted; recomputed from the record when needed
    pub calories: CalorieEstimate,
}

/// Result of a direct experience deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceOutcome {
    pub progress: BodyPartProgress,
    pub level_up: LevelUpResult,
    pub character: Option<Character>,
}

pub struct ProgressionOrchestrator<S> {
    store: S,
    grading: GradeThresholdEngine,
    leveling: LevelingEngine,
    experience: ExperienceCalculator,
    overload: OverloadRecommendationEngine,
    calories: CalorieCalculator,
}

impl<S: ProgressionStore> ProgressionOrchestrator<S> {
    /// Build every engine from `config`; invalid configuration fails here,
    /// never mid-workout.
    pub fn new(store: S, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            grading: GradeThresholdEngine::new(),
            leveling: LevelingEngine::new(&config.leveling, &config.rewards)?,
            experience: ExperienceCalculator::new(&config.experience)?,
            overload: OverloadRecommendationEngine::new(&config.overload)?,
            calories: CalorieCalculator::new(&config.calories)?,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn leveling(&self) -> &LevelingEngine {
        &self.leveling
    }

    /// Grade a metric against `thresholds` for a performer of `age`.
    pub fn compute_grade(&self, metric: f64, age: u32, thresholds: &GradeThresholds) -> Result<Classification> {
        self.grading.classify(metric, age, thresholds)
    }

    /// Log a workout and run it through grading, experience and leveling.
    pub fn record_workout(&mut self, user_id: &str, submission: &WorkoutSubmission) -> Result<WorkoutOutcome> {
        submission.validate()?;

        let profile = self
            .store
            .performer_profile(user_id)?
            .ok_or_else(|| CoreError::not_found("user", user_id))?;
        profile.validate()?;
        let mut progress = self.load_progress(user_id, submission.body_part)?;
        let expected = ExpectedProgress::from(&progress);

        let one_rm = estimate_one_rm(submission.weight_kg, submission.reps);
        let strength_ratio = bodyweight_percentage(one_rm, profile.bodyweight_kg);
        let thresholds = standard_thresholds(submission.body_part, profile.sex);
        let classification = self.grading.classify(strength_ratio, profile.age, &thresholds)?;

        let previous_best = self.store.best_one_rm(user_id, &submission.exercise_id)?;
        let is_personal_record = one_rm > 0.0 && previous_best.map_or(true, |best| one_rm > best);

        let experience = self.experience.calculate(&ExperienceInput {
            sets: submission.sets,
            reps: submission.reps,
            weight_kg: submission.weight_kg,
            difficulty: submission.difficulty,
            grade: classification.grade,
            is_personal_record,
            body_part_level: progress.level,
        });

        let calories = self.calories.estimate(&CalorieInput {
            exercise_id: &submission.exercise_id,
            sets: submission.sets,
            reps: submission.reps,
            weight_kg: submission.weight_kg,
            rpe: submission.rpe,
            duration_minutes: submission.duration_minutes,
            average_heart_rate: submission.average_heart_rate,
            performer: Some(&profile),
        });

        let level_up = self.leveling.apply_experience(&mut progress, experience.total_exp)?;
        progress.best_one_rm = progress.best_one_rm.max(one_rm);

        let workout = WorkoutRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            exercise_id: submission.exercise_id.clone(),
            body_part: submission.body_part,
            sets: submission.sets,
            reps: submission.reps,
            weight_kg: submission.weight_kg,
            rpe: submission.rpe,
            prescribed_reps: submission.prescribed_reps,
            workout_date: submission.workout_date,
            estimated_one_rm: one_rm,
            grade: classification.grade,
            exp_gained: experience.total_exp,
            verified: false,
        };

        let character = self.store.commit(&ProgressionChanges {
            workout: Some(workout.clone()),
            expected,
            progress,
            rewards: level_rewards(&level_up),
        })?;

        tracing::info!(
            user_id,
            exercise = %workout.exercise_id,
            one_rm,
            grade = %classification.grade,
            exp = experience.total_exp,
            level = level_up.new_level,
            kcal = calories.total_kcal,
            "workout recorded"
        );

        Ok(WorkoutOutcome {
            workout,
            strength_ratio,
            classification,
            is_personal_record,
            experience,
            level_up,
            character,
            calories,
        })
    }

    /// Deposit experience into one body part outside of a workout.
    pub fn apply_experience(&mut self, user_id: &str, body_part: BodyPart, exp_gained: f64) -> Result<ExperienceOutcome> {
        let mut progress = self.load_progress(user_id, body_part)?;
        let expected = ExpectedProgress::from(&progress);

        let level_up = self.leveling.apply_experience(&mut progress, exp_gained)?;

        let character = self.store.commit(&ProgressionChanges {
            workout: None,
            expected,
            progress: progress.clone(),
            rewards: level_rewards(&level_up),
        })?;

        Ok(ExperienceOutcome {
            progress,
            level_up,
            character,
        })
    }

    /// Next-session prescription for one exercise; `None` without history.
    pub fn recommend_next(&self, user_id: &str, exercise_id: &str) -> Result<Option<Recommendation>> {
        let history = self.store.recent_workouts(user_id, exercise_id, HISTORY_WINDOW)?;
        Ok(self.overload.recommend_next(&history))
    }

    fn load_progress(&self, user_id: &str, body_part: BodyPart) -> Result<BodyPartProgress> {
        self.store
            .body_part_progress(user_id, body_part)?
            .ok_or_else(|| CoreError::not_found("body part progress", format!("{user_id}/{body_part}")))
    }
}

/// Rewards to fold into the character, only when something leveled up.
fn level_rewards(level_up: &LevelUpResult) -> Option<LevelRewards> {
    level_up.did_level_up.then(|| level_up.rewards.clone())
}
