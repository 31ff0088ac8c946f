//! # LiftQuest Core Library
//!
//! This library provides the progression engine behind LiftQuest, a fitness
//! tracker that layers RPG progression on top of logged workouts. Every
//! operation is available through the standalone `liftquest` CLI binary.
//!
//! ## Architecture
//!
//! - **Grading**: strength metric to grade and percentile, discounted by age
//! - **Leveling**: exponential experience curve with multi-level-up resolution
//!   and milestone rewards
//! - **Overload**: next-session weight/reps/sets from recent history and RPE
//! - **Calories**: per-session energy estimate from METs or heart rate
//! - **Progression**: composes the engines per workout and commits the result
//!   atomically through a [`ProgressionStore`]
//! - **Storage**: TOML configuration and a SQLite store
//!
//! ## Key Components
//!
//! - [`ProgressionOrchestrator`]: per-workout pipeline
//! - [`LevelingEngine`], [`GradeThresholdEngine`], [`OverloadRecommendationEngine`]
//! - [`SqliteStore`]: progression persistence
//! - [`Config`]: engine configuration

pub mod calories;
pub mod catalog;
pub mod error;
pub mod experience;
pub mod grading;
pub mod leveling;
pub mod overload;
pub mod progression;
pub mod skills;
pub mod storage;
pub mod strength;
pub mod workout;

pub use calories::{CalorieCalculator, CalorieConfig, CalorieEstimate, CalorieMethod};
pub use catalog::{builtin_exercises, find_exercise, BodyPart, Exercise, Sex};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use experience::{ExperienceBreakdown, ExperienceCalculator, ExperienceConfig, ExperienceInput};
pub use grading::{standard_thresholds, AgeBracket, Classification, Grade, GradeThresholdEngine, GradeThresholds};
pub use leveling::{BodyPartProgress, Character, LevelRewards, LevelUpResult, LevelingConfig, LevelingEngine, RewardPolicy};
pub use overload::{OverloadConfig, OverloadRecommendationEngine, ProgressionType, Recommendation};
pub use progression::{ProgressionChanges, ProgressionOrchestrator, ProgressionStore, WorkoutOutcome};
pub use skills::{Skill, SkillTree};
pub use storage::{Config, SqliteStore};
pub use strength::estimate_one_rm;
pub use workout::{PerformerProfile, WorkoutRecord, WorkoutSubmission};
