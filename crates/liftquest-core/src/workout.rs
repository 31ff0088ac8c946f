//! Workout records, submissions and performer profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{BodyPart, Sex};
use crate::error::{check_range, ValidationError};
use crate::grading::{Grade, MAX_AGE, MIN_AGE};

pub const MAX_SETS: u32 = 50;
pub const MAX_REPS: u32 = 500;
pub const MAX_WEIGHT_KG: f64 = 1000.0;
pub const MIN_RPE: f64 = 6.0;
pub const MAX_RPE: f64 = 10.0;
pub const MAX_DURATION_MINUTES: f64 = 600.0;
pub const MIN_HEART_RATE: u32 = 30;
pub const MAX_HEART_RATE: u32 = 220;

/// A logged workout. Immutable after creation except for `verified`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub user_id: String,
    pub exercise_id: String,
    pub body_part: BodyPart,
    pub sets: u32,
    /// Reps per set
    pub reps: u32,
    pub weight_kg: f64,
    pub rpe: Option<f64>,
    /// Reps per set the lifter was aiming for, when known
    pub prescribed_reps: Option<u32>,
    pub workout_date: DateTime<Utc>,
    pub estimated_one_rm: f64,
    pub grade: Grade,
    pub exp_gained: f64,
    pub verified: bool,
}

impl WorkoutRecord {
    /// Whether every set reached the prescribed reps. Without a prescription
    /// the logged reps are taken as the target.
    pub fn met_prescription(&self) -> bool {
        self.prescribed_reps.map_or(true, |target| self.reps >= target)
    }

    pub fn volume(&self) -> f64 {
        self.sets as f64 * self.reps as f64 * self.weight_kg
    }
}

/// What a user submits when logging a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSubmission {
    pub exercise_id: String,
    pub body_part: BodyPart,
    /// Exercise difficulty, 1-10
    pub difficulty: u8,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    #[serde(default)]
    pub rpe: Option<f64>,
    #[serde(default)]
    pub prescribed_reps: Option<u32>,
    pub workout_date: DateTime<Utc>,
    /// Session length, when timed
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    /// Average heart rate over the session, from a wearable
    #[serde(default)]
    pub average_heart_rate: Option<u32>,
}

impl WorkoutSubmission {
    /// Reject out-of-range values before anything is computed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.exercise_id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "exercise_id".into(),
                message: "must not be empty".into(),
            });
        }
        check_range("difficulty", self.difficulty as f64, 1.0, 10.0)?;
        check_range("sets", self.sets as f64, 1.0, MAX_SETS as f64)?;
        check_range("reps", self.reps as f64, 1.0, MAX_REPS as f64)?;
        check_range("weight_kg", self.weight_kg, 0.0, MAX_WEIGHT_KG)?;
        if let Some(rpe) = self.rpe {
            check_range("rpe", rpe, MIN_RPE, MAX_RPE)?;
        }
        if let Some(target) = self.prescribed_reps {
            check_range("prescribed_reps", target as f64, 1.0, MAX_REPS as f64)?;
        }
        if let Some(minutes) = self.duration_minutes {
            if minutes <= 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: "duration_minutes".into(),
                    message: format!("must be positive, got {minutes}"),
                });
            }
            check_range("duration_minutes", minutes, 0.0, MAX_DURATION_MINUTES)?;
        }
        if let Some(bpm) = self.average_heart_rate {
            check_range("average_heart_rate", bpm as f64, MIN_HEART_RATE as f64, MAX_HEART_RATE as f64)?;
        }
        Ok(())
    }
}

/// Per-user data the grade classification depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerProfile {
    pub user_id: String,
    pub age: u32,
    pub bodyweight_kg: f64,
    pub sex: Sex,
}

impl PerformerProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("age", self.age as f64, MIN_AGE as f64, MAX_AGE as f64)?;
        if !self.bodyweight_kg.is_finite() || self.bodyweight_kg <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "bodyweight_kg".into(),
                message: format!("must be positive, got {}", self.bodyweight_kg),
            });
        }
        Ok(())
    }
}
