//! Storage seam the orchestrator reads from and commits through.

use serde::{Deserialize, Serialize};

use crate::catalog::BodyPart;
use crate::error::Result;
use crate::leveling::{BodyPartProgress, Character, LevelRewards};
use crate::workout::{PerformerProfile, WorkoutRecord};

/// Progress values the writer read before computing, used to detect a
/// concurrent writer on commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedProgress {
    pub level: u32,
    pub current_exp: f64,
}

impl From<&BodyPartProgress> for ExpectedProgress {
    fn from(progress: &BodyPartProgress) -> Self {
        Self {
            level: progress.level,
            current_exp: progress.current_exp,
        }
    }
}

/// Everything one engine call writes. Applied all-or-nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionChanges {
    pub workout: Option<WorkoutRecord>,
    pub expected: ExpectedProgress,
    pub progress: BodyPartProgress,
    /// Present only on level-up. Folded into the character as stored at
    /// commit time, never into a copy read earlier.
    pub rewards: Option<LevelRewards>,
}

/// Persistence collaborator.
///
/// `commit` must apply every part of the bundle or none of it, and must
/// refuse with [`crate::DatabaseError::Conflict`] when the stored progress no
/// longer matches `expected`. On level-up it recomputes the character from the
/// stored body-part levels inside the same unit of work and returns it.
pub trait ProgressionStore {
    fn performer_profile(&self, user_id: &str) -> Result<Option<PerformerProfile>>;

    /// Up to `limit` records for one exercise, most recent first.
    fn recent_workouts(&self, user_id: &str, exercise_id: &str, limit: usize) -> Result<Vec<WorkoutRecord>>;

    /// Highest estimated 1RM logged for an exercise.
    fn best_one_rm(&self, user_id: &str, exercise_id: &str) -> Result<Option<f64>>;

    fn body_part_progress(&self, user_id: &str, body_part: BodyPart) -> Result<Option<BodyPartProgress>>;

    /// Levels of every body part the user has a progress row for.
    fn body_part_levels(&self, user_id: &str) -> Result<Vec<(BodyPart, u32)>>;

    fn character(&self, user_id: &str) -> Result<Option<Character>>;

    fn commit(&mut self, changes: &ProgressionChanges) -> Result<Option<Character>>;
}
