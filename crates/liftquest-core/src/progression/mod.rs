//! Workout-to-progression pipeline and its storage seam.

mod orchestrator;
mod store;

pub use orchestrator::{ExperienceOutcome, ProgressionOrchestrator, WorkoutOutcome, HISTORY_WINDOW};
pub use store::{ExpectedProgress, ProgressionChanges, ProgressionStore};
