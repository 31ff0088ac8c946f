//! Progressive-overload recommendations.

mod config;
mod engine;

pub use config::OverloadConfig;
pub use engine::{CurrentWorkout, OverloadRecommendationEngine, ProgressionType, Recommendation};
