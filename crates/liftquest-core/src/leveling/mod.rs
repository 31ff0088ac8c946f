//! Leveling: the experience curve, level-up resolution and milestone rewards.

mod curve;
mod engine;
mod progress;
mod rewards;

pub use curve::{LevelCurve, LevelingConfig};
pub use engine::{LevelUpResult, LevelingEngine};
pub use progress::{aggregate_total_level, BodyPartProgress, Character};
pub use rewards::{LevelRewards, RewardPolicy};
