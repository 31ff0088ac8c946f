//! Experience deposits and multi-level-up resolution.

use serde::{Deserialize, Serialize};

use super::curve::{LevelCurve, LevelingConfig};
use super::progress::BodyPartProgress;
use super::rewards::{LevelRewards, RewardPolicy};
use crate::error::{ConfigError, Result, ValidationError};

/// Outcome of one experience deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelUpResult {
    pub did_level_up: bool,
    pub old_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
    /// Experience left inside `new_level`
    pub remaining_exp: f64,
    pub rewards: LevelRewards,
}

/// Owns the curve and reward policy; holds no per-user state.
#[derive(Debug, Clone)]
pub struct LevelingEngine {
    curve: LevelCurve,
    rewards: RewardPolicy,
}

impl Default for LevelingEngine {
    fn default() -> Self {
        Self {
            curve: LevelCurve::default(),
            rewards: RewardPolicy::default(),
        }
    }
}

impl LevelingEngine {
    pub fn new(leveling: &LevelingConfig, rewards: &RewardPolicy) -> Result<Self, ConfigError> {
        rewards.validate()?;
        Ok(Self {
            curve: LevelCurve::new(leveling)?,
            rewards: rewards.clone(),
        })
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    pub fn required_experience(&self, level: u32) -> f64 {
        self.curve.required_experience(level)
    }

    /// Deposit `exp_gained` into `progress`, resolving as many level-ups as it
    /// pays for. `progress` is untouched when the input is rejected.
    pub fn apply_experience(
        &self,
        progress: &mut BodyPartProgress,
        exp_gained: f64,
    ) -> Result<LevelUpResult> {
        if !exp_gained.is_finite() || exp_gained < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "exp_gained".into(),
                message: format!("must be a non-negative number, got {exp_gained}"),
            }
            .into());
        }

        let old_level = progress.level.max(1);
        let mut level = old_level;
        let mut exp = progress.current_exp.max(0.0) + exp_gained;
        let mut rewards = LevelRewards::default();

        // The curve is non-decreasing and required(1) >= 1, so every pass
        // consumes at least required(1) and this bound is never reached early.
        let smallest = self.curve.required_experience(1).max(1.0);
        let max_passes = (exp / smallest).ceil() as u64 + 1;
        for _ in 0..max_passes {
            let required = self.curve.required_experience(level);
            if exp < required {
                break;
            }
            exp -= required;
            level += 1;
            rewards.merge(self.rewards.rewards_for_level(level));
        }

        let levels_gained = level - old_level;
        progress.level = level;
        progress.current_exp = exp;

        if levels_gained > 0 {
            tracing::info!(
                key = %progress.key(),
                old_level,
                new_level = level,
                skill_points = rewards.skill_points,
                "body part leveled up"
            );
        }

        Ok(LevelUpResult {
            did_level_up: levels_gained > 0,
            old_level,
            new_level: level,
            levels_gained,
            remaining_exp: exp,
            rewards,
        })
    }
}
