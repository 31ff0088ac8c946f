//! Experience awarded for a workout.
//!
//! `total = base × grade multiplier × volume factor × PR factor × level factor`,
//! never below [`ExperienceConfig::min_exp`]. The base exercise value is the
//! session volume (sets × reps × weight) scaled by exercise difficulty.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grading::Grade;

/// Sets threshold and the bonus it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeTier {
    pub min_sets: u32,
    pub bonus: f64,
}

/// Body-part level threshold and the penalty applied from it on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelPenalty {
    pub min_level: u32,
    pub penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceConfig {
    /// Volume bonuses; the highest tier reached applies
    #[serde(default = "default_volume_tiers")]
    pub volume_tiers: Vec<VolumeTier>,
    /// Bonus fraction for a personal record
    #[serde(default = "default_pr_bonus")]
    pub pr_bonus: f64,
    /// Diminishing returns at higher levels; the highest bracket reached applies
    #[serde(default = "default_level_penalties")]
    pub level_penalties: Vec<LevelPenalty>,
    #[serde(default = "default_min_exp")]
    pub min_exp: f64,
}

fn default_volume_tiers() -> Vec<VolumeTier> {
    vec![
        VolumeTier { min_sets: 5, bonus: 0.05 },
        VolumeTier { min_sets: 7, bonus: 0.10 },
        VolumeTier { min_sets: 10, bonus: 0.15 },
    ]
}
fn default_pr_bonus() -> f64 {
    0.5
}
fn default_level_penalties() -> Vec<LevelPenalty> {
    vec![
        LevelPenalty { min_level: 6, penalty: 0.1 },
        LevelPenalty { min_level: 11, penalty: 0.2 },
        LevelPenalty { min_level: 16, penalty: 0.3 },
        LevelPenalty { min_level: 21, penalty: 0.4 },
        LevelPenalty { min_level: 26, penalty: 0.5 },
        LevelPenalty { min_level: 31, penalty: 0.6 },
    ]
}
fn default_min_exp() -> f64 {
    1.0
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            volume_tiers: default_volume_tiers(),
            pr_bonus: default_pr_bonus(),
            level_penalties: default_level_penalties(),
            min_exp: default_min_exp(),
        }
    }
}

impl ExperienceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in &self.volume_tiers {
            if !tier.bonus.is_finite() || tier.bonus < 0.0 {
                return Err(ConfigError::invalid(
                    "experience.volume_tiers",
                    format!("bonus must be non-negative, got {}", tier.bonus),
                ));
            }
        }
        for bracket in &self.level_penalties {
            if !(0.0..1.0).contains(&bracket.penalty) {
                return Err(ConfigError::invalid(
                    "experience.level_penalties",
                    format!("penalty must be in [0, 1), got {}", bracket.penalty),
                ));
            }
        }
        if !self.pr_bonus.is_finite() || self.pr_bonus < 0.0 {
            return Err(ConfigError::invalid("experience.pr_bonus", "must be non-negative"));
        }
        if !self.min_exp.is_finite() || self.min_exp < 0.0 {
            return Err(ConfigError::invalid("experience.min_exp", "must be non-negative"));
        }
        Ok(())
    }
}

/// Inputs describing one logged session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceInput {
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    /// Exercise difficulty, 1-10
    pub difficulty: u8,
    pub grade: Grade,
    pub is_personal_record: bool,
    /// Level of the body part before this session
    pub body_part_level: u32,
}

/// How the total was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBreakdown {
    pub base_exp: f64,
    pub grade_multiplier: f64,
    pub volume_factor: f64,
    pub pr_factor: f64,
    pub level_factor: f64,
    pub total_exp: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ExperienceCalculator {
    config: ExperienceConfig,
}

impl ExperienceCalculator {
    pub fn new(config: &ExperienceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Volume scaled by difficulty, rounded to a whole number.
    pub fn base_exp(&self, sets: u32, reps: u32, weight_kg: f64, difficulty: u8) -> f64 {
        let volume = sets as f64 * reps as f64 * weight_kg.max(0.0);
        (volume * (difficulty.min(10) as f64 / 10.0)).round()
    }

    pub fn volume_factor(&self, sets: u32) -> f64 {
        let bonus = self
            .config
            .volume_tiers
            .iter()
            .filter(|t| sets >= t.min_sets)
            .map(|t| t.bonus)
            .fold(0.0, f64::max);
        1.0 + bonus
    }

    pub fn level_factor(&self, level: u32) -> f64 {
        let penalty = self
            .config
            .level_penalties
            .iter()
            .filter(|b| level >= b.min_level)
            .map(|b| b.penalty)
            .fold(0.0, f64::max);
        1.0 - penalty
    }

    pub fn calculate(&self, input: &ExperienceInput) -> ExperienceBreakdown {
        let base_exp = self.base_exp(input.sets, input.reps, input.weight_kg, input.difficulty);
        let grade_multiplier = input.grade.exp_multiplier();
        let volume_factor = self.volume_factor(input.sets);
        let pr_factor = if input.is_personal_record {
            1.0 + self.config.pr_bonus
        } else {
            1.0
        };
        let level_factor = self.level_factor(input.body_part_level);

        let raw = base_exp * grade_multiplier * volume_factor * pr_factor * level_factor;
        let total_exp = raw.round().max(self.config.min_exp);

        tracing::debug!(base_exp, grade_multiplier, volume_factor, pr_factor, level_factor, total_exp, "experience computed");
        ExperienceBreakdown {
            base_exp,
            grade_multiplier,
            volume_factor,
            pr_factor,
            level_factor,
            total_exp,
        }
    }
}
