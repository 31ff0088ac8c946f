//! Progressive-overload tuning knobs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::workout::{MAX_RPE, MIN_RPE};

/// RPE cut points, step sizes, floors and warning limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadConfig {
    /// RPE strictly below this counts as easy
    #[serde(default = "default_easy_rpe_below")]
    pub easy_rpe_below: f64,
    /// RPE at or above this counts as near-maximal
    #[serde(default = "default_near_max_rpe")]
    pub near_max_rpe: f64,
    /// Weight increase per progression step, in percent
    #[serde(default = "default_weight_step_percent")]
    pub weight_step_percent: f64,
    /// Smallest weight increase a step may propose, in kg
    #[serde(default = "default_min_weight_step_kg")]
    pub min_weight_step_kg: f64,
    /// Double progression adds reps up to this count
    #[serde(default = "default_rep_ceiling")]
    pub rep_ceiling: u32,
    /// Reps to restart from after a double-progression weight jump
    #[serde(default = "default_base_rep_target")]
    pub base_rep_target: u32,
    #[serde(default = "default_min_reps")]
    pub min_reps: u32,
    #[serde(default = "default_min_sets")]
    pub min_sets: u32,
    #[serde(default = "default_one")]
    pub deload_rep_drop: u32,
    #[serde(default = "default_one")]
    pub deload_set_drop: u32,
    /// Warn when the proposal exceeds the window's max weight by this percent
    #[serde(default = "default_max_jump_percent")]
    pub max_jump_percent: f64,
    /// Warn when weight climbs faster than this percent per week across the window
    #[serde(default = "default_max_weekly_increase_percent")]
    pub max_weekly_increase_percent: f64,
    /// Warn when sets × reps exceeds this
    #[serde(default = "default_max_total_reps")]
    pub max_total_reps: u32,
    /// Expected-RPE change per unit of relative intensity change
    #[serde(default = "default_rpe_per_intensity")]
    pub rpe_per_intensity: f64,
    /// Expected-RPE change per set added or removed
    #[serde(default = "default_rpe_per_set")]
    pub rpe_per_set: f64,
}

fn default_easy_rpe_below() -> f64 {
    7.0
}
fn default_near_max_rpe() -> f64 {
    9.0
}
fn default_weight_step_percent() -> f64 {
    2.5
}
fn default_min_weight_step_kg() -> f64 {
    0.1
}
fn default_rep_ceiling() -> u32 {
    12
}
fn default_base_rep_target() -> u32 {
    8
}
fn default_min_reps() -> u32 {
    3
}
fn default_min_sets() -> u32 {
    1
}
fn default_one() -> u32 {
    1
}
fn default_max_jump_percent() -> f64 {
    10.0
}
fn default_max_weekly_increase_percent() -> f64 {
    5.0
}
fn default_max_total_reps() -> u32 {
    25
}
fn default_rpe_per_intensity() -> f64 {
    20.0
}
fn default_rpe_per_set() -> f64 {
    0.5
}

impl Default for OverloadConfig {
    fn default() -> Self {
        Self {
            easy_rpe_below: default_easy_rpe_below(),
            near_max_rpe: default_near_max_rpe(),
            weight_step_percent: default_weight_step_percent(),
            min_weight_step_kg: default_min_weight_step_kg(),
            rep_ceiling: default_rep_ceiling(),
            base_rep_target: default_base_rep_target(),
            min_reps: default_min_reps(),
            min_sets: default_min_sets(),
            deload_rep_drop: default_one(),
            deload_set_drop: default_one(),
            max_jump_percent: default_max_jump_percent(),
            max_weekly_increase_percent: default_max_weekly_increase_percent(),
            max_total_reps: default_max_total_reps(),
            rpe_per_intensity: default_rpe_per_intensity(),
            rpe_per_set: default_rpe_per_set(),
        }
    }
}

impl OverloadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("overload.easy_rpe_below", self.easy_rpe_below),
            ("overload.near_max_rpe", self.near_max_rpe),
        ] {
            if !(MIN_RPE..=MAX_RPE).contains(&value) {
                return Err(ConfigError::invalid(
                    key,
                    format!("must be between {MIN_RPE} and {MAX_RPE}, got {value}"),
                ));
            }
        }
        if self.easy_rpe_below >= self.near_max_rpe {
            return Err(ConfigError::invalid(
                "overload.easy_rpe_below",
                "must be below overload.near_max_rpe",
            ));
        }
        if !(self.weight_step_percent > 0.0 && self.weight_step_percent <= 50.0) {
            return Err(ConfigError::invalid(
                "overload.weight_step_percent",
                format!("must be in (0, 50], got {}", self.weight_step_percent),
            ));
        }
        // Anything smaller vanishes in the 0.1 kg rounding of proposals.
        if !(self.min_weight_step_kg >= 0.1 && self.min_weight_step_kg <= 10.0) {
            return Err(ConfigError::invalid(
                "overload.min_weight_step_kg",
                format!("must be in [0.1, 10], got {}", self.min_weight_step_kg),
            ));
        }
        if self.base_rep_target == 0 || self.base_rep_target >= self.rep_ceiling {
            return Err(ConfigError::invalid(
                "overload.base_rep_target",
                "must be at least 1 and below overload.rep_ceiling",
            ));
        }
        if self.min_reps == 0 || self.min_sets == 0 {
            return Err(ConfigError::invalid(
                "overload.min_reps",
                "rep and set floors must be at least 1",
            ));
        }
        for (key, value) in [
            ("overload.max_jump_percent", self.max_jump_percent),
            ("overload.max_weekly_increase_percent", self.max_weekly_increase_percent),
            ("overload.rpe_per_intensity", self.rpe_per_intensity),
            ("overload.rpe_per_set", self.rpe_per_set),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(key, "must be non-negative"));
            }
        }
        Ok(())
    }

    /// `weight_kg` raised by the percentage step, but by at least
    /// `min_weight_step_kg`. Unrounded.
    pub(crate) fn stepped_weight(&self, weight_kg: f64) -> f64 {
        let step = (weight_kg * self.weight_step_percent / 100.0).max(self.min_weight_step_kg);
        weight_kg + step
    }
}
