//! Experience-to-level curve.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Leveling curve configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelingConfig {
    /// Experience required to clear level 1
    #[serde(default = "default_base_exp")]
    pub base_exp: f64,
    /// Per-level growth of the requirement; must exceed 1
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
}

fn default_base_exp() -> f64 {
    1000.0
}
fn default_growth_factor() -> f64 {
    1.15
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            base_exp: default_base_exp(),
            growth_factor: default_growth_factor(),
        }
    }
}

impl LevelingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_exp.is_finite() || self.base_exp < 1.0 {
            return Err(ConfigError::invalid(
                "leveling.base_exp",
                format!("must be at least 1, got {}", self.base_exp),
            ));
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(ConfigError::invalid(
                "leveling.growth_factor",
                format!("must be greater than 1, got {}", self.growth_factor),
            ));
        }
        Ok(())
    }
}

/// Validated exponential curve: `round(base_exp * growth_factor^(level-1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCurve {
    base_exp: f64,
    growth_factor: f64,
}

impl LevelCurve {
    pub fn new(config: &LevelingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            base_exp: config.base_exp,
            growth_factor: config.growth_factor,
        })
    }

    pub fn base_exp(&self) -> f64 {
        self.base_exp
    }

    /// Experience needed to advance from `level` to `level + 1`.
    ///
    /// Levels start at 1; 0 is read as 1.
    pub fn required_experience(&self, level: u32) -> f64 {
        let exponent = level.max(1) - 1;
        (self.base_exp * self.growth_factor.powi(exponent as i32)).round()
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base_exp: default_base_exp(),
            growth_factor: default_growth_factor(),
        }
    }
}
