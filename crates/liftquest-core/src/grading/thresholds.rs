//! Grade threshold tables.
//!
//! A table maps every grade to the minimum metric value (1RM as a percentage of
//! bodyweight) needed to reach it. Tables are validated on construction, so an
//! engine holding a [`GradeThresholds`] never sees a partial or unordered map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grade::Grade;
use crate::catalog::{BodyPart, Sex};
use crate::error::ConfigError;

/// Validated grade -> threshold map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Grade, f64>", into = "BTreeMap<Grade, f64>")]
pub struct GradeThresholds {
    values: BTreeMap<Grade, f64>,
}

impl GradeThresholds {
    /// Build from a map, rejecting empty, partial, negative, non-finite or
    /// out-of-order tables.
    pub fn new(values: BTreeMap<Grade, f64>) -> Result<Self, ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::invalid("thresholds", "threshold map is empty"));
        }
        for grade in Grade::ALL {
            let value = values.get(&grade).ok_or_else(|| {
                ConfigError::invalid("thresholds", format!("missing threshold for {grade}"))
            })?;
            if !value.is_finite() || *value < 0.0 {
                return Err(ConfigError::invalid(
                    format!("thresholds.{grade}"),
                    format!("must be a non-negative number, got {value}"),
                ));
            }
        }
        // BTreeMap iterates in grade order.
        let ordered: Vec<(&Grade, &f64)> = values.iter().collect();
        for pair in ordered.windows(2) {
            if pair[1].1 < pair[0].1 {
                return Err(ConfigError::invalid(
                    format!("thresholds.{}", pair[1].0),
                    format!(
                        "{} ({}) is below {} ({})",
                        pair[1].0, pair[1].1, pair[0].0, pair[0].1
                    ),
                ));
            }
        }
        Ok(Self { values })
    }

    /// Build from values listed lowest grade first.
    pub fn from_values(values: [f64; 7]) -> Result<Self, ConfigError> {
        Self::new(Grade::ALL.into_iter().zip(values).collect())
    }

    pub fn get(&self, grade: Grade) -> f64 {
        self.values.get(&grade).copied().unwrap_or(f64::INFINITY)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Grade, f64)> + '_ {
        self.values.iter().map(|(g, v)| (*g, *v))
    }

    /// Multiply every threshold by `factor`. Ordering is preserved for any
    /// positive factor.
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            values: self.values.iter().map(|(g, v)| (*g, v * factor)).collect(),
        }
    }

    pub fn as_map(&self) -> &BTreeMap<Grade, f64> {
        &self.values
    }
}

impl TryFrom<BTreeMap<Grade, f64>> for GradeThresholds {
    type Error = ConfigError;

    fn try_from(values: BTreeMap<Grade, f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<GradeThresholds> for BTreeMap<Grade, f64> {
    fn from(thresholds: GradeThresholds) -> Self {
        thresholds.values
    }
}

/// Standard bodyweight-percentage table for a body part and sex.
pub fn standard_thresholds(body_part: BodyPart, sex: Sex) -> GradeThresholds {
    let values = match (body_part, sex) {
        (BodyPart::Shoulder, Sex::Male) => [30.0, 45.0, 60.0, 75.0, 90.0, 105.0, 120.0],
        (BodyPart::Shoulder, Sex::Female) => [15.0, 25.0, 35.0, 50.0, 65.0, 80.0, 100.0],
        (BodyPart::Chest, Sex::Male) => [50.0, 75.0, 100.0, 125.0, 150.0, 175.0, 200.0],
        (BodyPart::Chest, Sex::Female) => [20.0, 35.0, 50.0, 65.0, 80.0, 95.0, 115.0],
        (BodyPart::Back, Sex::Male) => [60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 250.0],
        (BodyPart::Back, Sex::Female) => [30.0, 45.0, 65.0, 85.0, 105.0, 125.0, 150.0],
        (BodyPart::Arm, Sex::Male) => [25.0, 40.0, 55.0, 70.0, 85.0, 100.0, 120.0],
        (BodyPart::Arm, Sex::Female) => [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 75.0],
        (BodyPart::Abdominal, Sex::Male) => [30.0, 50.0, 70.0, 90.0, 110.0, 130.0, 150.0],
        (BodyPart::Abdominal, Sex::Female) => [15.0, 30.0, 45.0, 60.0, 75.0, 90.0, 110.0],
        (BodyPart::Hip, Sex::Male) => [80.0, 120.0, 160.0, 200.0, 240.0, 280.0, 330.0],
        (BodyPart::Hip, Sex::Female) => [50.0, 75.0, 100.0, 130.0, 160.0, 190.0, 230.0],
        (BodyPart::Leg, Sex::Male) => [100.0, 150.0, 200.0, 250.0, 300.0, 350.0, 400.0],
        (BodyPart::Leg, Sex::Female) => [60.0, 90.0, 120.0, 155.0, 190.0, 225.0, 270.0],
    };
    // Static tables are ordered and complete.
    GradeThresholds {
        values: Grade::ALL.into_iter().zip(values).collect(),
    }
}
