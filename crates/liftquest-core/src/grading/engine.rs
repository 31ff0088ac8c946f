//! Age-adjusted grade classification.

use serde::{Deserialize, Serialize};

use super::age::AgeBracket;
use super::grade::Grade;
use super::thresholds::GradeThresholds;
use crate::error::{Result, ValidationError};

/// Outcome of classifying a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub grade: Grade,
    /// The grade's fixed percentile anchor.
    pub percentile: u8,
    pub age_bracket: AgeBracket,
    /// Adjusted threshold of the achieved grade.
    pub threshold: f64,
}

/// Maps a strength metric to a grade, discounting the bar for older performers.
///
/// Stateless; the caller supplies the threshold table on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeThresholdEngine;

impl GradeThresholdEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scale every threshold by the multiplier of `age`'s bracket.
    pub fn age_adjusted_thresholds(
        &self,
        thresholds: &GradeThresholds,
        age: u32,
    ) -> Result<GradeThresholds> {
        let bracket = AgeBracket::for_age(age)?;
        Ok(thresholds.scaled(bracket.multiplier()))
    }

    /// Highest grade whose adjusted threshold is at or below `metric`;
    /// BRONZE when none qualifies.
    pub fn classify(
        &self,
        metric: f64,
        age: u32,
        thresholds: &GradeThresholds,
    ) -> Result<Classification> {
        if !metric.is_finite() || metric < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "metric".into(),
                message: format!("must be a non-negative number, got {metric}"),
            }
            .into());
        }
        let age_bracket = AgeBracket::for_age(age)?;
        let adjusted = thresholds.scaled(age_bracket.multiplier());

        let (grade, threshold) = adjusted
            .iter()
            .rev()
            .find(|(_, threshold)| *threshold <= metric)
            .unwrap_or((Grade::Bronze, adjusted.get(Grade::Bronze)));

        tracing::debug!(metric, age, %grade, threshold, "classified metric");
        Ok(Classification {
            grade,
            percentile: grade.percentile(),
            age_bracket,
            threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> GradeThresholds {
        GradeThresholds::from_values([0.0, 50.0, 75.0, 100.0, 125.0, 150.0, 200.0]).unwrap()
    }

    #[test]
    fn zero_metric_is_bronze() {
        let c = GradeThresholdEngine::new().classify(0.0, 20, &table()).unwrap();
        assert_eq!(c.grade, Grade::Bronze);
        assert_eq!(c.percentile, 0);
    }

    #[test]
    fn above_challenger_is_challenger() {
        let c = GradeThresholdEngine::new().classify(250.0, 20, &table()).unwrap();
        assert_eq!(c.grade, Grade::Challenger);
        assert_eq!(c.percentile, 99);
    }

    #[test]
    fn threshold_is_inclusive() {
        let c = GradeThresholdEngine::new().classify(75.0, 22, &table()).unwrap();
        assert_eq!(c.grade, Grade::Gold);
    }

    #[test]
    fn below_bronze_threshold_floors_at_bronze() {
        let t = GradeThresholds::from_values([30.0, 50.0, 75.0, 100.0, 125.0, 150.0, 200.0]).unwrap();
        let c = GradeThresholdEngine::new().classify(10.0, 20, &t).unwrap();
        assert_eq!(c.grade, Grade::Bronze);
    }

    #[test]
    fn older_performer_reaches_higher_grade_with_same_metric() {
        let engine = GradeThresholdEngine::new();
        // 72 misses GOLD (75) at 20, but the 36-45 bar is 67.5.
        assert_eq!(engine.classify(72.0, 20, &table()).unwrap().grade, Grade::Silver);
        let older = engine.classify(72.0, 40, &table()).unwrap();
        assert_eq!(older.grade, Grade::Gold);
        assert_eq!(older.age_bracket, AgeBracket::Age36To45);
        assert!((older.threshold - 67.5).abs() < 1e-9);
    }

    #[test]
    fn age_seventy_scales_by_three_quarters() {
        let raw = table();
        let adjusted = GradeThresholdEngine::new().age_adjusted_thresholds(&raw, 70).unwrap();
        for (grade, value) in raw.iter() {
            assert!((adjusted.get(grade) - value * 0.75).abs() < 1e-9);
        }
    }

    #[test]
    fn adjustment_preserves_ordering() {
        let engine = GradeThresholdEngine::new();
        for age in [18, 30, 40, 50, 60, 90] {
            let adjusted = engine.age_adjusted_thresholds(&table(), age).unwrap();
            let values: Vec<f64> = adjusted.iter().map(|(_, v)| v).collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let engine = GradeThresholdEngine::new();
        assert!(engine.classify(-1.0, 20, &table()).is_err());
        assert!(engine.classify(f64::INFINITY, 20, &table()).is_err());
        assert!(engine.classify(10.0, 130, &table()).is_err());
    }
}
