//! Energy expenditure of a logged session.
//!
//! Three estimators, picked by what the session carries:
//! - heart rate: regression on average heart rate, bodyweight, age and sex
//! - personalized: ACSM METs scaled by effort, split into active, rest and
//!   post-exercise (EPOC) energy
//! - basic: total reps × load × a flat coefficient, when no profile is known

use serde::{Deserialize, Serialize};

use crate::catalog::Sex;
use crate::error::ConfigError;
use crate::strength::round_tenth;
use crate::workout::PerformerProfile;

/// Effort assumed when no RPE was logged.
pub const UNRATED_INTENSITY: f64 = 5.0;

/// MET used for exercises without a table entry.
pub const DEFAULT_MET: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieConfig {
    /// Rest between sets, in seconds
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
    /// Working time per set when no duration was logged, in minutes
    #[serde(default = "default_set_minutes")]
    pub set_minutes: f64,
    /// kcal per rep per kg for the basic estimate
    #[serde(default = "default_kcal_per_rep_kg")]
    pub kcal_per_rep_kg: f64,
}

fn default_rest_seconds() -> u32 {
    60
}
fn default_set_minutes() -> f64 {
    2.0
}
fn default_kcal_per_rep_kg() -> f64 {
    0.05
}

impl Default for CalorieConfig {
    fn default() -> Self {
        Self {
            rest_seconds: default_rest_seconds(),
            set_minutes: default_set_minutes(),
            kcal_per_rep_kg: default_kcal_per_rep_kg(),
        }
    }
}

impl CalorieConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.set_minutes.is_finite() || self.set_minutes <= 0.0 {
            return Err(ConfigError::invalid(
                "calories.set_minutes",
                format!("must be positive, got {}", self.set_minutes),
            ));
        }
        if !self.kcal_per_rep_kg.is_finite() || self.kcal_per_rep_kg < 0.0 {
            return Err(ConfigError::invalid("calories.kcal_per_rep_kg", "must be non-negative"));
        }
        if self.rest_seconds > 3600 {
            return Err(ConfigError::invalid(
                "calories.rest_seconds",
                format!("must be at most 3600, got {}", self.rest_seconds),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieMethod {
    Basic,
    Personalized,
    HeartRate,
}

/// Estimated energy cost, kcal rounded to 0.1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieEstimate {
    pub total_kcal: f64,
    pub active_kcal: f64,
    pub rest_kcal: f64,
    /// Excess post-exercise oxygen consumption
    pub epoc_kcal: f64,
    pub method: CalorieMethod,
    /// 0-1, how much the inputs support the estimate
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieInput<'a> {
    pub exercise_id: &'a str,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    pub rpe: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub average_heart_rate: Option<u32>,
    pub performer: Option<&'a PerformerProfile>,
}

/// ACSM MET value for an exercise code.
pub fn exercise_met(exercise_id: &str) -> f64 {
    match exercise_id.trim().to_lowercase().as_str() {
        "deadlift" => 6.0,
        "leg_press" => 5.5,
        "back_squat" | "squat" => 5.0,
        "hip_thrust" | "lunge" => 4.5,
        "barbell_row" | "row" => 4.0,
        "push_up" | "pushup_normal" => 3.8,
        "overhead_press" => 3.5,
        "bench_press" | "incline_dumbbell_press" => 3.0,
        "barbell_curl" | "bicep_curl" | "triceps_extension" => 2.5,
        "lateral_raise" => 2.0,
        "pull_up" => 8.0,
        _ => DEFAULT_MET,
    }
}

/// kcal per minute at `met` for a body of `bodyweight_kg`.
fn kcal_per_minute(met: f64, bodyweight_kg: f64) -> f64 {
    met * 3.5 * bodyweight_kg / 200.0
}

#[derive(Debug, Clone, Default)]
pub struct CalorieCalculator {
    config: CalorieConfig,
}

impl CalorieCalculator {
    pub fn new(config: &CalorieConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config: config.clone() })
    }

    /// Pick the best estimator the input supports.
    pub fn estimate(&self, input: &CalorieInput<'_>) -> CalorieEstimate {
        match (input.performer, input.average_heart_rate) {
            (Some(performer), Some(bpm)) => self.heart_rate(input, performer, bpm),
            (Some(performer), None) => self.personalized(input, performer),
            (None, _) => self.basic(input),
        }
    }

    pub fn basic(&self, input: &CalorieInput<'_>) -> CalorieEstimate {
        let total_reps = input.sets as f64 * input.reps as f64;
        let total = round_tenth(total_reps * input.weight_kg * self.config.kcal_per_rep_kg);
        CalorieEstimate {
            total_kcal: total,
            active_kcal: total,
            rest_kcal: 0.0,
            epoc_kcal: 0.0,
            method: CalorieMethod::Basic,
            confidence: 0.5,
        }
    }

    pub fn personalized(&self, input: &CalorieInput<'_>, performer: &PerformerProfile) -> CalorieEstimate {
        let bodyweight = performer.bodyweight_kg;
        let intensity = input.rpe.unwrap_or(UNRATED_INTENSITY);
        let met = exercise_met(input.exercise_id) * (1.0 + (intensity - 5.0) * 0.1);
        // Heavier loads relative to bodyweight cost more, up to +30%.
        let load_factor = 1.0 + (input.weight_kg / bodyweight * 0.1).min(0.3);

        let sets = input.sets as f64;
        let active_minutes = input.duration_minutes.unwrap_or(sets * self.config.set_minutes);
        let rest_minutes = self.config.rest_seconds as f64 * sets / 60.0;

        let active = kcal_per_minute(met, bodyweight) * active_minutes;
        let rest = kcal_per_minute(1.0, bodyweight) * rest_minutes;
        let epoc = active * intensity / 10.0 * 0.15;
        let total = (active + rest + epoc) * load_factor;

        CalorieEstimate {
            total_kcal: round_tenth(total),
            active_kcal: round_tenth(active),
            rest_kcal: round_tenth(rest),
            epoc_kcal: round_tenth(epoc),
            method: CalorieMethod::Personalized,
            confidence: if input.duration_minutes.is_some() { 0.9 } else { 0.7 },
        }
    }

    pub fn heart_rate(&self, input: &CalorieInput<'_>, performer: &PerformerProfile, bpm: u32) -> CalorieEstimate {
        let hr = bpm as f64;
        let weight = performer.bodyweight_kg;
        let age = performer.age as f64;
        let per_minute = match performer.sex {
            Sex::Male => (0.6309 * hr + 0.1988 * weight + 0.2017 * age - 55.0969) / 4.184,
            Sex::Female => (0.4472 * hr - 0.1263 * weight + 0.074 * age - 20.4022) / 4.184,
        };
        let minutes = input.duration_minutes.unwrap_or_else(|| {
            input.sets as f64 * self.config.set_minutes + self.config.rest_seconds as f64 * input.sets as f64 / 60.0
        });
        let total = round_tenth((per_minute * minutes).max(0.0));

        CalorieEstimate {
            total_kcal: total,
            active_kcal: total,
            rest_kcal: 0.0,
            epoc_kcal: 0.0,
            method: CalorieMethod::HeartRate,
            confidence: if input.duration_minutes.is_some() { 0.95 } else { 0.8 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn performer(sex: Sex) -> PerformerProfile {
        PerformerProfile {
            user_id: "u1".into(),
            age: 30,
            bodyweight_kg: 80.0,
            sex,
        }
    }

    fn bench(performer: Option<&PerformerProfile>) -> CalorieInput<'_> {
        CalorieInput {
            exercise_id: "bench_press",
            sets: 3,
            reps: 10,
            weight_kg: 80.0,
            rpe: Some(8.0),
            duration_minutes: None,
            average_heart_rate: None,
            performer,
        }
    }

    #[test]
    fn personalized_splits_active_rest_and_epoc() {
        let p = performer(Sex::Male);
        let est = CalorieCalculator::default().estimate(&bench(Some(&p)));
        // MET 3.0 × 1.3 at RPE 8, 6 working minutes, 3 resting, load factor 1.1
        assert_eq!(est.method, CalorieMethod::Personalized);
        assert_eq!(est.active_kcal, 32.8);
        assert_eq!(est.rest_kcal, 4.2);
        assert_eq!(est.epoc_kcal, 3.9);
        assert_eq!(est.total_kcal, 45.0);
        assert_eq!(est.confidence, 0.7);
    }

    #[test]
    fn logged_duration_replaces_the_set_estimate() {
        let p = performer(Sex::Male);
        let input = CalorieInput {
            duration_minutes: Some(20.0),
            ..bench(Some(&p))
        };
        let est = CalorieCalculator::default().estimate(&input);
        assert_eq!(est.active_kcal, 109.2);
        assert_eq!(est.total_kcal, 139.2);
        assert_eq!(est.confidence, 0.9);
    }

    #[test]
    fn harder_sessions_cost_more() {
        let p = performer(Sex::Female);
        let calc = CalorieCalculator::default();
        let easy = calc.estimate(&CalorieInput { rpe: Some(6.0), ..bench(Some(&p)) });
        let hard = calc.estimate(&CalorieInput { rpe: Some(10.0), ..bench(Some(&p)) });
        let unrated = calc.estimate(&CalorieInput { rpe: None, ..bench(Some(&p)) });
        assert!(hard.total_kcal > easy.total_kcal);
        assert!(unrated.total_kcal < easy.total_kcal);
    }

    #[test]
    fn heart_rate_uses_sex_specific_regression() {
        let calc = CalorieCalculator::default();
        let male = performer(Sex::Male);
        let female = performer(Sex::Female);
        let m = calc.estimate(&CalorieInput {
            average_heart_rate: Some(140),
            duration_minutes: Some(30.0),
            ..bench(Some(&male))
        });
        let f = calc.estimate(&CalorieInput {
            average_heart_rate: Some(140),
            duration_minutes: Some(30.0),
            ..bench(Some(&female))
        });
        assert_eq!(m.method, CalorieMethod::HeartRate);
        assert_eq!(m.total_kcal, 395.7);
        assert_eq!(f.total_kcal, 246.1);
        assert_eq!(m.confidence, 0.95);
    }

    #[test]
    fn very_low_heart_rate_never_goes_negative() {
        let p = performer(Sex::Male);
        let input = CalorieInput {
            average_heart_rate: Some(40),
            ..bench(Some(&p))
        };
        assert_eq!(CalorieCalculator::default().estimate(&input).total_kcal, 0.0);
    }

    #[test]
    fn without_profile_falls_back_to_basic() {
        let est = CalorieCalculator::default().estimate(&CalorieInput {
            weight_kg: 50.0,
            average_heart_rate: Some(150),
            ..bench(None)
        });
        // 3 × 10 × 50 × 0.05
        assert_eq!(est.method, CalorieMethod::Basic);
        assert_eq!(est.total_kcal, 75.0);
        assert_eq!(est.confidence, 0.5);
    }

    #[test]
    fn unknown_exercise_uses_default_met() {
        assert_eq!(exercise_met("zercher_carry"), DEFAULT_MET);
        assert_eq!(exercise_met("Deadlift"), 6.0);
    }

    #[test]
    fn zero_set_minutes_is_rejected() {
        let config = CalorieConfig {
            set_minutes: 0.0,
            ..Default::default()
        };
        assert!(CalorieCalculator::new(&config).is_err());
    }
}
