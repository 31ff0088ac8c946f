//! Next-session recommendation from recent training history.
//!
//! The decision is made from the most recent record alone. Older records in the
//! window only feed warnings (weekly rate, plateau, jump size), so a one-record
//! window and a longer one always agree on the prescription.

use serde::{Deserialize, Serialize};

use super::config::OverloadConfig;
use crate::error::ConfigError;
use crate::strength::{round_tenth, MAX_RELIABLE_REPS};
use crate::workout::{WorkoutRecord, MAX_RPE, MIN_RPE};

/// Machine-readable progression tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionType {
    Linear,
    Double,
    Deload,
    Hold,
}

impl ProgressionType {
    pub fn tag(self) -> &'static str {
        match self {
            ProgressionType::Linear => "linear",
            ProgressionType::Double => "double",
            ProgressionType::Deload => "deload",
            ProgressionType::Hold => "hold",
        }
    }

    /// Static citation shown in the UI.
    pub fn research_basis(self) -> &'static str {
        match self {
            ProgressionType::Linear => "2.5% Rule (NSCA Essentials of Strength Training and Conditioning)",
            ProgressionType::Double => "Double Progression (NSCA Essentials of Strength Training and Conditioning)",
            ProgressionType::Deload => "RPE-based Autoregulation (RPE Scale Research)",
            ProgressionType::Hold => "RPE-based Progression (RPE Scale Research)",
        }
    }

    fn is_backoff(self) -> bool {
        matches!(self, ProgressionType::Deload | ProgressionType::Hold)
    }
}

/// The session a recommendation was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWorkout {
    pub exercise_id: String,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    pub rpe: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub current: CurrentWorkout,
    pub next_weight_kg: f64,
    pub next_reps: u32,
    pub next_sets: u32,
    pub expected_rpe: f64,
    pub progression_type: ProgressionType,
    pub reason: String,
    pub research_basis: String,
    pub warnings: Vec<String>,
}

/// Prescription derived from a single record.
#[derive(Debug, Clone, PartialEq)]
struct Decision {
    weight_kg: f64,
    reps: u32,
    sets: u32,
    progression: ProgressionType,
    reason: &'static str,
}

/// Stateless recommender configured with RPE cut points and step sizes.
#[derive(Debug, Clone, Default)]
pub struct OverloadRecommendationEngine {
    config: OverloadConfig,
}

impl OverloadRecommendationEngine {
    pub fn new(config: &OverloadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &OverloadConfig {
        &self.config
    }

    /// Recommend the next session. `history` is one exercise's records, most
    /// recent first. `None` means there is not enough history.
    pub fn recommend_next(&self, history: &[WorkoutRecord]) -> Option<Recommendation> {
        let latest = history.first()?;
        let decision = self.decide(latest);
        let warnings = self.warnings(history, &decision);
        let expected_rpe = self.expected_rpe(latest, &decision);

        if !warnings.is_empty() {
            tracing::warn!(exercise = %latest.exercise_id, ?warnings, "recommendation carries warnings");
        }

        Some(Recommendation {
            current: CurrentWorkout {
                exercise_id: latest.exercise_id.clone(),
                sets: latest.sets,
                reps: latest.reps,
                weight_kg: latest.weight_kg,
                rpe: latest.rpe,
            },
            next_weight_kg: decision.weight_kg,
            next_reps: decision.reps,
            next_sets: decision.sets,
            expected_rpe,
            progression_type: decision.progression,
            reason: decision.reason.to_string(),
            research_basis: decision.progression.research_basis().to_string(),
            warnings,
        })
    }

    fn decide(&self, record: &WorkoutRecord) -> Decision {
        let c = &self.config;
        match record.rpe {
            Some(rpe) if rpe < c.easy_rpe_below => self.step_weight(
                record,
                record.reps,
                ProgressionType::Linear,
                "Low fatigue at this load; add weight and keep reps and sets.",
            ),
            Some(rpe) if rpe >= c.near_max_rpe => {
                let reps = record.reps.saturating_sub(c.deload_rep_drop).max(c.min_reps).min(record.reps);
                let sets = record.sets.saturating_sub(c.deload_set_drop).max(c.min_sets).min(record.sets);
                if reps == record.reps && sets == record.sets {
                    self.hold(record, "Near-maximal effort at minimum volume; hold everything to manage fatigue.")
                } else {
                    Decision {
                        weight_kg: record.weight_kg,
                        reps,
                        sets,
                        progression: ProgressionType::Deload,
                        reason: "Near-maximal effort; keep the weight and trim volume to avoid injury.",
                    }
                }
            }
            Some(_) => {
                if record.reps < c.rep_ceiling {
                    self.add_rep(record, "Moderate effort; add one rep at the same weight.")
                } else {
                    self.step_weight(
                        record,
                        c.base_rep_target,
                        ProgressionType::Double,
                        "Rep ceiling reached; convert the extra reps into weight and restart at the base rep target.",
                    )
                }
            }
            None if record.met_prescription() => self.step_weight(
                record,
                record.reps,
                ProgressionType::Linear,
                "All prescribed reps completed; add weight.",
            ),
            None => self.hold(record, "Prescribed reps were missed; repeat the same session."),
        }
    }

    /// Weight step, or a rep step for unloaded movements.
    fn step_weight(
        &self,
        record: &WorkoutRecord,
        reps: u32,
        progression: ProgressionType,
        reason: &'static str,
    ) -> Decision {
        if record.weight_kg <= 0.0 {
            return self.add_rep(record, "Unloaded movement; progress by adding one rep.");
        }
        Decision {
            weight_kg: round_tenth(self.config.stepped_weight(record.weight_kg)),
            reps,
            sets: record.sets,
            progression,
            reason,
        }
    }

    fn add_rep(&self, record: &WorkoutRecord, reason: &'static str) -> Decision {
        Decision {
            weight_kg: record.weight_kg,
            reps: record.reps.saturating_add(1),
            sets: record.sets,
            progression: ProgressionType::Double,
            reason,
        }
    }

    fn hold(&self, record: &WorkoutRecord, reason: &'static str) -> Decision {
        Decision {
            weight_kg: record.weight_kg,
            reps: record.reps,
            sets: record.sets,
            progression: ProgressionType::Hold,
            reason,
        }
    }

    /// Base RPE (logged or estimated) shifted by the size of the proposed
    /// change, clamped to the scale and rounded to half points.
    fn expected_rpe(&self, record: &WorkoutRecord, decision: &Decision) -> f64 {
        let base = record.rpe.unwrap_or_else(|| estimate_rpe(record.reps));
        let before = intensity(record.weight_kg, record.reps);
        let after = intensity(decision.weight_kg, decision.reps);
        let intensity_change = if before > 0.0 { after / before - 1.0 } else { 0.0 };
        let set_change = decision.sets as f64 - record.sets as f64;

        let expected = base
            + intensity_change * self.config.rpe_per_intensity
            + set_change * self.config.rpe_per_set;
        ((expected.clamp(MIN_RPE, MAX_RPE)) * 2.0).round() / 2.0
    }

    fn warnings(&self, history: &[WorkoutRecord], decision: &Decision) -> Vec<String> {
        let c = &self.config;
        let mut warnings = Vec::new();
        let latest = &history[0];

        if latest.rpe.is_some_and(|rpe| rpe >= c.near_max_rpe) {
            warnings.push("Effort is near maximal; injury risk is elevated.".to_string());
        }

        let max_weight = history.iter().map(|r| r.weight_kg).fold(0.0, f64::max);
        if max_weight > 0.0 && decision.weight_kg > max_weight * (1.0 + c.max_jump_percent / 100.0) {
            warnings.push(format!(
                "Proposed weight is more than {}% above the recent maximum of {max_weight} kg; progress gradually.",
                c.max_jump_percent
            ));
        }

        if let Some(rate) = weekly_increase_percent(history) {
            if rate > c.max_weekly_increase_percent {
                warnings.push(format!(
                    "Weight has been rising {rate:.1}% per week, above the {}% guideline.",
                    c.max_weekly_increase_percent
                ));
            }
        }

        if latest.sets.saturating_mul(latest.reps) > c.max_total_reps {
            warnings.push(format!(
                "Sets × reps exceeds {}; watch for overtraining.",
                c.max_total_reps
            ));
        }

        if let Some(previous) = history.get(1) {
            let previous_decision = self.decide(previous);
            if decision.progression.is_backoff()
                && previous_decision.progression.is_backoff()
                && latest.weight_kg <= previous.weight_kg
            {
                warnings.push(
                    "Back-to-back deload or hold sessions without a weight gain; progress may have plateaued."
                        .to_string(),
                );
            }
        }

        warnings
    }
}

/// Epley-equivalent intensity of a set, unrounded. Unloaded sets compare by reps.
fn intensity(weight_kg: f64, reps: u32) -> f64 {
    let factor = 1.0 + reps.min(MAX_RELIABLE_REPS) as f64 / 30.0;
    if weight_kg > 0.0 {
        weight_kg * factor
    } else {
        factor
    }
}

/// RPE guess from reps when none was logged.
fn estimate_rpe(reps: u32) -> f64 {
    match reps {
        12.. => 6.0,
        8..=11 => 7.0,
        5..=7 => 8.0,
        _ => 9.0,
    }
}

/// Percent weight change per week between the oldest and newest record.
fn weekly_increase_percent(history: &[WorkoutRecord]) -> Option<f64> {
    let newest = history.first()?;
    let oldest = history.last()?;
    if history.len() < 2 || oldest.weight_kg <= 0.0 {
        return None;
    }
    let days = (newest.workout_date - oldest.workout_date).num_days().max(0) as f64;
    let weeks = (days / 7.0).max(1.0);
    Some((newest.weight_kg - oldest.weight_kg) / oldest.weight_kg * 100.0 / weeks)
}
