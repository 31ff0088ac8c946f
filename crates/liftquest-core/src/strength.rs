//! One-rep-max estimation.
//!
//! The estimate uses the Epley formula, `weight * (1 + reps / 30)`, with reps
//! capped at [`MAX_RELIABLE_REPS`]. The formula is monotonic in both weight and
//! reps; the cap keeps high-rep endurance sets from producing unrealistic
//! maxima (the estimate saturates at `weight * 1.5`).

/// Reps above this add nothing to the estimate.
pub const MAX_RELIABLE_REPS: u32 = 15;

/// Below this percentage the RM table does not go.
const MIN_RM_PERCENTAGE: f64 = 50.0;

/// Percentage points lost per rep beyond the table.
const RM_SLOPE_PAST_TABLE: f64 = 0.5;

/// Reps -> percentage of 1RM, for 1 to 20 reps.
const RM_PERCENTAGE_TABLE: [f64; 20] = [
    100.0, 95.0, 90.0, 88.0, 86.0, 83.0, 80.0, 78.0, 76.0, 75.0, 72.0, 70.0, 68.0, 66.0, 65.0,
    63.0, 61.0, 60.0, 58.0, 57.0,
];

/// Estimated 1RM in kilograms, rounded to 0.1 kg.
///
/// A single rep is its own 1RM; zero weight or zero reps estimate zero.
pub fn estimate_one_rm(weight_kg: f64, reps: u32) -> f64 {
    if weight_kg <= 0.0 || reps == 0 {
        return 0.0;
    }
    if reps == 1 {
        return round_tenth(weight_kg);
    }
    let r = reps.min(MAX_RELIABLE_REPS) as f64;
    round_tenth(weight_kg * (1.0 + r / 30.0))
}

/// Share of 1RM that can be lifted for `reps` repetitions, in percent.
pub fn rm_percentage(reps: u32) -> f64 {
    match reps {
        0 => 100.0,
        1..=20 => RM_PERCENTAGE_TABLE[reps as usize - 1],
        _ => {
            let past = (reps - 20) as f64;
            (RM_PERCENTAGE_TABLE[19] - past * RM_SLOPE_PAST_TABLE).max(MIN_RM_PERCENTAGE)
        }
    }
}

/// 1RM implied by the RM percentage table.
pub fn one_rm_from_percentage(weight_kg: f64, reps: u32) -> f64 {
    if weight_kg <= 0.0 {
        return 0.0;
    }
    round_tenth(weight_kg / rm_percentage(reps) * 100.0)
}

/// 1RM as a percentage of bodyweight, rounded to 0.1.
pub fn bodyweight_percentage(one_rm: f64, bodyweight_kg: f64) -> f64 {
    if bodyweight_kg <= 0.0 {
        return 0.0;
    }
    round_tenth(one_rm / bodyweight_kg * 100.0)
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rep_is_the_weight() {
        assert_eq!(estimate_one_rm(140.0, 1), 140.0);
    }

    #[test]
    fn epley_ten_reps() {
        // 60 * (1 + 10/30) = 80
        assert_eq!(estimate_one_rm(60.0, 10), 80.0);
    }

    #[test]
    fn zero_weight_or_reps_is_zero() {
        assert_eq!(estimate_one_rm(0.0, 8), 0.0);
        assert_eq!(estimate_one_rm(50.0, 0), 0.0);
    }

    #[test]
    fn monotonic_in_reps_and_saturates() {
        let mut last = 0.0;
        for reps in 1..=40 {
            let e = estimate_one_rm(100.0, reps);
            assert!(e >= last, "reps {reps}");
            last = e;
        }
        assert_eq!(estimate_one_rm(100.0, 15), 150.0);
        assert_eq!(estimate_one_rm(100.0, 40), 150.0);
    }

    #[test]
    fn monotonic_in_weight() {
        assert!(estimate_one_rm(101.0, 5) > estimate_one_rm(100.0, 5));
    }

    #[test]
    fn rm_table_and_extrapolation() {
        assert_eq!(rm_percentage(1), 100.0);
        assert_eq!(rm_percentage(10), 75.0);
        assert_eq!(rm_percentage(20), 57.0);
        assert_eq!(rm_percentage(24), 55.0);
        assert_eq!(rm_percentage(100), 50.0);
    }

    #[test]
    fn percentage_based_one_rm() {
        // 10 reps = 75% of 1RM
        assert_eq!(one_rm_from_percentage(60.0, 10), 80.0);
    }

    #[test]
    fn bodyweight_ratio() {
        assert_eq!(bodyweight_percentage(100.0, 80.0), 125.0);
        assert_eq!(bodyweight_percentage(100.0, 0.0), 0.0);
    }
}
