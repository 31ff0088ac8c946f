//! Age brackets used to discount grade thresholds for older performers.

use serde::{Deserialize, Serialize};

use crate::error::{check_range, ValidationError};

pub const MIN_AGE: u32 = 0;
pub const MAX_AGE: u32 = 120;

/// Fixed, non-overlapping age bracket. The last one is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "18-25")]
    Age18To25,
    #[serde(rename = "26-35")]
    Age26To35,
    #[serde(rename = "36-45")]
    Age36To45,
    #[serde(rename = "46-55")]
    Age46To55,
    #[serde(rename = "56-65")]
    Age56To65,
    #[serde(rename = "65+")]
    Age65Plus,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 6] = [
        AgeBracket::Age18To25,
        AgeBracket::Age26To35,
        AgeBracket::Age36To45,
        AgeBracket::Age46To55,
        AgeBracket::Age56To65,
        AgeBracket::Age65Plus,
    ];

    /// Bracket for an age in years. Ages under 18 share the youngest bracket.
    pub fn for_age(age: u32) -> Result<Self, ValidationError> {
        check_range("age", age as f64, MIN_AGE as f64, MAX_AGE as f64)?;
        Ok(match age {
            0..=25 => AgeBracket::Age18To25,
            26..=35 => AgeBracket::Age26To35,
            36..=45 => AgeBracket::Age36To45,
            46..=55 => AgeBracket::Age46To55,
            56..=65 => AgeBracket::Age56To65,
            _ => AgeBracket::Age65Plus,
        })
    }

    /// Threshold multiplier in (0, 1], non-increasing with age.
    pub fn multiplier(self) -> f64 {
        match self {
            AgeBracket::Age18To25 => 1.0,
            AgeBracket::Age26To35 => 0.95,
            AgeBracket::Age36To45 => 0.90,
            AgeBracket::Age46To55 => 0.85,
            AgeBracket::Age56To65 => 0.80,
            AgeBracket::Age65Plus => 0.75,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Age18To25 => "18-25",
            AgeBracket::Age26To35 => "26-35",
            AgeBracket::Age36To45 => "36-45",
            AgeBracket::Age46To55 => "46-55",
            AgeBracket::Age56To65 => "56-65",
            AgeBracket::Age65Plus => "65+",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries_are_closed() {
        assert_eq!(AgeBracket::for_age(18).unwrap(), AgeBracket::Age18To25);
        assert_eq!(AgeBracket::for_age(25).unwrap(), AgeBracket::Age18To25);
        assert_eq!(AgeBracket::for_age(26).unwrap(), AgeBracket::Age26To35);
        assert_eq!(AgeBracket::for_age(45).unwrap(), AgeBracket::Age36To45);
        assert_eq!(AgeBracket::for_age(55).unwrap(), AgeBracket::Age46To55);
        assert_eq!(AgeBracket::for_age(65).unwrap(), AgeBracket::Age56To65);
        assert_eq!(AgeBracket::for_age(66).unwrap(), AgeBracket::Age65Plus);
        assert_eq!(AgeBracket::for_age(120).unwrap(), AgeBracket::Age65Plus);
    }

    #[test]
    fn minors_use_youngest_bracket() {
        assert_eq!(AgeBracket::for_age(15).unwrap().multiplier(), 1.0);
    }

    #[test]
    fn rejects_age_above_limit() {
        assert!(AgeBracket::for_age(121).is_err());
    }

    #[test]
    fn multipliers_never_increase_with_age() {
        for pair in AgeBracket::ALL.windows(2) {
            assert!(pair[0].multiplier() > pair[1].multiplier());
            assert!(pair[1].multiplier() > 0.0);
        }
    }
}
