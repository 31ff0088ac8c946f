//! Body parts, performer sex, and the built-in exercise catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Trainable body part. Each one carries its own level track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Shoulder,
    Chest,
    Back,
    Arm,
    Abdominal,
    Hip,
    Leg,
}

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Shoulder,
        BodyPart::Chest,
        BodyPart::Back,
        BodyPart::Arm,
        BodyPart::Abdominal,
        BodyPart::Hip,
        BodyPart::Leg,
    ];

    pub fn code(self) -> &'static str {
        match self {
            BodyPart::Shoulder => "shoulder",
            BodyPart::Chest => "chest",
            BodyPart::Back => "back",
            BodyPart::Arm => "arm",
            BodyPart::Abdominal => "abdominal",
            BodyPart::Hip => "hip",
            BodyPart::Leg => "leg",
        }
    }

    pub fn name_ko(self) -> &'static str {
        match self {
            BodyPart::Shoulder => "어깨",
            BodyPart::Chest => "가슴",
            BodyPart::Back => "등",
            BodyPart::Arm => "팔",
            BodyPart::Abdominal => "복근",
            BodyPart::Hip => "엉덩이",
            BodyPart::Leg => "다리",
        }
    }

    pub fn display_order(self) -> u8 {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0) as u8 + 1
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BodyPart {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        BodyPart::ALL
            .iter()
            .copied()
            .find(|p| p.code() == lower)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "body_part".into(),
                message: format!("unknown body part '{s}'"),
            })
    }
}

/// Performer sex; selects the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(ValidationError::InvalidValue {
                field: "sex".into(),
                message: format!("expected 'male' or 'female', got '{s}'"),
            }),
        }
    }
}

/// A catalogued exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub code: String,
    pub name: String,
    pub body_part: BodyPart,
    /// Difficulty on a 1-10 scale; scales base experience.
    pub difficulty: u8,
}

impl Exercise {
    pub fn new(code: &str, name: &str, body_part: BodyPart, difficulty: u8) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            body_part,
            difficulty,
        }
    }
}

/// Built-in exercises, one or more per body part.
pub fn builtin_exercises() -> Vec<Exercise> {
    vec![
        Exercise::new("overhead_press", "Overhead Press", BodyPart::Shoulder, 6),
        Exercise::new("lateral_raise", "Lateral Raise", BodyPart::Shoulder, 3),
        Exercise::new("bench_press", "Bench Press", BodyPart::Chest, 6),
        Exercise::new("incline_dumbbell_press", "Incline Dumbbell Press", BodyPart::Chest, 5),
        Exercise::new("deadlift", "Deadlift", BodyPart::Back, 8),
        Exercise::new("barbell_row", "Barbell Row", BodyPart::Back, 6),
        Exercise::new("barbell_curl", "Barbell Curl", BodyPart::Arm, 3),
        Exercise::new("triceps_extension", "Triceps Extension", BodyPart::Arm, 3),
        Exercise::new("cable_crunch", "Cable Crunch", BodyPart::Abdominal, 2),
        Exercise::new("hip_thrust", "Hip Thrust", BodyPart::Hip, 5),
        Exercise::new("back_squat", "Back Squat", BodyPart::Leg, 8),
        Exercise::new("leg_press", "Leg Press", BodyPart::Leg, 4),
    ]
}

/// Look up a built-in exercise by code.
pub fn find_exercise(code: &str) -> Option<Exercise> {
    let code = code.trim().to_lowercase();
    builtin_exercises().into_iter().find(|e| e.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_part_parses_case_insensitively() {
        assert_eq!("Chest".parse::<BodyPart>().unwrap(), BodyPart::Chest);
        assert_eq!(" leg ".parse::<BodyPart>().unwrap(), BodyPart::Leg);
        assert!("neck".parse::<BodyPart>().is_err());
    }

    #[test]
    fn display_order_follows_declaration() {
        assert_eq!(BodyPart::Shoulder.display_order(), 1);
        assert_eq!(BodyPart::Leg.display_order(), 7);
    }

    #[test]
    fn every_body_part_has_an_exercise() {
        let exercises = builtin_exercises();
        for part in BodyPart::ALL {
            assert!(exercises.iter().any(|e| e.body_part == part), "{part}");
        }
    }

    #[test]
    fn difficulties_stay_on_scale() {
        for e in builtin_exercises() {
            assert!((1..=10).contains(&e.difficulty), "{}", e.code);
        }
    }

    #[test]
    fn find_exercise_by_code() {
        let bench = find_exercise("BENCH_PRESS").unwrap();
        assert_eq!(bench.body_part, BodyPart::Chest);
        assert!(find_exercise("unknown").is_none());
    }

    #[test]
    fn sex_parses_short_forms() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert!("x".parse::<Sex>().is_err());
    }
}
