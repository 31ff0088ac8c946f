//! Grade classification.
//!
//! Turns a strength metric into one of seven ordered grades, with the bar
//! lowered for older performers via fixed age brackets.

mod age;
mod engine;
mod grade;
mod thresholds;

pub use age::{AgeBracket, MAX_AGE, MIN_AGE};
pub use engine::{Classification, GradeThresholdEngine};
pub use grade::{Grade, GradeMeaning};
pub use thresholds::{standard_thresholds, GradeThresholds};
