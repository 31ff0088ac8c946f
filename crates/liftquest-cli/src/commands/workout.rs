use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use liftquest_core::{find_exercise, BodyPart, SqliteStore, WorkoutSubmission};

use super::{open_orchestrator, print_json};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Log a workout and apply its experience
    Log {
        user_id: String,
        /// Exercise code, e.g. bench_press
        exercise: String,
        #[arg(long)]
        sets: u32,
        /// Reps per set
        #[arg(long)]
        reps: u32,
        /// Weight in kilograms
        #[arg(long, default_value_t = 0.0)]
        weight: f64,
        /// Rate of perceived exertion, 6-10
        #[arg(long)]
        rpe: Option<f64>,
        /// Target reps per set, when following a program
        #[arg(long)]
        prescribed_reps: Option<u32>,
        /// Required for exercises outside the built-in catalog
        #[arg(long)]
        body_part: Option<BodyPart>,
        /// Required for exercises outside the built-in catalog (1-10)
        #[arg(long)]
        difficulty: Option<u8>,
        /// RFC 3339 timestamp or YYYY-MM-DD (default: now)
        #[arg(long)]
        date: Option<String>,
        /// Session length in minutes
        #[arg(long)]
        duration: Option<f64>,
        /// Average heart rate in bpm
        #[arg(long)]
        heart_rate: Option<u32>,
    },
    /// List logged workouts, most recent first
    History {
        user_id: String,
        #[arg(long)]
        exercise: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Mark a workout as verified
    Verify {
        workout_id: String,
        /// Clear the flag instead
        #[arg(long)]
        unset: bool,
    },
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WorkoutAction::Log {
            user_id,
            exercise,
            sets,
            reps,
            weight,
            rpe,
            prescribed_reps,
            body_part,
            difficulty,
            date,
            duration,
            heart_rate,
        } => {
            let catalogued = find_exercise(&exercise);
            let body_part = body_part
                .or(catalogued.as_ref().map(|e| e.body_part))
                .ok_or_else(|| format!("unknown exercise '{exercise}'; pass --body-part and --difficulty"))?;
            let difficulty = difficulty
                .or(catalogued.as_ref().map(|e| e.difficulty))
                .ok_or_else(|| format!("unknown exercise '{exercise}'; pass --difficulty"))?;
            let workout_date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Utc::now(),
            };

            let submission = WorkoutSubmission {
                exercise_id: catalogued.map(|e| e.code).unwrap_or(exercise),
                body_part,
                difficulty,
                sets,
                reps,
                weight_kg: weight,
                rpe,
                prescribed_reps,
                workout_date,
                duration_minutes: duration,
                average_heart_rate: heart_rate,
            };
            let mut orchestrator = open_orchestrator()?;
            let outcome = orchestrator.record_workout(&user_id, &submission)?;
            print_json(&outcome)?;
        }
        WorkoutAction::History {
            user_id,
            exercise,
            limit,
        } => {
            let store = SqliteStore::open()?;
            print_json(&store.list_workouts(&user_id, exercise.as_deref(), limit)?)?;
        }
        WorkoutAction::Verify { workout_id, unset } => {
            let store = SqliteStore::open()?;
            store.set_verified(&workout_id, !unset)?;
            println!("ok");
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw}'; expected RFC 3339 or YYYY-MM-DD"))?;
    let noon = day
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| format!("invalid date '{raw}'"))?;
    Ok(noon.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse_date("2026-03-01").unwrap().to_rfc3339(), "2026-03-01T12:00:00+00:00");
        assert_eq!(
            parse_date("2026-03-01T08:30:00+09:00").unwrap().to_rfc3339(),
            "2026-02-28T23:30:00+00:00"
        );
        assert!(parse_date("yesterday").is_err());
    }
}
