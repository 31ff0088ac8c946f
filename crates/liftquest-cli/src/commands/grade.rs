use clap::Args;
use liftquest_core::strength::{bodyweight_percentage, estimate_one_rm};
use liftquest_core::{standard_thresholds, BodyPart, GradeThresholdEngine, Sex};
use serde_json::json;

use super::print_json;

#[derive(Args)]
pub struct GradeArgs {
    /// shoulder, chest, back, arm, abdominal, hip or leg
    #[arg(long)]
    pub body_part: BodyPart,
    #[arg(long)]
    pub sex: Sex,
    #[arg(long)]
    pub age: u32,
    /// 1RM as a percentage of bodyweight; otherwise derived from the lift
    #[arg(long, conflicts_with_all = ["weight", "reps", "bodyweight"])]
    pub metric: Option<f64>,
    /// Weight lifted in kilograms
    #[arg(long, requires_all = ["reps", "bodyweight"])]
    pub weight: Option<f64>,
    #[arg(long)]
    pub reps: Option<u32>,
    /// Bodyweight in kilograms
    #[arg(long)]
    pub bodyweight: Option<f64>,
}

pub fn run(args: GradeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (metric, one_rm) = match (args.metric, args.weight, args.reps, args.bodyweight) {
        (Some(metric), ..) => (metric, None),
        (None, Some(weight), Some(reps), Some(bodyweight)) => {
            let one_rm = estimate_one_rm(weight, reps);
            (bodyweight_percentage(one_rm, bodyweight), Some(one_rm))
        }
        _ => return Err("pass --metric, or --weight with --reps and --bodyweight".into()),
    };

    let thresholds = standard_thresholds(args.body_part, args.sex);
    let classification = GradeThresholdEngine::new().classify(metric, args.age, &thresholds)?;
    print_json(&json!({
        "metric": metric,
        "one_rm": one_rm,
        "classification": classification,
        "meaning": classification.grade.meaning(),
        "display_name": classification.grade.name_ko(),
        "color": classification.grade.color(),
    }))
}
