use clap::Args;
use serde_json::json;

use super::{open_orchestrator, print_json};

#[derive(Args)]
pub struct RecommendArgs {
    pub user_id: String,
    /// Exercise code, e.g. bench_press
    pub exercise: String,
}

pub fn run(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = open_orchestrator()?;
    match orchestrator.recommend_next(&args.user_id, &args.exercise)? {
        Some(recommendation) => print_json(&recommendation)?,
        None => print_json(&json!({
            "recommendation": null,
            "reason": "insufficient history",
        }))?,
    }
    Ok(())
}
