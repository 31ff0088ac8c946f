use clap::Subcommand;
use liftquest_core::BodyPart;

use super::{open_orchestrator, print_json};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Deposit experience into one body part
    ApplyExp {
        user_id: String,
        /// shoulder, chest, back, arm, abdominal, hip or leg
        body_part: BodyPart,
        exp: f64,
    },
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut orchestrator = open_orchestrator()?;

    match action {
        ProgressAction::ApplyExp {
            user_id,
            body_part,
            exp,
        } => {
            let outcome = orchestrator.apply_experience(&user_id, body_part, exp)?;
            print_json(&outcome)?;
        }
    }
    Ok(())
}
