use clap::Subcommand;
use liftquest_core::progression::ProgressionStore;
use liftquest_core::{CoreError, Sex, SqliteStore};
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user with level-1 progress in every body part
    Init {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        /// Bodyweight in kilograms
        #[arg(long)]
        bodyweight: f64,
        /// male or female
        #[arg(long)]
        sex: Sex,
    },
    /// Show a user's profile, character and body-part progress
    Show { user_id: String },
    /// List registered users
    List,
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;

    match action {
        UserAction::Init {
            name,
            age,
            bodyweight,
            sex,
        } => {
            let user = store.init_user(&name, age, bodyweight, sex)?;
            print_json(&user)?;
        }
        UserAction::Show { user_id } => {
            let user = store
                .user(&user_id)?
                .ok_or_else(|| CoreError::not_found("user", user_id.as_str()))?;
            let character = store.character(&user_id)?;
            let progress = store.list_progress(&user_id)?;
            print_json(&json!({
                "user": user,
                "character": character,
                "progress": progress,
            }))?;
        }
        UserAction::List => {
            print_json(&store.list_users()?)?;
        }
    }
    Ok(())
}
