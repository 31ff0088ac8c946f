use std::collections::BTreeSet;

use clap::Subcommand;
use liftquest_core::progression::ProgressionStore;
use liftquest_core::skills::builtin_chest_skills;
use liftquest_core::{CoreError, SkillTree, SqliteStore};
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum SkillsAction {
    /// List the skill tree, prerequisites first
    List {
        /// Also show which skills this user has unlocked or can unlock
        #[arg(long)]
        user: Option<String>,
    },
    /// Spend a skill point on an eligible skill
    Unlock { user_id: String, skill_id: String },
}

pub fn run(action: SkillsAction) -> Result<(), Box<dyn std::error::Error>> {
    let tree = SkillTree::new(builtin_chest_skills())?;

    match action {
        SkillsAction::List { user: None } => {
            let skills: Vec<_> = tree.iter().collect();
            print_json(&skills)?;
        }
        SkillsAction::List { user: Some(user_id) } => {
            let store = SqliteStore::open()?;
            let character = store
                .character(&user_id)?
                .ok_or_else(|| CoreError::not_found("user", user_id.as_str()))?;
            let unlocked = store.unlocked_skills(&user_id)?;
            let eligible: BTreeSet<&str> = tree
                .eligible_skills(&unlocked, character.total_level)
                .into_iter()
                .map(|s| s.id.as_str())
                .collect();
            let skills: Vec<_> = tree
                .iter()
                .map(|skill| {
                    json!({
                        "skill": skill,
                        "unlocked": unlocked.contains(&skill.id),
                        "eligible": eligible.contains(skill.id.as_str()),
                    })
                })
                .collect();
            print_json(&json!({
                "skill_points": character.skill_points,
                "total_level": character.total_level,
                "skills": skills,
            }))?;
        }
        SkillsAction::Unlock { user_id, skill_id } => {
            let store = SqliteStore::open()?;
            let mut character = store
                .character(&user_id)?
                .ok_or_else(|| CoreError::not_found("user", user_id.as_str()))?;
            let unlocked = store.unlocked_skills(&user_id)?;
            tree.unlock(&skill_id, &unlocked, &mut character)?;
            let stored = store.save_unlock(&user_id, &skill_id)?;
            print_json(&stored)?;
        }
    }
    Ok(())
}
