//! Skill prerequisite graph and unlock rules.

mod builtin;
mod tree;

pub use builtin::builtin_chest_skills;
pub use tree::{Skill, SkillTree};
