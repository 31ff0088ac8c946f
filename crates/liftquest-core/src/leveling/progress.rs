//! Per-body-part progress and the per-user character aggregate.

use serde::{Deserialize, Serialize};

use super::rewards::LevelRewards;
use crate::catalog::BodyPart;

/// Level track of one body part for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPartProgress {
    pub user_id: String,
    pub body_part: BodyPart,
    /// Current level, starting at 1
    pub level: u32,
    /// Experience inside the current level
    pub current_exp: f64,
    /// Best estimated 1RM logged for this body part (kg)
    pub best_one_rm: f64,
}

impl BodyPartProgress {
    /// Fresh track at level 1 with no experience.
    pub fn new(user_id: &str, body_part: BodyPart) -> Self {
        Self {
            user_id: user_id.to_string(),
            body_part,
            level: 1,
            current_exp: 0.0,
            best_one_rm: 0.0,
        }
    }

    /// Storage key, `user/body_part`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.user_id, self.body_part)
    }
}

/// Per-user aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub user_id: String,
    /// Floor of the mean body-part level
    pub total_level: u32,
    /// Unspent skill points
    pub skill_points: u32,
    pub titles: Vec<String>,
}

impl Character {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_level: 1,
            skill_points: 0,
            titles: Vec::new(),
        }
    }

    /// Fold a level-up in: total level from `levels` (every body part of the
    /// user, post-level-up), rewards banked on top of what is stored.
    pub fn apply_level_up(&mut self, levels: &[u32], rewards: &LevelRewards) {
        if let Some(total) = aggregate_total_level(levels) {
            self.total_level = total;
        }
        self.skill_points = self.skill_points.saturating_add(rewards.skill_points);
        self.titles.extend(rewards.titles.iter().cloned());
    }
}

/// Floor of the arithmetic mean of `levels`; `None` when there are none.
pub fn aggregate_total_level(levels: &[u32]) -> Option<u32> {
    if levels.is_empty() {
        return None;
    }
    let sum: u64 = levels.iter().map(|&l| l as u64).sum();
    Some((sum / levels.len() as u64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_floors_the_mean() {
        assert_eq!(aggregate_total_level(&[1, 1, 2]), Some(1));
        assert_eq!(aggregate_total_level(&[5, 6]), Some(5));
        assert_eq!(aggregate_total_level(&[3, 3, 3, 3, 3, 3, 10]), Some(4));
    }

    #[test]
    fn aggregate_of_nothing_is_none() {
        assert_eq!(aggregate_total_level(&[]), None);
    }

    #[test]
    fn level_up_keeps_points_already_banked() {
        let mut character = Character::new("u1");
        character.skill_points = 1;
        character.titles.push("10레벨 달성".into());
        let rewards = LevelRewards {
            skill_points: 1,
            titles: vec!["20레벨 달성".into()],
        };
        character.apply_level_up(&[1, 5, 5, 1, 1, 1, 1], &rewards);
        assert_eq!(character.total_level, 2);
        assert_eq!(character.skill_points, 2);
        assert_eq!(character.titles, vec!["10레벨 달성".to_string(), "20레벨 달성".to_string()]);
    }

    #[test]
    fn new_progress_starts_at_level_one() {
        let p = BodyPartProgress::new("u1", BodyPart::Chest);
        assert_eq!(p.level, 1);
        assert_eq!(p.current_exp, 0.0);
        assert_eq!(p.key(), "u1/chest");
    }
}
