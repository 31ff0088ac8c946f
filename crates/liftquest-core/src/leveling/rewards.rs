//! Milestone rewards granted on level-up.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reward policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardPolicy {
    /// Every n-th level grants one skill point
    #[serde(default = "default_skill_point_interval")]
    pub skill_point_interval: u32,
    /// Every n-th level grants a title
    #[serde(default = "default_title_interval")]
    pub title_interval: u32,
    /// Title text; `{level}` is replaced by the level reached
    #[serde(default = "default_title_template")]
    pub title_template: String,
}

fn default_skill_point_interval() -> u32 {
    5
}
fn default_title_interval() -> u32 {
    10
}
fn default_title_template() -> String {
    "{level}레벨 달성".into()
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            skill_point_interval: default_skill_point_interval(),
            title_interval: default_title_interval(),
            title_template: default_title_template(),
        }
    }
}

impl RewardPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skill_point_interval == 0 {
            return Err(ConfigError::invalid("rewards.skill_point_interval", "must be at least 1"));
        }
        if self.title_interval == 0 {
            return Err(ConfigError::invalid("rewards.title_interval", "must be at least 1"));
        }
        if !self.title_template.contains("{level}") {
            return Err(ConfigError::invalid(
                "rewards.title_template",
                "must contain the {level} placeholder",
            ));
        }
        Ok(())
    }

    /// Rewards for reaching exactly `level`.
    pub fn rewards_for_level(&self, level: u32) -> LevelRewards {
        let mut rewards = LevelRewards::default();
        if level % self.skill_point_interval == 0 {
            rewards.skill_points += 1;
        }
        if level % self.title_interval == 0 {
            rewards
                .titles
                .push(self.title_template.replace("{level}", &level.to_string()));
        }
        rewards
    }
}

/// Rewards accumulated over one or more level-ups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRewards {
    pub skill_points: u32,
    pub titles: Vec<String>,
}

impl LevelRewards {
    /// Add `other` to this bundle; titles are appended in order.
    pub fn merge(&mut self, other: LevelRewards) {
        self.skill_points += other.skill_points;
        self.titles.extend(other.titles);
    }

    pub fn is_empty(&self) -> bool {
        self.skill_points == 0 && self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifth_level_grants_skill_point_only() {
        let r = RewardPolicy::default().rewards_for_level(5);
        assert_eq!(r.skill_points, 1);
        assert!(r.titles.is_empty());
    }

    #[test]
    fn tenth_level_grants_point_and_title() {
        let r = RewardPolicy::default().rewards_for_level(10);
        assert_eq!(r.skill_points, 1);
        assert_eq!(r.titles, vec!["10레벨 달성".to_string()]);
    }

    #[test]
    fn ordinary_level_grants_nothing() {
        assert!(RewardPolicy::default().rewards_for_level(7).is_empty());
    }

    #[test]
    fn merge_appends() {
        let policy = RewardPolicy::default();
        let mut total = policy.rewards_for_level(10);
        total.merge(policy.rewards_for_level(15));
        total.merge(policy.rewards_for_level(20));
        assert_eq!(total.skill_points, 3);
        assert_eq!(total.titles, vec!["10레벨 달성", "20레벨 달성"]);
    }

    #[test]
    fn zero_interval_is_invalid() {
        let policy = RewardPolicy {
            skill_point_interval: 0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn template_without_placeholder_is_invalid() {
        let policy = RewardPolicy {
            title_template: "Milestone".into(),
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }
}
