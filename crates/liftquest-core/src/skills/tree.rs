//! Prerequisite DAG, validated once at construction.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::catalog::BodyPart;
use crate::error::{ConfigError, CoreError, Result, ValidationError};
use crate::grading::Grade;
use crate::leveling::Character;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub body_part: BodyPart,
    pub tier: Grade,
    /// Minimum character total level
    pub required_level: u32,
    /// Skills that must all be unlocked first
    #[serde(default)]
    pub prerequisites: BTreeSet<String>,
}

impl Skill {
    pub fn new(
        id: &str,
        name: &str,
        body_part: BodyPart,
        tier: Grade,
        required_level: u32,
        prerequisites: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            body_part,
            tier,
            required_level,
            prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Acyclic skill graph. Every prerequisite exists and sits at the same or a
/// lower tier than the skill depending on it.
///
/// Equal tiers are allowed: the built-in chest tree chains several Bronze
/// skills (`pushup_normal` before `dips`), so only an edge pointing down from
/// a higher tier is rejected. Cycles among same-tier skills are still caught
/// by the ordering pass.
#[derive(Debug, Clone)]
pub struct SkillTree {
    skills: BTreeMap<String, Skill>,
    /// Prerequisites first
    order: Vec<String>,
}

impl SkillTree {
    pub fn new(skills: Vec<Skill>) -> Result<Self, ConfigError> {
        let mut by_id = BTreeMap::new();
        for skill in skills {
            if by_id.contains_key(&skill.id) {
                return Err(ConfigError::invalid(
                    format!("skills.{}", skill.id),
                    "duplicate skill id",
                ));
            }
            by_id.insert(skill.id.clone(), skill);
        }

        for skill in by_id.values() {
            for prereq_id in &skill.prerequisites {
                let prereq = by_id.get(prereq_id).ok_or_else(|| {
                    ConfigError::invalid(
                        format!("skills.{}", skill.id),
                        format!("unknown prerequisite '{prereq_id}'"),
                    )
                })?;
                if prereq.tier > skill.tier {
                    return Err(ConfigError::invalid(
                        format!("skills.{}", skill.id),
                        format!(
                            "prerequisite '{prereq_id}' has tier {} above {}",
                            prereq.tier, skill.tier
                        ),
                    ));
                }
            }
        }

        let order = topological_order(&by_id)?;
        Ok(Self {
            skills: by_id,
            order,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills with every prerequisite listed before its dependents.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> + '_ {
        self.order.iter().filter_map(|id| self.skills.get(id))
    }

    /// Not yet unlocked, level reached, every prerequisite unlocked.
    pub fn is_eligible(&self, id: &str, unlocked: &BTreeSet<String>, character_level: u32) -> Result<bool> {
        let skill = self.get(id).ok_or_else(|| CoreError::not_found("skill", id))?;
        Ok(self.eligible(skill, unlocked, character_level))
    }

    pub fn eligible_skills(&self, unlocked: &BTreeSet<String>, character_level: u32) -> Vec<&Skill> {
        self.iter()
            .filter(|skill| self.eligible(skill, unlocked, character_level))
            .collect()
    }

    /// Spend one skill point on `id`. `character` is untouched on error.
    pub fn unlock(&self, id: &str, unlocked: &BTreeSet<String>, character: &mut Character) -> Result<()> {
        let skill = self.get(id).ok_or_else(|| CoreError::not_found("skill", id))?;
        if unlocked.contains(id) {
            return Err(invalid_unlock(id, "already unlocked"));
        }
        if !self.eligible(skill, unlocked, character.total_level) {
            return Err(invalid_unlock(id, "prerequisites or level requirement not met"));
        }
        if character.skill_points == 0 {
            return Err(invalid_unlock(id, "no skill points available"));
        }
        character.skill_points -= 1;
        tracing::info!(user_id = %character.user_id, skill = id, "skill unlocked");
        Ok(())
    }

    fn eligible(&self, skill: &Skill, unlocked: &BTreeSet<String>, character_level: u32) -> bool {
        !unlocked.contains(&skill.id)
            && character_level >= skill.required_level
            && skill.prerequisites.is_subset(unlocked)
    }
}

fn invalid_unlock(id: &str, message: &str) -> CoreError {
    ValidationError::InvalidValue {
        field: format!("skill '{id}'"),
        message: message.to_string(),
    }
    .into()
}

/// Kahn's algorithm; anything left with unmet in-degree sits on a cycle.
fn topological_order(skills: &BTreeMap<String, Skill>) -> Result<Vec<String>, ConfigError> {
    let mut in_degree: BTreeMap<&str, usize> = skills
        .values()
        .map(|s| (s.id.as_str(), s.prerequisites.len()))
        .collect();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for skill in skills.values() {
        for prereq in &skill.prerequisites {
            dependents.entry(prereq.as_str()).or_default().push(skill.id.as_str());
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut order = Vec::with_capacity(skills.len());

    while let Some(id) = queue.pop_front() {
        order.push(id.to_string());
        for &dependent in dependents.get(id).into_iter().flatten() {
            if let Some(deg) = in_degree.get_mut(dependent) {
                *deg -= 1;
                if *deg == 0 {
                    queue.push_back(dependent);
                }
            }
        }
    }

    if order.len() != skills.len() {
        let stuck: Vec<&str> = in_degree
            .iter()
            .filter(|(_, &deg)| deg > 0)
            .map(|(&id, _)| id)
            .collect();
        return Err(ConfigError::invalid(
            "skills",
            format!("prerequisite cycle involving {}", stuck.join(", ")),
        ));
    }
    Ok(order)
}
