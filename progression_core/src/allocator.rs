//! Spending attribute and skill points

use crate::config::LevelCaps;
use crate::progression::Progression;
use stat_core::{Attribute, Skill, StatBlock};

/// Spend one attribute point on `attribute`
///
/// Returns true when a point was spent. Without points, or with the attribute
/// already at its cap, nothing changes.
pub fn increase_attribute(
    progression: &mut Progression,
    stats: &mut StatBlock,
    attribute: Attribute,
    caps: &LevelCaps,
) -> bool {
    if progression.attribute_points == 0 {
        return false;
    }

    let value = stats.base_attribute(attribute);
    if value >= caps.max_attribute {
        return false;
    }

    stats.set_attribute(attribute, value + 1);
    progression.attribute_points -= 1;
    true
}

/// Spend one skill point on the skill at `index`
///
/// Passive skills re-apply their effect at the new level right away.
pub fn increase_skill_level(
    progression: &mut Progression,
    stats: &mut StatBlock,
    skills: &mut [Skill],
    index: usize,
    caps: &LevelCaps,
) -> bool {
    if progression.skill_points == 0 {
        return false;
    }
    let Some(skill) = skills.get_mut(index) else {
        return false;
    };
    if skill.level >= caps.max_skill {
        return false;
    }

    skill.level += 1;
    progression.skill_points -= 1;

    if skill.is_passive() {
        skill.data.on_cast(stats, skill.level);
    }
    true
}
