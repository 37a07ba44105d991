//! Skills learned with skill points

use crate::stat_block::StatBlock;
use crate::types::Stat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Whether a skill is cast on demand or always in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Active,
    Passive,
}

/// Stat granted per skill level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillBonus {
    pub stat: Stat,
    pub per_level: f64,
}

/// Immutable definition of a skill, shared by every entity that knows it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillData {
    pub id: String,
    pub name: String,
    pub kind: SkillKind,
    #[serde(default)]
    pub bonuses: Vec<SkillBonus>,
}

impl SkillData {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SkillKind) -> Self {
        SkillData {
            id: id.into(),
            name: name.into(),
            kind,
            bonuses: Vec::new(),
        }
    }

    pub fn with_bonus(mut self, stat: Stat, per_level: f64) -> Self {
        self.bonuses.push(SkillBonus { stat, per_level });
        self
    }

    /// Source key under which this skill's bonuses live on a [`StatBlock`]
    pub fn source_key(&self) -> String {
        format!("skill:{}", self.id)
    }

    /// Apply the skill's effect at `level` to the caster
    ///
    /// Passive bonuses are written as keyed source bonuses, so casting again at
    /// a higher level replaces the previous contribution. Active skill effects
    /// resolve in combat and leave the stat block untouched.
    pub fn on_cast(&self, caster: &mut StatBlock, level: u32) {
        if self.kind != SkillKind::Passive {
            return;
        }

        let source = self.source_key();
        for bonus in &self.bonuses {
            caster.set_source_bonus(&source, bonus.stat, bonus.per_level * level as f64);
        }
    }
}

/// A skill known by an entity, with its current level
#[derive(Debug, Clone)]
pub struct Skill {
    pub data: Arc<SkillData>,
    pub level: u32,
}

impl Skill {
    /// An unlearned (level 0) skill
    pub fn new(data: Arc<SkillData>) -> Self {
        Skill { data, level: 0 }
    }

    pub fn is_passive(&self) -> bool {
        self.data.kind == SkillKind::Passive
    }
}
