//! StatBlock - the stat state of a single game entity
//!
//! A stat value is layered:
//! 1. attribute-derived base (see [`StatAccumulator`])
//! 2. loose bonuses added and removed by equipment (`add_bonus_stat`)
//! 3. keyed bonuses owned by a named source, overwritten as a whole (`set_source_bonus`)

mod aggregator;
mod resource;

pub use aggregator::StatAccumulator;
pub use resource::ResourcePool;

use crate::types::{Attribute, CharacterClass, Resource, Stat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Starting value of every base attribute
pub const BASE_ATTRIBUTE_START: u32 = 1;

/// Aggregated stats of one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatBlock {
    pub id: String,
    pub class: CharacterClass,
    level: u32,
    base_attributes: HashMap<Attribute, u32>,
    bonus_attributes: HashMap<Attribute, i32>,
    bonus_stats: HashMap<Stat, f64>,
    source_bonuses: HashMap<String, HashMap<Stat, f64>>,
    hp: ResourcePool,
    sp: ResourcePool,
}

impl Default for StatBlock {
    fn default() -> Self {
        StatBlock::new()
    }
}

impl StatBlock {
    /// Create a level 1 novice with every attribute at its starting value and full pools
    pub fn new() -> Self {
        Self::with_class("entity", CharacterClass::default())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::with_class(id, CharacterClass::default())
    }

    pub fn with_class(id: impl Into<String>, class: CharacterClass) -> Self {
        let mut block = StatBlock {
            id: id.into(),
            class,
            level: 1,
            base_attributes: Attribute::all()
                .iter()
                .map(|a| (*a, BASE_ATTRIBUTE_START))
                .collect(),
            bonus_attributes: HashMap::new(),
            bonus_stats: HashMap::new(),
            source_bonuses: HashMap::new(),
            hp: ResourcePool::default(),
            sp: ResourcePool::default(),
        };
        block.hp = ResourcePool::full(block.max(Resource::Hp));
        block.sp = ResourcePool::full(block.max(Resource::Sp));
        block
    }

    // === Level ===

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Set the level used by level-scaled derived stats
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    // === Attributes ===

    /// Base (point-allocated) value of an attribute
    pub fn base_attribute(&self, attribute: Attribute) -> u32 {
        self.base_attributes
            .get(&attribute)
            .copied()
            .unwrap_or(BASE_ATTRIBUTE_START)
    }

    pub fn set_attribute(&mut self, attribute: Attribute, value: u32) {
        self.base_attributes.insert(attribute, value);
    }

    /// Add a (possibly negative) bonus on top of the base attribute
    pub fn add_bonus_attribute(&mut self, attribute: Attribute, delta: i32) {
        *self.bonus_attributes.entry(attribute).or_insert(0) += delta;
    }

    pub fn bonus_attribute(&self, attribute: Attribute) -> i32 {
        self.bonus_attributes.get(&attribute).copied().unwrap_or(0)
    }

    /// Base plus bonus
    pub fn total_attribute(&self, attribute: Attribute) -> i32 {
        self.base_attribute(attribute) as i32 + self.bonus_attribute(attribute)
    }

    // === Stats ===

    /// Add a (possibly negative) bonus to a stat
    ///
    /// Equipment contracts call this with a positive delta on equip and the
    /// matching negative delta on unequip.
    pub fn add_bonus_stat(&mut self, stat: Stat, delta: f64) {
        *self.bonus_stats.entry(stat).or_insert(0.0) += delta;
    }

    pub fn bonus_stat(&self, stat: Stat) -> f64 {
        self.bonus_stats.get(&stat).copied().unwrap_or(0.0)
    }

    /// Replace the bonus a named source grants to a stat
    ///
    /// Repeated calls overwrite instead of stacking.
    pub fn set_source_bonus(&mut self, source: &str, stat: Stat, value: f64) {
        self.source_bonuses
            .entry(source.to_string())
            .or_default()
            .insert(stat, value);
    }

    pub fn source_bonus(&self, source: &str, stat: Stat) -> f64 {
        self.source_bonuses
            .get(source)
            .and_then(|bonuses| bonuses.get(&stat))
            .copied()
            .unwrap_or(0.0)
    }

    /// Drop every bonus a source grants
    pub fn clear_source(&mut self, source: &str) {
        self.source_bonuses.remove(source);
    }

    /// Attribute-derived value of a stat
    pub fn base_stat(&self, stat: Stat) -> f64 {
        let attributes = Attribute::all()
            .iter()
            .map(|a| (*a, self.total_attribute(*a)));
        StatAccumulator::from_attributes(attributes, self.level).value(stat, self.class)
    }

    /// Base plus every bonus layer
    pub fn total_stat(&self, stat: Stat) -> f64 {
        let sourced: f64 = self
            .source_bonuses
            .values()
            .filter_map(|bonuses| bonuses.get(&stat))
            .sum();
        self.base_stat(stat) + self.bonus_stat(stat) + sourced
    }

    // === Resources ===

    pub fn max(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Hp => self.total_stat(Stat::MaxHp),
            Resource::Sp => self.total_stat(Stat::MaxSp),
        }
        .max(0.0)
    }

    pub fn current(&self, resource: Resource) -> f64 {
        let max = self.max(resource);
        self.pool(resource).current(max)
    }

    /// Restore a percentage (0-100) of the resource's maximum
    pub fn restore_percentage_max(&mut self, resource: Resource, percentage: f64) {
        let max = self.max(resource);
        self.pool_mut(resource).restore_percentage_max(percentage, max);
    }

    pub fn consume(&mut self, resource: Resource, amount: f64) {
        let max = self.max(resource);
        self.pool_mut(resource).consume(amount, max);
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    fn pool(&self, resource: Resource) -> &ResourcePool {
        match resource {
            Resource::Hp => &self.hp,
            Resource::Sp => &self.sp,
        }
    }

    fn pool_mut(&mut self, resource: Resource) -> &mut ResourcePool {
        match resource {
            Resource::Hp => &mut self.hp,
            Resource::Sp => &mut self.sp,
        }
    }
}
