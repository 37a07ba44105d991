//! StatAccumulator - Derives base stat values from attributes before bonuses are added

use crate::types::{Attribute, CharacterClass, Stat};
use serde::{Deserialize, Serialize};

/// Accumulates the attribute-derived part of every stat
///
/// Gear, runes and passive skills are layered on top of these values by
/// [`StatBlock`](crate::StatBlock); the accumulator only knows about attributes,
/// level and class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatAccumulator {
    // === Resources ===
    pub hp_flat: f64,
    pub sp_flat: f64,

    // === Offense ===
    pub atk: f64,
    pub matk: f64,
    pub aspd: f64,
    pub crit_chance: f64,

    // === Defense ===
    pub def: f64,
    pub mdef: f64,
}

impl StatAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    /// Accumulate the contributions of a full attribute set
    pub fn from_attributes(attributes: impl IntoIterator<Item = (Attribute, i32)>, level: u32) -> Self {
        let mut acc = StatAccumulator::new();
        acc.hp_flat = 50.0 + 5.0 * level as f64;
        acc.sp_flat = 20.0 + 2.0 * level as f64;
        for (attribute, value) in attributes {
            acc.apply_attribute(attribute, value as f64);
        }
        acc
    }

    /// Apply one attribute's contribution to this accumulator
    pub fn apply_attribute(&mut self, attribute: Attribute, value: f64) {
        match attribute {
            Attribute::Strength => {
                self.atk += value * 2.0;
                self.def += value * 0.5;
            }
            Attribute::Vitality => {
                self.hp_flat += value * 10.0;
                self.def += value;
            }
            Attribute::Dexterity => {
                self.atk += value * 0.5;
                self.aspd += value * 0.25;
            }
            Attribute::Agility => self.aspd += value,
            Attribute::Intellect => {
                self.matk += value * 2.0;
                self.sp_flat += value * 2.0;
            }
            Attribute::Wisdom => {
                self.matk += value * 0.5;
                self.sp_flat += value * 6.0;
                self.mdef += value;
            }
            Attribute::Willpower => self.mdef += value * 0.5,
            Attribute::Perception => self.crit_chance += value * 0.1,
            Attribute::Luck => self.crit_chance += value * 0.3,
        }
    }

    /// Read the derived value of a stat, with class scaling applied to resources
    pub fn value(&self, stat: Stat, class: CharacterClass) -> f64 {
        match stat {
            Stat::MaxHp => self.hp_flat * class.hp_factor(),
            Stat::MaxSp => self.sp_flat * class.sp_factor(),
            Stat::Atk => self.atk,
            Stat::Matk => self.matk,
            // Only gear contributes armor
            Stat::Arm | Stat::Marm => 0.0,
            Stat::Def => self.def,
            Stat::Mdef => self.mdef,
            Stat::Aspd => self.aspd,
            Stat::CritChance => self.crit_chance,
        }
    }
}
