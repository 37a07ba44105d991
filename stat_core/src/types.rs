//! Core types specific to stat_core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base attributes raised with attribute points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Vitality,
    Dexterity,
    Agility,
    Intellect,
    Wisdom,
    Willpower,
    Perception,
    Luck,
}

impl Attribute {
    /// Get all attributes
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Strength,
            Attribute::Vitality,
            Attribute::Dexterity,
            Attribute::Agility,
            Attribute::Intellect,
            Attribute::Wisdom,
            Attribute::Willpower,
            Attribute::Perception,
            Attribute::Luck,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Strength => write!(f, "Strength"),
            Attribute::Vitality => write!(f, "Vitality"),
            Attribute::Dexterity => write!(f, "Dexterity"),
            Attribute::Agility => write!(f, "Agility"),
            Attribute::Intellect => write!(f, "Intellect"),
            Attribute::Wisdom => write!(f, "Wisdom"),
            Attribute::Willpower => write!(f, "Willpower"),
            Attribute::Perception => write!(f, "Perception"),
            Attribute::Luck => write!(f, "Luck"),
        }
    }
}

/// Derived stats that gear, runes and passive skills contribute to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    MaxHp,
    MaxSp,
    Atk,
    Matk,
    /// Armor from equipped armor pieces
    Arm,
    /// Magic armor from equipped armor pieces
    Marm,
    Def,
    Mdef,
    Aspd,
    CritChance,
}

impl Stat {
    /// Get all stats
    pub fn all() -> &'static [Stat] {
        &[
            Stat::MaxHp,
            Stat::MaxSp,
            Stat::Atk,
            Stat::Matk,
            Stat::Arm,
            Stat::Marm,
            Stat::Def,
            Stat::Mdef,
            Stat::Aspd,
            Stat::CritChance,
        ]
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::MaxHp => write!(f, "Max HP"),
            Stat::MaxSp => write!(f, "Max SP"),
            Stat::Atk => write!(f, "ATK"),
            Stat::Matk => write!(f, "MATK"),
            Stat::Arm => write!(f, "ARM"),
            Stat::Marm => write!(f, "MARM"),
            Stat::Def => write!(f, "DEF"),
            Stat::Mdef => write!(f, "MDEF"),
            Stat::Aspd => write!(f, "ASPD"),
            Stat::CritChance => write!(f, "Critical Chance"),
        }
    }
}

/// Regenerating resource pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Hp,
    Sp,
}

/// Character class; scales how much HP/SP each level and attribute point is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    #[default]
    Novice,
    Warrior,
    Scout,
    Mage,
}

impl CharacterClass {
    /// Multiplier applied to derived max HP
    pub fn hp_factor(&self) -> f64 {
        match self {
            CharacterClass::Novice => 1.0,
            CharacterClass::Warrior => 1.5,
            CharacterClass::Scout => 1.2,
            CharacterClass::Mage => 0.8,
        }
    }

    /// Multiplier applied to derived max SP
    pub fn sp_factor(&self) -> f64 {
        match self {
            CharacterClass::Novice => 1.0,
            CharacterClass::Warrior => 0.8,
            CharacterClass::Scout => 1.1,
            CharacterClass::Mage => 1.6,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Novice => write!(f, "Novice"),
            CharacterClass::Warrior => write!(f, "Warrior"),
            CharacterClass::Scout => write!(f, "Scout"),
            CharacterClass::Mage => write!(f, "Mage"),
        }
    }
}
