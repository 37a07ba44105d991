use crate::types::{ArmorType, Element, ItemLevel, Rune, WeaponType};
use serde::Deserialize;

/// TOML configuration for an item definition file
#[derive(Debug, Default, Deserialize)]
pub struct ItemFileConfig {
    #[serde(default)]
    pub weapons: Vec<WeaponConfig>,
    #[serde(default)]
    pub armors: Vec<ArmorConfig>,
}

/// Configuration for a weapon template
#[derive(Debug, Clone, Deserialize)]
pub struct WeaponConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub item_level: ItemLevel,
    pub weapon_type: WeaponType,
    pub damage: i32,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub runes: Vec<Rune>,
}

/// Configuration for an armor template
#[derive(Debug, Clone, Deserialize)]
pub struct ArmorConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub item_level: ItemLevel,
    pub armor_type: ArmorType,
    pub armor: i32,
    #[serde(default)]
    pub marmor: i32,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub runes: Vec<Rune>,
}
