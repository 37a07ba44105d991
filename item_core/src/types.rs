use serde::{Deserialize, Serialize};
use stat_core::Attribute;
use std::fmt;

/// Item tier; decides how much each refinement level is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemLevel {
    #[default]
    Normal,
    Unique,
    Epic,
}

impl ItemLevel {
    /// Bonus granted per refinement level
    pub fn bonus(&self) -> i32 {
        match self {
            ItemLevel::Normal => 3,
            ItemLevel::Unique => 5,
            ItemLevel::Epic => 10,
        }
    }

    pub fn max_refinement(&self) -> u32 {
        match self {
            ItemLevel::Normal => 5,
            ItemLevel::Unique => 7,
            ItemLevel::Epic => 10,
        }
    }
}

impl fmt::Display for ItemLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemLevel::Normal => write!(f, "Normal"),
            ItemLevel::Unique => write!(f, "Unique"),
            ItemLevel::Epic => write!(f, "Epic"),
        }
    }
}

/// Elemental affinity attached to a weapon or armor piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Water,
    Air,
    Earth,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Neutral => write!(f, "Neutral"),
            Element::Fire => write!(f, "Fire"),
            Element::Water => write!(f, "Water"),
            Element::Air => write!(f, "Air"),
            Element::Earth => write!(f, "Earth"),
        }
    }
}

/// Weapon categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    /// Bare hands, only used by the empty hand items
    Hands,
    // One-handed
    Dagger,
    OneHandSword,
    OneHandAxe,
    OneHandMace,
    Rod,
    // Off-hand
    Shield,
    // Two-handed
    TwoHandSword,
    TwoHandAxe,
    TwoHandMace,
    Bow,
    Spear,
}

impl WeaponType {
    pub fn is_two_handed(&self) -> bool {
        matches!(
            self,
            WeaponType::TwoHandSword
                | WeaponType::TwoHandAxe
                | WeaponType::TwoHandMace
                | WeaponType::Bow
                | WeaponType::Spear
        )
    }

    pub fn is_shield(&self) -> bool {
        matches!(self, WeaponType::Shield)
    }
}

/// Armor categories, one per armor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    Body,
    Helm,
    Shoes,
}

impl ArmorType {
    /// The only slot this armor type can occupy
    pub fn slot(&self) -> EquipSlot {
        match self {
            ArmorType::Body => EquipSlot::Body,
            ArmorType::Helm => EquipSlot::Helm,
            ArmorType::Shoes => EquipSlot::Shoes,
        }
    }
}

/// Equipment slot on a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    RightHand,
    LeftHand,
    Body,
    Helm,
    Shoes,
}

impl EquipSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipSlot] {
        &[
            EquipSlot::RightHand,
            EquipSlot::LeftHand,
            EquipSlot::Body,
            EquipSlot::Helm,
            EquipSlot::Shoes,
        ]
    }

    /// Id of the item that occupies this slot when nothing is equipped
    pub fn empty_id(&self) -> ItemId {
        match self {
            EquipSlot::RightHand => ItemId(4000),
            EquipSlot::LeftHand => ItemId(4001),
            EquipSlot::Body => ItemId(5000),
            EquipSlot::Helm => ItemId(5001),
            EquipSlot::Shoes => ItemId(5002),
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, EquipSlot::RightHand | EquipSlot::LeftHand)
    }

    /// The opposite hand, for hand slots
    pub fn other_hand(&self) -> Option<EquipSlot> {
        match self {
            EquipSlot::RightHand => Some(EquipSlot::LeftHand),
            EquipSlot::LeftHand => Some(EquipSlot::RightHand),
            _ => None,
        }
    }

    /// Position in [`EquipSlot::all`]
    pub fn index(&self) -> usize {
        match self {
            EquipSlot::RightHand => 0,
            EquipSlot::LeftHand => 1,
            EquipSlot::Body => 2,
            EquipSlot::Helm => 3,
            EquipSlot::Shoes => 4,
        }
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipSlot::RightHand => write!(f, "Right Hand"),
            EquipSlot::LeftHand => write!(f, "Left Hand"),
            EquipSlot::Body => write!(f, "Body"),
            EquipSlot::Helm => write!(f, "Helm"),
            EquipSlot::Shoes => write!(f, "Shoes"),
        }
    }
}

/// Template id shared by every instance of the same item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique id of a single item instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

/// A socketed rune raising one attribute while its item is equipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rune {
    pub attribute: Attribute,
    pub level: i32,
}

impl Rune {
    pub fn new(attribute: Attribute, level: i32) -> Self {
        Rune { attribute, level }
    }
}

impl fmt::Display for Rune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} +{}", self.attribute, self.level)
    }
}
