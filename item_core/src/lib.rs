//! item_core - Equippable items and the item registry
//!
//! Weapons and armor carry immutable base data plus mutable attachments
//! (refinement, element, runes). Their [`Equippable`] contract adds bonuses to
//! a wearer's [`stat_core::StatBlock`] on equip and removes them on unequip.

mod config;
pub mod item;
mod registry;
pub mod types;

pub use config::{ArmorConfig, ItemFileConfig, WeaponConfig};
pub use item::{ArmorData, Attachments, Description, EquipData, Equippable, Item, ItemKind, ItemRef, WeaponData};
pub use registry::{ItemRegistry, ItemTemplate};
pub use types::{ArmorType, Element, EquipSlot, InstanceId, ItemId, ItemLevel, Rune, WeaponType};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading item configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error registering or spawning items
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),
    #[error("Item id {0} is reserved for an empty slot item")]
    ReservedId(ItemId),
}
