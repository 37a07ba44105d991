//! progression_core - Character progression and equipment rules
//!
//! This library provides:
//! - ExperienceTables: per-track level thresholds generated from config
//! - Progression: levels, experience and unspent points, with level-up rules
//! - Equipment: slot occupancy and equip/unequip transitions
//! - Player: the aggregate that ties them together and publishes events
//!
//! # Quick Start
//!
//! ```rust
//! use item_core::ItemRegistry;
//! use progression_core::{Experience, Player};
//! use stat_core::CharacterClass;
//! use std::rc::Rc;
//!
//! let mut player = Player::new("hero", CharacterClass::Warrior, Rc::new(ItemRegistry::new()));
//! assert!(player.reward_experience(Experience::new(10, 0, 0)));
//! assert_eq!(player.progression().base_level, 2);
//! ```

pub mod allocator;
mod config;
mod equipment;
mod events;
mod experience;
mod inventory;
mod player;
mod progression;
#[cfg(test)]
mod testing;

pub use config::{ExperienceConfig, GrowthConfig, InventoryConfig, LevelCaps, ProgressionConfig, RewardConfig};
pub use equipment::{EquipOutcome, Equipment};
pub use events::{EventBus, PlayerEvent, SubscriptionId};
pub use experience::{Experience, ExperienceTables, Track};
pub use inventory::{Backpack, Inventory};
pub use player::Player;
pub use progression::{LevelUps, Progression};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading progression configuration
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
