//! stat_core - Core stat management library for game entities
//!
//! This library provides:
//! - StatBlock: attributes, derived stats and bonus layers of one entity
//! - ResourcePool: HP/SP pools whose maximum is derived from the stat block
//! - SkillData/Skill: skill definitions and passive skill effects
//!
//! # Quick Start
//!
//! ```rust
//! use stat_core::prelude::*;
//!
//! let mut player = StatBlock::with_class("player", CharacterClass::Warrior);
//! player.add_bonus_stat(Stat::Atk, 12.0);
//! player.consume(Resource::Hp, 30.0);
//! player.restore_percentage_max(Resource::Hp, 100.0);
//! assert_eq!(player.current(Resource::Hp), player.max(Resource::Hp));
//! ```

pub mod prelude;
pub mod skill;
pub mod stat_block;
pub mod types;

// Core API - what most users need
pub use stat_block::{ResourcePool, StatAccumulator, StatBlock};
pub use skill::{Skill, SkillBonus, SkillData, SkillKind};
pub use types::{Attribute, CharacterClass, Resource, Stat};
