//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{ResourcePool, StatBlock};
pub use crate::types::{Attribute, CharacterClass, Resource, Stat};

// Skills
pub use crate::skill::{Skill, SkillData, SkillKind};
