//! Progression tunables loaded from TOML

use crate::experience::Track;
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every tunable of the progression and equipment rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default)]
    pub levels: LevelCaps,
    #[serde(default)]
    pub experience: ExperienceConfig,
    #[serde(default)]
    pub rewards: RewardConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

impl ProgressionConfig {
    /// Load and validate a config file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Parse and validate; `origin` is only used in error messages
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: ProgressionConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: origin.to_path_buf(),
        })?;

        config.validate().map_err(|message| ConfigError::Validation {
            message,
            path: origin.to_path_buf(),
        })?;

        Ok(config)
    }

    /// Check the values the rules rely on
    pub fn validate(&self) -> Result<(), String> {
        for track in Track::all() {
            if self.levels.max_level(*track) == 0 {
                return Err(format!("max level of the {} track must be at least 1", track));
            }
            // growth >= 1 with seed >= 1 keeps every threshold at or above the seed
            let growth = self.experience.growth(*track);
            if !growth.growth.is_finite() || growth.growth < 1.0 {
                return Err(format!("growth of the {} track must be at least 1.0", track));
            }
            if !growth.linear.is_finite() || growth.linear < 0.0 {
                return Err(format!("linear term of the {} track must not be negative", track));
            }
        }
        if self.experience.seed == 0 {
            return Err("experience seed must be at least 1".to_string());
        }
        if self.levels.max_skill == 0 {
            return Err("max skill level must be at least 1".to_string());
        }
        if self.levels.max_attribute < stat_core::stat_block::BASE_ATTRIBUTE_START {
            return Err(format!(
                "max attribute must be at least {}",
                stat_core::stat_block::BASE_ATTRIBUTE_START
            ));
        }
        if self.inventory.capacity == 0 {
            return Err("inventory capacity must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Level and value caps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCaps {
    #[serde(default = "default_max_base")]
    pub max_base: u32,
    #[serde(default = "default_max_stat")]
    pub max_stat: u32,
    #[serde(default = "default_max_job")]
    pub max_job: u32,
    #[serde(default = "default_max_skill")]
    pub max_skill: u32,
    #[serde(default = "default_max_attribute")]
    pub max_attribute: u32,
}

impl LevelCaps {
    pub fn max_level(&self, track: Track) -> u32 {
        match track {
            Track::Base => self.max_base,
            Track::Stat => self.max_stat,
            Track::Job => self.max_job,
        }
    }
}

impl Default for LevelCaps {
    fn default() -> Self {
        LevelCaps {
            max_base: default_max_base(),
            max_stat: default_max_stat(),
            max_job: default_max_job(),
            max_skill: default_max_skill(),
            max_attribute: default_max_attribute(),
        }
    }
}

fn default_max_base() -> u32 {
    100
}
fn default_max_stat() -> u32 {
    100
}
fn default_max_job() -> u32 {
    60
}
fn default_max_skill() -> u32 {
    10
}
fn default_max_attribute() -> u32 {
    100
}

/// Recurrence `next = floor(previous * growth + linear * index)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthConfig {
    pub growth: f64,
    pub linear: f64,
}

/// Experience threshold generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceConfig {
    /// Experience needed to go from level 1 to 2, shared by all tracks
    #[serde(default = "default_seed")]
    pub seed: u32,
    #[serde(default = "default_base_growth")]
    pub base: GrowthConfig,
    #[serde(default = "default_stat_growth")]
    pub stat: GrowthConfig,
    #[serde(default = "default_job_growth")]
    pub job: GrowthConfig,
}

impl ExperienceConfig {
    pub fn growth(&self, track: Track) -> GrowthConfig {
        match track {
            Track::Base => self.base,
            Track::Stat => self.stat,
            Track::Job => self.job,
        }
    }
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        ExperienceConfig {
            seed: default_seed(),
            base: default_base_growth(),
            stat: default_stat_growth(),
            job: default_job_growth(),
        }
    }
}

fn default_seed() -> u32 {
    10
}
fn default_base_growth() -> GrowthConfig {
    GrowthConfig {
        growth: 1.75,
        linear: 2.0,
    }
}
fn default_stat_growth() -> GrowthConfig {
    GrowthConfig {
        growth: 1.5,
        linear: 1.0,
    }
}
fn default_job_growth() -> GrowthConfig {
    GrowthConfig {
        growth: 2.25,
        linear: 3.0,
    }
}

/// Points granted per level-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_attribute_points")]
    pub attribute_points_per_level: u32,
    #[serde(default = "default_skill_points")]
    pub skill_points_per_level: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            attribute_points_per_level: default_attribute_points(),
            skill_points_per_level: default_skill_points(),
        }
    }
}

fn default_attribute_points() -> u32 {
    3
}
fn default_skill_points() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    30
}
