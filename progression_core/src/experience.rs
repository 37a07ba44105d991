//! Experience tracks and their level thresholds

use crate::config::{ExperienceConfig, GrowthConfig, LevelCaps, ProgressionConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// An independent leveling track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Base,
    Stat,
    Job,
}

impl Track {
    pub fn all() -> &'static [Track] {
        &[Track::Base, Track::Stat, Track::Job]
    }

    /// Order in which an experience reward is applied
    pub fn reward_order() -> &'static [Track] {
        &[Track::Stat, Track::Job, Track::Base]
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Base => write!(f, "base"),
            Track::Stat => write!(f, "stat"),
            Track::Job => write!(f, "job"),
        }
    }
}

/// Experience granted by one reward, per track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub base: u32,
    #[serde(default)]
    pub stat: u32,
    #[serde(default)]
    pub job: u32,
}

impl Experience {
    pub fn new(base: u32, stat: u32, job: u32) -> Self {
        Experience { base, stat, job }
    }

    pub fn get(&self, track: Track) -> u32 {
        match track {
            Track::Base => self.base,
            Track::Stat => self.stat,
            Track::Job => self.job,
        }
    }
}

/// Precomputed experience thresholds
///
/// Entry `i` of a track's table is the experience needed to advance from level
/// `i + 1` to `i + 2`. Tables are immutable after construction and shared
/// between players through an [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceTables {
    base: Vec<u32>,
    stat: Vec<u32>,
    job: Vec<u32>,
}

static DEFAULT_TABLES: OnceLock<Arc<ExperienceTables>> = OnceLock::new();

impl ExperienceTables {
    /// Build one table per track, sized to that track's level cap
    ///
    /// Expects a config that passed [`ProgressionConfig::validate`]; a growth
    /// below 1.0 can floor thresholds to 0.
    pub fn new(experience: &ExperienceConfig, caps: &LevelCaps) -> Self {
        ExperienceTables {
            base: generate(Track::Base, caps.max_base, experience.seed, experience.base),
            stat: generate(Track::Stat, caps.max_stat, experience.seed, experience.stat),
            job: generate(Track::Job, caps.max_job, experience.seed, experience.job),
        }
    }

    pub fn from_config(config: &ProgressionConfig) -> Self {
        Self::new(&config.experience, &config.levels)
    }

    /// Tables for the default configuration, computed once per process
    pub fn shared_default() -> Arc<ExperienceTables> {
        Arc::clone(DEFAULT_TABLES.get_or_init(|| {
            Arc::new(Self::from_config(&ProgressionConfig::default()))
        }))
    }

    pub fn table(&self, track: Track) -> &[u32] {
        match track {
            Track::Base => &self.base,
            Track::Stat => &self.stat,
            Track::Job => &self.job,
        }
    }

    /// Experience needed to leave `level`, or `None` past the end of the table
    pub fn threshold(&self, track: Track, level: u32) -> Option<u32> {
        if level == 0 {
            return None;
        }
        self.table(track).get(level as usize - 1).copied()
    }
}

fn generate(track: Track, size: u32, seed: u32, growth: GrowthConfig) -> Vec<u32> {
    let size = size as usize;
    let mut table = Vec::with_capacity(size);
    if size == 0 {
        return table;
    }

    table.push(seed);
    let mut saturated = false;
    for i in 1..size {
        let next = (table[i - 1] as f64 * growth.growth + growth.linear * i as f64).floor();
        if next >= u32::MAX as f64 && !saturated {
            saturated = true;
            debug!(%track, index = i, "experience thresholds saturate at u32::MAX");
        }
        // Float to int casts saturate
        table.push(next as u32);
    }
    table
}
