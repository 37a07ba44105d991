//! Levels, experience and unspent points of a player

use crate::config::{LevelCaps, RewardConfig};
use crate::experience::{Experience, ExperienceTables, Track};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tracks that leveled up during one reward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUps {
    pub base: bool,
    pub stat: bool,
    pub job: bool,
}

impl LevelUps {
    pub fn get(&self, track: Track) -> bool {
        match track {
            Track::Base => self.base,
            Track::Stat => self.stat,
            Track::Job => self.job,
        }
    }

    pub fn any(&self) -> bool {
        self.base || self.stat || self.job
    }

    fn set(&mut self, track: Track) {
        match track {
            Track::Base => self.base = true,
            Track::Stat => self.stat = true,
            Track::Job => self.job = true,
        }
    }
}

/// Progression state; also the persisted snapshot of a player's advancement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub base_level: u32,
    pub base_xp: u32,
    pub stat_level: u32,
    pub stat_xp: u32,
    pub job_level: u32,
    pub job_xp: u32,
    pub attribute_points: u32,
    pub skill_points: u32,
    pub money: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Progression {
            base_level: 1,
            base_xp: 0,
            stat_level: 1,
            stat_xp: 0,
            job_level: 1,
            job_xp: 0,
            attribute_points: 0,
            skill_points: 0,
            money: 0,
        }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, track: Track) -> u32 {
        match track {
            Track::Base => self.base_level,
            Track::Stat => self.stat_level,
            Track::Job => self.job_level,
        }
    }

    pub fn xp(&self, track: Track) -> u32 {
        match track {
            Track::Base => self.base_xp,
            Track::Stat => self.stat_xp,
            Track::Job => self.job_xp,
        }
    }

    fn track_mut(&mut self, track: Track) -> (&mut u32, &mut u32) {
        match track {
            Track::Base => (&mut self.base_level, &mut self.base_xp),
            Track::Stat => (&mut self.stat_level, &mut self.stat_xp),
            Track::Job => (&mut self.job_level, &mut self.job_xp),
        }
    }

    /// Add experience to every track below its cap
    ///
    /// Tracks are processed stat, job, base. Each track levels up at most once
    /// per call, even if the gain would cover several thresholds; the xp is
    /// reset to 0 on level-up and the surplus is lost. Stat level-ups grant
    /// attribute points and job level-ups grant skill points.
    pub fn reward_experience(
        &mut self,
        gain: &Experience,
        tables: &ExperienceTables,
        caps: &LevelCaps,
        rewards: &RewardConfig,
    ) -> LevelUps {
        let mut level_ups = LevelUps::default();

        for track in Track::reward_order() {
            let track = *track;
            let max = caps.max_level(track);
            let (level, xp) = self.track_mut(track);
            if *level >= max {
                continue;
            }

            *xp = xp.saturating_add(gain.get(track));

            let Some(needed) = tables.threshold(track, *level) else {
                continue;
            };
            if *xp >= needed {
                *xp = 0;
                *level += 1;
                let level = *level;
                debug!(%track, level, "level up");

                match track {
                    Track::Stat => {
                        self.attribute_points = self
                            .attribute_points
                            .saturating_add(rewards.attribute_points_per_level)
                    }
                    Track::Job => {
                        self.skill_points = self.skill_points.saturating_add(rewards.skill_points_per_level)
                    }
                    Track::Base => {}
                }
                level_ups.set(track);
            }
        }

        level_ups
    }

    /// Experience still missing for the next level, `None` at the cap
    pub fn exp_needed_for_next(&self, track: Track, tables: &ExperienceTables, caps: &LevelCaps) -> Option<u32> {
        let level = self.level(track);
        if level >= caps.max_level(track) {
            return None;
        }
        tables
            .threshold(track, level)
            .map(|needed| needed.saturating_sub(self.xp(track)))
    }

    pub fn reward_money(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgressionConfig;
    use proptest::prelude::*;

    fn reward(progression: &mut Progression, gain: Experience) -> LevelUps {
        let config = ProgressionConfig::default();
        let tables = ExperienceTables::shared_default();
        progression.reward_experience(&gain, &tables, &config.levels, &config.rewards)
    }

    #[test]
    fn test_initial_state() {
        let progression = Progression::new();
        for track in Track::all() {
            assert_eq!(progression.level(*track), 1);
            assert_eq!(progression.xp(*track), 0);
        }
        assert_eq!(progression.attribute_points, 0);
        assert_eq!(progression.skill_points, 0);
        assert_eq!(progression.money, 0);
    }

    #[test]
    fn test_base_level_up_at_threshold() {
        let mut progression = Progression::new();
        let level_ups = reward(&mut progression, Experience::new(10, 0, 0));

        assert!(level_ups.base);
        assert!(!level_ups.stat && !level_ups.job);
        assert_eq!(progression.base_level, 2);
        assert_eq!(progression.base_xp, 0);
    }

    #[test]
    fn test_below_threshold_accumulates() {
        let mut progression = Progression::new();
        assert!(!reward(&mut progression, Experience::new(6, 0, 0)).any());
        assert!(!reward(&mut progression, Experience::new(3, 0, 0)).any());
        assert_eq!(progression.base_xp, 9);
        assert!(reward(&mut progression, Experience::new(1, 0, 0)).base);
    }

    #[test]
    fn test_single_step_level_up() {
        // Enough for levels 1->2 (10) and 2->3 (19) at once, still only one level
        let mut progression = Progression::new();
        reward(&mut progression, Experience::new(1000, 1000, 1000));

        assert_eq!(progression.base_level, 2);
        assert_eq!(progression.stat_level, 2);
        assert_eq!(progression.job_level, 2);
        assert_eq!(progression.base_xp, 0);
        assert_eq!(progression.stat_xp, 0);
        assert_eq!(progression.job_xp, 0);
    }

    #[test]
    fn test_point_grants() {
        let mut progression = Progression::new();
        reward(&mut progression, Experience::new(0, 10, 0));
        assert_eq!(progression.attribute_points, 3);
        assert_eq!(progression.skill_points, 0);

        reward(&mut progression, Experience::new(0, 0, 10));
        assert_eq!(progression.attribute_points, 3);
        assert_eq!(progression.skill_points, 1);

        reward(&mut progression, Experience::new(10, 0, 0));
        assert_eq!(progression.attribute_points, 3);
        assert_eq!(progression.skill_points, 1);
    }

    #[test]
    fn test_capped_track_ignores_experience() {
        let mut progression = Progression {
            job_level: 60,
            ..Progression::default()
        };

        let level_ups = reward(&mut progression, Experience::new(0, 0, 500));
        assert!(!level_ups.job);
        assert_eq!(progression.job_level, 60);
        assert_eq!(progression.job_xp, 0);
        assert_eq!(progression.skill_points, 0);
    }

    #[test]
    fn test_reaching_cap() {
        let tables = ExperienceTables::shared_default();
        let mut progression = Progression {
            stat_level: 99,
            ..Progression::default()
        };
        let needed = tables.threshold(Track::Stat, 99).unwrap();

        reward(&mut progression, Experience::new(0, needed, 0));
        assert_eq!(progression.stat_level, 100);

        let config = ProgressionConfig::default();
        assert_eq!(progression.exp_needed_for_next(Track::Stat, &tables, &config.levels), None);
    }

    #[test]
    fn test_xp_saturates() {
        let mut progression = Progression {
            base_level: 50,
            base_xp: u32::MAX - 1,
            ..Progression::default()
        };
        reward(&mut progression, Experience::new(u32::MAX, 0, 0));
        // Threshold at level 50 is saturated too, so this levels up
        assert_eq!(progression.base_level, 51);
        assert_eq!(progression.base_xp, 0);
    }

    #[test]
    fn test_exp_needed_for_next() {
        let config = ProgressionConfig::default();
        let tables = ExperienceTables::shared_default();
        let mut progression = Progression::new();
        reward(&mut progression, Experience::new(4, 0, 0));

        assert_eq!(progression.exp_needed_for_next(Track::Base, &tables, &config.levels), Some(6));
        assert_eq!(progression.exp_needed_for_next(Track::Job, &tables, &config.levels), Some(10));
    }

    #[test]
    fn test_reward_money() {
        let mut progression = Progression::new();
        progression.reward_money(150);
        progression.reward_money(u64::MAX);
        assert_eq!(progression.money, u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_xp_stays_below_threshold(
            gains in prop::collection::vec((0u32..5000, 0u32..5000, 0u32..5000), 1..60)
        ) {
            let config = ProgressionConfig::default();
            let tables = ExperienceTables::shared_default();
            let mut progression = Progression::new();

            for (base, stat, job) in gains {
                let before = progression.clone();
                progression.reward_experience(
                    &Experience::new(base, stat, job),
                    &tables,
                    &config.levels,
                    &config.rewards,
                );

                for track in Track::all() {
                    let level = progression.level(*track);
                    let max = config.levels.max_level(*track);
                    prop_assert!(level <= max);
                    prop_assert!(level - before.level(*track) <= 1);
                    if level < max {
                        prop_assert!(progression.xp(*track) < tables.threshold(*track, level).unwrap());
                    }
                }
                prop_assert_eq!(
                    progression.attribute_points - before.attribute_points,
                    3 * (progression.stat_level - before.stat_level)
                );
                prop_assert_eq!(
                    progression.skill_points - before.skill_points,
                    progression.job_level - before.job_level
                );
            }
        }
    }
}
