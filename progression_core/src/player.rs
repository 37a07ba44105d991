//! Player - a controllable character with progression and equipment
//!
//! Wraps the stat block, progression state, inventory, equipment and skills of
//! one character, applies cross-cutting side effects (HP/SP restore on base
//! level-up) and publishes a [`PlayerEvent`] for every observable change.

use crate::allocator;
use crate::config::ProgressionConfig;
use crate::equipment::{EquipOutcome, Equipment};
use crate::events::{EventBus, PlayerEvent, SubscriptionId};
use crate::experience::{Experience, ExperienceTables, Track};
use crate::inventory::{Backpack, Inventory};
use crate::progression::Progression;
use item_core::{EquipData, EquipSlot, ItemKind, ItemRef, ItemRegistry};
use stat_core::{Attribute, CharacterClass, Resource, Skill, SkillData, StatBlock};
use std::rc::Rc;
use std::sync::Arc;

/// A player character
#[derive(Debug)]
pub struct Player<I: Inventory = Backpack> {
    stats: StatBlock,
    progression: Progression,
    inventory: I,
    equipment: Equipment,
    skills: Vec<Skill>,
    events: EventBus,
    config: Arc<ProgressionConfig>,
    tables: Arc<ExperienceTables>,
}

impl Player<Backpack> {
    /// Create a level 1 player with the default rules and an empty backpack
    pub fn new(name: impl Into<String>, class: CharacterClass, registry: Rc<ItemRegistry>) -> Self {
        let config = Arc::new(ProgressionConfig::default());
        let inventory = Backpack::new(config.inventory.capacity);
        Player::with_parts(
            name,
            class,
            registry,
            config,
            ExperienceTables::shared_default(),
            inventory,
        )
    }

    /// Create a player using `config`, generating its experience tables
    pub fn with_config(
        name: impl Into<String>,
        class: CharacterClass,
        registry: Rc<ItemRegistry>,
        config: ProgressionConfig,
    ) -> Self {
        let tables = Arc::new(ExperienceTables::from_config(&config));
        let inventory = Backpack::new(config.inventory.capacity);
        Player::with_parts(name, class, registry, Arc::new(config), tables, inventory)
    }
}

impl<I: Inventory> Player<I> {
    pub fn with_parts(
        name: impl Into<String>,
        class: CharacterClass,
        registry: Rc<ItemRegistry>,
        config: Arc<ProgressionConfig>,
        tables: Arc<ExperienceTables>,
        inventory: I,
    ) -> Self {
        let mut stats = StatBlock::with_class(name, class);
        let equipment = Equipment::new(registry, &mut stats);
        Player {
            stats,
            progression: Progression::new(),
            inventory,
            equipment,
            skills: Vec::new(),
            events: EventBus::new(),
            config,
            tables,
        }
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.stats.id
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    /// Mutable stats for collaborators such as combat
    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Learn a skill at level 0; returns its index
    pub fn learn_skill(&mut self, data: Arc<SkillData>) -> usize {
        self.skills.push(Skill::new(data));
        self.skills.len() - 1
    }

    // === Observers ===

    pub fn subscribe(&mut self, listener: impl FnMut(&PlayerEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Progression ===

    /// Grant experience on all three tracks; returns whether the base level rose
    ///
    /// A base level-up raises the stat block's level and restores HP and SP to
    /// their maximum.
    pub fn reward_experience(&mut self, gain: Experience) -> bool {
        let before = self.progression.clone();
        let level_ups = self.progression.reward_experience(
            &gain,
            &self.tables,
            &self.config.levels,
            &self.config.rewards,
        );

        if level_ups.base {
            self.stats.set_level(self.progression.base_level);
            self.stats.restore_percentage_max(Resource::Hp, 100.0);
            self.stats.restore_percentage_max(Resource::Sp, 100.0);
        }

        for track in Track::reward_order() {
            let xp = self.progression.xp(*track);
            if xp != before.xp(*track) {
                self.events.publish(&PlayerEvent::ExperienceChanged { track: *track, xp });
            }
            if level_ups.get(*track) {
                self.events.publish(&PlayerEvent::LevelChanged {
                    track: *track,
                    level: self.progression.level(*track),
                });
            }
        }
        self.publish_point_changes(&before);

        level_ups.base
    }

    pub fn reward_money(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.progression.reward_money(amount);
        self.events.publish(&PlayerEvent::MoneyChanged {
            money: self.progression.money,
        });
    }

    pub fn exp_needed_for_next_base_level(&self) -> Option<u32> {
        self.exp_needed_for_next(Track::Base)
    }

    pub fn exp_needed_for_next_stat_level(&self) -> Option<u32> {
        self.exp_needed_for_next(Track::Stat)
    }

    pub fn exp_needed_for_next_job_level(&self) -> Option<u32> {
        self.exp_needed_for_next(Track::Job)
    }

    fn exp_needed_for_next(&self, track: Track) -> Option<u32> {
        self.progression
            .exp_needed_for_next(track, &self.tables, &self.config.levels)
    }

    // === Points ===

    pub fn increase_attribute(&mut self, attribute: Attribute) -> bool {
        let spent = allocator::increase_attribute(
            &mut self.progression,
            &mut self.stats,
            attribute,
            &self.config.levels,
        );
        if spent {
            self.events.publish(&PlayerEvent::AttributeChanged {
                attribute,
                value: self.stats.base_attribute(attribute),
            });
            self.events.publish(&PlayerEvent::AttributePointsChanged {
                points: self.progression.attribute_points,
            });
        }
        spent
    }

    pub fn increase_skill_level(&mut self, index: usize) -> bool {
        let spent = allocator::increase_skill_level(
            &mut self.progression,
            &mut self.stats,
            &mut self.skills,
            index,
            &self.config.levels,
        );
        if spent {
            self.events.publish(&PlayerEvent::SkillLevelChanged {
                index,
                level: self.skills[index].level,
            });
            self.events.publish(&PlayerEvent::SkillPointsChanged {
                points: self.progression.skill_points,
            });
        }
        spent
    }

    // === Equipment ===

    pub fn equip_weapon(&mut self, weapon: &ItemRef) -> EquipOutcome {
        let before = self.occupants();
        let outcome = self
            .equipment
            .equip_weapon(weapon, &mut self.inventory, &mut self.stats);
        self.publish_equipment_changes(&before);
        outcome
    }

    pub fn equip_armor(&mut self, armor: &ItemRef) -> EquipOutcome {
        let before = self.occupants();
        let outcome = self
            .equipment
            .equip_armor(armor, &mut self.inventory, &mut self.stats);
        self.publish_equipment_changes(&before);
        outcome
    }

    /// Equip a weapon or armor, whichever `item` is
    pub fn equip(&mut self, item: &ItemRef) -> EquipOutcome {
        match item.kind {
            ItemKind::Weapon(_) => self.equip_weapon(item),
            ItemKind::Armor(_) => self.equip_armor(item),
        }
    }

    pub fn unequip_item(&mut self, slot: EquipSlot) -> bool {
        let before = self.occupants();
        let done = self
            .equipment
            .unequip_item(slot, &mut self.inventory, &mut self.stats);
        self.publish_equipment_changes(&before);
        done
    }

    pub fn is_free(&self, slot: EquipSlot) -> bool {
        self.equipment.is_free(slot)
    }

    pub fn equipped(&self, slot: EquipSlot) -> &ItemRef {
        self.equipment.equipped(slot)
    }

    pub fn right_weapon(&self) -> &ItemRef {
        self.equipment.right_weapon()
    }

    pub fn left_weapon(&self) -> &ItemRef {
        self.equipment.left_weapon()
    }

    /// Refine, socket or re-element an equipped item; see [`Equipment::modify_equipped`]
    pub fn modify_equipped<F>(&mut self, slot: EquipSlot, change: F) -> bool
    where
        F: FnOnce(&EquipData),
    {
        self.equipment.modify_equipped(slot, &mut self.stats, change)
    }

    fn occupants(&self) -> [ItemRef; 5] {
        std::array::from_fn(|i| Rc::clone(self.equipment.equipped(EquipSlot::all()[i])))
    }

    fn publish_equipment_changes(&mut self, before: &[ItemRef; 5]) {
        for slot in EquipSlot::all() {
            let item = self.equipment.equipped(*slot);
            if !Rc::ptr_eq(item, &before[slot.index()]) {
                let event = PlayerEvent::EquipmentChanged {
                    slot: *slot,
                    item: item.id(),
                };
                self.events.publish(&event);
            }
        }
    }

    fn publish_point_changes(&mut self, before: &Progression) {
        if self.progression.attribute_points != before.attribute_points {
            self.events.publish(&PlayerEvent::AttributePointsChanged {
                points: self.progression.attribute_points,
            });
        }
        if self.progression.skill_points != before.skill_points {
            self.events.publish(&PlayerEvent::SkillPointsChanged {
                points: self.progression.skill_points,
            });
        }
    }
}
