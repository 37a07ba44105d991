//! Player change notifications
//!
//! Listeners run synchronously, in subscription order, after the state they
//! describe has been committed.

use crate::experience::Track;
use item_core::{EquipSlot, ItemId};
use serde::{Deserialize, Serialize};
use stat_core::Attribute;

/// Something observable changed on a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerEvent {
    ExperienceChanged { track: Track, xp: u32 },
    LevelChanged { track: Track, level: u32 },
    AttributePointsChanged { points: u32 },
    SkillPointsChanged { points: u32 },
    AttributeChanged { attribute: Attribute, value: u32 },
    SkillLevelChanged { index: usize, level: u32 },
    MoneyChanged { money: u64 },
    EquipmentChanged { slot: EquipSlot, item: ItemId },
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlayerEvent)>;

/// Synchronous publish/subscribe hub for [`PlayerEvent`]s
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PlayerEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false for unknown or already removed subscriptions
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, event: &PlayerEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
