//! Equipment slots and the equip/unequip transitions
//!
//! Every slot always holds an item: either a real one or the slot's sentinel
//! empty item from the [`ItemRegistry`]. A two-handed weapon occupies both hand
//! slots with the same instance.

use crate::inventory::Inventory;
use item_core::{EquipData, EquipSlot, Equippable, ItemRef, ItemRegistry};
use stat_core::StatBlock;
use std::rc::Rc;
use tracing::{debug, trace};

/// Result of an equip request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    Equipped,
    /// The inventory cannot take back the items the equip would displace
    Declined,
    /// The item already occupies a slot
    AlreadyEquipped,
    /// A weapon was passed as armor or the other way around
    WrongKind,
}

impl EquipOutcome {
    pub fn is_equipped(&self) -> bool {
        matches!(self, EquipOutcome::Equipped)
    }
}

/// Slot to item mapping of one wearer
#[derive(Debug)]
pub struct Equipment {
    slots: [ItemRef; 5],
    registry: Rc<ItemRegistry>,
}

impl Equipment {
    /// Fill every slot with its sentinel and apply the sentinels to the wearer
    pub fn new(registry: Rc<ItemRegistry>, wearer: &mut StatBlock) -> Self {
        let slots: [ItemRef; 5] = std::array::from_fn(|i| registry.empty_item(EquipSlot::all()[i]));
        for item in &slots {
            item.on_equip(wearer);
        }
        Equipment { slots, registry }
    }

    pub fn equipped(&self, slot: EquipSlot) -> &ItemRef {
        &self.slots[slot.index()]
    }

    pub fn right_weapon(&self) -> &ItemRef {
        self.equipped(EquipSlot::RightHand)
    }

    pub fn left_weapon(&self) -> &ItemRef {
        self.equipped(EquipSlot::LeftHand)
    }

    /// True when the slot holds its sentinel empty item
    pub fn is_free(&self, slot: EquipSlot) -> bool {
        self.equipped(slot).id() == slot.empty_id()
    }

    /// Whether this exact instance occupies any slot
    pub fn is_equipped(&self, item: &ItemRef) -> bool {
        self.slots.iter().any(|held| Rc::ptr_eq(held, item))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &ItemRef)> {
        EquipSlot::all().iter().map(|slot| (*slot, self.equipped(*slot)))
    }

    /// Equip a weapon, taking it out of the inventory if it is there
    ///
    /// Two-handed weapons take both hands. Shields, and any one-handed weapon
    /// while the right hand is busy, go to the left hand; everything else goes
    /// to the right hand. The equip is declined, with the weapon handed back to
    /// the inventory, when the inventory cannot hold every item it displaces.
    /// A two-handed weapon is also declined when both hands are busy and the
    /// inventory has exactly one free slot, even if one two-hander fills both.
    pub fn equip_weapon(
        &mut self,
        weapon: &ItemRef,
        inventory: &mut dyn Inventory,
        wearer: &mut StatBlock,
    ) -> EquipOutcome {
        let Some(data) = weapon.as_weapon() else {
            return EquipOutcome::WrongKind;
        };
        if self.is_equipped(weapon) {
            return EquipOutcome::AlreadyEquipped;
        }

        let targets: &[EquipSlot] = if data.weapon_type.is_two_handed() {
            &[EquipSlot::RightHand, EquipSlot::LeftHand]
        } else if data.weapon_type.is_shield() || !self.is_free(EquipSlot::RightHand) {
            &[EquipSlot::LeftHand]
        } else {
            &[EquipSlot::RightHand]
        };

        self.equip_into(weapon, targets, inventory, wearer)
    }

    /// Equip armor into the slot of its armor type
    pub fn equip_armor(
        &mut self,
        armor: &ItemRef,
        inventory: &mut dyn Inventory,
        wearer: &mut StatBlock,
    ) -> EquipOutcome {
        let Some(data) = armor.as_armor() else {
            return EquipOutcome::WrongKind;
        };
        if self.is_equipped(armor) {
            return EquipOutcome::AlreadyEquipped;
        }

        let slot = data.armor_type.slot();
        self.equip_into(armor, &[slot], inventory, wearer)
    }

    /// Return the item in `slot` to the inventory
    ///
    /// No-op when the slot is already free or the inventory is full.
    pub fn unequip_item(
        &mut self,
        slot: EquipSlot,
        inventory: &mut dyn Inventory,
        wearer: &mut StatBlock,
    ) -> bool {
        if self.is_free(slot) || inventory.is_full() {
            return false;
        }

        let item = Rc::clone(self.equipped(slot));
        if item.is_two_handed() {
            if let Some(other) = slot.other_hand() {
                self.slots[other.index()] = self.registry.empty_item(other);
            }
        }

        item.on_unequip(wearer);
        trace!(%slot, item = %item.name(), "unequipped");
        inventory.add_item(item);
        self.slots[slot.index()] = self.registry.empty_item(slot);
        true
    }

    /// Change the attachments of an equipped item without unbalancing the wearer
    ///
    /// The item's bonuses are removed, `change` runs, then the bonuses are
    /// applied again from the new attachments. Returns false for free slots.
    pub fn modify_equipped<F>(&mut self, slot: EquipSlot, wearer: &mut StatBlock, change: F) -> bool
    where
        F: FnOnce(&EquipData),
    {
        if self.is_free(slot) {
            return false;
        }

        let item = Rc::clone(self.equipped(slot));
        item.on_unequip(wearer);
        change(item.equip_data());
        item.on_equip(wearer);
        true
    }

    fn equip_into(
        &mut self,
        item: &ItemRef,
        targets: &[EquipSlot],
        inventory: &mut dyn Inventory,
        wearer: &mut StatBlock,
    ) -> EquipOutcome {
        let from_inventory = inventory.remove_item(item);

        let displaced = self.displaced(targets);
        let hands_busy = !self.is_free(EquipSlot::RightHand) && !self.is_free(EquipSlot::LeftHand);
        let one_slot_left = inventory.free_slots() == 1;
        if displaced > inventory.free_slots() || (item.is_two_handed() && hands_busy && one_slot_left) {
            if from_inventory {
                inventory.add_item(Rc::clone(item));
            }
            debug!(
                item = %item.name(),
                displaced,
                free = inventory.free_slots(),
                "equip declined: inventory cannot hold displaced items"
            );
            return EquipOutcome::Declined;
        }

        for slot in targets {
            self.unequip_item(*slot, inventory, wearer);
        }
        for slot in targets {
            self.slots[slot.index()] = Rc::clone(item);
        }
        item.on_equip(wearer);
        trace!(item = %item.name(), slots = targets.len(), "equipped");

        EquipOutcome::Equipped
    }

    /// Number of distinct real items occupying `targets`
    fn displaced(&self, targets: &[EquipSlot]) -> usize {
        let mut occupants: Vec<&ItemRef> = Vec::with_capacity(targets.len());
        for slot in targets {
            if self.is_free(*slot) {
                continue;
            }
            let item = self.equipped(*slot);
            if !occupants.iter().any(|seen| Rc::ptr_eq(seen, item)) {
                occupants.push(item);
            }
        }
        occupants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Backpack;
    use crate::testing::*;
    use stat_core::{Attribute, Stat};

    struct Rig {
        registry: Rc<ItemRegistry>,
        equipment: Equipment,
        bag: Backpack,
        wearer: StatBlock,
    }

    fn rig() -> Rig {
        let registry = registry();
        let mut wearer = StatBlock::new();
        let equipment = Equipment::new(Rc::clone(&registry), &mut wearer);
        Rig {
            registry,
            equipment,
            bag: Backpack::new(30),
            wearer,
        }
    }

    impl Rig {
        fn pick_up(&mut self, id: item_core::ItemId) -> ItemRef {
            let item = self.registry.spawn(id).unwrap();
            assert!(self.bag.add_item(Rc::clone(&item)));
            item
        }

        fn fill_bag_to(&mut self, size: usize) {
            while self.bag.size() < size {
                self.pick_up(CAP);
            }
        }

        fn equip_weapon(&mut self, item: &ItemRef) -> EquipOutcome {
            self.equipment.equip_weapon(item, &mut self.bag, &mut self.wearer)
        }

        fn unequip(&mut self, slot: EquipSlot) -> bool {
            self.equipment.unequip_item(slot, &mut self.bag, &mut self.wearer)
        }
    }

    #[test]
    fn test_new_equipment_is_all_sentinels() {
        let rig = rig();
        for (slot, item) in rig.equipment.iter() {
            assert!(rig.equipment.is_free(slot));
            assert_eq!(item.id(), slot.empty_id());
        }
        assert!(rig.wearer.bonus_stat(Stat::Atk).abs() < f64::EPSILON);
    }

    #[test]
    fn test_equip_unequip_round_trip() {
        let mut rig = rig();
        let before: Vec<f64> = Stat::all().iter().map(|s| rig.wearer.total_stat(*s)).collect();
        let sword = rig.pick_up(SWORD);

        assert_eq!(rig.equip_weapon(&sword), EquipOutcome::Equipped);
        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &sword));
        assert!(!rig.bag.contains(&sword));
        assert!((rig.wearer.bonus_stat(Stat::Atk) - 20.0).abs() < f64::EPSILON);

        assert!(rig.unequip(EquipSlot::RightHand));
        assert!(rig.equipment.is_free(EquipSlot::RightHand));
        assert!(rig.bag.contains(&sword));

        let after: Vec<f64> = Stat::all().iter().map(|s| rig.wearer.total_stat(*s)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_second_one_hander_goes_left() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        let dagger = rig.pick_up(DAGGER);

        rig.equip_weapon(&sword);
        rig.equip_weapon(&dagger);

        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &sword));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &dagger));
        assert!((rig.wearer.bonus_stat(Stat::Atk) - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_third_one_hander_replaces_left() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        let dagger = rig.pick_up(DAGGER);
        let spare = rig.pick_up(DAGGER);

        rig.equip_weapon(&sword);
        rig.equip_weapon(&dagger);
        rig.equip_weapon(&spare);

        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &sword));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &spare));
        assert!(rig.bag.contains(&dagger));
    }

    #[test]
    fn test_shield_goes_left_even_with_free_right() {
        let mut rig = rig();
        let buckler = rig.pick_up(BUCKLER);

        assert_eq!(rig.equip_weapon(&buckler), EquipOutcome::Equipped);
        assert!(rig.equipment.is_free(EquipSlot::RightHand));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &buckler));
    }

    #[test]
    fn test_two_hander_occupies_both_hands() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        let dagger = rig.pick_up(DAGGER);
        let greatsword = rig.pick_up(GREATSWORD);
        rig.equip_weapon(&sword);
        rig.equip_weapon(&dagger);

        assert_eq!(rig.equip_weapon(&greatsword), EquipOutcome::Equipped);

        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &greatsword));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &greatsword));
        assert!(rig.bag.contains(&sword));
        assert!(rig.bag.contains(&dagger));
        // Applied once, not per hand
        assert!((rig.wearer.bonus_stat(Stat::Atk) - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unequip_either_hand_clears_both() {
        for slot in [EquipSlot::RightHand, EquipSlot::LeftHand] {
            let mut rig = rig();
            let greatsword = rig.pick_up(GREATSWORD);
            rig.equip_weapon(&greatsword);

            assert!(rig.unequip(slot));

            assert!(rig.equipment.is_free(EquipSlot::RightHand));
            assert!(rig.equipment.is_free(EquipSlot::LeftHand));
            assert_eq!(rig.bag.size(), 1);
            assert!(rig.wearer.bonus_stat(Stat::Atk).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_one_hander_replaces_two_hander() {
        let mut rig = rig();
        let greatsword = rig.pick_up(GREATSWORD);
        let sword = rig.pick_up(SWORD);
        rig.equip_weapon(&greatsword);

        assert_eq!(rig.equip_weapon(&sword), EquipOutcome::Equipped);

        // Right hand was busy, so the sword lands left and the two-hander leaves both
        assert!(rig.equipment.is_free(EquipSlot::RightHand));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &sword));
        assert!(rig.bag.contains(&greatsword));
        assert!((rig.wearer.bonus_stat(Stat::Atk) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_hander_declined_with_one_free_slot() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        let dagger = rig.pick_up(DAGGER);
        rig.equip_weapon(&sword);
        rig.equip_weapon(&dagger);
        let greatsword = rig.pick_up(GREATSWORD);
        rig.fill_bag_to(30);
        let atk_before = rig.wearer.total_stat(Stat::Atk);

        assert_eq!(rig.equip_weapon(&greatsword), EquipOutcome::Declined);

        assert_eq!(rig.bag.size(), 30);
        assert!(rig.bag.contains(&greatsword));
        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &sword));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &dagger));
        assert!((rig.wearer.total_stat(Stat::Atk) - atk_before).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_hander_from_outside_declined_with_29_items() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        let dagger = rig.pick_up(DAGGER);
        rig.equip_weapon(&sword);
        rig.equip_weapon(&dagger);
        rig.fill_bag_to(29);
        let greatsword = rig.registry.spawn(GREATSWORD).unwrap();

        assert_eq!(rig.equip_weapon(&greatsword), EquipOutcome::Declined);

        assert_eq!(rig.bag.size(), 29);
        assert!(!rig.bag.contains(&greatsword));
        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &sword));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &dagger));
    }

    #[test]
    fn test_two_hander_over_two_hander_declined_with_one_free_slot() {
        let mut rig = rig();
        let first = rig.pick_up(GREATSWORD);
        rig.equip_weapon(&first);
        let second = rig.pick_up(GREATSWORD);
        rig.fill_bag_to(30);
        let atk_before = rig.wearer.total_stat(Stat::Atk);

        assert_eq!(rig.equip_weapon(&second), EquipOutcome::Declined);

        assert_eq!(rig.bag.size(), 30);
        assert!(rig.bag.contains(&second));
        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &first));
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &first));
        assert!((rig.wearer.total_stat(Stat::Atk) - atk_before).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_hander_over_two_hander_with_room() {
        let mut rig = rig();
        let first = rig.pick_up(GREATSWORD);
        rig.equip_weapon(&first);
        let second = rig.pick_up(GREATSWORD);
        rig.fill_bag_to(29);

        assert_eq!(rig.equip_weapon(&second), EquipOutcome::Equipped);
        assert!(Rc::ptr_eq(rig.equipment.left_weapon(), &second));
        assert!(rig.bag.contains(&first));
        assert_eq!(rig.bag.size(), 29);
    }

    #[test]
    fn test_two_hander_accepted_with_two_free_slots() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        let dagger = rig.pick_up(DAGGER);
        rig.equip_weapon(&sword);
        rig.equip_weapon(&dagger);
        let greatsword = rig.pick_up(GREATSWORD);
        rig.fill_bag_to(29);

        assert_eq!(rig.equip_weapon(&greatsword), EquipOutcome::Equipped);
        assert_eq!(rig.bag.size(), 30);
        assert!(rig.bag.contains(&sword));
        assert!(rig.bag.contains(&dagger));
    }

    #[test]
    fn test_swap_with_full_inventory() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        rig.equip_weapon(&sword);
        let greatsword = rig.pick_up(GREATSWORD);
        rig.fill_bag_to(30);

        // Taking the greatsword out frees the slot the sword goes back into
        assert_eq!(rig.equip_weapon(&greatsword), EquipOutcome::Equipped);
        assert!(rig.bag.contains(&sword));
        assert_eq!(rig.bag.size(), 30);
    }

    #[test]
    fn test_unequip_free_slot_is_noop() {
        let mut rig = rig();
        assert!(!rig.unequip(EquipSlot::Helm));
        assert_eq!(rig.bag.size(), 0);
    }

    #[test]
    fn test_unequip_with_full_inventory_is_noop() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        rig.equip_weapon(&sword);
        rig.fill_bag_to(30);
        let atk = rig.wearer.total_stat(Stat::Atk);

        assert!(!rig.unequip(EquipSlot::RightHand));
        assert!(Rc::ptr_eq(rig.equipment.right_weapon(), &sword));
        assert!((rig.wearer.total_stat(Stat::Atk) - atk).abs() < f64::EPSILON);
    }

    #[test]
    fn test_armor_maps_to_its_slot() {
        let mut rig = rig();
        let mail = rig.pick_up(CHAINMAIL);
        let cap = rig.pick_up(CAP);
        let boots = rig.pick_up(RUNED_BOOTS);

        for armor in [&mail, &cap, &boots] {
            let outcome = rig.equipment.equip_armor(armor, &mut rig.bag, &mut rig.wearer);
            assert_eq!(outcome, EquipOutcome::Equipped);
        }

        assert!(Rc::ptr_eq(rig.equipment.equipped(EquipSlot::Body), &mail));
        assert!(Rc::ptr_eq(rig.equipment.equipped(EquipSlot::Helm), &cap));
        assert!(Rc::ptr_eq(rig.equipment.equipped(EquipSlot::Shoes), &boots));
        assert!((rig.wearer.bonus_stat(Stat::Arm) - 17.0).abs() < f64::EPSILON);
        assert!((rig.wearer.bonus_stat(Stat::Marm) - 2.0).abs() < f64::EPSILON);
        assert_eq!(rig.wearer.bonus_attribute(Attribute::Agility), 2);
        assert_eq!(rig.bag.size(), 0);
    }

    #[test]
    fn test_armor_replaces_previous() {
        let mut rig = rig();
        let old_cap = rig.pick_up(CAP);
        let new_cap = rig.pick_up(CAP);

        rig.equipment.equip_armor(&old_cap, &mut rig.bag, &mut rig.wearer);
        rig.equipment.equip_armor(&new_cap, &mut rig.bag, &mut rig.wearer);

        assert!(Rc::ptr_eq(rig.equipment.equipped(EquipSlot::Helm), &new_cap));
        assert!(rig.bag.contains(&old_cap));
        assert!((rig.wearer.bonus_stat(Stat::Arm) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_kind_and_already_equipped() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        let cap = rig.pick_up(CAP);

        assert_eq!(rig.equip_weapon(&cap), EquipOutcome::WrongKind);
        assert_eq!(
            rig.equipment.equip_armor(&sword, &mut rig.bag, &mut rig.wearer),
            EquipOutcome::WrongKind
        );
        assert_eq!(rig.bag.size(), 2);

        rig.equip_weapon(&sword);
        assert_eq!(rig.equip_weapon(&sword), EquipOutcome::AlreadyEquipped);
        assert_eq!(rig.bag.size(), 1);
        assert!((rig.wearer.bonus_stat(Stat::Atk) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_worn_item_rejects_direct_changes() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        rig.equip_weapon(&sword);

        let worn = Rc::clone(rig.equipment.right_weapon());
        assert!(!worn.equip_data().refine());
        assert!(!worn.equip_data().add_rune(item_core::Rune::new(Attribute::Strength, 4)));
        assert!((rig.wearer.bonus_stat(Stat::Atk) - 20.0).abs() < f64::EPSILON);

        rig.unequip(EquipSlot::RightHand);
        assert!(rig.wearer.bonus_stat(Stat::Atk).abs() < f64::EPSILON);
        assert_eq!(rig.wearer.bonus_attribute(Attribute::Strength), 0);
    }

    #[test]
    fn test_modify_equipped_rebalances_bonuses() {
        let mut rig = rig();
        let sword = rig.pick_up(SWORD);
        rig.equip_weapon(&sword);

        let changed = rig.equipment.modify_equipped(EquipSlot::RightHand, &mut rig.wearer, |data| {
            for _ in 0..3 {
                data.refine();
            }
        });
        assert!(changed);
        // 20 + 3 * (3 + 5)
        assert!((rig.wearer.bonus_stat(Stat::Atk) - 44.0).abs() < f64::EPSILON);

        rig.unequip(EquipSlot::RightHand);
        assert!(rig.wearer.bonus_stat(Stat::Atk).abs() < f64::EPSILON);
        assert!(!rig.equipment.modify_equipped(EquipSlot::Helm, &mut rig.wearer, |_| {}));
    }
}
