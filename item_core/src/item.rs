use crate::types::*;
use stat_core::{Stat, StatBlock};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared handle to an item instance
///
/// A two-handed weapon sits in both hand slots as the same instance; compare
/// handles with `Rc::ptr_eq` or by `uid`.
pub type ItemRef = Rc<Item>;

/// Side effects an item applies to its wearer
///
/// Both sides recompute the bonus from the item's current attachments:
/// `on_unequip` subtracts exactly what `on_equip` added as long as the
/// attachments did not change in between.
pub trait Equippable {
    fn on_equip(&self, wearer: &mut StatBlock);
    fn on_unequip(&self, wearer: &mut StatBlock);
}

/// Mutable state attached to an equippable item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attachments {
    pub refinement: u32,
    pub element: Element,
    pub runes: Vec<Rune>,
}

impl Attachments {
    fn apply_runes(&self, wearer: &mut StatBlock, sign: i32) {
        for rune in &self.runes {
            wearer.add_bonus_attribute(rune.attribute, sign * rune.level);
        }
    }
}

/// Refinement-scaled bonus: `refinement * (refinement > 2 ? bonus + extra : bonus)`
fn refinement_bonus(item_level: ItemLevel, refinement: u32, extra: i32) -> i32 {
    let per_level = if refinement > 2 {
        item_level.bonus() + extra
    } else {
        item_level.bonus()
    };
    refinement as i32 * per_level
}

/// Base data shared by weapons and armor: tier plus mutable attachments
///
/// Attachments are locked while the item is worn, since unequipping must
/// remove exactly what equipping added. Worn items are changed through
/// `Equipment::modify_equipped`, which takes the bonuses off first.
#[derive(Debug, Default)]
pub struct EquipData {
    pub item_level: ItemLevel,
    attachments: RefCell<Attachments>,
    // Outstanding on_equip calls; sentinels are worn by many players at once
    wearers: Cell<u32>,
}

impl EquipData {
    pub fn new(item_level: ItemLevel) -> Self {
        EquipData {
            item_level,
            attachments: RefCell::new(Attachments::default()),
            wearers: Cell::new(0),
        }
    }

    /// Whether some wearer currently carries this item's bonuses
    pub fn is_worn(&self) -> bool {
        self.wearers.get() > 0
    }

    /// Snapshot of the current attachments
    pub fn attachments(&self) -> Attachments {
        self.attachments.borrow().clone()
    }

    pub fn refinement(&self) -> u32 {
        self.attachments.borrow().refinement
    }

    /// Raise the refinement level by one; false once at the tier's maximum or while worn
    pub fn refine(&self) -> bool {
        if self.is_worn() {
            return false;
        }
        let mut attachments = self.attachments.borrow_mut();
        if attachments.refinement >= self.item_level.max_refinement() {
            return false;
        }
        attachments.refinement += 1;
        true
    }

    pub fn element(&self) -> Element {
        self.attachments.borrow().element
    }

    /// False while worn
    pub fn set_element(&self, element: Element) -> bool {
        if self.is_worn() {
            return false;
        }
        self.attachments.borrow_mut().element = element;
        true
    }

    /// Socket a rune; false while worn
    pub fn add_rune(&self, rune: Rune) -> bool {
        if self.is_worn() {
            return false;
        }
        self.attachments.borrow_mut().runes.push(rune);
        true
    }

    pub fn runes(&self) -> Vec<Rune> {
        self.attachments.borrow().runes.clone()
    }

    fn apply_runes(&self, wearer: &mut StatBlock, sign: i32) {
        self.attachments.borrow().apply_runes(wearer, sign);
    }

    fn put_on(&self, wearer: &mut StatBlock) {
        self.apply_runes(wearer, 1);
        self.wearers.set(self.wearers.get() + 1);
    }

    fn take_off(&self, wearer: &mut StatBlock) {
        self.apply_runes(wearer, -1);
        self.wearers.set(self.wearers.get().saturating_sub(1));
    }
}

/// Weapon-specific data
#[derive(Debug)]
pub struct WeaponData {
    pub base: EquipData,
    pub weapon_type: WeaponType,
    pub pure_damage: i32,
}

impl WeaponData {
    pub fn new(item_level: ItemLevel, weapon_type: WeaponType, pure_damage: i32) -> Self {
        WeaponData {
            base: EquipData::new(item_level),
            weapon_type,
            pure_damage,
        }
    }

    /// Damage including refinement
    pub fn full_damage(&self) -> i32 {
        self.pure_damage + refinement_bonus(self.base.item_level, self.base.refinement(), 5)
    }

    pub fn with_rune(self, rune: Rune) -> Self {
        self.base.add_rune(rune);
        self
    }

    pub fn with_element(self, element: Element) -> Self {
        self.base.set_element(element);
        self
    }
}

impl Equippable for WeaponData {
    fn on_equip(&self, wearer: &mut StatBlock) {
        self.base.put_on(wearer);
        wearer.add_bonus_stat(Stat::Atk, self.full_damage() as f64);
    }

    fn on_unequip(&self, wearer: &mut StatBlock) {
        self.base.take_off(wearer);
        wearer.add_bonus_stat(Stat::Atk, -(self.full_damage() as f64));
    }
}

/// Armor-specific data
#[derive(Debug)]
pub struct ArmorData {
    pub base: EquipData,
    pub armor_type: ArmorType,
    pub armor: i32,
    pub marmor: i32,
}

impl ArmorData {
    pub fn new(item_level: ItemLevel, armor_type: ArmorType, armor: i32, marmor: i32) -> Self {
        ArmorData {
            base: EquipData::new(item_level),
            armor_type,
            armor,
            marmor,
        }
    }

    /// Armor including refinement
    pub fn full_armor(&self) -> i32 {
        self.armor + refinement_bonus(self.base.item_level, self.base.refinement(), 1)
    }

    /// Magic armor including refinement
    pub fn full_marmor(&self) -> i32 {
        self.marmor + refinement_bonus(self.base.item_level, self.base.refinement(), 1)
    }

    pub fn with_rune(self, rune: Rune) -> Self {
        self.base.add_rune(rune);
        self
    }

    pub fn with_element(self, element: Element) -> Self {
        self.base.set_element(element);
        self
    }
}

impl Equippable for ArmorData {
    fn on_equip(&self, wearer: &mut StatBlock) {
        self.base.put_on(wearer);
        wearer.add_bonus_stat(Stat::Arm, self.full_armor() as f64);
        wearer.add_bonus_stat(Stat::Marm, self.full_marmor() as f64);
    }

    fn on_unequip(&self, wearer: &mut StatBlock) {
        self.base.take_off(wearer);
        wearer.add_bonus_stat(Stat::Arm, -(self.full_armor() as f64));
        wearer.add_bonus_stat(Stat::Marm, -(self.full_marmor() as f64));
    }
}

/// Name and template id of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub id: ItemId,
    pub name: String,
    pub text: String,
}

/// Weapon or armor payload
#[derive(Debug)]
pub enum ItemKind {
    Weapon(WeaponData),
    Armor(ArmorData),
}

/// A single item instance
#[derive(Debug)]
pub struct Item {
    pub uid: InstanceId,
    pub description: Description,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(uid: InstanceId, description: Description, kind: ItemKind) -> Self {
        Item {
            uid,
            description,
            kind,
        }
    }

    /// Template id
    pub fn id(&self) -> ItemId {
        self.description.id
    }

    pub fn name(&self) -> &str {
        &self.description.name
    }

    pub fn as_weapon(&self) -> Option<&WeaponData> {
        match &self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            ItemKind::Armor(_) => None,
        }
    }

    pub fn as_armor(&self) -> Option<&ArmorData> {
        match &self.kind {
            ItemKind::Armor(armor) => Some(armor),
            ItemKind::Weapon(_) => None,
        }
    }

    pub fn is_two_handed(&self) -> bool {
        self.as_weapon()
            .is_some_and(|weapon| weapon.weapon_type.is_two_handed())
    }

    /// Tier and attachments, whichever kind this is
    pub fn equip_data(&self) -> &EquipData {
        match &self.kind {
            ItemKind::Weapon(weapon) => &weapon.base,
            ItemKind::Armor(armor) => &armor.base,
        }
    }
}

impl Equippable for Item {
    fn on_equip(&self, wearer: &mut StatBlock) {
        match &self.kind {
            ItemKind::Weapon(weapon) => weapon.on_equip(wearer),
            ItemKind::Armor(armor) => armor.on_equip(wearer),
        }
    }

    fn on_unequip(&self, wearer: &mut StatBlock) {
        match &self.kind {
            ItemKind::Weapon(weapon) => weapon.on_unequip(wearer),
            ItemKind::Armor(armor) => armor.on_unequip(wearer),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.equip_data();
        writeln!(f, "══ {} ══", self.description.name)?;
        writeln!(f, "{} ({})", data.item_level, data.element())?;

        match &self.kind {
            ItemKind::Weapon(weapon) => {
                writeln!(f, "  Damage: {}", weapon.full_damage())?;
            }
            ItemKind::Armor(armor) => {
                writeln!(f, "  Armor: {}", armor.full_armor())?;
                writeln!(f, "  Magic Armor: {}", armor.full_marmor())?;
            }
        }

        if data.refinement() > 0 {
            writeln!(f, "  Refinement: +{}", data.refinement())?;
        }
        for rune in data.runes() {
            writeln!(f, "  Rune: {}", rune)?;
        }

        if !self.description.text.is_empty() {
            write!(f, "{}", self.description.text)?;
        }

        Ok(())
    }
}
