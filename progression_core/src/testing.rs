//! Shared fixtures for unit tests

use item_core::{ItemId, ItemRegistry};
use std::path::Path;
use std::rc::Rc;

pub const SWORD: ItemId = ItemId(1001);
pub const DAGGER: ItemId = ItemId(1002);
pub const GREATSWORD: ItemId = ItemId(1003);
pub const BUCKLER: ItemId = ItemId(1004);
pub const CHAINMAIL: ItemId = ItemId(2001);
pub const CAP: ItemId = ItemId(2002);
pub const RUNED_BOOTS: ItemId = ItemId(2003);

const ITEMS: &str = r#"
[[weapons]]
id = 1001
name = "Short Sword"
item_level = "normal"
weapon_type = "one_hand_sword"
damage = 20

[[weapons]]
id = 1002
name = "Dagger"
item_level = "normal"
weapon_type = "dagger"
damage = 8

[[weapons]]
id = 1003
name = "Greatsword"
item_level = "epic"
weapon_type = "two_hand_sword"
damage = 60

[[weapons]]
id = 1004
name = "Buckler"
item_level = "normal"
weapon_type = "shield"
damage = 0

[[armors]]
id = 2001
name = "Chainmail"
item_level = "unique"
armor_type = "body"
armor = 12
marmor = 2

[[armors]]
id = 2002
name = "Leather Cap"
item_level = "normal"
armor_type = "helm"
armor = 3

[[armors]]
id = 2003
name = "Runed Boots"
item_level = "normal"
armor_type = "shoes"
armor = 2
runes = [{ attribute = "agility", level = 2 }]
"#;

pub fn registry() -> Rc<ItemRegistry> {
    let mut registry = ItemRegistry::new();
    registry
        .load_str(ITEMS, Path::new("fixtures.toml"))
        .expect("fixture items parse");
    Rc::new(registry)
}
