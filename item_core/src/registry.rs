use crate::config::{ArmorConfig, ItemFileConfig, WeaponConfig};
use crate::item::{ArmorData, Description, Item, ItemKind, ItemRef, WeaponData};
use crate::types::{ArmorType, EquipSlot, InstanceId, ItemId, ItemLevel, WeaponType};
use crate::{ConfigError, RegistryError};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::rc::Rc;

/// A registered item definition
#[derive(Debug, Clone)]
pub enum ItemTemplate {
    Weapon(WeaponConfig),
    Armor(ArmorConfig),
}

impl ItemTemplate {
    pub fn id(&self) -> ItemId {
        match self {
            ItemTemplate::Weapon(config) => ItemId(config.id),
            ItemTemplate::Armor(config) => ItemId(config.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ItemTemplate::Weapon(config) => &config.name,
            ItemTemplate::Armor(config) => &config.name,
        }
    }
}

/// Registry of item templates, loaded from TOML files
///
/// Always holds one empty item per equipment slot. Those are created once with
/// the registry, are never handed out by [`ItemRegistry::spawn`] and their ids
/// cannot be reused by templates.
#[derive(Debug)]
pub struct ItemRegistry {
    templates: HashMap<ItemId, ItemTemplate>,
    empty_items: Vec<ItemRef>,
    next_uid: Cell<u64>,
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRegistry {
    /// Create a registry holding only the empty slot items
    pub fn new() -> Self {
        let mut registry = ItemRegistry {
            templates: HashMap::new(),
            empty_items: Vec::with_capacity(EquipSlot::all().len()),
            next_uid: Cell::new(1),
        };

        for slot in EquipSlot::all() {
            let item = registry.build_empty_item(*slot);
            registry.empty_items.push(Rc::new(item));
        }

        registry
    }

    /// Load all item definitions from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Load definitions from a directory recursively
    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single definition file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        self.load_str(&content, path)
    }

    /// Parse and register definitions; `origin` is only used in error messages
    ///
    /// Either every template in `content` is registered or none is.
    pub fn load_str(&mut self, content: &str, origin: &Path) -> Result<(), ConfigError> {
        let config: ItemFileConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: origin.to_path_buf(),
        })?;

        let templates: Vec<ItemTemplate> = config
            .weapons
            .into_iter()
            .map(ItemTemplate::Weapon)
            .chain(config.armors.into_iter().map(ItemTemplate::Armor))
            .collect();
        let count = templates.len();

        let mut batch = HashSet::with_capacity(count);
        for template in &templates {
            let id = template.id();
            let checked = match self.check_id(id) {
                Ok(()) if !batch.insert(id) => Err(RegistryError::DuplicateItem(id)),
                other => other,
            };
            checked.map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                path: origin.to_path_buf(),
            })?;
        }

        for template in templates {
            self.templates.insert(template.id(), template);
        }

        tracing::debug!(path = %origin.display(), count, "loaded item templates");
        Ok(())
    }

    /// Register a template
    pub fn register(&mut self, template: ItemTemplate) -> Result<(), RegistryError> {
        let id = template.id();
        self.check_id(id)?;
        self.templates.insert(id, template);
        Ok(())
    }

    fn check_id(&self, id: ItemId) -> Result<(), RegistryError> {
        if EquipSlot::all().iter().any(|slot| slot.empty_id() == id) {
            return Err(RegistryError::ReservedId(id));
        }
        if self.templates.contains_key(&id) {
            return Err(RegistryError::DuplicateItem(id));
        }
        Ok(())
    }

    /// Get a template by ID
    pub fn get(&self, id: ItemId) -> Option<&ItemTemplate> {
        self.templates.get(&id)
    }

    /// Check if a template exists
    pub fn contains(&self, id: ItemId) -> bool {
        self.templates.contains_key(&id)
    }

    /// List all template IDs
    pub fn template_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.templates.keys().copied()
    }

    /// The canonical empty item of a slot
    pub fn empty_item(&self, slot: EquipSlot) -> ItemRef {
        Rc::clone(&self.empty_items[slot.index()])
    }

    /// Create a fresh instance of a template
    pub fn spawn(&self, id: ItemId) -> Result<ItemRef, RegistryError> {
        let template = self.get(id).ok_or(RegistryError::UnknownItem(id))?;

        let item = match template {
            ItemTemplate::Weapon(config) => {
                let data = WeaponData::new(config.item_level, config.weapon_type, config.damage)
                    .with_element(config.element);
                for rune in &config.runes {
                    data.base.add_rune(*rune);
                }
                Item::new(
                    self.next_uid(),
                    describe(id, &config.name, &config.description),
                    ItemKind::Weapon(data),
                )
            }
            ItemTemplate::Armor(config) => {
                let data = ArmorData::new(
                    config.item_level,
                    config.armor_type,
                    config.armor,
                    config.marmor,
                )
                .with_element(config.element);
                for rune in &config.runes {
                    data.base.add_rune(*rune);
                }
                Item::new(
                    self.next_uid(),
                    describe(id, &config.name, &config.description),
                    ItemKind::Armor(data),
                )
            }
        };

        Ok(Rc::new(item))
    }

    fn next_uid(&self) -> InstanceId {
        let uid = self.next_uid.get();
        self.next_uid.set(uid + 1);
        InstanceId(uid)
    }

    fn build_empty_item(&self, slot: EquipSlot) -> Item {
        let id = slot.empty_id();
        let kind = match slot {
            EquipSlot::RightHand | EquipSlot::LeftHand => {
                ItemKind::Weapon(WeaponData::new(ItemLevel::Normal, WeaponType::Hands, 0))
            }
            EquipSlot::Body => ItemKind::Armor(ArmorData::new(ItemLevel::Normal, ArmorType::Body, 0, 0)),
            EquipSlot::Helm => ItemKind::Armor(ArmorData::new(ItemLevel::Normal, ArmorType::Helm, 0, 0)),
            EquipSlot::Shoes => ItemKind::Armor(ArmorData::new(ItemLevel::Normal, ArmorType::Shoes, 0, 0)),
        };
        let name = match slot {
            EquipSlot::RightHand | EquipSlot::LeftHand => "Hands",
            EquipSlot::Body => "Simple Clothes",
            EquipSlot::Helm => "Hair",
            EquipSlot::Shoes => "Bare Feet",
        };

        Item::new(self.next_uid(), describe(id, name, ""), kind)
    }
}

fn describe(id: ItemId, name: &str, text: &str) -> Description {
    Description {
        id,
        name: name.to_string(),
        text: text.to_string(),
    }
}
