//! Shared fixture: a small home with locations, equipment and points

#![allow(dead_code)]

use std::sync::Arc;

use sem_classifier::Semantics;
use sem_core::{ItemName, Locale};
use sem_registries::{ItemEntry, ItemRegistry, MemoryTagCatalog, TagRegistry};

pub struct Home {
    pub tags: Arc<TagRegistry>,
    pub items: Arc<ItemRegistry>,
    pub semantics: Semantics,
}

pub fn name(s: &str) -> ItemName {
    ItemName::new(s).unwrap()
}

pub fn names(list: &[&str]) -> Vec<ItemName> {
    list.iter().map(|s| name(s)).collect()
}

pub fn sorted(mut list: Vec<ItemName>) -> Vec<ItemName> {
    list.sort();
    list
}

fn group(item: &str, tags: &[&str], groups: &[&str]) -> ItemEntry {
    ItemEntry::group(name(item))
        .with_tags(tags.iter().copied())
        .with_groups(names(groups))
}

fn item(item: &str, item_type: &str, tags: &[&str], groups: &[&str]) -> ItemEntry {
    ItemEntry::new(name(item), item_type)
        .with_tags(tags.iter().copied())
        .with_groups(names(groups))
}

/// Empty registries over the built-in catalog
pub fn empty() -> Home {
    let tags = Arc::new(TagRegistry::new(
        Arc::new(MemoryTagCatalog::with_builtin()),
        Locale::english(),
    ));
    let items = Arc::new(ItemRegistry::new());
    let semantics = Semantics::new(tags.clone(), items.clone());
    Home {
        tags,
        items,
        semantics,
    }
}

/// gHome (House)
/// └── gGroundFloor (GroundFloor)
///     ├── gKitchen (Kitchen)
///     │   ├── eFridge (Refrigerator): Fridge_Power, Fridge_Temp, Fridge_Door
///     │   ├── Kitchen_Temp, Kitchen_Light (also in gSwitches), Kitchen_Note
///     │   └── eWasher (WashingMachine): Washer_Switch, Washer_Power
///     └── gLivingRoom (LivingRoom)
///         └── eTV (Television): TV_Power, TV_Volume
pub fn home() -> Home {
    let home = empty();
    home.items.extend([
        group("gHome", &["House"], &[]),
        group("gGroundFloor", &["GroundFloor"], &["gHome"]),
        group("gKitchen", &["Kitchen"], &["gGroundFloor"]),
        group("gLivingRoom", &["LivingRoom"], &["gGroundFloor"]),
        group("gSwitches", &[], &["gHome"]),
        group("eFridge", &["Refrigerator"], &["gKitchen"]),
        item("Fridge_Power", "Switch", &["Switch", "Power"], &["eFridge"]),
        item("Fridge_Temp", "Number", &["Measurement", "Temperature"], &["eFridge"]),
        item("Fridge_Door", "Contact", &["OpenState"], &["eFridge"]),
        item("Kitchen_Temp", "Number", &["Measurement", "Temperature"], &["gKitchen"]),
        item("Kitchen_Light", "Switch", &["Switch", "Light"], &["gSwitches", "gKitchen"]),
        item("Kitchen_Note", "String", &["Lighting"], &["gKitchen"]),
        group("eWasher", &["WashingMachine"], &["gKitchen"]),
        item("Washer_Switch", "Switch", &["Switch"], &["eWasher"]),
        item("Washer_Power", "Switch", &["Switch", "Power"], &["eWasher"]),
        group("eTV", &["Television"], &["gLivingRoom"]),
        item("TV_Power", "Switch", &["Switch", "Power"], &["eTV"]),
        item("TV_Volume", "Dimmer", &["Control", "SoundVolume"], &["eTV"]),
        item("Loose", "Switch", &[], &[]),
        item("Outside_Temp", "Number", &["Temperature"], &[]),
        group("Odd", &["Kitchen", "Refrigerator"], &[]),
        group("cA", &[], &["cB"]),
        group("cB", &[], &["cA"]),
        item("Cycle_Switch", "Switch", &["Switch"], &["cA"]),
    ]);
    home
}
