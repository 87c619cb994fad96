//! Semantic type and ancestor resolution

mod common;

use common::{home, name};
use sem_core::SemanticRoot;

#[test]
fn test_untagged_item_has_no_classification() {
    let home = home();
    let loose = name("Loose");

    assert!(home.semantics.semantic_type(&loose).is_none());
    assert!(!home.semantics.is_semantic(&loose));
    assert!(home.semantics.location(&loose).is_none());
    assert!(home.semantics.equipment(&loose).is_none());
}

#[test]
fn test_unknown_item_has_no_classification() {
    let home = home();
    let ghost = name("Ghost");

    assert!(home.semantics.semantic_type(&ghost).is_none());
    assert!(home.semantics.location(&ghost).is_none());
}

#[test]
fn test_roles() {
    let home = home();
    let s = &home.semantics;

    assert!(s.is_location(&name("gKitchen")));
    assert!(s.is_equipment(&name("eFridge")));
    assert!(s.is_point(&name("Fridge_Temp")));
    assert!(!s.is_point(&name("gKitchen")));
    assert!(!s.is_location(&name("eFridge")));

    assert_eq!(
        s.location_type(&name("gKitchen")).unwrap().name.as_str(),
        "Kitchen"
    );
    assert_eq!(
        s.equipment_type(&name("eTV")).unwrap().name.as_str(),
        "Television"
    );
    assert!(s.equipment_type(&name("gKitchen")).is_none());
    assert_eq!(
        s.point_type(&name("Fridge_Door")).unwrap().name.as_str(),
        "OpenState"
    );
}

#[test]
fn test_point_with_property() {
    let home = home();
    let power = name("Fridge_Power");

    assert!(home.semantics.is_point(&power));
    assert_eq!(
        home.semantics.semantic_type(&power).unwrap().name.as_str(),
        "Switch"
    );
    assert_eq!(
        home.semantics.property_type(&power).unwrap().name.as_str(),
        "Power"
    );
}

#[test]
fn test_property_only_item() {
    let home = home();
    let outside = name("Outside_Temp");

    let semantic_type = home.semantics.semantic_type(&outside).unwrap();
    assert_eq!(semantic_type.root, SemanticRoot::Property);
    assert!(home.semantics.is_semantic(&outside));
    assert!(!home.semantics.is_point(&outside));
    assert_eq!(
        home.semantics.property_type(&outside).unwrap().name.as_str(),
        "Temperature"
    );
}

#[test]
fn test_non_semantic_tags_are_ignored() {
    let home = home();
    assert!(!home.semantics.is_semantic(&name("Kitchen_Note")));
}

#[test]
fn test_first_role_tag_wins() {
    let home = home();
    let odd = name("Odd");

    assert!(home.semantics.is_location(&odd));
    assert!(!home.semantics.is_equipment(&odd));
}

#[test]
fn test_location_and_equipment_of_point() {
    let home = home();
    let temp = name("Fridge_Temp");

    assert_eq!(home.semantics.equipment(&temp), Some(name("eFridge")));
    assert_eq!(home.semantics.location(&temp), Some(name("gKitchen")));
}

#[test]
fn test_location_walk_is_breadth_first() {
    let home = home();
    // gSwitches (non-semantic, in gHome) is listed before gKitchen
    assert_eq!(
        home.semantics.location(&name("Kitchen_Light")),
        Some(name("gKitchen"))
    );
}

#[test]
fn test_location_of_location() {
    let home = home();
    assert_eq!(
        home.semantics.location(&name("gKitchen")),
        Some(name("gGroundFloor"))
    );
    assert!(home.semantics.location(&name("gHome")).is_none());
    assert!(home.semantics.equipment(&name("gKitchen")).is_none());
}

#[test]
fn test_cyclic_memberships_terminate() {
    let home = home();
    let item = name("Cycle_Switch");

    assert!(home.semantics.location(&item).is_none());
    assert!(home.semantics.equipment(&item).is_none());
    assert!(home.semantics.location(&name("cA")).is_none());
    assert!(home.semantics.points(&item, &[]).unwrap().is_empty());
}

#[test]
fn test_all_members_is_transitive_and_cycle_safe() {
    let home = home();

    let members = home.semantics.all_members(&name("eFridge"));
    assert_eq!(
        members,
        common::names(&["Fridge_Power", "Fridge_Temp", "Fridge_Door"])
    );

    let kitchen = home.semantics.all_members(&name("gKitchen"));
    assert!(kitchen.contains(&name("Washer_Power")));
    assert!(kitchen.contains(&name("eFridge")));

    assert_eq!(
        home.semantics.all_members(&name("cA")),
        [name("cB"), name("Cycle_Switch")]
    );
}

#[test]
fn test_classify() {
    let home = home();
    let classification = home.semantics.classify(&name("TV_Power"));

    assert_eq!(classification.role, Some(SemanticRoot::Point));
    assert_eq!(classification.semantic_type.as_deref(), Some("Switch"));
    assert_eq!(classification.property_type.as_deref(), Some("Power"));
    assert_eq!(classification.equipment, Some(name("eTV")));
    assert_eq!(classification.location, Some(name("gLivingRoom")));

    let json = serde_json::to_value(&classification).unwrap();
    assert_eq!(json["role"], "Point");
    assert_eq!(json["location"], "gLivingRoom");

    let outside = home.semantics.classify(&name("Outside_Temp"));
    assert_eq!(outside.role, None);
    assert_eq!(outside.semantic_type.as_deref(), Some("Temperature"));
}
