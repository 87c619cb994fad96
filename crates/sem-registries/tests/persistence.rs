//! Custom tag persistence across registry restarts

use sem_core::Locale;
use sem_registries::{Registries, TagOverrides, TagSpec, TagText};
use tempfile::TempDir;

#[tokio::test]
async fn test_custom_tag_chain_survives_restart() {
    let dir = TempDir::new().unwrap();
    let german: Locale = "de-DE".parse().unwrap();

    let registries = Registries::new(dir.path(), Locale::english());
    registries
        .tags
        .add(
            [
                TagSpec::new("Workshop", "Room"),
                TagSpec::new("Workbench", "Workshop"),
            ],
            TagOverrides::default(),
        )
        .unwrap();
    registries
        .tags
        .add_with(
            "Lathe",
            "Equipment",
            TagOverrides::default()
                .with_synonyms(["Turning Machine"])
                .with_translation(&german, TagText::new("Drehbank")),
        )
        .unwrap();
    registries.save_all().await.unwrap();

    let restarted = Registries::new(dir.path(), Locale::english());
    restarted.load_all().await.unwrap();

    let bench = restarted.tags.get("Workbench").unwrap();
    assert_eq!(bench.uid, "Location_Indoor_Room_Workshop_Workbench");

    let lathe = restarted.tags.lookup("Turning Machine", None).unwrap();
    assert_eq!(lathe.name.as_str(), "Lathe");
    assert_eq!(lathe.label_for(&german), "Drehbank");
    assert_eq!(lathe.label_for(&Locale::english()), "Lathe");

    let custom: Vec<String> = restarted
        .tags
        .custom_tags()
        .iter()
        .map(|tag| tag.name.to_string())
        .collect();
    assert_eq!(custom, vec!["Workshop", "Workbench", "Lathe"]);
}

#[tokio::test]
async fn test_storage_file_is_versioned_envelope() {
    let dir = TempDir::new().unwrap();

    let registries = Registries::new(dir.path(), Locale::english());
    registries.tags.add_one("Balcony", "Outdoor").unwrap();
    registries.save_all().await.unwrap();

    let path = dir.path().join(".storage").join("semantics.custom_tags");
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["key"], "semantics.custom_tags");
    assert_eq!(raw["data"]["tags"][0]["name"], "Balcony");
    assert_eq!(raw["data"]["tags"][0]["parent"], "Outdoor");
}

#[tokio::test]
async fn test_loading_twice_registers_nothing_new() {
    let dir = TempDir::new().unwrap();

    let registries = Registries::new(dir.path(), Locale::english());
    registries.tags.add_one("Balcony", "Outdoor").unwrap();
    registries.save_all().await.unwrap();

    assert_eq!(registries.tags.load(&registries.storage).await.unwrap(), 0);
    assert_eq!(registries.tags.custom_tags().len(), 1);
}
