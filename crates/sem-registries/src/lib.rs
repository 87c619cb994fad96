//! Semantic Registries
//!
//! This crate provides the registries the semantic classifier reads from:
//! - Tag catalog (TagCatalog, MemoryTagCatalog) seeded with the built-in tags
//! - Tag registry (TagRegistry): lazy, cached resolution and runtime extension
//! - Item registry (ItemRegistry): an in-memory host item model
//!
//! Custom tags are persisted as versioned JSON in the `.storage/` directory.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod item_registry;
pub mod storage;
pub mod tag;
pub mod tag_registry;

// Re-export main types
pub use storage::{Storable, Storage, StorageError, StorageFile, StorageResult};

pub use catalog::{MemoryTagCatalog, NewTag, TagCatalog};
pub use error::{RegistryError, RegistryResult};
pub use item_registry::{ItemEntry, ItemRegistry};
pub use tag::{Tag, TagOrigin, TagText};
pub use tag_registry::{CustomTagEntry, CustomTagsData, TagOverrides, TagRef, TagRegistry, TagSpec};

use sem_core::Locale;
use std::sync::Arc;

/// All registries bundled together
pub struct Registries {
    pub storage: Arc<Storage>,
    pub catalog: Arc<MemoryTagCatalog>,
    pub tags: Arc<TagRegistry>,
    pub items: Arc<ItemRegistry>,
}

impl Registries {
    /// Create registries over the built-in catalog, storing into the given config directory
    pub fn new(config_dir: impl AsRef<std::path::Path>, locale: Locale) -> Self {
        let storage = Arc::new(Storage::new(config_dir));
        let catalog = Arc::new(MemoryTagCatalog::with_builtin());
        let tags = Arc::new(TagRegistry::new(catalog.clone(), locale));

        Self {
            storage,
            catalog,
            tags,
            items: Arc::new(ItemRegistry::new()),
        }
    }

    /// Load persisted custom tags
    pub async fn load_all(&self) -> RegistryResult<()> {
        self.tags.load(&self.storage).await?;
        Ok(())
    }

    /// Persist custom tags
    pub async fn save_all(&self) -> StorageResult<()> {
        self.tags.save(&self.storage).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_registries_bundle() {
        let temp_dir = TempDir::new().unwrap();
        let registries = Registries::new(temp_dir.path(), Locale::english());

        let created = registries
            .tags
            .add_one("Balcony", "Outdoor")
            .unwrap()
            .expect("Balcony should be new");
        assert_eq!(created.uid, "Location_Outdoor_Balcony");

        registries.save_all().await.unwrap();

        let registries2 = Registries::new(temp_dir.path(), Locale::english());
        assert!(registries2.tags.get("Balcony").is_none());
        registries2.load_all().await.unwrap();

        let balcony = registries2.tags.get("Balcony").unwrap();
        assert_eq!(balcony.uid, "Location_Outdoor_Balcony");
        assert_eq!(balcony.created_at, created.created_at);
        assert_eq!(registries2.tags.custom_tags().len(), 1);
    }
}
