//! Tag catalog
//!
//! The catalog is the source of truth for which tags exist. The registry
//! resolves tags from it on first use and caches them.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, info};

use sem_core::{Locale, SemanticRoot, TagName, UID_SEPARATOR};

use crate::builtin::{BuiltinTag, BUILTIN_TAGS};
use crate::tag::{Tag, TagOrigin, TagText};

/// Request to create a tag in a catalog
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: TagName,
    pub parent: TagName,
    pub label: Option<String>,
    pub synonyms: Vec<String>,
    pub description: Option<String>,
    pub translations: BTreeMap<String, TagText>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTag {
    /// Create a request with no display text
    pub fn new(name: TagName, parent: TagName) -> Self {
        Self {
            name,
            parent,
            label: None,
            synonyms: Vec::new(),
            description: None,
            translations: BTreeMap::new(),
            created_at: None,
        }
    }
}

/// Capabilities required from the host tag catalog
pub trait TagCatalog: Send + Sync {
    /// Get a tag by name or uid
    fn get_by_id(&self, id: &str) -> Option<Arc<Tag>>;

    /// Tags whose label or synonym matches `text` in `locale`, best match first
    fn get_by_label_or_synonym(&self, text: &str, locale: &Locale) -> Vec<Arc<Tag>>;

    /// Add a tag; `None` when the name already exists or the parent is unknown
    fn add_tag(&self, tag: NewTag) -> Option<Arc<Tag>>;

    /// Every tag in the catalog, roots included
    fn all(&self) -> Vec<Arc<Tag>>;
}

/// Thread-safe in-memory catalog
///
/// Tags are kept in registration order, which is also the order of
/// `all()` and of equally good label matches.
pub struct MemoryTagCatalog {
    /// name -> Tag, in registration order
    tags: RwLock<IndexMap<TagName, Arc<Tag>>>,

    /// Number of `get_by_id` calls served
    id_queries: AtomicUsize,
}

impl MemoryTagCatalog {
    /// Create a catalog holding only the four roots
    pub fn new() -> Self {
        let tags = SemanticRoot::ALL
            .into_iter()
            .map(|root| {
                let tag = Tag::root(root);
                (tag.name.clone(), Arc::new(tag))
            })
            .collect();

        Self {
            tags: RwLock::new(tags),
            id_queries: AtomicUsize::new(0),
        }
    }

    /// Create a catalog holding the built-in tag hierarchy
    pub fn with_builtin() -> Self {
        let catalog = Self::new();
        catalog.extend_builtin(BUILTIN_TAGS);
        info!("Loaded {} built-in semantic tags", catalog.len());
        catalog
    }

    fn extend_builtin(&self, defs: &[BuiltinTag]) {
        let mut tags = self.tags.write().unwrap_or_else(PoisonError::into_inner);
        for def in defs {
            let (Ok(name), Some(parent)) = (TagName::new(def.name), tags.get(def.parent).cloned())
            else {
                debug!("Skipping malformed built-in tag {}", def.name);
                continue;
            };
            let mut tag = Tag::child_of(&parent, name, TagOrigin::BuiltIn);
            tag.label = def.label.to_string();
            tag.synonyms = def.synonyms.iter().map(|s| s.to_string()).collect();
            tag.description = def.description.to_string();
            tags.insert(tag.name.clone(), Arc::new(tag));
        }
    }

    /// Add a translation to an existing tag
    ///
    /// The registry caches resolved tags, so translations should be added
    /// before the tag is first looked up through a registry.
    pub fn add_translation(&self, name: &str, locale: &Locale, text: TagText) -> bool {
        let mut tags = self.tags.write().unwrap_or_else(PoisonError::into_inner);
        let Some(existing) = tags.get_mut(name) else {
            return false;
        };
        let mut tag = (**existing).clone();
        tag.translations.insert(locale.to_string(), text);
        *existing = Arc::new(tag);
        true
    }

    /// Number of `get_by_id` calls served so far
    pub fn id_query_count(&self) -> usize {
        self.id_queries.load(Ordering::Relaxed)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, IndexMap<TagName, Arc<Tag>>> {
        self.tags.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryTagCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize text for label matching
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl TagCatalog for MemoryTagCatalog {
    fn get_by_id(&self, id: &str) -> Option<Arc<Tag>> {
        self.id_queries.fetch_add(1, Ordering::Relaxed);
        let tags = self.read();
        if let Some(tag) = tags.get(id) {
            return Some(Arc::clone(tag));
        }
        if id.contains(UID_SEPARATOR) {
            return tags.values().find(|tag| tag.uid == id).cloned();
        }
        None
    }

    fn get_by_label_or_synonym(&self, text: &str, locale: &Locale) -> Vec<Arc<Tag>> {
        let wanted = normalize(text);
        if wanted.is_empty() {
            return Vec::new();
        }
        let tags = self.read();

        let by_label = tags
            .values()
            .filter(|tag| normalize(tag.label_for(locale)) == wanted);
        let by_synonym = tags.values().filter(|tag| {
            normalize(tag.label_for(locale)) != wanted
                && tag
                    .synonyms_for(locale)
                    .iter()
                    .any(|synonym| normalize(synonym) == wanted)
        });

        by_label.chain(by_synonym).cloned().collect()
    }

    fn add_tag(&self, new_tag: NewTag) -> Option<Arc<Tag>> {
        let mut tags = self.tags.write().unwrap_or_else(PoisonError::into_inner);
        if tags.contains_key(&new_tag.name) {
            debug!("Tag {} already in catalog", new_tag.name);
            return None;
        }
        let parent = tags.get(&new_tag.parent).cloned()?;

        let mut tag = Tag::child_of(&parent, new_tag.name, TagOrigin::Custom);
        if let Some(label) = new_tag.label.filter(|label| !label.trim().is_empty()) {
            tag.label = label;
        }
        tag.synonyms = new_tag.synonyms;
        tag.description = new_tag.description.unwrap_or_default();
        tag.translations = new_tag.translations;
        tag.created_at = Some(new_tag.created_at.unwrap_or_else(Utc::now));

        let tag = Arc::new(tag);
        tags.insert(tag.name.clone(), Arc::clone(&tag));
        Some(tag)
    }

    fn all(&self) -> Vec<Arc<Tag>> {
        self.read().values().cloned().collect()
    }
}
