//! Tag Registry
//!
//! Resolves tag identifiers to tag nodes lazily: a tag is fetched from the
//! catalog on first reference and cached for the rest of the process.
//! Custom tags can be registered at runtime and persisted to storage.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use sem_core::{Locale, SemanticRoot, TagName};

use crate::catalog::{NewTag, TagCatalog};
use crate::error::{RegistryError, RegistryResult};
use crate::storage::{Storable, Storage, StorageResult};
use crate::tag::{Tag, TagText};

/// Storage key for custom tags
pub const STORAGE_KEY: &str = "semantics.custom_tags";
/// Current storage version
pub const STORAGE_VERSION: u32 = 1;
/// Current minor version
pub const STORAGE_MINOR_VERSION: u32 = 1;

/// Reference to a tag: a resolved node, a name/label, or a root
#[derive(Debug, Clone)]
pub enum TagRef {
    Tag(Arc<Tag>),
    Name(String),
    Root(SemanticRoot),
}

impl From<Arc<Tag>> for TagRef {
    fn from(tag: Arc<Tag>) -> Self {
        TagRef::Tag(tag)
    }
}

impl From<&Arc<Tag>> for TagRef {
    fn from(tag: &Arc<Tag>) -> Self {
        TagRef::Tag(Arc::clone(tag))
    }
}

impl From<&str> for TagRef {
    fn from(name: &str) -> Self {
        TagRef::Name(name.to_string())
    }
}

impl From<String> for TagRef {
    fn from(name: String) -> Self {
        TagRef::Name(name)
    }
}

impl From<TagName> for TagRef {
    fn from(name: TagName) -> Self {
        TagRef::Name(name.into())
    }
}

impl From<SemanticRoot> for TagRef {
    fn from(root: SemanticRoot) -> Self {
        TagRef::Root(root)
    }
}

impl fmt::Display for TagRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRef::Tag(tag) => f.write_str(tag.name.as_str()),
            TagRef::Name(name) => f.write_str(name),
            TagRef::Root(root) => f.write_str(root.name()),
        }
    }
}

/// One `name: parent` entry of a registration batch
#[derive(Debug, Clone)]
pub struct TagSpec {
    pub name: String,
    pub parent: TagRef,
}

impl TagSpec {
    pub fn new(name: impl Into<String>, parent: impl Into<TagRef>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
        }
    }
}

/// Display text applied to a single registered tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagOverrides {
    pub label: Option<String>,
    pub synonyms: Vec<String>,
    pub description: Option<String>,
    pub translations: BTreeMap<String, TagText>,
}

impl TagOverrides {
    /// Set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set synonyms
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a translation
    pub fn with_translation(mut self, locale: &Locale, text: TagText) -> Self {
        self.translations.insert(locale.to_string(), text);
        self
    }

    /// Whether no override is set
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.synonyms.iter().all(|s| s.trim().is_empty())
            && self.description.is_none()
            && self.translations.is_empty()
    }
}

/// A persisted custom tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTagEntry {
    pub name: TagName,
    pub parent: TagName,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, TagText>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl CustomTagEntry {
    fn from_tag(tag: &Tag) -> Option<Self> {
        Some(Self {
            name: tag.name.clone(),
            parent: tag.parent.clone()?,
            label: tag.label.clone(),
            synonyms: tag.synonyms.clone(),
            description: tag.description.clone(),
            translations: tag.translations.clone(),
            created_at: tag.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Custom tag data for storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomTagsData {
    /// Custom tags in registration order
    pub tags: Vec<CustomTagEntry>,
}

impl Storable for CustomTagsData {
    const KEY: &'static str = STORAGE_KEY;
    const VERSION: u32 = STORAGE_VERSION;
    const MINOR_VERSION: u32 = STORAGE_MINOR_VERSION;
}

/// Mutable registry state, guarded by a single lock
#[derive(Default)]
struct RegistryState {
    /// Resolved tags by name
    resolved: HashMap<TagName, Arc<Tag>>,
    /// Tags registered through this registry, in registration order
    custom: Vec<Arc<Tag>>,
}

/// Tag Registry
///
/// The lock is held only while reading or inserting cache entries, never
/// across a catalog call.
pub struct TagRegistry {
    catalog: Arc<dyn TagCatalog>,
    default_locale: Locale,
    state: RwLock<RegistryState>,
}

impl TagRegistry {
    /// Create a registry over a catalog
    pub fn new(catalog: Arc<dyn TagCatalog>, default_locale: Locale) -> Self {
        Self {
            catalog,
            default_locale,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Locale used by `lookup` when none is given
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Get a tag by exact name, resolving it from the catalog on a cache miss
    pub fn get(&self, name: &str) -> Option<Arc<Tag>> {
        let cached = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolved
            .get(name)
            .cloned();
        cached.or_else(|| self.resolve_missing(name))
    }

    /// Query the catalog for an unresolved tag and cache the result
    ///
    /// Nothing is cached when the catalog doesn't know the tag, so a later
    /// call asks the catalog again.
    pub fn resolve_missing(&self, name: &str) -> Option<Arc<Tag>> {
        match self.catalog.get_by_id(name) {
            Some(tag) => {
                debug!(uid = %tag.uid, "Resolved semantic tag {}", tag.name);
                Some(self.remember(tag))
            }
            None => {
                trace!("Unknown semantic tag {}", name);
                None
            }
        }
    }

    fn remember(&self, tag: Arc<Tag>) -> Arc<Tag> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(state.resolved.entry(tag.name.clone()).or_insert(tag))
    }

    /// Look up a tag by name, or else by label or synonym in `locale`
    ///
    /// Uses the registry's default locale when `locale` is None.
    pub fn lookup(&self, id: &str, locale: Option<&Locale>) -> Option<Arc<Tag>> {
        let id = id.trim();
        if let Some(tag) = self.get(id) {
            return Some(tag);
        }

        let locale = locale.unwrap_or(&self.default_locale);
        let tag = self
            .catalog
            .get_by_label_or_synonym(id, locale)
            .into_iter()
            .next()?;
        debug!(locale = %locale, "Matched '{}' to semantic tag {}", id, tag.name);
        Some(self.remember(tag))
    }

    /// Resolve a tag reference
    pub fn resolve(&self, tag: &TagRef) -> Option<Arc<Tag>> {
        match tag {
            TagRef::Tag(tag) => Some(Arc::clone(tag)),
            TagRef::Name(name) => self.lookup(name, None),
            TagRef::Root(root) => self.root(*root),
        }
    }

    /// Get one of the four root tags
    pub fn root(&self, root: SemanticRoot) -> Option<Arc<Tag>> {
        self.get(root.name())
    }

    /// Register one tag as a child of `parent`
    ///
    /// Returns `Ok(None)` if a tag with that name already exists.
    pub fn add_one(&self, name: &str, parent: impl Into<TagRef>) -> RegistryResult<Option<Arc<Tag>>> {
        self.add_with(name, parent, TagOverrides::default())
    }

    /// Register one tag with label, synonyms, description or translations
    pub fn add_with(
        &self,
        name: &str,
        parent: impl Into<TagRef>,
        overrides: TagOverrides,
    ) -> RegistryResult<Option<Arc<Tag>>> {
        Ok(self
            .add([TagSpec::new(name, parent)], overrides)?
            .into_iter()
            .next())
    }

    /// Register custom tags
    ///
    /// Entries are processed in order, so a later entry may name an earlier
    /// one as its parent. Existing tags are skipped and left out of the
    /// result. Overrides are only allowed when registering a single tag.
    #[instrument(skip_all)]
    pub fn add(
        &self,
        specs: impl IntoIterator<Item = TagSpec>,
        overrides: TagOverrides,
    ) -> RegistryResult<Vec<Arc<Tag>>> {
        let specs: Vec<TagSpec> = specs.into_iter().collect();
        if specs.is_empty() {
            return Err(RegistryError::NoTags);
        }
        if specs.len() > 1 && !overrides.is_empty() {
            return Err(RegistryError::OverridesWithMultipleTags { count: specs.len() });
        }

        let mut created = Vec::with_capacity(specs.len());
        for spec in specs {
            if let Some(tag) = self.register(spec, &overrides, None)? {
                created.push(tag);
            }
        }
        Ok(created)
    }

    fn register(
        &self,
        spec: TagSpec,
        overrides: &TagOverrides,
        created_at: Option<DateTime<Utc>>,
    ) -> RegistryResult<Option<Arc<Tag>>> {
        let name = TagName::new(spec.name.trim())?;
        if self.get(name.as_str()).is_some() {
            debug!("Semantic tag {} already exists, skipping", name);
            return Ok(None);
        }

        let parent = self
            .resolve(&spec.parent)
            .ok_or_else(|| RegistryError::UnknownParent {
                name: name.to_string(),
                parent: spec.parent.to_string(),
            })?;

        let request = NewTag {
            name: name.clone(),
            parent: parent.name.clone(),
            label: overrides.label.clone(),
            synonyms: overrides
                .synonyms
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            description: overrides.description.clone(),
            translations: overrides.translations.clone(),
            created_at,
        };

        let Some(tag) = self.catalog.add_tag(request) else {
            debug!("Catalog rejected semantic tag {} as a duplicate", name);
            return Ok(None);
        };

        info!(uid = %tag.uid, "Created semantic tag {}", tag.name);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.resolved.insert(tag.name.clone(), Arc::clone(&tag));
        state.custom.push(Arc::clone(&tag));
        Ok(Some(tag))
    }

    /// Every known tag, grouped by root in Location, Equipment, Point, Property order
    pub fn all_tags(&self) -> Vec<Arc<Tag>> {
        let tags: Vec<Arc<Tag>> = self
            .catalog
            .all()
            .into_iter()
            .map(|tag| self.remember(tag))
            .collect();

        SemanticRoot::ALL
            .iter()
            .flat_map(|root| tags.iter().filter(move |tag| tag.is_under(*root)))
            .cloned()
            .collect()
    }

    /// Tags registered at runtime through this registry
    pub fn custom_tags(&self) -> Vec<Arc<Tag>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .custom
            .clone()
    }

    /// Parent chain of a tag, nearest first, ending with its root
    pub fn ancestors(&self, tag: &Tag) -> Vec<Arc<Tag>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([tag.name.clone()]);
        let mut next = tag.parent.clone();

        while let Some(parent_name) = next {
            if !seen.insert(parent_name.clone()) {
                break;
            }
            let Some(parent) = self.get(parent_name.as_str()) else {
                break;
            };
            next = parent.parent.clone();
            chain.push(parent);
        }
        chain
    }

    /// Reflexive subtype test `a <= b`, walking `a`'s parent chain
    pub fn is_subtype(&self, a: &Tag, b: &Tag) -> bool {
        a.name == b.name || self.ancestors(a).iter().any(|tag| tag.name == b.name)
    }

    /// Direct children of a tag
    pub fn children(&self, tag: &Tag) -> Vec<Arc<Tag>> {
        self.all_tags()
            .into_iter()
            .filter(|child| child.parent.as_ref() == Some(&tag.name))
            .collect()
    }

    /// All tags strictly below a tag
    pub fn descendants(&self, tag: &Tag) -> Vec<Arc<Tag>> {
        self.all_tags()
            .into_iter()
            .filter(|other| other.name != tag.name && other.is_a(tag))
            .collect()
    }

    /// Persist custom tags
    pub async fn save(&self, storage: &Storage) -> StorageResult<()> {
        let data = CustomTagsData {
            tags: self
                .custom_tags()
                .iter()
                .filter_map(|tag| CustomTagEntry::from_tag(tag))
                .collect(),
        };
        let count = data.tags.len();
        storage.save(data).await?;
        debug!("Saved {} custom semantic tags to storage", count);
        Ok(())
    }

    /// Register persisted custom tags, returning how many were new
    pub async fn load(&self, storage: &Storage) -> RegistryResult<usize> {
        let Some(data) = storage.load::<CustomTagsData>().await? else {
            return Ok(0);
        };
        info!("Loading {} custom semantic tags from storage", data.tags.len());

        let mut loaded = 0;
        for entry in data.tags {
            let overrides = TagOverrides {
                label: Some(entry.label),
                synonyms: entry.synonyms,
                description: Some(entry.description),
                translations: entry.translations,
            };
            let spec = TagSpec::new(entry.name, entry.parent);
            if self.register(spec, &overrides, Some(entry.created_at))?.is_some() {
                loaded += 1;
            }
        }
        Ok(loaded)
    }
}
