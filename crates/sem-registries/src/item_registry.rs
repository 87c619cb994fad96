//! Item Registry
//!
//! In-memory host item model: items with tags and group memberships.
//! Membership edges are kept by name, so a group may be referenced before
//! it is registered and cyclic memberships are accepted as given.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sem_core::{ItemModel, ItemName, GROUP_ITEM_TYPE};

/// A registered item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    /// Item name (e.g. "Kitchen_Temperature")
    pub name: ItemName,

    /// Item type (e.g. "Switch", "Number:Temperature", "Group")
    #[serde(rename = "type")]
    pub item_type: String,

    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Tags in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Parent groups in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ItemName>,
}

impl ItemEntry {
    /// Create a new item entry
    pub fn new(name: ItemName, item_type: impl Into<String>) -> Self {
        Self {
            name,
            item_type: item_type.into(),
            label: None,
            tags: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Create a new group item entry
    pub fn group(name: ItemName) -> Self {
        Self::new(name, GROUP_ITEM_TYPE)
    }

    /// Set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set parent groups
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = ItemName>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    /// Whether this is a group item ("Group" or "Group:<base type>")
    pub fn is_group(&self) -> bool {
        self.item_type == GROUP_ITEM_TYPE
            || self
                .item_type
                .strip_prefix(GROUP_ITEM_TYPE)
                .is_some_and(|rest| rest.starts_with(':'))
    }
}

/// Item Registry
///
/// Entries are stored as `Arc<ItemEntry>` to avoid cloning on reads.
pub struct ItemRegistry {
    /// Primary index: name -> ItemEntry
    by_name: DashMap<ItemName, Arc<ItemEntry>>,

    /// Index: group name -> direct members in registration order
    members: DashMap<ItemName, Vec<ItemName>>,
}

impl ItemRegistry {
    /// Create an empty item registry
    pub fn new() -> Self {
        Self {
            by_name: DashMap::new(),
            members: DashMap::new(),
        }
    }

    /// Add or replace an item, returning the replaced entry
    pub fn add(&self, entry: ItemEntry) -> Option<Arc<ItemEntry>> {
        let entry = Arc::new(entry);
        let previous = self.by_name.insert(entry.name.clone(), Arc::clone(&entry));
        if let Some(ref previous) = previous {
            self.unindex_memberships(previous);
        }
        for group in &entry.groups {
            let mut members = self.members.entry(group.clone()).or_default();
            if !members.contains(&entry.name) {
                members.push(entry.name.clone());
            }
        }
        debug!(
            item = %entry.name,
            tags = ?entry.tags,
            groups = entry.groups.len(),
            "Registered item"
        );
        previous
    }

    /// Add several items
    pub fn extend(&self, entries: impl IntoIterator<Item = ItemEntry>) {
        let mut count = 0;
        for entry in entries {
            self.add(entry);
            count += 1;
        }
        info!("Registered {} items", count);
    }

    fn unindex_memberships(&self, entry: &ItemEntry) {
        for group in &entry.groups {
            if let Some(mut members) = self.members.get_mut(group) {
                members.retain(|member| member != &entry.name);
            }
        }
    }

    /// Remove an item; its own members keep their (now dangling) membership edges
    pub fn remove(&self, name: &ItemName) -> Option<Arc<ItemEntry>> {
        let (_, entry) = self.by_name.remove(name)?;
        self.unindex_memberships(&entry);
        debug!(item = %name, "Removed item");
        Some(entry)
    }

    /// Get an item by name
    pub fn get(&self, name: &ItemName) -> Option<Arc<ItemEntry>> {
        self.by_name.get(name).map(|r| Arc::clone(r.value()))
    }

    /// Get count of items
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterate over all items
    pub fn iter(&self) -> impl Iterator<Item = Arc<ItemEntry>> + '_ {
        self.by_name.iter().map(|r| Arc::clone(r.value()))
    }

    /// All item names, sorted
    pub fn names(&self) -> Vec<ItemName> {
        let mut names: Vec<_> = self.by_name.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemModel for ItemRegistry {
    fn contains(&self, item: &ItemName) -> bool {
        self.by_name.contains_key(item)
    }

    fn tags_of(&self, item: &ItemName) -> Vec<String> {
        self.get(item).map(|e| e.tags.clone()).unwrap_or_default()
    }

    fn group_memberships_of(&self, item: &ItemName) -> Vec<ItemName> {
        self.get(item).map(|e| e.groups.clone()).unwrap_or_default()
    }

    fn is_group(&self, item: &ItemName) -> bool {
        self.get(item).is_some_and(|e| e.is_group())
    }

    fn members_of(&self, group: &ItemName) -> Vec<ItemName> {
        if !self.is_group(group) {
            return Vec::new();
        }
        self.members
            .get(group)
            .map(|members| members.clone())
            .unwrap_or_default()
    }
}
