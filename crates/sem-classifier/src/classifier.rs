//! Semantic classifier
//!
//! Reads tags and group memberships through the host's `ItemModel` and
//! resolves tags through the `TagRegistry`. Nothing here mutates items.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use sem_core::{ItemModel, ItemName, SemanticRoot};
use sem_registries::{Tag, TagRef, TagRegistry};

use crate::error::{SemanticError, SemanticResult};
use crate::filter::PointFilter;

/// Derived classification of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub item: ItemName,
    /// Location, Equipment or Point; `None` for Property-only and untagged items
    pub role: Option<SemanticRoot>,
    /// Most specific semantic tag
    pub semantic_type: Option<String>,
    /// Property tag, independent of the role
    pub property_type: Option<String>,
    /// Nearest enclosing Location group
    pub location: Option<ItemName>,
    /// Nearest enclosing Equipment group
    pub equipment: Option<ItemName>,
}

/// Semantic queries over an item model
#[derive(Clone)]
pub struct Semantics {
    tags: Arc<TagRegistry>,
    items: Arc<dyn ItemModel>,
}

impl Semantics {
    /// Create a classifier over a tag registry and a host item model
    pub fn new(tags: Arc<TagRegistry>, items: Arc<dyn ItemModel>) -> Self {
        Self { tags, items }
    }

    /// Semantic tags of an item in declaration order; other tags are skipped
    fn semantic_tags(&self, item: &ItemName) -> Vec<Arc<Tag>> {
        self.items
            .tags_of(item)
            .iter()
            .filter_map(|tag| self.tags.get(tag))
            .collect()
    }

    /// The item's semantic type
    ///
    /// The first tag (in declaration order) under Location, Equipment or
    /// Point wins; otherwise the first Property tag; otherwise `None`.
    pub fn semantic_type(&self, item: &ItemName) -> Option<Arc<Tag>> {
        let tags = self.semantic_tags(item);
        tags.iter()
            .find(|tag| tag.root.is_role())
            .or_else(|| tags.iter().find(|tag| tag.is_under(SemanticRoot::Property)))
            .cloned()
    }

    fn type_under(&self, item: &ItemName, root: SemanticRoot) -> Option<Arc<Tag>> {
        self.semantic_type(item).filter(|tag| tag.is_under(root))
    }

    /// Semantic type if the item is a Location
    pub fn location_type(&self, item: &ItemName) -> Option<Arc<Tag>> {
        self.type_under(item, SemanticRoot::Location)
    }

    /// Semantic type if the item is an Equipment
    pub fn equipment_type(&self, item: &ItemName) -> Option<Arc<Tag>> {
        self.type_under(item, SemanticRoot::Equipment)
    }

    /// Semantic type if the item is a Point
    pub fn point_type(&self, item: &ItemName) -> Option<Arc<Tag>> {
        self.type_under(item, SemanticRoot::Point)
    }

    /// First Property tag of the item, regardless of its role
    pub fn property_type(&self, item: &ItemName) -> Option<Arc<Tag>> {
        self.semantic_tags(item)
            .into_iter()
            .find(|tag| tag.is_under(SemanticRoot::Property))
    }

    pub fn is_location(&self, item: &ItemName) -> bool {
        self.location_type(item).is_some()
    }

    pub fn is_equipment(&self, item: &ItemName) -> bool {
        self.equipment_type(item).is_some()
    }

    pub fn is_point(&self, item: &ItemName) -> bool {
        self.point_type(item).is_some()
    }

    /// Whether the item carries any semantic tag
    pub fn is_semantic(&self, item: &ItemName) -> bool {
        self.semantic_type(item).is_some()
    }

    /// Nearest ancestor group that is a Location
    #[instrument(skip_all, fields(item = %item))]
    pub fn location(&self, item: &ItemName) -> Option<ItemName> {
        self.nearest_ancestor(item, SemanticRoot::Location)
    }

    /// Nearest ancestor group that is an Equipment
    #[instrument(skip_all, fields(item = %item))]
    pub fn equipment(&self, item: &ItemName) -> Option<ItemName> {
        self.nearest_ancestor(item, SemanticRoot::Equipment)
    }

    /// Breadth-first walk over group memberships
    ///
    /// Every group is visited at most once, so cyclic memberships terminate.
    fn nearest_ancestor(&self, item: &ItemName, root: SemanticRoot) -> Option<ItemName> {
        let mut visited = HashSet::from([item.clone()]);
        let mut queue: VecDeque<ItemName> = self.items.group_memberships_of(item).into();

        while let Some(group) = queue.pop_front() {
            if !visited.insert(group.clone()) {
                trace!(group = %group, "Already visited");
                continue;
            }
            if self.type_under(&group, root).is_some() {
                debug!(group = %group, "Found enclosing {}", root);
                return Some(group);
            }
            queue.extend(self.items.group_memberships_of(&group));
        }
        None
    }

    /// All members of a group, nested members included
    ///
    /// Depth-first, each item reported once, cycles and the group itself excluded.
    pub fn all_members(&self, group: &ItemName) -> Vec<ItemName> {
        let mut visited = HashSet::from([group.clone()]);
        let mut result = Vec::new();
        let mut stack: Vec<ItemName> = self.items.members_of(group);
        stack.reverse();

        while let Some(member) = stack.pop() {
            if !visited.insert(member.clone()) {
                continue;
            }
            if self.items.is_group(&member) {
                let mut nested = self.items.members_of(&member);
                nested.reverse();
                stack.extend(nested);
            }
            result.push(member);
        }
        result
    }

    /// Direct members of a group
    pub fn members(&self, group: &ItemName) -> Vec<ItemName> {
        self.items.members_of(group)
    }

    /// Points related to an item, optionally filtered by Point and Property type
    ///
    /// For a Location or Equipment this searches its members. For any other
    /// item it searches the nearest enclosing Equipment (or, without one,
    /// the nearest Location) and leaves the item itself out.
    #[instrument(skip_all, fields(item = %item, filters = filters.len()))]
    pub fn points(&self, item: &ItemName, filters: &[TagRef]) -> SemanticResult<Vec<ItemName>> {
        let filter = PointFilter::parse(&self.tags, filters)?;

        if self.is_location(item) || self.is_equipment(item) {
            return Ok(self.matching_points(self.all_members(item), &filter));
        }

        let Some(parent) = self.equipment(item).or_else(|| self.location(item)) else {
            return Ok(Vec::new());
        };
        let mut points = self.matching_points(self.all_members(&parent), &filter);
        points.retain(|point| point != item);
        Ok(points)
    }

    fn matching_points(
        &self,
        items: impl IntoIterator<Item = ItemName>,
        filter: &PointFilter,
    ) -> Vec<ItemName> {
        items
            .into_iter()
            .filter(|item| {
                self.point_type(item).is_some_and(|point_type| {
                    filter.matches(&point_type, self.property_type(item).as_deref())
                })
            })
            .collect()
    }

    /// Resolve an optional type argument that must lie under `root`
    fn expect_type(&self, tag: Option<TagRef>, root: SemanticRoot) -> SemanticResult<Option<Arc<Tag>>> {
        let Some(tag_ref) = tag else {
            return Ok(None);
        };
        let tag = self
            .tags
            .resolve(&tag_ref)
            .ok_or_else(|| SemanticError::UnknownTag(tag_ref.to_string()))?;
        if !tag.is_under(root) {
            return Err(SemanticError::WrongRoot {
                tag: tag.name.to_string(),
                expected: root,
            });
        }
        Ok(Some(tag))
    }

    fn filter_role(
        &self,
        items: impl IntoIterator<Item = ItemName>,
        root: SemanticRoot,
        tag: Option<TagRef>,
    ) -> SemanticResult<Vec<ItemName>> {
        let wanted = self.expect_type(tag, root)?;
        Ok(items
            .into_iter()
            .filter(|item| {
                self.type_under(item, root).is_some_and(|actual| {
                    wanted.as_ref().map_or(true, |wanted| actual.is_a(wanted))
                })
            })
            .collect())
    }

    /// Items that are Locations, optionally of (a subtype of) `location_type`
    pub fn locations(
        &self,
        items: impl IntoIterator<Item = ItemName>,
        location_type: Option<TagRef>,
    ) -> SemanticResult<Vec<ItemName>> {
        self.filter_role(items, SemanticRoot::Location, location_type)
    }

    /// Items that are Equipment, optionally of (a subtype of) `equipment_type`
    pub fn equipments(
        &self,
        items: impl IntoIterator<Item = ItemName>,
        equipment_type: Option<TagRef>,
    ) -> SemanticResult<Vec<ItemName>> {
        self.filter_role(items, SemanticRoot::Equipment, equipment_type)
    }

    /// Items that are Points matching up to one Point and one Property filter
    pub fn filter_points(
        &self,
        items: impl IntoIterator<Item = ItemName>,
        filters: &[TagRef],
    ) -> SemanticResult<Vec<ItemName>> {
        let filter = PointFilter::parse(&self.tags, filters)?;
        Ok(self.matching_points(items, &filter))
    }

    /// Full classification of one item
    pub fn classify(&self, item: &ItemName) -> Classification {
        let semantic_type = self.semantic_type(item);
        Classification {
            item: item.clone(),
            role: semantic_type
                .as_ref()
                .map(|tag| tag.root)
                .filter(SemanticRoot::is_role),
            semantic_type: semantic_type.map(|tag| tag.name.to_string()),
            property_type: self.property_type(item).map(|tag| tag.name.to_string()),
            location: self.location(item),
            equipment: self.equipment(item),
        }
    }
}
