//! Capabilities required from the host item registry

use crate::ItemName;

/// Read-only view of the host's item graph
///
/// The classifier never mutates items; it only reads their tags and group
/// memberships. Unknown items behave like items with no tags and no groups.
pub trait ItemModel: Send + Sync {
    /// Whether the host knows an item with this name
    fn contains(&self, item: &ItemName) -> bool;

    /// Tags declared on the item, in declaration order
    fn tags_of(&self, item: &ItemName) -> Vec<String>;

    /// Groups the item is a direct member of, in declaration order
    fn group_memberships_of(&self, item: &ItemName) -> Vec<ItemName>;

    /// Whether the item is a group item
    fn is_group(&self, item: &ItemName) -> bool;

    /// Direct members of a group item (empty for non-groups)
    fn members_of(&self, group: &ItemName) -> Vec<ItemName>;
}
