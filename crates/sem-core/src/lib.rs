//! Core types for the semantic model
//!
//! This crate provides the fundamental types shared by the semantic tag
//! registry and the classifier: TagName, ItemName, Locale, SemanticRoot,
//! and the ItemModel capability the host item registry must provide.

mod item_name;
mod locale;
mod model;
mod root;
mod tag_name;

pub use item_name::{ItemName, ItemNameError};
pub use locale::{Locale, LocaleError};
pub use model::ItemModel;
pub use root::{SemanticRoot, UnknownRoot};
pub use tag_name::{TagName, TagNameError};

/// Separator between the segments of a tag uid (e.g. "Location_Indoor_Room")
pub const UID_SEPARATOR: char = '_';

/// Item type marking group items
pub const GROUP_ITEM_TYPE: &str = "Group";
