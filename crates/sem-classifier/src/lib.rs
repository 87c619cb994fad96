//! Semantic classification of items
//!
//! Given an item's tags and its group memberships, the classifier derives
//! the item's semantic role (Location, Equipment, Point), its Property, the
//! nearest enclosing Location and Equipment, and filters item collections
//! by semantic subtype.
//!
//! # Example
//!
//! ```ignore
//! use sem_classifier::Semantics;
//!
//! let semantics = Semantics::new(registries.tags.clone(), registries.items.clone());
//! let temperatures = semantics.points(&kitchen, &["Measurement".into(), "Temperature".into()])?;
//! ```

mod classifier;
mod error;
mod filter;

pub use classifier::{Classification, Semantics};
pub use error::{SemanticError, SemanticResult};
pub use filter::PointFilter;

pub use sem_registries::TagRef;
