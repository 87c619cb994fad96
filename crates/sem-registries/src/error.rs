//! Error types for tag registration

use sem_core::TagNameError;
use thiserror::Error;

use crate::storage::StorageError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by `TagRegistry::add` and custom tag loading
///
/// Duplicates are not errors; they are skipped and left out of the result.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `add` was called without any tag
    #[error("tags must be specified")]
    NoTags,

    /// Label, synonyms or description were given for a batch of tags
    #[error("additional options can only be specified when creating one tag (got {count} tags)")]
    OverridesWithMultipleTags { count: usize },

    /// The new tag's name is not a valid tag name
    #[error(transparent)]
    InvalidTagName(#[from] TagNameError),

    /// The parent reference resolves to no known tag
    #[error("unknown parent '{parent}' for tag '{name}'")]
    UnknownParent { name: String, parent: String },

    /// Custom tag storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}
