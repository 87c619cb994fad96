//! Error types for semantic queries

use sem_core::SemanticRoot;
use thiserror::Error;

/// Result type for semantic queries
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Invalid arguments to `points`, `locations` and `equipments`
///
/// Absence (no location, no type) is never an error; it is `None` or an
/// empty result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SemanticError {
    #[error("wrong number of point/property filters (given {given}, expected 0..2)")]
    TooManyFilters { given: usize },

    #[error("'{tag}' must be a subtype of Point or Property")]
    NotPointOrProperty { tag: String },

    #[error("'{first}' and '{second}' cannot both be subtypes of {root}")]
    ConflictingFilters {
        first: String,
        second: String,
        root: SemanticRoot,
    },

    #[error("'{tag}' must be a subtype of {expected}")]
    WrongRoot { tag: String, expected: SemanticRoot },

    #[error("unknown semantic tag '{0}'")]
    UnknownTag(String),
}
