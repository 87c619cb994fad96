//! Tag name type identifying a node of the semantic tag forest

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid tag names
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagNameError {
    #[error("tag name cannot be empty")]
    Empty,

    #[error("tag name '{0}' must start with an ASCII letter")]
    InvalidStart(String),

    #[error("tag name '{0}' may only contain ASCII letters and digits")]
    InvalidChars(String),
}

/// A semantic tag name (e.g. "Kitchen", "Temperature")
///
/// Names are ASCII alphanumeric and start with a letter. The underscore is
/// reserved because it separates the segments of a tag uid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    /// Create a new TagName, validating its characters
    pub fn new(name: impl Into<String>) -> Result<Self, TagNameError> {
        let name = name.into();
        let mut chars = name.chars();
        match chars.next() {
            None => return Err(TagNameError::Empty),
            Some(c) if !c.is_ascii_alphabetic() => return Err(TagNameError::InvalidStart(name)),
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err(TagNameError::InvalidChars(name));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagName {
    type Err = TagNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TagName {
    type Error = TagNameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TagName> for String {
    fn from(name: TagName) -> String {
        name.0
    }
}

impl Borrow<str> for TagName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
