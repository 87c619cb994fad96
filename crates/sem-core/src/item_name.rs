//! Item name type identifying an item in the host item registry

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid item names
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemNameError {
    #[error("item name cannot be empty")]
    Empty,

    #[error("item name '{0}' may only contain ASCII letters, digits and underscores")]
    InvalidChars(String),
}

/// Represents an item name (e.g. "Kitchen_Temperature")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Create a new ItemName, validating its characters
    pub fn new(name: impl Into<String>) -> Result<Self, ItemNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ItemNameError::Empty);
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ItemNameError::InvalidChars(name));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemName {
    type Err = ItemNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ItemName {
    type Error = ItemNameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ItemName> for String {
    fn from(name: ItemName) -> String {
        name.0
    }
}

impl Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_item_names() {
        assert_eq!(ItemName::new("gKitchen").unwrap().as_str(), "gKitchen");
        assert_eq!(
            "Kitchen_Temp_1".parse::<ItemName>().unwrap().to_string(),
            "Kitchen_Temp_1"
        );
    }

    #[test]
    fn test_invalid_item_names() {
        assert_eq!(ItemName::new("").unwrap_err(), ItemNameError::Empty);
        assert_eq!(
            ItemName::new("light.kitchen").unwrap_err(),
            ItemNameError::InvalidChars("light.kitchen".to_string())
        );
    }
}
