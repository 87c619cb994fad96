//! The four roots of the semantic tag forest

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string names none of the four roots
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a semantic root (expected Location, Equipment, Point or Property)")]
pub struct UnknownRoot(pub String);

/// A root of the semantic tag forest
///
/// Every tag descends from exactly one root. Location, Equipment and Point
/// are the primary roles an item can play; Property is a secondary axis
/// describing what a Point measures or controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SemanticRoot {
    Location,
    Equipment,
    Point,
    Property,
}

impl SemanticRoot {
    /// All roots, in classification order
    pub const ALL: [SemanticRoot; 4] = [
        SemanticRoot::Location,
        SemanticRoot::Equipment,
        SemanticRoot::Point,
        SemanticRoot::Property,
    ];

    /// Tag name of the root
    pub fn name(&self) -> &'static str {
        match self {
            SemanticRoot::Location => "Location",
            SemanticRoot::Equipment => "Equipment",
            SemanticRoot::Point => "Point",
            SemanticRoot::Property => "Property",
        }
    }

    /// Whether this root denotes a primary item role (not Property)
    pub fn is_role(&self) -> bool {
        !matches!(self, SemanticRoot::Property)
    }
}

impl FromStr for SemanticRoot {
    type Err = UnknownRoot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|root| root.name() == s)
            .ok_or_else(|| UnknownRoot(s.to_string()))
    }
}

impl fmt::Display for SemanticRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roots() {
        for root in SemanticRoot::ALL {
            assert_eq!(root.name().parse::<SemanticRoot>().unwrap(), root);
        }
        assert_eq!(
            "Kitchen".parse::<SemanticRoot>().unwrap_err(),
            UnknownRoot("Kitchen".to_string())
        );
    }

    #[test]
    fn test_roles() {
        assert!(SemanticRoot::Location.is_role());
        assert!(SemanticRoot::Point.is_role());
        assert!(!SemanticRoot::Property.is_role());
    }
}
