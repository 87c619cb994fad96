//! Point/Property filter used by `points`

use std::sync::Arc;

use sem_core::SemanticRoot;
use sem_registries::{Tag, TagRef, TagRegistry};

use crate::error::{SemanticError, SemanticResult};

/// At most one Point subtype and at most one Property subtype
#[derive(Debug, Clone, Default)]
pub struct PointFilter {
    point: Option<Arc<Tag>>,
    property: Option<Arc<Tag>>,
}

impl PointFilter {
    /// Validate 0..2 filter tags
    pub fn parse(registry: &TagRegistry, tags: &[TagRef]) -> SemanticResult<Self> {
        if tags.len() > 2 {
            return Err(SemanticError::TooManyFilters { given: tags.len() });
        }

        let mut filter = Self::default();
        for tag_ref in tags {
            let tag = registry
                .resolve(tag_ref)
                .ok_or_else(|| SemanticError::UnknownTag(tag_ref.to_string()))?;

            let slot = match tag.root {
                SemanticRoot::Point => &mut filter.point,
                SemanticRoot::Property => &mut filter.property,
                SemanticRoot::Location | SemanticRoot::Equipment => {
                    return Err(SemanticError::NotPointOrProperty {
                        tag: tag.name.to_string(),
                    })
                }
            };
            if let Some(existing) = slot {
                return Err(SemanticError::ConflictingFilters {
                    first: existing.name.to_string(),
                    second: tag.name.to_string(),
                    root: tag.root,
                });
            }
            *slot = Some(tag);
        }
        Ok(filter)
    }

    /// Required Point supertype, if any
    pub fn point(&self) -> Option<&Arc<Tag>> {
        self.point.as_ref()
    }

    /// Required Property supertype, if any
    pub fn property(&self) -> Option<&Arc<Tag>> {
        self.property.as_ref()
    }

    /// Whether the filter accepts every point
    pub fn is_empty(&self) -> bool {
        self.point.is_none() && self.property.is_none()
    }

    /// Whether a point with these types passes the filter
    pub fn matches(&self, point_type: &Tag, property_type: Option<&Tag>) -> bool {
        let point_ok = self.point.as_ref().map_or(true, |want| point_type.is_a(want));
        let property_ok = self
            .property
            .as_ref()
            .map_or(true, |want| property_type.is_some_and(|have| have.is_a(want)));
        point_ok && property_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sem_core::Locale;
    use sem_registries::MemoryTagCatalog;

    fn registry() -> TagRegistry {
        TagRegistry::new(Arc::new(MemoryTagCatalog::with_builtin()), Locale::english())
    }

    #[test]
    fn test_empty_filter() {
        let registry = registry();
        let filter = PointFilter::parse(&registry, &[]).unwrap();
        assert!(filter.is_empty());

        let switch = registry.get("Switch").unwrap();
        assert!(filter.matches(&switch, None));
    }

    #[test]
    fn test_point_and_property_in_any_order() {
        let registry = registry();
        let filter =
            PointFilter::parse(&registry, &["Temperature".into(), "Measurement".into()]).unwrap();
        assert_eq!(filter.point().unwrap().name.as_str(), "Measurement");
        assert_eq!(filter.property().unwrap().name.as_str(), "Temperature");
    }

    #[test]
    fn test_too_many_filters() {
        let registry = registry();
        let err = PointFilter::parse(
            &registry,
            &["Switch".into(), "Light".into(), "Power".into()],
        )
        .unwrap_err();
        assert_eq!(err, SemanticError::TooManyFilters { given: 3 });
    }

    #[test]
    fn test_wrong_kind() {
        let registry = registry();
        let err = PointFilter::parse(&registry, &["Kitchen".into()]).unwrap_err();
        assert_eq!(
            err,
            SemanticError::NotPointOrProperty {
                tag: "Kitchen".to_string()
            }
        );
    }

    #[test]
    fn test_two_points_conflict() {
        let registry = registry();
        let err = PointFilter::parse(&registry, &["Switch".into(), "Measurement".into()]).unwrap_err();
        assert!(matches!(
            err,
            SemanticError::ConflictingFilters { root: SemanticRoot::Point, .. }
        ));

        let err = PointFilter::parse(&registry, &["Light".into(), "Power".into()]).unwrap_err();
        assert!(matches!(
            err,
            SemanticError::ConflictingFilters { root: SemanticRoot::Property, .. }
        ));
    }

    #[test]
    fn test_unknown_tag() {
        let registry = registry();
        let err = PointFilter::parse(&registry, &["Bogus".into()]).unwrap_err();
        assert_eq!(err, SemanticError::UnknownTag("Bogus".to_string()));
    }

    #[test]
    fn test_matches_subtypes() {
        let registry = registry();
        let filter =
            PointFilter::parse(&registry, &[SemanticRoot::Point.into(), "Light".into()]).unwrap();

        let switch = registry.get("Switch").unwrap();
        let light = registry.get("Light").unwrap();
        let power = registry.get("Power").unwrap();
        assert!(filter.matches(&switch, Some(&*light)));
        assert!(!filter.matches(&switch, Some(&*power)));
        assert!(!filter.matches(&switch, None));
    }
}
