//! Semantic tag node
//!
//! A tag is one node of the semantic forest. Its parent is fixed at creation,
//! so the chain from a tag up to its root never changes once the tag exists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sem_core::{Locale, SemanticRoot, TagName, UID_SEPARATOR};

/// Localized display text of a tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagText {
    /// Display label
    #[serde(default)]
    pub label: String,

    /// Alternative names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,

    /// Longer description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl TagText {
    /// Create text with a label only
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set synonyms
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Where a tag came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagOrigin {
    /// Loaded from the built-in catalog at startup
    BuiltIn,
    /// Registered at runtime
    Custom,
}

/// A node of the semantic tag forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique name (e.g. "Kitchen")
    pub name: TagName,

    /// Parent tag, `None` only for the four roots
    pub parent: Option<TagName>,

    /// Root this tag descends from
    pub root: SemanticRoot,

    /// Chain from the root down to this tag (e.g. "Location_Indoor_Room_Kitchen")
    pub uid: String,

    /// Display label in the default language
    pub label: String,

    /// Alternative names in the default language
    pub synonyms: Vec<String>,

    /// Description in the default language
    pub description: String,

    /// Localized text keyed by locale ("de", "de_CH")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, TagText>,

    /// Built-in or custom
    pub origin: TagOrigin,

    /// Registration time of custom tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Tag {
    /// Create one of the four root tags
    pub fn root(root: SemanticRoot) -> Self {
        let name = TagName::new(root.name()).expect("root names are valid tag names");
        Self {
            uid: root.name().to_string(),
            label: root.name().to_string(),
            name,
            parent: None,
            root,
            synonyms: Vec::new(),
            description: String::new(),
            translations: BTreeMap::new(),
            origin: TagOrigin::BuiltIn,
            created_at: None,
        }
    }

    /// Create a child of `parent`, deriving the uid and root from it
    pub fn child_of(parent: &Tag, name: TagName, origin: TagOrigin) -> Self {
        Self {
            uid: format!("{}{}{}", parent.uid, UID_SEPARATOR, name),
            label: default_label(name.as_str()),
            parent: Some(parent.name.clone()),
            root: parent.root,
            name,
            synonyms: Vec::new(),
            description: String::new(),
            translations: BTreeMap::new(),
            origin,
            created_at: None,
        }
    }

    /// Whether this is one of the four roots
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Reflexive subtype test: `self <= other`
    ///
    /// Holds iff both are the same tag or `other` lies on this tag's parent
    /// chain. The uid is the materialized chain, so this is a prefix test.
    pub fn is_a(&self, other: &Tag) -> bool {
        match self.uid.strip_prefix(other.uid.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with(UID_SEPARATOR),
            None => false,
        }
    }

    /// Whether this tag descends (reflexively) from the given root
    pub fn is_under(&self, root: SemanticRoot) -> bool {
        self.root == root
    }

    /// Number of edges between this tag and its root
    pub fn depth(&self) -> usize {
        self.uid.matches(UID_SEPARATOR).count()
    }

    /// Translated text for a locale: exact locale first, then its language
    pub fn text_for(&self, locale: &Locale) -> Option<&TagText> {
        self.translations
            .get(&locale.to_string())
            .or_else(|| self.translations.get(locale.language()))
    }

    /// Label in the given locale, falling back to the default label
    pub fn label_for(&self, locale: &Locale) -> &str {
        self.text_for(locale)
            .map(|text| text.label.as_str())
            .filter(|label| !label.is_empty())
            .unwrap_or(&self.label)
    }

    /// Synonyms in the given locale, falling back to the default synonyms
    pub fn synonyms_for(&self, locale: &Locale) -> &[String] {
        match self.text_for(locale) {
            Some(text) if !text.synonyms.is_empty() => &text.synonyms,
            _ => &self.synonyms,
        }
    }

    /// Description in the given locale, falling back to the default description
    pub fn description_for(&self, locale: &Locale) -> &str {
        self.text_for(locale)
            .map(|text| text.description.as_str())
            .filter(|description| !description.is_empty())
            .unwrap_or(&self.description)
    }
}

/// Derive a label from a CamelCase tag name ("LivingRoom" -> "Living Room")
pub fn default_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_lower) {
                label.push(' ');
            }
        }
        label.push(c);
    }
    label
}
