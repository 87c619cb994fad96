//! Semantic model configuration
//!
//! Parses `semantics.yaml`: the lookup locale, custom tag definitions and
//! item definitions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

use sem_core::{ItemName, Locale, TagName};

use crate::error::{ConfigError, ConfigResult};
use crate::source::{ConfigReader, Document, Entry, Section};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE: &str = "semantics.yaml";

/// Localized text of a custom tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationDefinition {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub synonyms: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A custom tag to register at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDefinition {
    /// Tag name (e.g. "Balcony")
    pub name: TagName,

    /// Parent tag name or label (e.g. "Outdoor")
    pub parent: String,

    #[serde(default)]
    pub label: Option<String>,

    /// A single synonym or a list
    #[serde(default, deserialize_with = "one_or_many")]
    pub synonyms: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Translations keyed by locale ("de", "de_CH")
    #[serde(default)]
    pub translations: BTreeMap<String, TranslationDefinition>,
}

/// An item to register in the item registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: ItemName,

    /// Item type (e.g. "Switch", "Group")
    #[serde(rename = "type")]
    pub item_type: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub groups: Vec<ItemName>,
}

/// Contents of `semantics.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticsConfig {
    /// Locale for label/synonym lookups (default: process locale)
    #[serde(default)]
    pub locale: Option<Locale>,

    /// Custom tags, registered in order
    #[serde(default)]
    pub tags: Vec<TagDefinition>,

    /// Items
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

impl SemanticsConfig {
    /// Load `semantics.yaml` from a config directory
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load(config_dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = config_dir.as_ref().join(CONFIG_FILE);
        if !path.is_file() {
            info!("No {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let config = Self::from_document(ConfigReader::new().read_file(&path)?)?;
        info!(
            tags = config.tags.len(),
            items = config.items.len(),
            "Loaded semantics configuration"
        );
        Ok(config)
    }

    /// Parse `semantics.yaml` content; includes resolve against `config_dir`
    pub fn parse(config_dir: impl AsRef<Path>, content: &str) -> ConfigResult<Self> {
        let path = config_dir.as_ref().join(CONFIG_FILE);
        Self::from_document(ConfigReader::new().read_str(content, &path)?)
    }

    fn from_document(document: Document) -> ConfigResult<Self> {
        let locale = document
            .locale
            .map(|locale| locale.parse::<Locale>().map_err(|e| ConfigError::invalid("locale", e)))
            .transpose()?;

        let config = Self {
            locale,
            tags: typed(document.tags)?,
            items: typed(document.items)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Locale to use, falling back to the process locale
    pub fn locale(&self) -> Locale {
        self.locale.clone().unwrap_or_else(Locale::system)
    }

    /// Check for duplicate names, empty parents and bad translation locales
    pub fn validate(&self) -> ConfigResult<()> {
        let mut tag_names = HashSet::new();
        for tag in &self.tags {
            if !tag_names.insert(tag.name.as_str()) {
                return Err(ConfigError::Duplicate {
                    section: Section::Tags,
                    name: tag.name.to_string(),
                });
            }
            if tag.parent.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("tags.{}.parent", tag.name),
                    "must name a parent tag",
                ));
            }
            for locale in tag.translations.keys() {
                locale.parse::<Locale>().map_err(|e| {
                    ConfigError::invalid(format!("tags.{}.translations", tag.name), e)
                })?;
            }
        }

        let mut item_names = HashSet::new();
        for item in &self.items {
            if !item_names.insert(item.name.as_str()) {
                return Err(ConfigError::Duplicate {
                    section: Section::Items,
                    name: item.name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn typed<T: DeserializeOwned>(entries: Vec<Entry>) -> ConfigResult<Vec<T>> {
    entries
        .into_iter()
        .map(|Entry { key, value, file }| {
            serde_yaml::from_value(value).map_err(|e| {
                ConfigError::invalid(key, format!("{} (in {})", e, file.display()))
            })
        })
        .collect()
}

/// Accept either a single string or a list of strings
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}
