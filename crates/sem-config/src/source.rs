//! Reading `semantics.yaml` and the files it includes
//!
//! The document has three top-level keys. `locale` is a scalar, while `tags`
//! and `items` are lists whose entries stay untyped here, so the typed parse
//! can report errors against the entry they came from.
//!
//! A list, or any single entry of it, may be `!include file`. The included
//! file holds a list of entries or one entry and is resolved relative to the
//! including file. `!env_var NAME [default]` may replace any scalar value.

use serde_yaml::value::Tag;
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::{ConfigError, ConfigResult};

const INCLUDE: &str = "include";
const ENV_VAR: &str = "env_var";

/// Top-level list of definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Tags,
    Items,
}

impl Section {
    pub fn key(self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::Items => "items",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One tag or item definition with the key path used in error messages
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// `tags.Balcony`, or `tags[3]` when the entry has no usable name
    pub key: String,
    pub value: Value,
    /// File the entry was read from
    pub file: PathBuf,
}

/// `semantics.yaml` with includes and environment variables resolved
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub locale: Option<String>,
    pub tags: Vec<Entry>,
    pub items: Vec<Entry>,
}

pub(crate) struct ConfigReader {
    /// Canonical paths of the files being read, outermost first
    open: Vec<PathBuf>,
}

impl ConfigReader {
    pub fn new() -> Self {
        Self { open: Vec::new() }
    }

    pub fn read_file(&mut self, path: &Path) -> ConfigResult<Document> {
        let root = parse_file(path)?;
        self.open.push(canonical(path));
        let document = self.document(root, path);
        self.open.pop();
        document
    }

    /// Read content as if it were stored at `path`
    pub fn read_str(&mut self, content: &str, path: &Path) -> ConfigResult<Document> {
        let root = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        self.document(root, path)
    }

    fn document(&mut self, root: Value, file: &Path) -> ConfigResult<Document> {
        let mut document = Document::default();
        let map = match root {
            Value::Null => return Ok(document),
            Value::Mapping(map) => map,
            _ => {
                return Err(ConfigError::invalid(
                    file.display().to_string(),
                    "expected a mapping of locale, tags and items",
                ))
            }
        };

        for (key, value) in map {
            let key = match key {
                Value::String(key) => key,
                other => return Err(ConfigError::invalid(format!("{:?}", other), "keys must be strings")),
            };
            match key.as_str() {
                "locale" => document.locale = scalar("locale", value)?,
                "tags" => self.list(Section::Tags, value, file, &mut document.tags)?,
                "items" => self.list(Section::Items, value, file, &mut document.items)?,
                other => return Err(ConfigError::invalid(other, "unknown key")),
            }
        }
        Ok(document)
    }

    fn list(
        &mut self,
        section: Section,
        value: Value,
        file: &Path,
        out: &mut Vec<Entry>,
    ) -> ConfigResult<()> {
        match value {
            Value::Null => Ok(()),
            Value::Sequence(entries) => {
                for entry in entries {
                    self.entry(section, entry, file, out)?;
                }
                Ok(())
            }
            Value::Tagged(tagged) if is_tag(&tagged.tag, INCLUDE) => {
                self.include(section, tagged.value, file, out)
            }
            _ => Err(ConfigError::invalid(section.key(), "expected a list or !include")),
        }
    }

    fn entry(
        &mut self,
        section: Section,
        value: Value,
        file: &Path,
        out: &mut Vec<Entry>,
    ) -> ConfigResult<()> {
        match value {
            Value::Tagged(tagged) if is_tag(&tagged.tag, INCLUDE) => {
                self.include(section, tagged.value, file, out)
            }
            Value::Mapping(map) => {
                let key = entry_key(section, &map, out.len());
                let value = substitute(&key, Value::Mapping(map))?;
                out.push(Entry {
                    key,
                    value,
                    file: file.to_path_buf(),
                });
                Ok(())
            }
            _ => Err(ConfigError::invalid(
                format!("{}[{}]", section, out.len()),
                "expected a mapping",
            )),
        }
    }

    fn include(
        &mut self,
        section: Section,
        target: Value,
        file: &Path,
        out: &mut Vec<Entry>,
    ) -> ConfigResult<()> {
        let key = section.key().to_string();
        let Value::String(target) = target else {
            return Err(ConfigError::invalid(key, "!include needs a file name"));
        };
        let path = file.parent().unwrap_or_else(|| Path::new(".")).join(target.trim());
        if !path.is_file() {
            return Err(ConfigError::IncludeNotFound { key, path });
        }
        let canonical_path = canonical(&path);
        if self.open.contains(&canonical_path) {
            return Err(ConfigError::IncludeCycle { key, path });
        }

        debug!("Including {} from {:?}", key, path);
        let included = parse_file(&path)?;
        self.open.push(canonical_path);
        let result = match included {
            single @ (Value::Mapping(_) | Value::Tagged(_)) => self.entry(section, single, &path, out),
            list => self.list(section, list, &path, out),
        };
        self.open.pop();
        result
    }
}

fn parse_file(path: &Path) -> ConfigResult<Value> {
    trace!("Reading {:?}", path);
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_tag(tag: &Tag, name: &str) -> bool {
    tag.to_string().trim_start_matches('!') == name
}

fn entry_key(section: Section, map: &Mapping, index: usize) -> String {
    match map.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {
            format!("{}.{}", section, name.trim())
        }
        _ => format!("{}[{}]", section, index),
    }
}

fn scalar(key: &str, value: Value) -> ConfigResult<Option<String>> {
    match substitute(key, value)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(ConfigError::invalid(key, "expected a string")),
    }
}

/// Resolve `!env_var` below `key`; every other tag is rejected
fn substitute(key: &str, value: Value) -> ConfigResult<Value> {
    match value {
        Value::Tagged(tagged) if is_tag(&tagged.tag, ENV_VAR) => env_var(key, tagged.value),
        Value::Tagged(tagged) if is_tag(&tagged.tag, INCLUDE) => {
            Err(ConfigError::IncludeNotAllowed { key: key.to_string() })
        }
        Value::Tagged(tagged) => Err(ConfigError::invalid(
            key,
            format!("unsupported tag {}", tagged.tag),
        )),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(field, value)| {
                let child = match &field {
                    Value::String(name) => format!("{}.{}", key, name),
                    _ => key.to_string(),
                };
                Ok((field, substitute(&child, value)?))
            })
            .collect::<ConfigResult<Mapping>>()
            .map(Value::Mapping),
        Value::Sequence(values) => values
            .into_iter()
            .enumerate()
            .map(|(i, value)| substitute(&format!("{}[{}]", key, i), value))
            .collect::<ConfigResult<Vec<Value>>>()
            .map(Value::Sequence),
        other => Ok(other),
    }
}

/// `!env_var NAME` fails when unset; `!env_var NAME default` falls back
fn env_var(key: &str, value: Value) -> ConfigResult<Value> {
    let Value::String(expr) = value else {
        return Err(ConfigError::invalid(key, "!env_var needs a variable name"));
    };
    let (var, default) = match expr.trim().split_once(char::is_whitespace) {
        Some((var, default)) => (var, Some(default.trim())),
        None => (expr.trim(), None),
    };

    match (std::env::var(var), default) {
        (Ok(value), _) => {
            debug!(key = %key, "Substituted env var {}", var);
            Ok(Value::String(value))
        }
        (Err(_), Some(default)) => {
            debug!(key = %key, "Env var {} not set, using default", var);
            Ok(Value::String(default.to_string()))
        }
        (Err(_), None) => Err(ConfigError::EnvVarNotSet {
            key: key.to_string(),
            var: var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn read(content: &str) -> ConfigResult<Document> {
        ConfigReader::new().read_str(content, Path::new("/tmp/semantics.yaml"))
    }

    fn keys(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.key.as_str()).collect()
    }

    #[test]
    fn test_read_document() {
        let document = read(
            "locale: de\ntags:\n  - {name: Balcony, parent: Outdoor}\n  - {parent: Room}\nitems:\n  - {name: gKitchen, type: Group}\n",
        )
        .unwrap();

        assert_eq!(document.locale.as_deref(), Some("de"));
        assert_eq!(keys(&document.tags), ["tags.Balcony", "tags[1]"]);
        assert_eq!(keys(&document.items), ["items.gKitchen"]);
        assert!(read("").unwrap().tags.is_empty());
    }

    #[test]
    fn test_include_section_and_entries() {
        let dir = TempDir::new().unwrap();
        let main = write_file(dir.path(), "semantics.yaml", "tags: !include tags/outdoor.yaml\n");
        write_file(
            dir.path(),
            "tags/outdoor.yaml",
            "- {name: Balcony, parent: Outdoor}\n- !include roof.yaml\n",
        );
        write_file(dir.path(), "tags/roof.yaml", "name: RoofTop\nparent: Outdoor\n");

        let document = ConfigReader::new().read_file(&main).unwrap();
        assert_eq!(keys(&document.tags), ["tags.Balcony", "tags.RoofTop"]);
        assert!(document.tags[1].file.ends_with("tags/roof.yaml"));
    }

    #[test]
    fn test_include_outside_lists_rejected() {
        let err = read("locale: !include locale.yaml\n").unwrap_err();
        assert!(matches!(err, ConfigError::IncludeNotAllowed { ref key } if key == "locale"));

        let err = read("tags:\n  - name: Balcony\n    label: !include label.yaml\n").unwrap_err();
        assert_eq!(err.key(), Some("tags.Balcony.label"));
    }

    #[test]
    fn test_include_not_found() {
        let dir = TempDir::new().unwrap();
        let main = write_file(dir.path(), "semantics.yaml", "items: !include missing.yaml\n");

        let err = ConfigReader::new().read_file(&main).unwrap_err();
        assert!(matches!(err, ConfigError::IncludeNotFound { ref key, .. } if key == "items"));
    }

    #[test]
    fn test_include_cycle() {
        let dir = TempDir::new().unwrap();
        let main = write_file(dir.path(), "semantics.yaml", "tags: !include more.yaml\n");
        write_file(dir.path(), "more.yaml", "- !include semantics.yaml\n");

        let err = ConfigReader::new().read_file(&main).unwrap_err();
        assert!(matches!(err, ConfigError::IncludeCycle { .. }));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SEM_SOURCE_TEST_LOCALE", "fr_FR");
        let document = read("locale: !env_var SEM_SOURCE_TEST_LOCALE\n").unwrap();
        assert_eq!(document.locale.as_deref(), Some("fr_FR"));

        let document = read(
            "tags:\n  - name: Balcony\n    label: !env_var SEM_SOURCE_TEST_UNSET_1 Loggia\n",
        )
        .unwrap();
        assert_eq!(document.tags[0].value["label"].as_str(), Some("Loggia"));
    }

    #[test]
    fn test_env_var_missing() {
        let err = read("items:\n  - name: Lamp\n    tags: [!env_var SEM_SOURCE_TEST_UNSET_2]\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVarNotSet { ref key, ref var }
                if key == "items.Lamp.tags[0]" && var == "SEM_SOURCE_TEST_UNSET_2"
        ));
    }

    #[test]
    fn test_malformed_documents() {
        let err = read("lights: []\n").unwrap_err();
        assert_eq!(err.key(), Some("lights"));

        let err = read("tags: Balcony\n").unwrap_err();
        assert_eq!(err.key(), Some("tags"));

        let err = read("items:\n  - Lamp\n").unwrap_err();
        assert_eq!(err.key(), Some("items[0]"));

        let err = read("tags:\n  - {name: Balcony, parent: !secret outdoor}\n").unwrap_err();
        assert_eq!(err.key(), Some("tags.Balcony.parent"));
    }
}
