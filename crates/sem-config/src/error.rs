//! Errors raised while reading `semantics.yaml`
//!
//! Every error that concerns a value carries its key path, e.g.
//! `locale`, `tags.Balcony.translations` or `items[3]`.

use std::path::PathBuf;
use thiserror::Error;

use crate::source::Section;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid YAML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `!include` names a file that does not exist
    #[error("{key}: included file {path} does not exist")]
    IncludeNotFound { key: String, path: PathBuf },

    /// `!include` reached a file that is already being read
    #[error("{key}: {path} is already being included")]
    IncludeCycle { key: String, path: PathBuf },

    /// `!include` outside a tag or item list
    #[error("{key}: !include is only allowed for tag and item lists")]
    IncludeNotAllowed { key: String },

    #[error("{key}: environment variable {var} is not set")]
    EnvVarNotSet { key: String, var: String },

    #[error("{key}: {reason}")]
    Invalid { key: String, reason: String },

    /// The same tag or item name appears twice across the file and its includes
    #[error("{section}.{name} is defined more than once")]
    Duplicate { section: Section, name: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Key path of the offending value, if the error concerns one
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::IncludeNotFound { key, .. }
            | Self::IncludeCycle { key, .. }
            | Self::IncludeNotAllowed { key }
            | Self::EnvVarNotSet { key, .. }
            | Self::Invalid { key, .. } => Some(key),
            Self::Read { .. } | Self::Parse { .. } | Self::Duplicate { .. } => None,
        }
    }
}
