//! YAML configuration for the semantic model
//!
//! Loads `semantics.yaml` from a config directory: the locale used for tag
//! label lookups, custom tag definitions and item definitions. The `tags`
//! and `items` lists, or single entries of them, can be split into other
//! files with `!include path` (relative to the including file). Scalar values
//! can come from the environment with `!env_var VAR [default]`.
//!
//! Errors name the offending key path, e.g. `tags.Balcony.parent`.
//!
//! # Example
//!
//! ```ignore
//! use sem_config::SemanticsConfig;
//!
//! let config = SemanticsConfig::load("/etc/semantics")?;
//! for tag in &config.tags {
//!     println!("{} < {}", tag.name, tag.parent);
//! }
//! ```

mod error;
mod settings;
mod source;

pub use error::{ConfigError, ConfigResult};
pub use settings::{
    ItemDefinition, SemanticsConfig, TagDefinition, TranslationDefinition, CONFIG_FILE,
};
pub use source::Section;
