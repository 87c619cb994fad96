//! Locale used to resolve localized tag labels and synonyms

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variables consulted for the process locale, in priority order
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Fallback language when the environment names no usable locale
pub const DEFAULT_LANGUAGE: &str = "en";

/// Error type for invalid locale strings
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("locale cannot be empty")]
    Empty,

    #[error("invalid locale '{0}'")]
    Invalid(String),
}

/// A language with an optional region (e.g. "en", "de_DE")
///
/// Parsing accepts `_` or `-` as separator and drops any encoding or
/// modifier suffix (`en_US.UTF-8`, `de_DE@euro`). The language is stored
/// lowercase and the region uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Create a locale from a language and optional region
    pub fn new(language: &str, region: Option<&str>) -> Result<Self, LocaleError> {
        if language.is_empty() {
            return Err(LocaleError::Empty);
        }
        let valid = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid(language) || !region.map_or(true, valid) {
            let full = match region {
                Some(region) => format!("{}_{}", language, region),
                None => language.to_string(),
            };
            return Err(LocaleError::Invalid(full));
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        })
    }

    /// English, the language of the built-in tag catalog
    pub fn english() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            region: None,
        }
    }

    /// The process locale, read from `LC_ALL`, `LC_MESSAGES` and `LANG`
    ///
    /// The POSIX "C" locale (with or without an encoding suffix) and
    /// unparsable values are skipped; falls back to English.
    pub fn system() -> Self {
        Self::first_usable(LOCALE_ENV_VARS.iter().filter_map(|var| std::env::var(var).ok()))
    }

    fn first_usable<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Self {
        values
            .into_iter()
            .filter_map(|value| value.as_ref().parse::<Locale>().ok())
            .find(|locale| !locale.is_posix())
            .unwrap_or_else(Self::english)
    }

    /// The "C" or "POSIX" locale, which names no language
    fn is_posix(&self) -> bool {
        self.language == "c" || self.language == "posix"
    }

    /// Language code (e.g. "de")
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Region code, if any (e.g. "DE")
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale without its region
    pub fn without_region(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::system()
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if base.is_empty() {
            return Err(LocaleError::Empty);
        }
        let mut parts = base.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();
        if parts.next().is_some() {
            return Err(LocaleError::Invalid(s.to_string()));
        }
        Self::new(language, region)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> String {
        locale.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locales() {
        let de: Locale = "de-de".parse().unwrap();
        assert_eq!(de.language(), "de");
        assert_eq!(de.region(), Some("DE"));
        assert_eq!(de.to_string(), "de_DE");

        let en: Locale = "en_US.UTF-8".parse().unwrap();
        assert_eq!(en.to_string(), "en_US");
        assert_eq!(en.without_region(), Locale::english());

        assert_eq!("fr".parse::<Locale>().unwrap().region(), None);
    }

    #[test]
    fn test_invalid_locales() {
        assert_eq!("".parse::<Locale>().unwrap_err(), LocaleError::Empty);
        assert!("en_US_x".parse::<Locale>().is_err());
        assert!("e n".parse::<Locale>().is_err());
    }

    #[test]
    fn test_posix_locales_fall_through() {
        assert_eq!(Locale::first_usable(["C.UTF-8"]), Locale::english());
        assert_eq!(Locale::first_usable(["POSIX", "C"]), Locale::english());
        assert_eq!(
            Locale::first_usable(["C.UTF-8", "de_DE.UTF-8"]).to_string(),
            "de_DE"
        );
        assert_eq!(Locale::first_usable(["not a locale", "fr"]).to_string(), "fr");
        assert_eq!(Locale::first_usable(Vec::<String>::new()), Locale::english());
    }
}
