//! Site locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sift_core::Error;

/// A locale the site publishes in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Portuguese, the site's primary language.
    #[default]
    Pt,
    /// English.
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Every supported locale, primary first.
    pub const ALL: [Locale; 3] = [Locale::Pt, Locale::En, Locale::Es];

    /// The two-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts bare codes and region-qualified tags (`pt-BR`, `es_ES`),
/// case-insensitively.
impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "pt" => Ok(Locale::Pt),
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            _ => Err(Error::parse(format!(
                "unsupported locale '{s}' (expected pt, en or es)"
            ))),
        }
    }
}
