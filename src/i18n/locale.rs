//! Locale type: validated locale representation.
//!
//! A `Locale` can only be constructed for codes present in the
//! [`LocaleRegistry`], so holding one means the code is supported.

use crate::i18n::{LocaleConfig, LocaleRegistry, LocaleStrings};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    /// ISO 639-1 code (e.g., "en", "es")
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };
    pub const SPANISH: Locale = Locale { code: "es" };
    pub const PORTUGUESE: Locale = Locale { code: "pt" };
    pub const FRENCH: Locale = Locale { code: "fr" };
    pub const GERMAN: Locale = Locale { code: "de" };

    /// Parse a locale code, returning `None` for unsupported codes.
    pub fn parse(code: &str) -> Option<Locale> {
        LocaleRegistry::get()
            .get_by_code(code)
            .map(|config| Locale { code: config.code })
    }

    /// Parse a locale code, treating unsupported codes as the default locale.
    pub fn parse_or_default(code: &str) -> Locale {
        Self::parse(code).unwrap_or_default()
    }

    /// All supported locales in resolution priority order.
    pub fn all() -> impl Iterator<Item = Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
    }

    /// Get the locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry. This cannot happen for a
    /// Locale built through `parse` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// Localized UI strings for this locale.
    pub fn strings(&self) -> &'static LocaleStrings {
        self.config().strings
    }

    /// Native name of the locale (e.g., "Español").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
