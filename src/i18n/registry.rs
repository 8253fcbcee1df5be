//! Locale registry: Single source of truth for all supported locales.
//!
//! The order of the locale table is significant: it is the priority order used
//! whenever a lookup has to scan every locale (for example when a slug is
//! requested under the wrong locale and has to be found elsewhere).

use crate::i18n::strings::{
    LocaleStrings, ENGLISH_STRINGS, FRENCH_STRINGS, GERMAN_STRINGS, PORTUGUESE_STRINGS,
    SPANISH_STRINGS,
};
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 code, also the first URL path segment (e.g., "en", "es")
    pub code: &'static str,

    /// English name of the locale (e.g., "Spanish")
    pub name: &'static str,

    /// Native name of the locale (e.g., "Español")
    pub native_name: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,

    /// Value for `<html lang>` and hreflang attributes
    pub html_lang: &'static str,

    /// Separator between integer and fractional digits
    pub decimal_separator: char,

    /// Separator between groups of three integer digits
    pub group_separator: char,

    /// Localized UI chrome
    pub strings: &'static LocaleStrings,
}

/// Global locale registry singleton.
///
/// Initialized once on first access and immutable thereafter.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the code is unknown
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All locales in priority order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the table does not define exactly one default locale. The
    /// table is static, so this indicates a programming error.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self.locales.iter().filter(|l| l.is_default).collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }
}

/// The supported locales, in resolution priority order.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            html_lang: "en",
            decimal_separator: '.',
            group_separator: ',',
            strings: &ENGLISH_STRINGS,
        },
        LocaleConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
            html_lang: "es",
            decimal_separator: ',',
            group_separator: '.',
            strings: &SPANISH_STRINGS,
        },
        LocaleConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            is_default: false,
            html_lang: "pt-BR",
            decimal_separator: ',',
            group_separator: '.',
            strings: &PORTUGUESE_STRINGS,
        },
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: false,
            html_lang: "fr",
            decimal_separator: ',',
            group_separator: '\u{202f}',
            strings: &FRENCH_STRINGS,
        },
        LocaleConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_default: false,
            html_lang: "de",
            decimal_separator: ',',
            group_separator: '.',
            strings: &GERMAN_STRINGS,
        },
    ]
}
