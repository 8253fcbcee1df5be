//! Slug resolution against an injected registry.
//!
//! Neither lookup treats "no match" as an error: the caller decides between a
//! 404 and a cross-locale redirect.

use crate::i18n::Locale;
use crate::registry::{CalculatorRegistry, RegistryEntry};

/// A slug found under some locale's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleMatch<'a> {
    pub entry: &'a RegistryEntry,
    pub matched_locale: Locale,
}

/// Resolve `slug` within `locale`'s namespace.
///
/// Unsupported locale codes behave as the default locale. Locales an entry
/// has no slug for are served under the entry's default slug.
pub fn resolve_by_slug<'a>(
    registry: &'a CalculatorRegistry,
    slug: &str,
    locale: &str,
) -> Option<&'a RegistryEntry> {
    registry.lookup(Locale::parse_or_default(locale), slug)
}

/// Resolve `slug` in every locale's namespace, in locale priority order.
///
/// The first locale (by priority) whose namespace contains the slug wins, so
/// the result is deterministic even if different entries reuse the same
/// literal in different locales.
pub fn resolve_any_locale<'a>(
    registry: &'a CalculatorRegistry,
    slug: &str,
) -> Option<LocaleMatch<'a>> {
    Locale::all().find_map(|locale| {
        registry.lookup(locale, slug).map(|entry| LocaleMatch {
            entry,
            matched_locale: locale,
        })
    })
}

/// Canonical path of `entry` for `locale`: `/{locale}/{slug}`.
pub fn canonical_path(entry: &RegistryEntry, locale: Locale) -> Option<String> {
    entry
        .slug_for(locale)
        .map(|slug| format!("/{}/{}", locale.code(), slug))
}
