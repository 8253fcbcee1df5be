//! Registry validation.
//!
//! Checks the invariants every calculator registry must hold before it can be
//! indexed: unique ids, a default-locale slug on every entry, URL-safe slugs,
//! only supported locale codes, and unique slugs within each locale's
//! namespace (after default-slug fallback is applied).

use crate::i18n::Locale;
use crate::registry::RegistryEntry;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Invariant violations; a registry with errors cannot be loaded
    pub errors: Vec<String>,

    /// Authoring issues that do not prevent loading
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for calculator registries.
pub struct RegistryValidator;

static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
static ID_REGEX: OnceLock<Regex> = OnceLock::new();

impl RegistryValidator {
    /// Validate a list of registry entries.
    ///
    /// Errors:
    /// - empty or malformed ids, duplicate ids
    /// - slug keys that are not supported locale codes
    /// - entries without a default-locale slug
    /// - slugs that are not lowercase, hyphen-separated ASCII
    /// - two entries resolving to the same slug within one locale
    ///
    /// Warnings:
    /// - locales without an explicit slug (served under the default slug)
    /// - a slug literal used by different entries in different locales, which
    ///   makes cross-locale recovery depend on locale priority
    pub fn validate(entries: &[RegistryEntry]) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default = Locale::default();

        let mut ids = HashSet::new();
        for entry in entries {
            if !Self::is_valid_id(&entry.id) {
                report
                    .errors
                    .push(format!("Invalid calculator id '{}'", entry.id));
            }
            if !ids.insert(entry.id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate calculator id '{}'", entry.id));
            }

            for (code, slug) in &entry.slugs {
                if Locale::parse(code).is_none() {
                    report.errors.push(format!(
                        "Entry '{}' has a slug for unsupported locale '{}'",
                        entry.id, code
                    ));
                }
                if !Self::is_valid_slug(slug) {
                    report.errors.push(format!(
                        "Entry '{}' has invalid slug '{}' for locale '{}'",
                        entry.id, slug, code
                    ));
                }
            }

            if !entry.slugs.contains_key(default.code()) {
                report.errors.push(format!(
                    "Entry '{}' has no slug for default locale '{}'",
                    entry.id, default
                ));
            }

            let missing: Vec<_> = Locale::all()
                .filter(|locale| !entry.slugs.contains_key(locale.code()))
                .filter(|locale| *locale != default)
                .map(|locale| locale.code())
                .collect();
            if !missing.is_empty() {
                report.warnings.push(format!(
                    "Entry '{}' falls back to the default slug for: {}",
                    entry.id,
                    missing.join(", ")
                ));
            }
        }

        // Per-locale namespace uniqueness, after fallback
        for locale in Locale::all() {
            let mut seen: HashMap<&str, &str> = HashMap::new();
            for entry in entries {
                let Some(slug) = entry.slug_for(locale) else {
                    continue;
                };
                if let Some(owner) = seen.insert(slug, entry.id.as_str()) {
                    if owner != entry.id {
                        report.errors.push(format!(
                            "Slug '{}' in locale '{}' is used by both '{}' and '{}'",
                            slug, locale, owner, entry.id
                        ));
                    }
                }
            }
        }

        // Cross-namespace reuse by different entries
        let mut owners: HashMap<&str, HashSet<&str>> = HashMap::new();
        for entry in entries {
            for slug in entry.slugs.values() {
                owners
                    .entry(slug.as_str())
                    .or_default()
                    .insert(entry.id.as_str());
            }
        }
        let mut shared: Vec<_> = owners
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .collect();
        shared.sort_by(|a, b| a.0.cmp(b.0));
        for (slug, ids) in shared {
            let mut ids: Vec<_> = ids.into_iter().collect();
            ids.sort_unstable();
            report.warnings.push(format!(
                "Slug '{}' is registered by different entries in different locales: {}",
                slug,
                ids.join(", ")
            ));
        }

        report
    }

    /// Slugs are lowercase ASCII words separated by single hyphens
    fn is_valid_slug(slug: &str) -> bool {
        let regex = SLUG_REGEX.get_or_init(|| {
            Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid")
        });
        regex.is_match(slug)
    }

    /// Ids follow the slug rules and may also use underscores
    fn is_valid_id(id: &str) -> bool {
        let regex = ID_REGEX.get_or_init(|| {
            Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").expect("id pattern is valid")
        });
        regex.is_match(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Category;

    fn entry(id: &str, slugs: &[(&str, &str)]) -> RegistryEntry {
        RegistryEntry {
            id: id.to_string(),
            category: Category::Math,
            slugs: slugs
                .iter()
                .map(|(l, s)| (l.to_string(), s.to_string()))
                .collect(),
        }
    }

    fn full(id: &str, stem: &str) -> RegistryEntry {
        entry(
            id,
            &[
                ("en", &format!("{stem}-en")),
                ("es", &format!("{stem}-es")),
                ("pt", &format!("{stem}-pt")),
                ("fr", &format!("{stem}-fr")),
                ("de", &format!("{stem}-de")),
            ],
        )
    }

    // ==================== Slug Pattern Tests ====================

    #[test]
    fn test_valid_slugs() {
        assert!(RegistryValidator::is_valid_slug("bmi-calculator"));
        assert!(RegistryValidator::is_valid_slug("prozentrechner"));
        assert!(RegistryValidator::is_valid_slug("calc-2024"));
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(!RegistryValidator::is_valid_slug(""));
        assert!(!RegistryValidator::is_valid_slug("BMI"));
        assert!(!RegistryValidator::is_valid_slug("a--b"));
        assert!(!RegistryValidator::is_valid_slug("-leading"));
        assert!(!RegistryValidator::is_valid_slug("has/slash"));
        assert!(!RegistryValidator::is_valid_slug("índice"));
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_clean_registry() {
        let report = RegistryValidator::validate(&[full("bmi", "bmi"), full("tip", "tip")]);
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn test_missing_default_slug_is_error() {
        let report = RegistryValidator::validate(&[entry("bmi", &[("es", "calculadora-imc")])]);
        assert!(report.has_errors());
        assert!(report.errors[0].contains("default locale"));
    }

    #[test]
    fn test_duplicate_id_is_error() {
        let report = RegistryValidator::validate(&[full("bmi", "a"), full("bmi", "b")]);
        assert!(report.errors.iter().any(|e| e.contains("Duplicate")));
    }

    #[test]
    fn test_unsupported_locale_is_error() {
        let report =
            RegistryValidator::validate(&[entry("bmi", &[("en", "bmi"), ("it", "calcolatore")])]);
        assert!(report.errors.iter().any(|e| e.contains("unsupported locale 'it'")));
    }

    #[test]
    fn test_duplicate_slug_within_locale_is_error() {
        let report = RegistryValidator::validate(&[
            entry("a", &[("en", "same")]),
            entry("b", &[("en", "same")]),
        ]);
        assert!(report.errors.iter().any(|e| e.contains("used by both")));
    }

    #[test]
    fn test_fallback_collision_is_error() {
        // "b" has no Spanish slug, so it is served as "shared" under /es/
        let report = RegistryValidator::validate(&[
            entry("a", &[("en", "a-en"), ("es", "shared")]),
            entry("b", &[("en", "shared")]),
        ]);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'shared' in locale 'es'")));
    }

    #[test]
    fn test_same_literal_same_entry_across_locales_is_fine() {
        let report = RegistryValidator::validate(&[entry(
            "bmi",
            &[
                ("en", "bmi"),
                ("es", "imc"),
                ("pt", "imc"),
                ("fr", "imc"),
                ("de", "bmi"),
            ],
        )]);
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn test_missing_locale_is_warning() {
        let report = RegistryValidator::validate(&[entry("bmi", &[("en", "bmi")])]);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("es, pt, fr, de"));
    }

    #[test]
    fn test_cross_locale_literal_reuse_is_warning() {
        let mut a = full("a", "a");
        a.slugs.insert("es".to_string(), "shared".to_string());
        let mut b = full("b", "b");
        b.slugs.insert("fr".to_string(), "shared".to_string());

        let report = RegistryValidator::validate(&[a, b]);
        assert!(!report.has_errors(), "{report:?}");
        assert!(report.warnings.iter().any(|w| w.contains("'shared'")));
    }
}
