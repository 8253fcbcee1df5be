//! Calculator registry: the immutable table of calculator identities.
//!
//! Every calculator has one stable id and one slug per locale. The registry
//! is loaded once at startup, validated, indexed per locale, and then shared
//! read-only (`Arc<CalculatorRegistry>`) by everything that resolves URLs.

mod validator;

pub use validator::{RegistryValidator, ValidationReport};

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// Registry source compiled into the binary.
pub const EMBEDDED_REGISTRY: &str = include_str!("../../data/registry.json");

/// Errors raised while loading a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("registry failed validation with {} error(s): {}", .errors.len(), .errors.join("; "))]
    Invalid { errors: Vec<String> },
}

/// Classification tag used for grouping and breadcrumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Finance,
    Math,
    Everyday,
    Conversion,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Finance,
        Category::Math,
        Category::Everyday,
        Category::Conversion,
    ];

    /// Machine name, as used in the registry source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Finance => "finance",
            Category::Math => "math",
            Category::Everyday => "everyday",
            Category::Conversion => "conversion",
        }
    }

    /// Localized display label.
    pub fn label(&self, locale: Locale) -> &'static str {
        let strings = locale.strings();
        match self {
            Category::Health => strings.category_health,
            Category::Finance => strings.category_finance,
            Category::Math => strings.category_math,
            Category::Everyday => strings.category_everyday,
            Category::Conversion => strings.category_conversion,
        }
    }
}

/// One calculator's identity and its per-locale slugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Stable, never-localized identifier
    pub id: String,

    pub category: Category,

    /// Locale code -> slug
    pub slugs: BTreeMap<String, String>,
}

impl RegistryEntry {
    /// The slug served for `locale`: the registered one, else the default
    /// locale's slug.
    ///
    /// Only `None` for entries that have not passed validation.
    pub fn slug_for(&self, locale: Locale) -> Option<&str> {
        self.slugs
            .get(locale.code())
            .or_else(|| self.slugs.get(Locale::default().code()))
            .map(String::as_str)
    }

    /// Whether `locale` has its own slug rather than the default fallback.
    pub fn has_own_slug(&self, locale: Locale) -> bool {
        self.slugs.contains_key(locale.code())
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    calculators: Vec<RegistryEntry>,
}

/// Parse registry JSON (`{"calculators": [...]}`) without validating it.
pub fn parse_entries(json: &str) -> Result<Vec<RegistryEntry>, RegistryError> {
    let file: RegistryFile = serde_json::from_str(json)?;
    Ok(file.calculators)
}

/// Validated, indexed, immutable registry.
#[derive(Debug)]
pub struct CalculatorRegistry {
    entries: Vec<RegistryEntry>,
    by_id: HashMap<String, usize>,
    /// Locale code -> (effective slug -> entry index)
    by_slug: HashMap<&'static str, HashMap<String, usize>>,
}

impl CalculatorRegistry {
    /// Build a registry from entries, rejecting any that break the registry
    /// invariants. Warnings are logged.
    pub fn from_entries(entries: Vec<RegistryEntry>) -> Result<Self, RegistryError> {
        let report = RegistryValidator::validate(&entries);
        for warning in &report.warnings {
            warn!("Registry: {}", warning);
        }
        if report.has_errors() {
            return Err(RegistryError::Invalid {
                errors: report.errors,
            });
        }

        let by_id = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id.clone(), index))
            .collect();

        let mut by_slug: HashMap<&'static str, HashMap<String, usize>> = HashMap::new();
        for locale in Locale::all() {
            let index = by_slug.entry(locale.code()).or_default();
            for (position, entry) in entries.iter().enumerate() {
                if let Some(slug) = entry.slug_for(locale) {
                    index.insert(slug.to_string(), position);
                }
            }
        }

        Ok(Self {
            entries,
            by_id,
            by_slug,
        })
    }

    /// Parse and validate a registry from its JSON source.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        Self::from_entries(parse_entries(json)?)
    }

    /// Load a registry from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_json_str(&json)?;
        info!(
            "Loaded {} calculators from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// The registry compiled into the binary.
    pub fn embedded() -> Result<Self, RegistryError> {
        let registry = Self::from_json_str(EMBEDDED_REGISTRY)?;
        info!("Loaded {} calculators from embedded registry", registry.len());
        Ok(registry)
    }

    /// Direct lookup of the effective slug within one locale's namespace.
    pub fn lookup(&self, locale: Locale, slug: &str) -> Option<&RegistryEntry> {
        self.by_slug
            .get(locale.code())
            .and_then(|index| index.get(slug))
            .map(|&position| &self.entries[position])
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.by_id.get(id).map(|&position| &self.entries[position])
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Entries of one category, in declaration order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
