//! Page text and head metadata for calculator pages.
//!
//! Everything here degrades instead of failing: a calculator without its own
//! text for a locale uses the default locale's, and a calculator whose module
//! cannot be loaded gets a title derived from its slug.

use crate::calculator::CalculatorConfig;
use crate::i18n::Locale;
use crate::registry::RegistryEntry;
use crate::resolver::canonical_path;

/// hreflang value pointing search engines at the fallback page.
pub const X_DEFAULT: &str = "x-default";

/// Visible name and subtitle of a calculator page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTexts {
    pub name: String,
    pub subtitle: String,
}

impl PageTexts {
    /// Resolve the texts for `entry` in `locale`.
    ///
    /// Order: the calculator's text for `locale`, then for the default
    /// locale, then a title derived from the slug with an empty subtitle.
    pub fn resolve(
        entry: &RegistryEntry,
        locale: Locale,
        config: Option<&CalculatorConfig>,
    ) -> Self {
        match config.and_then(|c| c.text(locale)) {
            Some(text) => Self {
                name: text.name.clone(),
                subtitle: text.subtitle.clone(),
            },
            None => Self {
                name: title_from_slug(entry.slug_for(locale).unwrap_or(&entry.id)),
                subtitle: String::new(),
            },
        }
    }
}

/// One `<link rel="alternate" hreflang=...>` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

/// Head metadata of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub alternates: Vec<Alternate>,
}

impl PageMetadata {
    /// Metadata for a page with nothing but a title.
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            keywords: Vec::new(),
            canonical_url: None,
            alternates: Vec::new(),
        }
    }

    /// Metadata for a calculator page, using the calculator's SEO bundle
    /// when it has one.
    pub fn for_calculator(
        entry: &RegistryEntry,
        locale: Locale,
        config: Option<&CalculatorConfig>,
        texts: &PageTexts,
        base_url: &str,
    ) -> Self {
        let seo = config
            .and_then(|c| c.text(locale))
            .and_then(|t| t.seo.as_ref());

        let (title, description, keywords) = match seo {
            Some(seo) => (
                seo.title.clone(),
                seo.description.clone(),
                seo.keywords.clone(),
            ),
            None => (texts.name.clone(), texts.subtitle.clone(), Vec::new()),
        };

        Self {
            title,
            description,
            keywords,
            canonical_url: canonical_path(entry, locale).map(|path| absolute_url(base_url, &path)),
            alternates: alternates(entry, base_url),
        }
    }
}

/// hreflang alternates of `entry`: one per supported locale plus `x-default`.
pub fn alternates(entry: &RegistryEntry, base_url: &str) -> Vec<Alternate> {
    let mut links: Vec<Alternate> = Locale::all()
        .filter_map(|locale| {
            canonical_path(entry, locale).map(|path| Alternate {
                hreflang: locale.config().html_lang.to_string(),
                href: absolute_url(base_url, &path),
            })
        })
        .collect();

    if let Some(path) = canonical_path(entry, Locale::default()) {
        links.push(Alternate {
            hreflang: X_DEFAULT.to_string(),
            href: absolute_url(base_url, &path),
        });
    }
    links
}

/// Join a base URL and an absolute path without doubling the slash.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Title-case a slug: `"bmi-calculator"` becomes `"Bmi Calculator"`.
pub fn title_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
