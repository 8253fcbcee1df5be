//! Server renderer: turns a `(locale, slug)` request into a page shell, a
//! permanent redirect, or a 404.

use crate::i18n::Locale;
use crate::locator::{locate_within, CalculatorModule, ModuleSource};
use crate::metrics::ResolutionMetrics;
use crate::registry::{CalculatorRegistry, Category, RegistryEntry};
use crate::render::metadata::{PageMetadata, PageTexts};
use crate::render::page::{BrowseItem, Crumb, PageShell};
use crate::resolver::{canonical_path, resolve_any_locale, resolve_by_slug};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// What to send back for a calculator page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Page(PageShell),
    /// Permanent redirect to the slug of the requested locale
    Redirect { location: String },
    NotFound { locale: Locale },
}

pub struct ServerRenderer {
    registry: Arc<CalculatorRegistry>,
    source: Arc<dyn ModuleSource>,
    base_url: String,
    module_load_timeout: Duration,
}

impl ServerRenderer {
    /// Module loads that do not settle within `module_load_timeout` count
    /// as failed, so the page degrades to slug-derived texts.
    pub fn new(
        registry: Arc<CalculatorRegistry>,
        source: Arc<dyn ModuleSource>,
        base_url: impl Into<String>,
        module_load_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            source,
            base_url: base_url.into(),
            module_load_timeout,
        }
    }

    pub fn registry(&self) -> &CalculatorRegistry {
        &self.registry
    }

    /// Render the page for `/{locale_segment}/{slug}`.
    ///
    /// Unsupported locales and anything but a single non-empty slug segment
    /// are not found. A slug only known in another locale redirects to the
    /// requested locale's slug for the same calculator.
    pub async fn render(&self, locale_segment: &str, slug: &str) -> RenderOutcome {
        let metrics = ResolutionMetrics::global();

        let Some(locale) = Locale::parse(locale_segment) else {
            metrics.record_not_found();
            return RenderOutcome::NotFound {
                locale: Locale::default(),
            };
        };
        if slug.is_empty() || slug.contains('/') {
            metrics.record_not_found();
            return RenderOutcome::NotFound { locale };
        }

        if let Some(entry) = resolve_by_slug(&self.registry, slug, locale.code()) {
            metrics.record_direct_hit();
            return RenderOutcome::Page(self.shell(entry, locale).await);
        }

        match resolve_any_locale(&self.registry, slug)
            .and_then(|found| canonical_path(found.entry, locale).map(|path| (found, path)))
        {
            Some((found, location)) => {
                debug!(
                    "Slug '{}' belongs to '{}' in locale {}; redirecting to {}",
                    slug, found.entry.id, found.matched_locale, location
                );
                metrics.record_redirect();
                RenderOutcome::Redirect { location }
            }
            None => {
                debug!("No calculator with slug '{}' in any locale", slug);
                metrics.record_not_found();
                RenderOutcome::NotFound { locale }
            }
        }
    }

    /// Build the page shell of `entry` in `locale`. Never fails: texts
    /// degrade to the slug when the module cannot be loaded.
    pub async fn shell(&self, entry: &RegistryEntry, locale: Locale) -> PageShell {
        let module = self.module(&entry.id).await;
        let config = module.as_ref().map(CalculatorModule::config);

        let texts = PageTexts::resolve(entry, locale, config);
        let metadata = PageMetadata::for_calculator(entry, locale, config, &texts, &self.base_url);
        let strings = locale.strings();

        PageShell {
            locale,
            calculator_id: entry.id.clone(),
            breadcrumb: vec![
                Crumb::link(strings.home, format!("/{}", locale.code())),
                Crumb::link(
                    entry.category.label(locale),
                    format!("/{}#{}", locale.code(), entry.category.as_str()),
                ),
                Crumb::current(&texts.name),
            ],
            title: texts.name,
            subtitle: texts.subtitle,
            placeholder_id: PageShell::placeholder_id_for(&entry.id),
            metadata,
        }
    }

    /// Every calculator grouped by category, linked under `locale`.
    pub async fn browse(&self, locale: Locale) -> Vec<(Category, Vec<BrowseItem>)> {
        let entries = self.registry.entries();
        let modules = join_all(entries.iter().map(|entry| self.module(&entry.id))).await;

        let mut groups: Vec<(Category, Vec<BrowseItem>)> =
            Category::ALL.iter().map(|&c| (c, Vec::new())).collect();
        for (entry, module) in entries.iter().zip(&modules) {
            let Some(href) = canonical_path(entry, locale) else {
                continue;
            };
            let config = module.as_ref().map(CalculatorModule::config);
            let texts = PageTexts::resolve(entry, locale, config);
            if let Some((_, items)) = groups.iter_mut().find(|(c, _)| *c == entry.category) {
                items.push(BrowseItem {
                    name: texts.name,
                    href,
                });
            }
        }
        groups
    }

    async fn module(&self, id: &str) -> Option<CalculatorModule> {
        match locate_within(self.source.as_ref(), id, self.module_load_timeout).await {
            Ok(module) => Some(module),
            Err(e) => {
                debug!("No calculator texts for '{}': {}", id, e);
                None
            }
        }
    }
}
