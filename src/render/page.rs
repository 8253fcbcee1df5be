//! Page shell and the full-page documents served over HTTP.

use crate::i18n::Locale;
use crate::registry::Category;
use crate::render::client::PlaceholderSlot;
use crate::render::html::{document, escape_html};
use crate::render::metadata::PageMetadata;
use std::fmt::Write;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Prefix of the placeholder element id; the calculator id follows.
pub const PLACEHOLDER_PREFIX: &str = "calculator-placeholder-";

/// One breadcrumb item. The last item has no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

impl Crumb {
    pub fn link(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href),
        }
    }

    pub fn current(label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: None,
        }
    }
}

/// Everything the server renders for a calculator page before the module
/// is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageShell {
    pub locale: Locale,
    pub calculator_id: String,
    pub breadcrumb: Vec<Crumb>,
    pub title: String,
    pub subtitle: String,
    /// Stable id of the element reserving space for the calculator
    pub placeholder_id: String,
    pub metadata: PageMetadata,
}

impl PageShell {
    pub fn placeholder_id_for(calculator_id: &str) -> String {
        format!("{PLACEHOLDER_PREFIX}{calculator_id}")
    }

    /// Full HTML document with either the placeholder or `body` in the
    /// calculator slot.
    pub fn to_html(&self, body: Option<&str>) -> String {
        let mut html = String::from(r#"<header><nav class="breadcrumb"><ol>"#);
        for crumb in &self.breadcrumb {
            match &crumb.href {
                Some(href) => {
                    let _ = write!(
                        html,
                        r#"<li><a href="{}">{}</a></li>"#,
                        escape_html(href),
                        escape_html(&crumb.label)
                    );
                }
                None => {
                    let _ = write!(
                        html,
                        r#"<li aria-current="page">{}</li>"#,
                        escape_html(&crumb.label)
                    );
                }
            }
        }
        let _ = write!(html, "</ol></nav><h1>{}</h1>", escape_html(&self.title));
        if !self.subtitle.is_empty() {
            let _ = write!(
                html,
                r#"<p class="subtitle">{}</p>"#,
                escape_html(&self.subtitle)
            );
        }
        html.push_str("</header><main>");
        match body {
            Some(body) => html.push_str(body),
            None => {
                let _ = write!(
                    html,
                    r#"<div id="{}" class="calculator-placeholder" aria-busy="true"></div>"#,
                    escape_html(&self.placeholder_id)
                );
            }
        }
        html.push_str("</main>");

        document(self.locale, &self.metadata, &html)
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    placeholder_present: bool,
    body: Option<String>,
}

/// A rendered page the client loader mounts on.
#[derive(Debug)]
pub struct PageDocument {
    shell: PageShell,
    state: Mutex<DocumentState>,
}

impl PageDocument {
    pub fn new(shell: PageShell) -> Self {
        Self {
            shell,
            state: Mutex::new(DocumentState {
                placeholder_present: true,
                body: None,
            }),
        }
    }

    pub fn shell(&self) -> &PageShell {
        &self.shell
    }

    pub fn has_placeholder(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .placeholder_present
    }

    /// Put the calculator body into the slot.
    pub fn mount(&self, body: String) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .body = Some(body);
    }

    /// Serialize the page as it currently stands.
    pub fn to_html(&self) -> String {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match (&state.body, state.placeholder_present) {
            (_, true) => self.shell.to_html(None),
            (Some(body), false) => self.shell.to_html(Some(body)),
            (None, false) => self.shell.to_html(Some("")),
        }
    }
}

impl PlaceholderSlot for PageDocument {
    fn remove_placeholder(&self, anchor: &str) {
        if anchor != self.shell.placeholder_id {
            warn!(
                "Ignoring placeholder removal for unknown anchor '{}' (page has '{}')",
                anchor, self.shell.placeholder_id
            );
            return;
        }
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .placeholder_present = false;
    }
}

/// One calculator link on the browse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseItem {
    pub name: String,
    pub href: String,
}

/// Per-locale list of every calculator, grouped by category.
pub fn browse_page(locale: Locale, groups: &[(Category, Vec<BrowseItem>)]) -> String {
    let strings = locale.strings();
    let mut html = format!("<main><h1>{}</h1>", escape_html(strings.browse_title));
    for (category, items) in groups.iter().filter(|(_, items)| !items.is_empty()) {
        let _ = write!(
            html,
            r#"<section id="{}"><h2>{}</h2><ul>"#,
            category.as_str(),
            escape_html(category.label(locale))
        );
        for item in items {
            let _ = write!(
                html,
                r#"<li><a href="{}">{}</a></li>"#,
                escape_html(&item.href),
                escape_html(&item.name)
            );
        }
        html.push_str("</ul></section>");
    }
    html.push_str("</main>");

    document(locale, &PageMetadata::titled(strings.browse_title), &html)
}

/// The 404 page, linking back to the browse index.
pub fn not_found_page(locale: Locale) -> String {
    let strings = locale.strings();
    let body = format!(
        r#"<main class="not-found"><h1>{}</h1><p>{}</p><p><a href="/{}">{}</a></p></main>"#,
        escape_html(strings.not_found_title),
        escape_html(strings.not_found_body),
        locale.code(),
        escape_html(strings.browse_link)
    );
    document(locale, &PageMetadata::titled(strings.not_found_title), &body)
}
