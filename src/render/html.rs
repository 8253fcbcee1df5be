//! Minimal HTML assembly helpers.

use crate::i18n::Locale;
use crate::render::metadata::PageMetadata;
use std::fmt::Write;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap a body in a full HTML document with head metadata.
pub fn document(locale: Locale, metadata: &PageMetadata, body: &str) -> String {
    let mut head = String::new();
    let _ = write!(head, "<title>{}</title>", escape_html(&metadata.title));
    if !metadata.description.is_empty() {
        let _ = write!(
            head,
            r#"<meta name="description" content="{}">"#,
            escape_html(&metadata.description)
        );
    }
    if !metadata.keywords.is_empty() {
        let _ = write!(
            head,
            r#"<meta name="keywords" content="{}">"#,
            escape_html(&metadata.keywords.join(", "))
        );
    }
    if let Some(canonical) = &metadata.canonical_url {
        let _ = write!(
            head,
            r#"<link rel="canonical" href="{}">"#,
            escape_html(canonical)
        );
    }
    for alternate in &metadata.alternates {
        let _ = write!(
            head,
            r#"<link rel="alternate" hreflang="{}" href="{}">"#,
            alternate.hreflang,
            escape_html(&alternate.href)
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">{}</head><body>{}</body></html>",
        locale.config().html_lang,
        head,
        body
    )
}
