//! XML sitemap: every calculator in every locale, each URL listing its
//! hreflang alternates.

use crate::i18n::Locale;
use crate::registry::CalculatorRegistry;
use crate::render::html::escape_html;
use crate::render::metadata::{absolute_url, alternates};
use crate::resolver::canonical_path;
use chrono::NaiveDate;
use std::fmt::Write;

pub fn sitemap_xml(registry: &CalculatorRegistry, base_url: &str, lastmod: NaiveDate) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    for entry in registry.entries() {
        let links = alternates(entry, base_url);
        for locale in Locale::all() {
            let Some(path) = canonical_path(entry, locale) else {
                continue;
            };
            let _ = write!(
                xml,
                "<url><loc>{}</loc><lastmod>{}</lastmod>",
                escape_html(&absolute_url(base_url, &path)),
                lastmod
            );
            for link in &links {
                let _ = write!(
                    xml,
                    r#"<xhtml:link rel="alternate" hreflang="{}" href="{}"/>"#,
                    link.hreflang,
                    escape_html(&link.href)
                );
            }
            xml.push_str("</url>\n");
        }
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sitemap() -> String {
        let registry = CalculatorRegistry::embedded().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        sitemap_xml(&registry, "https://calc.example", date)
    }

    #[test]
    fn test_one_url_per_entry_and_locale() {
        let registry = CalculatorRegistry::embedded().unwrap();
        let xml = sitemap();
        assert_eq!(
            xml.matches("<url>").count(),
            registry.len() * Locale::all().count()
        );
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_urls_carry_alternates() {
        let xml = sitemap();
        assert!(xml.contains(
            "<loc>https://calc.example/es/calculadora-imc</loc><lastmod>2026-10-18</lastmod>"
        ));
        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="de" href="https://calc.example/de/bmi-rechner"/>"#
        ));
        assert!(xml.contains(r#"hreflang="x-default""#));
    }
}
