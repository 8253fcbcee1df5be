//! Calculator surface: the body rendered into the placeholder once the
//! client loader settles.
//!
//! The surface is generic over [`CalculatorConfig`]; nothing here knows
//! about a particular calculator.

use crate::calculator::{CalculatorConfig, FieldValue, InputField, InputKind};
use crate::i18n::Locale;
use crate::locator::CalculatorModule;
use crate::render::html::escape_html;
use std::fmt::Write;

/// Render the form, presets and empty result slots of a ready calculator.
pub fn render_calculator(module: &CalculatorModule, locale: Locale) -> String {
    let config = module.config();
    let strings = locale.strings();
    let id = escape_html(&config.id);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<section class="calculator" data-calculator="{id}" data-locale="{locale}">"#
    );
    let _ = write!(
        html,
        r#"<form method="post" action="/api/{locale}/calculators/{id}/compute">"#
    );
    for field in &config.inputs {
        html.push_str(&render_input(config, field, locale));
    }
    let _ = write!(
        html,
        r#"<button type="submit">{}</button></form>"#,
        escape_html(strings.calculate_button)
    );

    if !config.presets.is_empty() {
        let _ = write!(
            html,
            r#"<div class="presets"><h3>{}</h3><ul>"#,
            escape_html(strings.presets_heading)
        );
        for preset in &config.presets {
            let values = serde_json::to_string(&preset.values).unwrap_or_default();
            let _ = write!(
                html,
                r#"<li><button type="button" data-preset="{}" data-values="{}">{}</button></li>"#,
                escape_html(&preset.id),
                escape_html(&values),
                escape_html(config.label(locale, &preset.id))
            );
        }
        html.push_str("</ul></div>");
    }

    let _ = write!(
        html,
        r#"<div class="results"><h3>{}</h3><dl>"#,
        escape_html(strings.results_heading)
    );
    for result in &config.results {
        let class = if result.primary { " class=\"primary\"" } else { "" };
        let unit = result
            .unit
            .as_deref()
            .map(|u| format!(r#" data-unit="{}""#, escape_html(u)))
            .unwrap_or_default();
        let _ = write!(
            html,
            r#"<dt{class}>{}</dt><dd data-result="{}"{unit}></dd>"#,
            escape_html(config.label(locale, &result.id)),
            escape_html(&result.id)
        );
    }
    html.push_str(r#"</dl><p class="summary" data-result="summary"></p></div></section>"#);
    html
}

fn render_input(config: &CalculatorConfig, field: &InputField, locale: Locale) -> String {
    let id = escape_html(&field.id);
    let label = escape_html(config.label(locale, &field.id));
    let required = if field.required { " required" } else { "" };
    let value = field
        .default_value
        .as_ref()
        .map(|v| format!(r#" value="{}""#, escape_html(&value_attr(v))))
        .unwrap_or_default();

    let mut html = format!(r#"<div class="field"><label for="{id}">{label}</label>"#);
    match field.kind {
        InputKind::Number => {
            let mut bounds = String::new();
            for (name, bound) in [("min", field.min), ("max", field.max), ("step", field.step)] {
                if let Some(bound) = bound {
                    let _ = write!(bounds, r#" {name}="{bound}""#);
                }
            }
            let _ = write!(
                html,
                r#"<input type="number" id="{id}" name="{id}"{bounds}{value}{required}>"#
            );
        }
        InputKind::Text => {
            let _ = write!(
                html,
                r#"<input type="text" id="{id}" name="{id}"{value}{required}>"#
            );
        }
        InputKind::Select => {
            let _ = write!(html, r#"<select id="{id}" name="{id}"{required}>"#);
            let selected = field.default_value.as_ref().map(value_attr);
            for option in &field.options {
                let marker = if selected.as_deref() == Some(option.as_str()) {
                    " selected"
                } else {
                    ""
                };
                let _ = write!(
                    html,
                    r#"<option value="{}"{marker}>{}</option>"#,
                    escape_html(option),
                    escape_html(config.label(locale, option))
                );
            }
            html.push_str("</select>");
        }
    }

    match field.units.as_slice() {
        [] => {}
        [only] => {
            let _ = write!(html, r#"<span class="unit">{}</span>"#, escape_html(only));
        }
        units => {
            let _ = write!(html, r#"<select name="{id}__unit" class="unit">"#);
            for unit in units {
                let unit = escape_html(unit);
                let _ = write!(html, r#"<option value="{unit}">{unit}</option>"#);
            }
            html.push_str("</select>");
        }
    }

    html.push_str("</div>");
    html
}

fn value_attr(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Text(s) => s.clone(),
    }
}

/// Static block shown when a calculator exists but its module is unusable.
pub fn render_not_available(locale: Locale) -> String {
    let strings = locale.strings();
    format!(
        r#"<section class="not-available"><h2>{}</h2><p>{}</p><p><a href="/{}">{}</a></p></section>"#,
        escape_html(strings.not_available_title),
        escape_html(strings.not_available_body),
        locale.code(),
        escape_html(strings.browse_link)
    )
}
