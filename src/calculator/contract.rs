//! The generic shape every calculator's configuration and compute function
//! satisfies, so rendering never depends on a particular calculator.

use crate::i18n::{parse_number, Locale};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A compute function. Plain function pointers cannot capture state, which
/// keeps every calculator a pure function of its input.
pub type ComputeFn = fn(&ComputeInput) -> ComputeResult;

/// A raw input or result value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

// ==================== Configuration ====================

/// Static description of a calculator. Carries no behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    pub id: String,

    #[serde(default)]
    pub presets: Vec<Preset>,

    /// Locale code -> text bundle
    #[serde(default)]
    pub texts: BTreeMap<String, TextBundle>,

    #[serde(default)]
    pub inputs: Vec<InputField>,

    #[serde(default)]
    pub results: Vec<ResultField>,
}

impl CalculatorConfig {
    /// Text bundle for `locale`, falling back to the default locale's.
    pub fn text(&self, locale: Locale) -> Option<&TextBundle> {
        self.texts
            .get(locale.code())
            .or_else(|| self.texts.get(Locale::default().code()))
    }

    /// Localized label for an input or result field, falling back to the
    /// default locale and finally to the field id.
    pub fn label<'a>(&'a self, locale: Locale, field_id: &'a str) -> &'a str {
        self.texts
            .get(locale.code())
            .and_then(|t| t.labels.get(field_id))
            .or_else(|| {
                self.texts
                    .get(Locale::default().code())
                    .and_then(|t| t.labels.get(field_id))
            })
            .map(String::as_str)
            .unwrap_or(field_id)
    }
}

/// Per-locale text for one calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBundle {
    pub name: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoBundle>,

    /// Field id -> label
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoBundle {
    pub title: String,
    pub description: String,

    #[serde(default)]
    pub short_description: String,

    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A named set of example input values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub values: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Number,
    Select,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub id: String,
    pub kind: InputKind,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    /// Selectable units; the first one is the default
    #[serde(default)]
    pub units: Vec<String>,

    /// Choices for `Select` inputs
    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultField {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Rendered prominently as the main result
    #[serde(default)]
    pub primary: bool,
}

// ==================== Compute Input ====================

/// Input to a compute function: `{ values, fieldUnits?, translations? }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeInput {
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_units: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<BTreeMap<String, String>>,

    /// Locale used for `formatted` output; the default locale when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl ComputeInput {
    pub fn with_value(mut self, id: &str, value: impl Into<FieldValue>) -> Self {
        self.values.insert(id.to_string(), value.into());
        self
    }

    pub fn with_unit(mut self, id: &str, unit: &str) -> Self {
        self.field_units
            .get_or_insert_with(BTreeMap::new)
            .insert(id.to_string(), unit.to_string());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale.code().to_string());
        self
    }

    /// Locale for formatting; unsupported or missing codes use the default.
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::parse_or_default)
            .unwrap_or_default()
    }

    /// Numeric value of a field. Text values are parsed with the input
    /// locale's decimal separator.
    pub fn number(&self, id: &str) -> Option<f64> {
        match self.values.get(id)? {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Number(_) => None,
            FieldValue::Text(raw) => parse_number(raw, self.locale()),
        }
    }

    /// Numeric value that must be strictly positive.
    pub fn positive(&self, id: &str) -> Option<f64> {
        self.number(id).filter(|n| *n > 0.0)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.values.get(id)? {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::Number(_) => None,
        }
    }

    /// Selected unit for a field, if the caller provided one.
    pub fn unit(&self, id: &str) -> Option<&str> {
        self.field_units.as_ref()?.get(id).map(String::as_str)
    }

    /// Caller-supplied translation for `key`, else `fallback`.
    pub fn translate<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.translations
            .as_ref()
            .and_then(|t| t.get(key))
            .map(String::as_str)
            .unwrap_or(fallback)
    }
}

// ==================== Compute Result ====================

/// Output of a compute function.
///
/// `formatted` keys are always a subset of `values` keys; the only way to add
/// a formatted entry is [`ComputeResult::with_value`], which inserts both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResult {
    pub values: BTreeMap<String, FieldValue>,
    pub formatted: BTreeMap<String, String>,
    pub summary: String,
    pub is_valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl ComputeResult {
    /// The result for missing or out-of-range inputs.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// An empty valid result, to be filled with `with_value`.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, id: &str, raw: impl Into<FieldValue>, formatted: String) -> Self {
        self.values.insert(id.to_string(), raw.into());
        self.formatted.insert(id.to_string(), formatted);
        self
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Replace `{name}` placeholders in a template.
pub fn fill_template(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== Input Tests ====================

    #[test]
    fn test_input_deserialization_camel_case() {
        let input: ComputeInput = serde_json::from_value(json!({
            "values": {"weight": 70, "height": "175"},
            "fieldUnits": {"weight": "kg"},
            "translations": {"summary": "x"}
        }))
        .unwrap();

        assert_eq!(input.number("weight"), Some(70.0));
        assert_eq!(input.number("height"), Some(175.0));
        assert_eq!(input.unit("weight"), Some("kg"));
        assert_eq!(input.translate("summary", "fallback"), "x");
        assert_eq!(input.translate("missing", "fallback"), "fallback");
        assert_eq!(input.locale(), Locale::ENGLISH);
    }

    #[test]
    fn test_input_empty_document() {
        let input: ComputeInput = serde_json::from_str("{}").unwrap();
        assert!(input.values.is_empty());
        assert!(input.field_units.is_none());
    }

    #[test]
    fn test_number_uses_locale_decimal_separator() {
        let input = ComputeInput::default()
            .with_value("weight", "72,5")
            .with_locale(Locale::SPANISH);
        assert_eq!(input.number("weight"), Some(72.5));
    }

    #[test]
    fn test_positive_rejects_zero() {
        let input = ComputeInput::default().with_value("a", 0.0).with_value("b", -1.0);
        assert_eq!(input.positive("a"), None);
        assert_eq!(input.positive("b"), None);
        assert_eq!(input.positive("missing"), None);
    }

    // ==================== Result Tests ====================

    #[test]
    fn test_invalid_result_shape() {
        let value = serde_json::to_value(ComputeResult::invalid()).unwrap();
        assert_eq!(
            value,
            json!({"values": {}, "formatted": {}, "summary": "", "isValid": false})
        );
    }

    #[test]
    fn test_with_value_keeps_formatted_subset() {
        let result = ComputeResult::valid()
            .with_value("bmi", 22.9, "22.9".to_string())
            .with_summary("ok".to_string());
        assert!(result.is_valid);
        assert!(result.formatted.keys().all(|k| result.values.contains_key(k)));
    }

    // ==================== Config Tests ====================

    fn config() -> CalculatorConfig {
        serde_json::from_value(json!({
            "id": "bmi",
            "texts": {
                "en": {"name": "BMI Calculator", "labels": {"weight": "Weight"}},
                "es": {"name": "Calculadora de IMC", "labels": {}}
            },
            "inputs": [{"id": "weight", "kind": "number", "required": true}]
        }))
        .unwrap()
    }

    #[test]
    fn test_text_falls_back_to_default_locale() {
        let config = config();
        assert_eq!(config.text(Locale::SPANISH).unwrap().name, "Calculadora de IMC");
        assert_eq!(config.text(Locale::GERMAN).unwrap().name, "BMI Calculator");
    }

    #[test]
    fn test_label_fallback_chain() {
        let config = config();
        assert_eq!(config.label(Locale::SPANISH, "weight"), "Weight");
        assert_eq!(config.label(Locale::SPANISH, "height"), "height");
    }

    #[test]
    fn test_fill_template() {
        assert_eq!(
            fill_template(
                "Your BMI is {bmi} ({category}).",
                &[("bmi", "22.9"), ("category", "normal")]
            ),
            "Your BMI is 22.9 (normal)."
        );
    }
}
