//! Named exports of a calculator module.
//!
//! Calculator modules were authored independently and do not agree on export
//! names: one exports `config` and `calculateBmi`, another a default object
//! and `computeTip`. A module is therefore described as an ordered list of
//! named values plus an optional default export, and the locator decides
//! which ones are the configuration and the compute function.

use crate::calculator::ComputeFn;
use std::fmt;

/// One exported value.
#[derive(Clone)]
pub enum ExportValue {
    /// Plain data (objects, strings, numbers, null)
    Data(serde_json::Value),

    Function(ComputeFn),
}

impl ExportValue {
    /// The JSON object, if this export is a non-null object.
    pub fn as_object(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match self {
            ExportValue::Data(value) => value.as_object(),
            ExportValue::Function(_) => None,
        }
    }

    /// Whether this export is an object carrying an `id` property.
    pub fn has_id(&self) -> bool {
        self.as_object().is_some_and(|obj| obj.contains_key("id"))
    }

    pub fn as_function(&self) -> Option<ComputeFn> {
        match self {
            ExportValue::Function(f) => Some(*f),
            ExportValue::Data(_) => None,
        }
    }
}

impl fmt::Debug for ExportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportValue::Data(value) => f.debug_tuple("Data").field(value).finish(),
            ExportValue::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// All exports of one module, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ModuleExports {
    named: Vec<(String, ExportValue)>,
    default: Option<ExportValue>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named data export.
    pub fn data(mut self, name: &str, value: serde_json::Value) -> Self {
        self.named.push((name.to_string(), ExportValue::Data(value)));
        self
    }

    /// Add a named function export.
    pub fn function(mut self, name: &str, f: ComputeFn) -> Self {
        self.named.push((name.to_string(), ExportValue::Function(f)));
        self
    }

    /// Set the default export.
    pub fn default_export(mut self, value: ExportValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Named exports in declaration order.
    pub fn named(&self) -> impl Iterator<Item = (&str, &ExportValue)> {
        self.named.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn get(&self, name: &str) -> Option<&ExportValue> {
        self.named().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn default_value(&self) -> Option<&ExportValue> {
        self.default.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.default.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{ComputeInput, ComputeResult};
    use serde_json::json;

    fn noop(_: &ComputeInput) -> ComputeResult {
        ComputeResult::invalid()
    }

    #[test]
    fn test_has_id() {
        assert!(ExportValue::Data(json!({"id": "x"})).has_id());
        assert!(!ExportValue::Data(json!({"name": "x"})).has_id());
        assert!(!ExportValue::Data(json!(null)).has_id());
        assert!(!ExportValue::Data(json!(["id"])).has_id());
        assert!(!ExportValue::Function(noop).has_id());
    }

    #[test]
    fn test_named_preserves_declaration_order() {
        let exports = ModuleExports::new()
            .data("b", json!(1))
            .function("a", noop)
            .data("c", json!({}));
        let names: Vec<_> = exports.named().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_get_and_default() {
        let exports = ModuleExports::new()
            .function("calculateX", noop)
            .default_export(ExportValue::Data(json!({"id": "x"})));
        assert!(exports.get("calculateX").and_then(|v| v.as_function()).is_some());
        assert!(exports.get("config").is_none());
        assert!(exports.default_value().is_some_and(|v| v.has_id()));
        assert!(!exports.is_empty());
        assert!(ModuleExports::new().is_empty());
    }

    #[test]
    fn test_debug_hides_function_pointer() {
        let debug = format!("{:?}", ExportValue::Function(noop));
        assert_eq!(debug, "Function(..)");
    }
}
