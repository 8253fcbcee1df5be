use crate::calculator::{
    fill_template, CalculatorConfig, ComputeInput, ComputeResult, ExportValue, InputField,
    InputKind, ModuleExports, ResultField, TextBundle,
};
use crate::i18n::format_number;
use crate::locator::LoadError;
use std::collections::BTreeMap;

/// This module ships its configuration as the default export.
pub fn exports() -> Result<ModuleExports, LoadError> {
    Ok(ModuleExports::new()
        .function("calculatePercentage", calculate_percentage)
        .default_export(ExportValue::Data(serde_json::to_value(config())?)))
}

/// `percent` % of `base`.
///
/// Zero is a legitimate operand, but both being zero (or missing) means
/// nothing has been entered yet.
pub fn calculate_percentage(input: &ComputeInput) -> ComputeResult {
    let (Some(percent), Some(base)) = (input.number("percent"), input.number("base")) else {
        return ComputeResult::invalid();
    };
    if percent == 0.0 && base == 0.0 {
        return ComputeResult::invalid();
    }

    let result = percent * base / 100.0;
    if !result.is_finite() {
        return ComputeResult::invalid();
    }
    let locale = input.locale();
    let result_text = format_number(result, 2, locale);
    let summary = fill_template(
        input.translate("summary", "{percent}% of {base} is {result}."),
        &[
            ("percent", &format_number(percent, 2, locale)),
            ("base", &format_number(base, 2, locale)),
            ("result", &result_text),
        ],
    );

    ComputeResult::valid()
        .with_value("result", result, result_text)
        .with_summary(summary)
}

fn config() -> CalculatorConfig {
    let field = |id: &str| InputField {
        id: id.to_string(),
        kind: InputKind::Number,
        required: true,
        min: None,
        max: None,
        step: Some(0.01),
        units: Vec::new(),
        options: Vec::new(),
        default_value: None,
    };

    CalculatorConfig {
        id: "percentage".to_string(),
        presets: Vec::new(),
        texts: BTreeMap::from([
            (
                "en".to_string(),
                TextBundle {
                    name: "Percentage Calculator".to_string(),
                    subtitle: "Find a percentage of any number".to_string(),
                    seo: None,
                    labels: BTreeMap::from([
                        ("percent".to_string(), "Percentage".to_string()),
                        ("base".to_string(), "Of value".to_string()),
                        ("result".to_string(), "Result".to_string()),
                    ]),
                },
            ),
            (
                "es".to_string(),
                TextBundle {
                    name: "Calculadora de porcentajes".to_string(),
                    subtitle: "Calcula el porcentaje de cualquier número".to_string(),
                    seo: None,
                    labels: BTreeMap::from([
                        ("percent".to_string(), "Porcentaje".to_string()),
                        ("base".to_string(), "Del valor".to_string()),
                        ("result".to_string(), "Resultado".to_string()),
                    ]),
                },
            ),
        ]),
        inputs: vec![field("percent"), field("base")],
        results: vec![ResultField {
            id: "result".to_string(),
            unit: None,
            primary: true,
        }],
    }
}
