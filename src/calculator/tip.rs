use crate::calculator::{
    fill_template, CalculatorConfig, ComputeInput, ComputeResult, InputField, InputKind,
    ModuleExports, ResultField, TextBundle,
};
use crate::i18n::format_number;
use crate::locator::LoadError;
use serde_json::json;
use std::collections::BTreeMap;

const DEFAULT_TIP_PERCENT: f64 = 15.0;

/// Older module: neither `config` nor a `calculate*` name.
pub fn exports() -> Result<ModuleExports, LoadError> {
    Ok(ModuleExports::new()
        .data("ROUNDING_MODES", json!(["none", "up"]))
        .data("tipSettings", serde_json::to_value(config())?)
        .function("computeTip", compute_tip))
}

/// Tip, total and per-person share of a bill.
pub fn compute_tip(input: &ComputeInput) -> ComputeResult {
    let Some(bill) = input.positive("bill") else {
        return ComputeResult::invalid();
    };
    let percent = input.number("tipPercent").unwrap_or(DEFAULT_TIP_PERCENT);
    let people = input.number("people").unwrap_or(1.0);
    if !(0.0..=100.0).contains(&percent) || people < 1.0 || people.fract() != 0.0 {
        return ComputeResult::invalid();
    }

    let mut tip = bill * percent / 100.0;
    if input.text("rounding") == Some("up") {
        tip = (bill + tip).ceil() - bill;
    }
    let total = bill + tip;
    if !tip.is_finite() || !total.is_finite() {
        return ComputeResult::invalid();
    }
    let per_person = total / people;

    let locale = input.locale();
    let tip_text = format_number(tip, 2, locale);
    let total_text = format_number(total, 2, locale);
    let per_person_text = format_number(per_person, 2, locale);
    let summary = fill_template(
        input.translate("summary", "Leave {tip} as tip; each person pays {perPerson}."),
        &[("tip", &tip_text), ("perPerson", &per_person_text)],
    );

    ComputeResult::valid()
        .with_value("tip", tip, tip_text)
        .with_value("total", total, total_text)
        .with_value("perPerson", per_person, per_person_text)
        .with_summary(summary)
}

fn config() -> CalculatorConfig {
    CalculatorConfig {
        id: "tip".to_string(),
        presets: Vec::new(),
        texts: BTreeMap::from([
            (
                "en".to_string(),
                TextBundle {
                    name: "Tip Calculator".to_string(),
                    subtitle: "Split the bill and the tip".to_string(),
                    seo: None,
                    labels: BTreeMap::new(),
                },
            ),
            (
                "fr".to_string(),
                TextBundle {
                    name: "Calculateur de pourboire".to_string(),
                    subtitle: "Partagez l'addition et le pourboire".to_string(),
                    seo: None,
                    labels: BTreeMap::from([
                        ("bill".to_string(), "Addition".to_string()),
                        ("people".to_string(), "Personnes".to_string()),
                    ]),
                },
            ),
        ]),
        inputs: vec![
            InputField {
                id: "bill".to_string(),
                kind: InputKind::Number,
                required: true,
                min: Some(0.0),
                max: None,
                step: Some(0.01),
                units: Vec::new(),
                options: Vec::new(),
                default_value: None,
            },
            InputField {
                id: "tipPercent".to_string(),
                kind: InputKind::Number,
                required: false,
                min: Some(0.0),
                max: Some(100.0),
                step: Some(1.0),
                units: vec!["%".to_string()],
                options: Vec::new(),
                default_value: Some(DEFAULT_TIP_PERCENT.into()),
            },
            InputField {
                id: "people".to_string(),
                kind: InputKind::Number,
                required: false,
                min: Some(1.0),
                max: None,
                step: Some(1.0),
                units: Vec::new(),
                options: Vec::new(),
                default_value: Some(1.0.into()),
            },
            InputField {
                id: "rounding".to_string(),
                kind: InputKind::Select,
                required: false,
                min: None,
                max: None,
                step: None,
                units: Vec::new(),
                options: vec!["none".to_string(), "up".to_string()],
                default_value: Some("none".into()),
            },
        ],
        results: ["tip", "total", "perPerson"]
            .iter()
            .map(|id| ResultField {
                id: id.to_string(),
                unit: None,
                primary: *id == "perPerson",
            })
            .collect(),
    }
}
