use crate::calculator::{
    fill_template, CalculatorConfig, ComputeInput, ComputeResult, InputField, InputKind,
    ModuleExports, Preset, ResultField, SeoBundle, TextBundle,
};
use crate::i18n::format_number;
use crate::locator::LoadError;
use serde_json::json;
use std::collections::BTreeMap;

const DEFAULT_COMPOUNDS_PER_YEAR: f64 = 12.0;
const MAX_YEARS: f64 = 100.0;

pub fn exports() -> Result<ModuleExports, LoadError> {
    Ok(ModuleExports::new()
        .data("DEFAULT_COMPOUNDS_PER_YEAR", json!(DEFAULT_COMPOUNDS_PER_YEAR))
        .data("compoundInterestConfig", serde_json::to_value(config())?)
        .function("calculateCompoundInterest", calculate_compound_interest))
}

/// Future value of `principal` at `rate`% a year over `years`, compounded
/// `compounds` times a year. `metadata.series` holds the balance at the end
/// of each year.
pub fn calculate_compound_interest(input: &ComputeInput) -> ComputeResult {
    let (Some(principal), Some(rate), Some(years)) = (
        input.positive("principal"),
        input.number("rate"),
        input.positive("years"),
    ) else {
        return ComputeResult::invalid();
    };
    let compounds = input
        .positive("compounds")
        .unwrap_or(DEFAULT_COMPOUNDS_PER_YEAR)
        .round();

    if rate < 0.0 || years > MAX_YEARS || years.fract() != 0.0 || compounds < 1.0 {
        return ComputeResult::invalid();
    }

    let periodic = rate / 100.0 / compounds;
    let balance_after = |year: f64| principal * (1.0 + periodic).powf(compounds * year);
    let final_amount = balance_after(years);
    if !final_amount.is_finite() {
        return ComputeResult::invalid();
    }
    let interest = final_amount - principal;

    let series: Vec<_> = (1..=years as u32)
        .map(|year| {
            let balance = (balance_after(f64::from(year)) * 100.0).round() / 100.0;
            json!({ "year": year, "balance": balance })
        })
        .collect();

    let locale = input.locale();
    let final_text = format_number(final_amount, 2, locale);
    let interest_text = format_number(interest, 2, locale);
    let summary = fill_template(
        input.translate(
            "summary",
            "After {years} years you will have {final}, of which {interest} is interest.",
        ),
        &[
            ("years", &format_number(years, 0, locale)),
            ("final", &final_text),
            ("interest", &interest_text),
        ],
    );

    ComputeResult::valid()
        .with_value("finalAmount", round_cents(final_amount), final_text)
        .with_value("totalInterest", round_cents(interest), interest_text)
        .with_summary(summary)
        .with_metadata(json!({ "series": series }))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn config() -> CalculatorConfig {
    let number = |id: &str, required: bool, default_value: Option<f64>| InputField {
        id: id.to_string(),
        kind: InputKind::Number,
        required,
        min: Some(0.0),
        max: None,
        step: None,
        units: Vec::new(),
        options: Vec::new(),
        default_value: default_value.map(Into::into),
    };

    CalculatorConfig {
        id: "compound_interest".to_string(),
        presets: vec![Preset {
            id: "savings".to_string(),
            values: BTreeMap::from([
                ("principal".to_string(), 10_000.0.into()),
                ("rate".to_string(), 5.0.into()),
                ("years".to_string(), 10.0.into()),
            ]),
        }],
        texts: BTreeMap::from([(
            "en".to_string(),
            TextBundle {
                name: "Compound Interest Calculator".to_string(),
                subtitle: "See how your savings grow over time".to_string(),
                seo: Some(SeoBundle {
                    title: "Compound Interest Calculator".to_string(),
                    description: "Calculate the future value of an investment with compound interest.".to_string(),
                    short_description: "Future value with compound interest".to_string(),
                    keywords: vec!["compound interest".to_string(), "savings".to_string()],
                }),
                labels: BTreeMap::from([
                    ("principal".to_string(), "Initial amount".to_string()),
                    ("rate".to_string(), "Annual interest rate".to_string()),
                    ("years".to_string(), "Years".to_string()),
                    ("compounds".to_string(), "Compounds per year".to_string()),
                    ("finalAmount".to_string(), "Final amount".to_string()),
                    ("totalInterest".to_string(), "Total interest".to_string()),
                ]),
            },
        )]),
        inputs: vec![
            number("principal", true, None),
            number("rate", true, None),
            number("years", true, None),
            number("compounds", false, Some(DEFAULT_COMPOUNDS_PER_YEAR)),
        ],
        results: vec![
            ResultField {
                id: "finalAmount".to_string(),
                unit: None,
                primary: true,
            },
            ResultField {
                id: "totalInterest".to_string(),
                unit: None,
                primary: false,
            },
        ],
    }
}
