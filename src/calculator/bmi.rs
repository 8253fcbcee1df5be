use crate::calculator::{
    fill_template, CalculatorConfig, ComputeInput, ComputeResult, InputField, InputKind,
    ModuleExports, Preset, ResultField, SeoBundle, TextBundle,
};
use crate::i18n::format_number;
use crate::locator::LoadError;
use std::collections::BTreeMap;

const KG_PER_LB: f64 = 0.453_592_37;
const CM_PER_IN: f64 = 2.54;

pub fn exports() -> Result<ModuleExports, LoadError> {
    Ok(ModuleExports::new()
        .data("config", serde_json::to_value(config())?)
        .function("calculateBmi", calculate_bmi))
}

/// Body mass index from weight and height.
///
/// Accepts kg/lb and cm/in through `fieldUnits`. Category names can be
/// overridden through `translations` (`category.underweight`, ...), and the
/// summary through `translations.summary` with `{bmi}` and `{category}`.
pub fn calculate_bmi(input: &ComputeInput) -> ComputeResult {
    let (Some(weight), Some(height)) = (input.positive("weight"), input.positive("height")) else {
        return ComputeResult::invalid();
    };

    let weight_kg = match input.unit("weight") {
        Some("lb") => weight * KG_PER_LB,
        _ => weight,
    };
    let height_m = match input.unit("height") {
        Some("in") => height * CM_PER_IN / 100.0,
        _ => height / 100.0,
    };

    if !(20.0..=500.0).contains(&weight_kg) || !(0.5..=2.8).contains(&height_m) {
        return ComputeResult::invalid();
    }

    let bmi = weight_kg / (height_m * height_m);
    let rounded = (bmi * 10.0).round() / 10.0;
    let category = match bmi {
        b if b < 18.5 => "underweight",
        b if b < 25.0 => "normal",
        b if b < 30.0 => "overweight",
        _ => "obese",
    };

    let locale = input.locale();
    let bmi_text = format_number(rounded, 1, locale);
    let category_key = format!("category.{category}");
    let category_label = input.translate(&category_key, category).to_string();
    let summary = fill_template(
        input.translate("summary", "Your BMI is {bmi}, which is classified as {category}."),
        &[("bmi", &bmi_text), ("category", &category_label)],
    );

    ComputeResult::valid()
        .with_value("bmi", rounded, bmi_text)
        .with_value("category", category, category_label)
        .with_summary(summary)
}

fn config() -> CalculatorConfig {
    let mut texts = BTreeMap::new();
    texts.insert(
        "en".to_string(),
        TextBundle {
            name: "BMI Calculator".to_string(),
            subtitle: "Calculate your body mass index from weight and height".to_string(),
            seo: Some(SeoBundle {
                title: "BMI Calculator - Body Mass Index".to_string(),
                description: "Free BMI calculator: enter your weight and height to get your body mass index and weight category.".to_string(),
                short_description: "Body mass index from weight and height".to_string(),
                keywords: vec!["bmi".to_string(), "body mass index".to_string()],
            }),
            labels: labels(&[
                ("weight", "Weight"),
                ("height", "Height"),
                ("bmi", "BMI"),
                ("category", "Category"),
            ]),
        },
    );
    texts.insert(
        "es".to_string(),
        TextBundle {
            name: "Calculadora de IMC".to_string(),
            subtitle: "Calcula tu índice de masa corporal a partir de tu peso y altura"
                .to_string(),
            seo: Some(SeoBundle {
                title: "Calculadora de IMC - Índice de Masa Corporal".to_string(),
                description: "Calculadora de IMC gratuita: introduce tu peso y altura para conocer tu índice de masa corporal.".to_string(),
                short_description: "Índice de masa corporal según peso y altura".to_string(),
                keywords: vec!["imc".to_string(), "índice de masa corporal".to_string()],
            }),
            labels: labels(&[
                ("weight", "Peso"),
                ("height", "Altura"),
                ("bmi", "IMC"),
                ("category", "Categoría"),
            ]),
        },
    );
    texts.insert(
        "pt".to_string(),
        TextBundle {
            name: "Calculadora de IMC".to_string(),
            subtitle: "Calcule seu índice de massa corporal".to_string(),
            seo: None,
            labels: labels(&[
                ("weight", "Peso"),
                ("height", "Altura"),
                ("bmi", "IMC"),
                ("category", "Categoria"),
            ]),
        },
    );
    texts.insert(
        "de".to_string(),
        TextBundle {
            name: "BMI-Rechner".to_string(),
            subtitle: "Berechnen Sie Ihren Body-Mass-Index".to_string(),
            seo: None,
            labels: labels(&[
                ("weight", "Gewicht"),
                ("height", "Größe"),
                ("bmi", "BMI"),
                ("category", "Kategorie"),
            ]),
        },
    );

    CalculatorConfig {
        id: "bmi".to_string(),
        presets: vec![Preset {
            id: "average-adult".to_string(),
            values: BTreeMap::from([
                ("weight".to_string(), 70.0.into()),
                ("height".to_string(), 175.0.into()),
            ]),
        }],
        texts,
        inputs: vec![
            number_field("weight", &["kg", "lb"], 1.0, 500.0),
            number_field("height", &["cm", "in"], 30.0, 280.0),
        ],
        results: vec![
            ResultField {
                id: "bmi".to_string(),
                unit: Some("kg/m²".to_string()),
                primary: true,
            },
            ResultField {
                id: "category".to_string(),
                unit: None,
                primary: false,
            },
        ],
    }
}

fn number_field(id: &str, units: &[&str], min: f64, max: f64) -> InputField {
    InputField {
        id: id.to_string(),
        kind: InputKind::Number,
        required: true,
        min: Some(min),
        max: Some(max),
        step: Some(0.1),
        units: units.iter().map(|u| u.to_string()).collect(),
        options: Vec::new(),
        default_value: None,
    }
}

fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
