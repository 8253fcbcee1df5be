//! Registry validation binary - checks a calculator registry and its modules
//!
//! Usage:
//!   cargo run --bin validate-registry                     # Check the embedded registry
//!   cargo run --bin validate-registry -- data/registry.json
//!
//! Optional environment variables:
//! - REGISTRY_FILE (used when no path argument is given)
//!
//! Exits non-zero when the registry has errors. Calculators without a usable
//! module are reported as warnings: they are served as "coming soon".

use anyhow::{Context, Result};
use calc_pages::calculator::modules;
use calc_pages::i18n::Locale;
use calc_pages::locator::{locate, StaticModuleSource};
use calc_pages::registry::{parse_entries, RegistryValidator, EMBEDDED_REGISTRY};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("calc_pages=warn".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("REGISTRY_FILE").ok());

    let (label, json) = match &path {
        Some(path) => (
            path.clone(),
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read registry file {}", path))?,
        ),
        None => ("embedded registry".to_string(), EMBEDDED_REGISTRY.to_string()),
    };

    info!("Validating {}", label);
    let entries = parse_entries(&json).with_context(|| format!("Failed to parse {}", label))?;
    let mut report = RegistryValidator::validate(&entries);

    for entry in &entries {
        if let Err(e) = locate(&StaticModuleSource, &entry.id).await {
            report
                .warnings
                .push(format!("Calculator '{}' has no usable module: {}", entry.id, e));
        }
    }
    for module in modules::MODULES {
        if !entries.iter().any(|e| e.id == module.id) {
            report.warnings.push(format!(
                "Module '{}' is compiled in but has no registry entry",
                module.id
            ));
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("{}: {} calculators", label, entries.len());
    println!("{}", "=".repeat(60));

    for locale in Locale::all() {
        let own = entries.iter().filter(|e| e.has_own_slug(locale)).count();
        let marker = if locale.is_default() { " (default)" } else { "" };
        println!(
            "  {} [{}]{}: {}/{} own slugs",
            locale.native_name(),
            locale,
            marker,
            own,
            entries.len()
        );
    }
    println!();

    for error in &report.errors {
        println!("  ERROR: {}", error);
    }
    for warning in &report.warnings {
        println!("  WARN:  {}", warning);
    }
    if report.is_clean() {
        println!("  OK");
    }
    println!(
        "\n{} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
