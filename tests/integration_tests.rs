//! Integration tests for the calculator pages service
//!
//! These tests drive the full router (registry, resolver, renderer, client
//! loader, locator and compute contract) through `tower::ServiceExt::oneshot`
//! without binding a socket.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use calc_pages::calculator::ModuleExports;
use calc_pages::locator::{LoadError, ModuleSource, StaticModuleSource};
use calc_pages::registry::CalculatorRegistry;
use calc_pages::server::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt as _;

// ==================== Test Helpers ====================

const BASE_URL: &str = "https://calc.example";

fn app() -> Router {
    app_with(
        CalculatorRegistry::embedded().expect("embedded registry is valid"),
        StaticModuleSource,
    )
}

fn app_with(registry: CalculatorRegistry, source: impl ModuleSource + 'static) -> Router {
    app_with_timeout(registry, source, Duration::from_secs(2))
}

fn app_with_timeout(
    registry: CalculatorRegistry,
    source: impl ModuleSource + 'static,
    module_load_timeout: Duration,
) -> Router {
    router(AppState::new(
        Arc::new(registry),
        Arc::new(source),
        BASE_URL,
        module_load_timeout,
    ))
}

/// A source whose every import fails.
struct FailingSource;

#[async_trait]
impl ModuleSource for FailingSource {
    async fn load(&self, id: &str) -> Result<ModuleExports, LoadError> {
        Err(LoadError::Missing(id.to_string()))
    }
}

/// A source whose loads never settle.
struct HangingSource;

#[async_trait]
impl ModuleSource for HangingSource {
    async fn load(&self, _id: &str) -> Result<ModuleExports, LoadError> {
        std::future::pending().await
    }
}

async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap()
}

// ==================== Page Resolution Tests ====================

#[tokio::test]
async fn test_cross_locale_slug_redirects_permanently() {
    let response = get(app(), "/es/bmi-calculator").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/es/calculadora-imc");
}

#[tokio::test]
async fn test_redirect_target_is_stable() {
    let first = get(app(), "/fr/bmi-rechner").await;
    let second = get(app(), "/fr/bmi-rechner").await;
    assert_eq!(location(&first), location(&second));
    assert_eq!(location(&first), "/fr/calculateur-imc");

    // Following the redirect lands on a page, not another redirect
    let followed = get(app(), location(&first)).await;
    assert_eq!(followed.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_direct_slug_renders_page() {
    let response = get(app(), "/en/bmi-calculator").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"<html lang="en">"#));
    assert!(html.contains("<h1>BMI Calculator</h1>"));
    assert!(html.contains(r#"data-calculator="bmi""#));
    assert!(html.contains(
        r#"<link rel="canonical" href="https://calc.example/en/bmi-calculator">"#
    ));
    assert!(html.contains(r#"hreflang="x-default""#));
    // The client loader settled and replaced the placeholder
    assert!(!html.contains("calculator-placeholder-bmi"));
}

#[tokio::test]
async fn test_unknown_slug_is_404() {
    let response = get(app(), "/en/unknown-slug").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn test_deeper_path_is_404() {
    let response = get(app(), "/en/bmi-calculator/extra").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_locale_is_404() {
    let response = get(app(), "/it/bmi-calculator").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_localized_404_page() {
    let response = get(app(), "/de/gibt-es-nicht").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Seite nicht gefunden"));
}

#[tokio::test]
async fn test_locale_without_own_slug_serves_default_slug() {
    // tip has no Portuguese slug
    let response = get(app(), "/pt/tip-calculator").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ==================== Client Loader Tests ====================

#[tokio::test]
async fn test_registered_calculator_without_module_is_coming_soon() {
    let response = get(app(), "/en/mortgage-calculator").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<h1>Mortgage Calculator</h1>"));
    assert!(html.contains("Coming soon"));
    assert!(html.contains(r#"<a href="/en">"#));
    assert!(!html.contains("calculator-placeholder-mortgage"));
}

#[tokio::test]
async fn test_failed_import_degrades_to_not_available() {
    let registry = CalculatorRegistry::embedded().unwrap();
    let response = get(app_with(registry, FailingSource), "/es/calculadora-imc").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    // No module texts: the title comes from the slug
    assert!(html.contains("<h1>Calculadora Imc</h1>"));
    assert!(html.contains("Próximamente"));
}

#[tokio::test]
async fn test_hanging_import_settles_within_timeout() {
    let app = app_with_timeout(
        CalculatorRegistry::embedded().unwrap(),
        HangingSource,
        Duration::from_millis(50),
    );

    let response = tokio::time::timeout(
        Duration::from_secs(2),
        get(app.clone(), "/en/bmi-calculator"),
    )
    .await
    .expect("page settles after the module load timeout");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Bmi Calculator</h1>"));
    assert!(html.contains("Coming soon"));
    assert!(!html.contains("calculator-placeholder-bmi"));

    let response = tokio::time::timeout(Duration::from_secs(2), get(app, "/en"))
        .await
        .expect("browse settles after the module load timeout");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains(r#"<a href="/en/bmi-calculator">Bmi Calculator</a>"#));
}

// ==================== Browse & Root Tests ====================

#[tokio::test]
async fn test_root_redirects_to_default_locale() {
    let response = get(app(), "/").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/en");
}

#[tokio::test]
async fn test_browse_index_links_localized_slugs() {
    let response = get(app(), "/es").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Todas las calculadoras"));
    assert!(html.contains(r#"<a href="/es/calculadora-imc">Calculadora de IMC</a>"#));
    assert!(html.contains(r#"href="/es/calculadora-hipoteca""#));
}

// ==================== API Tests ====================

#[tokio::test]
async fn test_config_api_returns_configuration() {
    let response = get(app(), "/api/de/calculators/bmi").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], "bmi");
    assert_eq!(json["category"], "health");
    assert_eq!(json["slug"], "bmi-rechner");
    assert_eq!(json["configuration"]["id"], "bmi");
    assert_eq!(json["configuration"]["texts"]["de"]["name"], "BMI-Rechner");
}

#[tokio::test]
async fn test_config_api_unavailable_module_is_404() {
    let response = get(app(), "/api/en/calculators/mortgage").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("mortgage"));
}

#[tokio::test]
async fn test_compute_with_empty_input_is_invalid() {
    let response = post_json(app(), "/api/en/calculators/bmi/compute", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "values": {}, "formatted": {}, "summary": "", "isValid": false })
    );
}

#[tokio::test]
async fn test_compute_with_zero_inputs_is_invalid() {
    let body = json!({ "values": { "percent": 0, "base": 0 } });
    let response = post_json(app(), "/api/en/calculators/percentage/compute", body).await;
    assert_eq!(body_json(response).await["isValid"], false);
}

#[tokio::test]
async fn test_compute_formats_for_path_locale() {
    let body = json!({ "values": { "weight": 70, "height": 175 } });
    let response = post_json(app(), "/api/es/calculators/bmi/compute", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["isValid"], true);
    assert_eq!(json["formatted"]["bmi"], "22,9");
    assert!(!json["summary"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_compute_with_oversized_inputs_is_invalid() {
    let body = json!({ "values": { "principal": 1000, "rate": 1000, "years": 100 } });
    let response = post_json(app(), "/api/en/calculators/compound_interest/compute", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "values": {}, "formatted": {}, "summary": "", "isValid": false })
    );
}

#[tokio::test]
async fn test_compute_with_malformed_body_is_json_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/en/calculators/bmi/compute")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_compute_without_json_content_type_is_json_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/en/calculators/bmi/compute")
        .body(Body::from("{}"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_compute_unknown_calculator_is_404() {
    let response = post_json(app(), "/api/en/calculators/nope/compute", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==================== Operational Tests ====================

#[tokio::test]
async fn test_sitemap_lists_alternates() {
    let response = get(app(), "/sitemap.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );

    let xml = body_text(response).await;
    assert!(xml.contains("<loc>https://calc.example/pt/calculadora-juros-compostos</loc>"));
    assert!(xml.contains(r#"hreflang="pt-BR""#));
}

#[tokio::test]
async fn test_health() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_metrics_report() {
    let json = body_json(get(app(), "/metrics").await).await;
    assert_eq!(json["calculators"], 5);
    assert!(json["resolution"].get("redirects").is_some());
    assert!(json["uptime_seconds"].as_i64().unwrap() >= 0);
}

// ==================== Registry File Tests ====================

#[tokio::test]
async fn test_registry_loaded_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");
    std::fs::write(
        &path,
        json!({
            "calculators": [{
                "id": "bmi",
                "category": "health",
                "slugs": { "en": "body-mass-index", "es": "indice-masa-corporal" }
            }]
        })
        .to_string(),
    )
    .unwrap();

    let registry = CalculatorRegistry::from_file(&path).unwrap();
    let app = app_with(registry, StaticModuleSource);

    let response = get(app.clone(), "/es/body-mass-index").await;
    assert_eq!(location(&response), "/es/indice-masa-corporal");

    let response = get(app, "/en/bmi-calculator").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
