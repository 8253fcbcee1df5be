//! HTTP service: routes, shared state and handlers.

use crate::calculator::ComputeInput;
use crate::config::Config;
use crate::i18n::Locale;
use crate::locator::{locate_within, ModuleSource};
use crate::metrics::ResolutionMetrics;
use crate::registry::CalculatorRegistry;
use crate::render::{
    browse_page, not_found_page, sitemap_xml, ClientLoader, PageDocument, RenderOutcome,
    ServerRenderer,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<CalculatorRegistry>,
    source: Arc<dyn ModuleSource>,
    renderer: Arc<ServerRenderer>,
    base_url: String,
    module_load_timeout: Duration,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        registry: Arc<CalculatorRegistry>,
        source: Arc<dyn ModuleSource>,
        base_url: &str,
        module_load_timeout: Duration,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            renderer: Arc::new(ServerRenderer::new(
                registry.clone(),
                source.clone(),
                base_url.clone(),
                module_load_timeout,
            )),
            registry,
            source,
            base_url,
            module_load_timeout,
            started_at: Utc::now(),
        }
    }

    pub fn from_config(
        registry: Arc<CalculatorRegistry>,
        source: Arc<dyn ModuleSource>,
        config: &Config,
    ) -> Self {
        Self::new(
            registry,
            source,
            &config.public_base_url,
            config.module_load_timeout,
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/sitemap.xml", get(sitemap))
        .route("/api/:locale/calculators/:id", get(calculator_config))
        .route("/api/:locale/calculators/:id/compute", post(compute))
        .route("/:locale", get(browse))
        .route("/:locale/:slug", get(calculator_page))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Pages ====================

async fn root() -> Redirect {
    Redirect::temporary(&format!("/{}", Locale::default().code()))
}

async fn browse(State(state): State<AppState>, Path(locale): Path<String>) -> Response {
    let Some(locale) = Locale::parse(&locale) else {
        return not_found(Locale::default());
    };
    let groups = state.renderer.browse(locale).await;
    Html(browse_page(locale, &groups)).into_response()
}

async fn calculator_page(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> Response {
    match state.renderer.render(&locale, &slug).await {
        RenderOutcome::Page(shell) => {
            let locale = shell.locale;
            let id = shell.calculator_id.clone();
            let anchor = shell.placeholder_id.clone();

            let page = Arc::new(PageDocument::new(shell));
            let loader = ClientLoader::new(state.source.clone(), page.clone(), anchor)
                .with_timeout(state.module_load_timeout);
            loader.load(&id, locale).await;
            if let Some(body) = loader.render() {
                page.mount(body);
            }
            Html(page.to_html()).into_response()
        }
        RenderOutcome::Redirect { location } => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        RenderOutcome::NotFound { locale } => not_found(locale),
    }
}

async fn fallback(uri: Uri) -> Response {
    let locale = uri
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(Locale::parse)
        .unwrap_or_default();
    not_found(locale)
}

fn not_found(locale: Locale) -> Response {
    (StatusCode::NOT_FOUND, Html(not_found_page(locale))).into_response()
}

// ==================== API ====================

async fn calculator_config(
    State(state): State<AppState>,
    Path((locale, id)): Path<(String, String)>,
) -> Response {
    let Some(locale) = Locale::parse(&locale) else {
        return api_error(StatusCode::NOT_FOUND, format!("unsupported locale '{}'", locale));
    };
    let Some(entry) = state.registry.get(&id) else {
        return api_error(StatusCode::NOT_FOUND, format!("unknown calculator '{}'", id));
    };

    match locate_within(state.source.as_ref(), &id, state.module_load_timeout).await {
        Ok(module) => Json(json!({
            "id": entry.id,
            "category": entry.category,
            "slug": entry.slug_for(locale),
            "configuration": module.config(),
        }))
        .into_response(),
        Err(e) => {
            warn!("Calculator '{}' is unavailable: {}", id, e);
            api_error(
                StatusCode::NOT_FOUND,
                format!("calculator '{}' is not available", id),
            )
        }
    }
}

async fn compute(
    State(state): State<AppState>,
    Path((locale, id)): Path<(String, String)>,
    body: Result<Json<ComputeInput>, JsonRejection>,
) -> Response {
    let Some(locale) = Locale::parse(&locale) else {
        return api_error(StatusCode::NOT_FOUND, format!("unsupported locale '{}'", locale));
    };
    let mut input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return api_error(rejection.status(), rejection.body_text()),
    };
    if state.registry.get(&id).is_none() {
        return api_error(StatusCode::NOT_FOUND, format!("unknown calculator '{}'", id));
    }

    match locate_within(state.source.as_ref(), &id, state.module_load_timeout).await {
        Ok(module) => {
            input.locale.get_or_insert_with(|| locale.code().to_string());
            Json(module.compute(&input)).into_response()
        }
        Err(e) => {
            warn!("Calculator '{}' is unavailable: {}", id, e);
            api_error(
                StatusCode::NOT_FOUND,
                format!("calculator '{}' is not available", id),
            )
        }
    }
}

fn api_error(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// ==================== Operational ====================

async fn sitemap(State(state): State<AppState>) -> Response {
    let xml = sitemap_xml(&state.registry, &state.base_url, state.started_at.date_naive());
    ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}

async fn health() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> Response {
    let uptime = Utc::now().signed_duration_since(state.started_at);
    Json(json!({
        "started_at": state.started_at.to_rfc3339(),
        "uptime_seconds": uptime.num_seconds(),
        "calculators": state.registry.len(),
        "resolution": ResolutionMetrics::global().report(),
    }))
    .into_response()
}
