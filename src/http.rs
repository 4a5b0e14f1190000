//! HTTP transport module for diagnosis-api
//!
//! Axum router over the diagnosis engines. Everything here is a thin wrapper:
//! route to an engine, hand it the raw body, serialize the outcome. Errors are
//! rendered by `DiagnosisError`'s `IntoResponse` impl.

use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::{Config, ServerConfig},
    engine::{DiagnosisResult, Engine, EngineKind, Engines},
    error::{DiagnosisError, Result},
};

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub engines: Arc<Engines>,
}

/// Success envelope for a diagnosis
#[derive(Debug, Serialize)]
pub struct DiagnosisResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub result: DiagnosisResult,
}

impl From<DiagnosisResult> for DiagnosisResponse {
    fn from(result: DiagnosisResult) -> Self {
        Self {
            status: "success",
            result,
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Lists the available engines and the fields each one requires
pub async fn engines_handler(State(state): State<HttpState>) -> Json<Value> {
    let engines: Vec<Value> = state.engines.iter().map(describe_engine).collect();
    Json(json!({
        "status": "success",
        "engines": engines,
    }))
}

/// GET on a diagnosis endpoint: usage hint
pub async fn welcome_handler(
    State(state): State<HttpState>,
    Path(engine): Path<String>,
) -> Result<Json<Value>> {
    Ok(welcome(state.engines.by_name(&engine)?))
}

/// POST on a diagnosis endpoint: run the engine on the JSON body
pub async fn diagnose_handler(
    State(state): State<HttpState>,
    Path(engine): Path<String>,
    body: Bytes,
) -> Result<Json<DiagnosisResponse>> {
    diagnose(state.engines.by_name(&engine)?, &body)
}

/// Legacy single-engine endpoint, always ED
pub async fn legacy_welcome_handler(State(state): State<HttpState>) -> Json<Value> {
    welcome(state.engines.get(EngineKind::Ed))
}

pub async fn legacy_diagnose_handler(
    State(state): State<HttpState>,
    body: Bytes,
) -> Result<Json<DiagnosisResponse>> {
    diagnose(state.engines.get(EngineKind::Ed), &body)
}

fn diagnose(engine: &Engine, body: &[u8]) -> Result<Json<DiagnosisResponse>> {
    tracing::debug!(engine = engine.label(), bytes = body.len(), "diagnosis request");
    let result = engine.diagnose_json(body)?;
    Ok(Json(result.into()))
}

fn welcome(engine: &Engine) -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": format!(
            "Welcome to the {} Diagnosis API! Use POST to send symptoms.",
            engine.label()
        ),
        "required_fields": engine.required_fields(),
    }))
}

fn describe_engine(engine: &Engine) -> Value {
    json!({
        "name": engine.kind(),
        "label": engine.label(),
        "required_fields": engine.required_fields(),
        "conditions": engine.condition_names().collect::<Vec<_>>(),
    })
}

/// Panics inside a handler become a 500 error envelope instead of a dropped connection
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%detail, "handler panicked");
    let err = DiagnosisError::Internal { message: detail };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(err.to_body())).into_response()
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| match s.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", s);
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Build the router with all endpoints and middleware
pub fn router(engines: Arc<Engines>, config: &ServerConfig) -> Router {
    let state = HttpState { engines };

    let routes = Router::new()
        .route("/health", get(health_handler))
        .route("/api/engines", get(engines_handler))
        .route(
            "/api/diagnose/:engine",
            get(welcome_handler).post(diagnose_handler),
        )
        .route(
            "/api/index",
            get(legacy_welcome_handler).post(legacy_diagnose_handler),
        );
    with_middleware(routes, config).with_state(state)
}

/// Shared middleware stack for every router built here
fn with_middleware<S>(routes: Router<S>, config: &ServerConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes.layer(DefaultBodyLimit::max(config.max_body_bytes)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TimeoutLayer::new(Duration::from_millis(
                config.request_timeout_ms,
            )))
            .layer(cors_layer(config)),
    )
}

/// Start the HTTP server
pub async fn start_http_server(config: &Config, engines: Arc<Engines>) -> Result<()> {
    let app = router(engines, &config.server);

    let listener = tokio::net::TcpListener::bind(config.server.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener: {}", e))?;

    tracing::info!(
        "Starting HTTP server on {} (POST /api/diagnose/{{ed,pe}})",
        config.server.bind
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}
