//! HTTP surface: `POST /analyze` plus a health probe and the OpenAPI docs.

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::{AppError, ErrorBody};
use crate::sentiment::{Analyzer, SentimentResult};

pub struct AppState {
    pub analyzer: Analyzer,
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Chat message text to classify.
    #[schema(example = "I love this, it's great and wonderful")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub lexicon_size: usize,
}

#[derive(OpenApi)]
#[openapi(
    paths(analyze, health),
    components(
        schemas(
            AnalyzeRequest,
            HealthResponse,
            crate::sentiment::SentimentResult,
            crate::sentiment::Polarity,
            crate::error::ErrorBody
        )
    ),
    tags(
        (name = "sentiment", description = "Chat message sentiment classification"),
        (name = "ops", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;

pub fn router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.max_body_bytes;

    let routes = Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    with_transport_layers(routes, max_body_bytes).with_state(state)
}

/// Body limit, CORS, request tracing and the panic guard shared by every route.
fn with_transport_layers<S>(router: Router<S>, max_body_bytes: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}

/// Classify the sentiment of a chat message.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "sentiment",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Text classified", body = SentimentResult),
        (status = 400, description = "Missing text or malformed body", body = ErrorBody),
        (status = 413, description = "Body exceeds MAX_BODY_BYTES", body = ErrorBody),
        (status = 500, description = "Unexpected failure", body = ErrorBody)
    )
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<SentimentResult>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::MalformedPayload(rejection.body_text())
        }
    })?;

    let text = req.text.ok_or(AppError::MissingInput)?;
    let result = state.analyzer.classify(&text)?;

    info!(
        chars = text.chars().count(),
        score = result.score,
        overall = result.overall.as_str(),
        "classified text"
    );

    Ok(Json(result))
}

/// Liveness probe reporting the loaded lexicon size.
#[utoipa::path(
    get,
    path = "/health",
    tag = "ops",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        lexicon_size: state.analyzer.lexicon().len(),
    })
}
