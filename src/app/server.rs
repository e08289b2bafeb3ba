use crate::app::middleware::{cors_middleware, request_tracing_middleware};
use crate::core::assistant::{CannedAssistant, GREETING, PREDEFINED_QUESTIONS};
use crate::core::catalog::SummaryCatalog;
use crate::core::comparison;
use crate::core::playbook;
use crate::core::projection;
use crate::core::risk;
use crate::core::summary::SummaryService;
use crate::domain::model::{
    Brand, CatalogListing, ChatReply, ChatRequest, ComparisonReport, Difficulty, Playbook,
    RiskLevel, RiskReport, SimulationInput, SimulationResult, SummaryRequest, SummaryResponse,
};
use crate::domain::ports::{ConfigProvider, SummarySource};
use crate::utils::error::{DealMindError, ErrorCategory, Result};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub struct AppState {
    summaries: SummaryService<SummaryCatalog>,
    assistant: CannedAssistant,
    allowed_origins: Vec<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(catalog: SummaryCatalog, assistant: CannedAssistant, allowed_origins: Vec<String>) -> Self {
        Self {
            summaries: SummaryService::new(catalog),
            assistant,
            allowed_origins,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let catalog = SummaryCatalog::builtin();
        tracing::info!(
            "📚 Catalog loaded: {} brands, {} models",
            catalog.brand_count(),
            catalog.model_count()
        );
        Self::new(
            catalog,
            CannedAssistant::new(Duration::from_millis(config.reply_delay_ms())),
            config.allowed_origins().to_vec(),
        )
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            SummaryCatalog::builtin(),
            CannedAssistant::default(),
            vec!["*".to_string()],
        )
    }
}

impl IntoResponse for DealMindError {
    fn into_response(self) -> Response {
        let status = match &self {
            DealMindError::UnknownBrand { .. } => StatusCode::NOT_FOUND,
            DealMindError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        }
        let category = match self.category() {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Request => "request",
            ErrorCategory::Network => "network",
            ErrorCategory::Io => "io",
            ErrorCategory::Data => "data",
        };
        let body = serde_json::json!({
            "error": self.to_string(),
            "category": category,
        });
        (status, Json(body)).into_response()
    }
}

fn invalid_body(rejection: JsonRejection) -> DealMindError {
    DealMindError::InvalidRequest {
        message: rejection.body_text(),
    }
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/summary", post(summary))
        .route("/api/catalog", get(catalog))
        .route("/api/brands/:brand/defaults", get(brand_defaults))
        .route("/api/simulate", post(simulate))
        .route("/api/chat", get(chat_intro).post(chat))
        .route("/api/risks", get(risks))
        .route("/api/playbook", get(playbook_cards))
        .route("/api/comparison", get(brand_comparison))
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(from_fn(request_tracing_middleware))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Always 200: a body that is not a JSON object is treated as an empty request
/// and gets the baseline points. Fields are read independently, so one bad
/// field does not drop the other.
async fn summary(State(state): State<SharedState>, body: Bytes) -> Json<SummaryResponse> {
    let request = match serde_json::from_slice::<SummaryRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Unreadable summary body ({}), using empty request", e);
            SummaryRequest::default()
        }
    };
    Json(state.summaries.summarize(request))
}

async fn catalog(State(state): State<SharedState>) -> Json<CatalogListing> {
    Json(state.summaries.source().listing())
}

async fn brand_defaults(Path(brand): Path<String>) -> Result<Json<SimulationInput>> {
    let brand: Brand = brand.parse()?;
    Ok(Json(SimulationInput::for_brand(brand)))
}

async fn simulate(
    payload: std::result::Result<Json<SimulationInput>, JsonRejection>,
) -> Result<Json<SimulationResult>> {
    let Json(input) = payload.map_err(invalid_body)?;
    let result = projection::project(&input)?;
    tracing::info!(
        "🧮 Simulation for {}: margin {} -> {}, risk {}",
        input.brand.display_name(),
        input.current_margin,
        result.new_margin,
        result.risk_level
    );
    Ok(Json(result))
}

async fn chat_intro() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "greeting": GREETING,
        "suggestions": PREDEFINED_QUESTIONS,
    }))
}

async fn chat(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>> {
    let Json(request) = payload.map_err(invalid_body)?;
    let reply = state.assistant.reply(&request.message).await?;
    Ok(Json(reply))
}

#[derive(Debug, Deserialize)]
struct RiskQuery {
    level: Option<String>,
}

async fn risks(Query(query): Query<RiskQuery>) -> Result<Json<RiskReport>> {
    let level = query
        .level
        .as_deref()
        .map(str::parse::<RiskLevel>)
        .transpose()?;
    Ok(Json(risk::risk_report(level)))
}

#[derive(Debug, Deserialize)]
struct PlaybookQuery {
    category: Option<String>,
    difficulty: Option<String>,
}

async fn playbook_cards(Query(query): Query<PlaybookQuery>) -> Result<Json<Playbook>> {
    let difficulty = query
        .difficulty
        .as_deref()
        .map(str::parse::<Difficulty>)
        .transpose()?;
    Ok(Json(playbook::playbook(query.category.as_deref(), difficulty)))
}

async fn brand_comparison() -> Json<ComparisonReport> {
    Json(comparison::comparison_report())
}

/// Serves on an already-bound listener until the future is dropped or the
/// server fails.
pub async fn serve_listener(listener: TcpListener, state: SharedState) -> Result<()> {
    let app = build_router(state);
    axum::serve(listener, app)
        .await
        .map_err(|e| DealMindError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}

pub async fn serve<C: ConfigProvider>(config: &C) -> Result<()> {
    let state: SharedState = Arc::new(AppState::from_config(config));
    let addr = format!("{}:{}", config.host(), config.port());

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        "✅ Backend running at http://{}",
        listener.local_addr().map(|a| a.to_string()).unwrap_or(addr)
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DealMindError::ServerError {
            message: e.to_string(),
        })
}
