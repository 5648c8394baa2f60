// Axum API Server Module
//
// Purpose: JSON API over the session engine — option derivation for the
// form's dependent selects, the ranked report log and map points for the
// dashboard, and report submission to the intake script.

#[cfg(feature = "api")]
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use tokio::sync::RwLock;

#[cfg(feature = "api")]
use crate::config::Config;

#[cfg(feature = "api")]
use crate::draft::ReportDraft;

#[cfg(feature = "api")]
use crate::fetch::CsvFetcher;

#[cfg(feature = "api")]
use crate::geo::{collect_map_points, DEFAULT_CENTER};

#[cfg(feature = "api")]
use crate::hierarchy::{AdminSelection, HierarchyIndex, LevelOptions};

#[cfg(feature = "api")]
use crate::rank::{rank_reports, SearchFilters};

#[cfg(feature = "api")]
use crate::records::{map_admin_rows, map_submission_rows};

#[cfg(feature = "api")]
use crate::state::SessionState;

#[cfg(feature = "api")]
use crate::submit::ReportSubmitter;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<SessionState>>,
    pub hierarchy: Arc<HierarchyIndex>,
    pub fetcher: Arc<CsvFetcher>,
    pub submitter: Arc<ReportSubmitter>,
    pub config: Arc<Config>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        tracing::info!("Initializing hierarchy engine...");
        let hierarchy = Arc::new(HierarchyIndex::new(config.region_allow_list.clone())?);

        let submitter = Arc::new(ReportSubmitter::new(config.script_url.clone()));

        Ok(Self {
            session: Arc::new(RwLock::new(SessionState::new())),
            hierarchy,
            fetcher: Arc::new(CsvFetcher::new()),
            submitter,
            config: Arc::new(config),
        })
    }

    /// Fetch both feeds concurrently (no ordering dependency between them)
    /// and replace the session's row sets wholesale. A failed feed degrades
    /// to an empty set and reports its failure in the outcome; the session
    /// stays usable either way.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (admin, logs) = tokio::join!(
            self.fetcher.fetch_rows(&self.config.admin_csv_url),
            self.fetcher.fetch_rows(&self.config.logs_csv_url),
        );

        let mut session = self.session.write().await;

        let admin_status = match admin {
            Ok(raw) => {
                let mapped = map_admin_rows(&raw);
                let status = FeedStatus::loaded(mapped.rows.len(), mapped.warnings.len());
                session.replace_admin_rows(mapped);
                status
            }
            Err(e) => {
                tracing::warn!("Administrative feed failed: {}", e);
                session.admin_rows = Vec::new();
                FeedStatus::failed(e.to_string())
            }
        };

        let reports_status = match logs {
            Ok(raw) => {
                let mapped = map_submission_rows(&raw);
                let status = FeedStatus::loaded(mapped.rows.len(), mapped.warnings.len());
                session.replace_reports(mapped);
                status
            }
            Err(e) => {
                tracing::warn!("Submission log feed failed: {}", e);
                session.reports = Vec::new();
                FeedStatus::failed(e.to_string())
            }
        };

        RefreshOutcome { admin: admin_status, reports: reports_status }
    }
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Serialize)]
pub struct FeedStatus {
    pub rows: usize,
    pub warnings: usize,
    pub error: Option<String>,
}

#[cfg(feature = "api")]
impl FeedStatus {
    fn loaded(rows: usize, warnings: usize) -> Self {
        Self { rows, warnings, error: None }
    }

    fn failed(error: String) -> Self {
        Self { rows: 0, warnings: 0, error: Some(error) }
    }
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Serialize)]
pub struct RefreshOutcome {
    pub admin: FeedStatus,
    pub reports: FeedStatus,
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Form endpoints
        .route("/api/hierarchy/options", get(get_options))

        // Dashboard endpoints
        .route("/api/reports", get(list_reports).post(submit_report))
        .route("/api/reports/points", get(list_map_points))

        // Explicit refresh (view entry / refresh button)
        .route("/api/session/refresh", post(refresh_session))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn get_options(
    State(state): State<AppState>,
    Query(selection): Query<AdminSelection>,
) -> Json<LevelOptions> {
    let session = state.session.read().await;
    Json(state.hierarchy.derive_options(&session.admin_rows, &selection))
}

#[cfg(feature = "api")]
async fn list_reports(
    State(state): State<AppState>,
    Query(filters): Query<SearchFilters>,
) -> Json<serde_json::Value> {
    let session = state.session.read().await;
    let ranked = rank_reports(&session.reports, &filters);
    Json(serde_json::json!({
        "rows": ranked.len(),
        "data": ranked,
    }))
}

#[cfg(feature = "api")]
async fn list_map_points(State(state): State<AppState>) -> Json<serde_json::Value> {
    let session = state.session.read().await;
    let points = collect_map_points(&session.reports);
    Json(serde_json::json!({
        "rows": points.len(),
        "data": points,
        "default_center": { "lat": DEFAULT_CENTER.0, "lng": DEFAULT_CENTER.1 },
    }))
}

#[cfg(feature = "api")]
async fn submit_report(
    State(state): State<AppState>,
    Json(draft): Json<ReportDraft>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Required-field gaps are reported inline, before any network call.
    draft
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ack = state
        .submitter
        .submit(&draft)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    // Mirror the post-submit reset on the session's draft.
    let mut session = state.session.write().await;
    session.draft = draft;
    session.draft.reset_after_submit();

    Ok(Json(serde_json::json!({
        "success": true,
        "message": ack.message,
    })))
}

#[cfg(feature = "api")]
async fn refresh_session(State(state): State<AppState>) -> Json<RefreshOutcome> {
    Json(state.refresh().await)
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    Validation(String),
    Upstream(String),
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
