//! HTTP server for the check-in API.
//!
//! # API Endpoints
//!
//! | Method | Path                 | Description                            |
//! |--------|----------------------|----------------------------------------|
//! | GET    | `/health`            | Health check                           |
//! | POST   | `/api/checkin`       | Validate + dedup + insert a record     |
//! | GET    | `/api/attendance`    | SSE stream of full-set snapshots       |
//! | GET    | `/api/stats`         | Current aggregate counts               |
//! | GET    | `/api/export`        | Filtered CSV download                  |
//! | POST   | `/api/purge`         | Confirmed batched delete of all records|
//! | POST   | `/api/encouragement` | Generated message (static fallback)    |
//! | POST   | `/api/admin/login`   | Shared-passphrase admin gate           |

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use futures::stream::Stream;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::types::{
    CheckinResponse, EncouragementRequest, EncouragementResponse, LoginRequest, LoginResponse,
    PurgeRequest, PurgeResponse,
};
use crate::ai::{encouragement_or_fallback, AiClient};
use crate::config::AppConfig;
use crate::error::{PurgeError, ServerError, ServerResult};
use crate::export::{export_csv, export_filename};
use crate::filter::FilterCriteria;
use crate::models::CheckinSubmission;
use crate::purge::purge_all;
use crate::registration;
use crate::stats::AttendanceStats;
use crate::store::RecordStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: AppConfig,
    /// Absent when no API key is configured; the fallback message is
    /// served instead.
    pub ai: Option<AiClient>,
    /// Guards against overlapping purges.
    purging: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: AppConfig, ai: Option<AiClient>) -> Self {
        Self {
            store,
            config,
            ai,
            purging: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Start the HTTP server.
pub async fn start_server(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/checkin", post(checkin))
        .route("/api/attendance", get(attendance_stream))
        .route("/api/stats", get(stats))
        .route("/api/export", get(export))
        .route("/api/purge", post(purge))
        .route("/api/encouragement", post(encouragement))
        .route("/api/admin/login", post(admin_login))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Check-in server running on http://localhost:{}", port);
    println!("   POST /api/checkin       - Register an attendee");
    println!("   GET  /api/attendance    - Live snapshot stream (SSE)");
    println!("   GET  /api/stats         - Summary counts");
    println!("   GET  /api/export        - CSV download");
    println!("   POST /api/purge         - Delete all records (confirmed)");
    println!("   GET  /health            - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "checkin",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Register one attendee: validate, duplicate-check, insert.
async fn checkin(
    State(state): State<AppState>,
    Json(submission): Json<CheckinSubmission>,
) -> ServerResult<(StatusCode, Json<CheckinResponse>)> {
    let record = registration::submit(state.store.as_ref(), &state.config, &submission)?;
    println!("✅ Check-in: {} ({})", record.full_name(), record.email);
    Ok((StatusCode::CREATED, Json(CheckinResponse { id: record.id })))
}

/// SSE stream of full-collection snapshots, newest record first.
///
/// The first event carries the current snapshot; each store change pushes a
/// complete replacement. The subscription is torn down when the client
/// disconnects (the watch receiver is dropped with the stream).
async fn attendance_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.store.watch();

    let stream = WatchStream::new(rx).filter_map(|snapshot| {
        let json = serde_json::to_string(&*snapshot).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Current aggregate counts, recomputed from the latest snapshot.
async fn stats(State(state): State<AppState>) -> Json<AttendanceStats> {
    let snapshot = state.store.snapshot();
    Json(AttendanceStats::compute(&snapshot))
}

/// Filtered CSV download.
async fn export(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> ServerResult<Response> {
    let snapshot = state.store.snapshot();
    let filtered = criteria.apply(&snapshot);
    let payload = export_csv(&filtered)?;

    let filename = export_filename(criteria.category_scope(), Utc::now().date_naive());
    println!("📄 Exported {} record(s) as {}", filtered.len(), filename);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, payload).into_response())
}

/// Confirmed, batched purge of every record. One purge at a time.
async fn purge(
    State(state): State<AppState>,
    Json(request): Json<PurgeRequest>,
) -> ServerResult<Json<PurgeResponse>> {
    if state
        .purging
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(ServerError::Purge(PurgeError::AlreadyRunning));
    }

    let result = purge_all(
        state.store.as_ref(),
        &request.confirm,
        state.config.batch_ceiling,
    );
    state.purging.store(false, Ordering::SeqCst);

    let deleted = result?;
    println!("🗑️  Purged {} record(s)", deleted);
    Ok(Json(PurgeResponse { deleted }))
}

/// Generated encouragement; any upstream failure yields the fallback, so
/// this endpoint never errors once past input checks.
async fn encouragement(
    State(state): State<AppState>,
    Json(request): Json<EncouragementRequest>,
) -> ServerResult<Json<EncouragementResponse>> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest("Name is required".to_string()));
    }

    let text = encouragement_or_fallback(state.ai.as_ref(), name).await;
    Ok(Json(EncouragementResponse { text }))
}

/// Shared-passphrase gate. Not a security boundary: one static passphrase,
/// compared verbatim.
async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    let granted = state.config.verify_passphrase(&request.passphrase);
    let status = if granted {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(LoginResponse { granted }))
}
