//! # Operation Log Routes
//!
//! Operator-facing endpoints over the in-process operation log: a filtered
//! read and a bulk clear. The log is best-effort observability — it resets
//! with the process and these endpoints never touch the database.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use cono_core::{LogEntry, LogQuery, OperationKind};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Query string for `GET /logs`. All filters optional.
#[derive(Debug, Default, Deserialize)]
pub struct LogsParams {
    /// Only entries correlated to this order id.
    pub order_id: Option<i64>,

    /// Only entries of this kind (wire name, case-insensitive).
    pub operation_kind: Option<String>,

    /// At most this many entries, most recent matches (default 100).
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    /// Matching entries, insertion order.
    pub logs: Vec<LogEntry>,

    /// Entries in the log overall, filters ignored.
    pub total_logs: usize,

    /// Entries returned after filtering and the limit window.
    pub filtered_logs: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearLogsResponse {
    pub message: String,
    /// How many entries were dropped.
    pub cleared: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /logs?order_id=&operation_kind=&limit=`
///
/// An unrecognized `operation_kind` is a 400 listing the valid kinds — a
/// typo'd filter silently matching nothing is worse than an error.
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<LogsParams>,
) -> Result<Json<LogsResponse>, ApiError> {
    let kind = params
        .operation_kind
        .as_deref()
        .map(str::parse::<OperationKind>)
        .transpose()?;

    let logs = state.oplog.query(&LogQuery {
        order_id: params.order_id,
        kind,
        limit: params.limit,
    });

    Ok(Json(LogsResponse {
        total_logs: state.oplog.len(),
        filtered_logs: logs.len(),
        logs,
    }))
}

/// `POST /logs/clear` — wipes the log, reporting how many entries went.
///
/// The count is captured before clearing; the log itself does not report it.
pub async fn clear_logs(State(state): State<AppState>) -> Json<ClearLogsResponse> {
    let cleared = state.oplog.len();
    state.oplog.clear();

    Json(ClearLogsResponse {
        message: "operation log cleared".to_string(),
        cleared,
    })
}
