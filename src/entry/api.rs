use crate::entry::{Entry, EntryService, EntryState};
use crate::web::api::ServerErrorResponse;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of an entry for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryJson {
    /// Unique identifier assigned by the store
    id: i32,
    /// ID of the habit this entry refers to
    habit_id: i32,
    /// Calendar date in `YYYY-MM-DD` form
    date: String,
    /// Whether the habit was completed on this date
    completed: bool,
}

impl From<Entry> for EntryJson {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id(),
            habit_id: entry.habit_id(),
            date: entry.date().to_string(),
            completed: entry.completed(),
        }
    }
}

/// Request body for recording a day's completion.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordEntryRequest {
    /// ID of the habit the entry refers to; not checked for existence
    habit_id: i32,
    /// Calendar date in `YYYY-MM-DD` form; stored verbatim
    date: String,
    /// Whether the habit was completed, defaults to false when omitted
    #[serde(default)]
    completed: bool,
}

/// Handler for POST /api/entries - Upserts an entry keyed on (habitId, date).
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = RecordEntryRequest,
    responses(
        (status = 200, description = "Successfully recorded entry", body = EntryJson),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Entries"
)]
pub async fn record_entry_handler(
    State(state): State<Arc<EntryState>>,
    Json(request): Json<RecordEntryRequest>,
) -> Result<Json<EntryJson>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = EntryService::new(&state.db);

    match service
        .record_entry(request.habit_id, request.date, request.completed)
        .await
    {
        Ok(entry) => Ok(Json(EntryJson::from(entry))),
        Err(err) => {
            tracing::error!("Failed to record entry: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to record entry".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the entries API router.
pub fn create_api_router(state: Arc<EntryState>) -> Router {
    Router::new()
        .route("/entries", post(record_entry_handler))
        .with_state(state)
}
