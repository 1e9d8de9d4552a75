use crate::progress::{DailyProgress, ProgressService, ProgressState};
use crate::web::api::ServerErrorResponse;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of one progress data point for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyProgressJson {
    /// Calendar date in `YYYY-MM-DD` form
    date: String,
    /// Completion percentage across all habits, 0-100
    percent: u8,
}

impl From<DailyProgress> for DailyProgressJson {
    fn from(point: DailyProgress) -> Self {
        Self {
            date: point.date().to_string(),
            percent: point.percent(),
        }
    }
}

/// Handler for GET /api/progress - Returns the rolling 30-day completion
/// series ending today (UTC), oldest first.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/progress",
    responses(
        (status = 200, description = "Successfully computed progress", body = [DailyProgressJson]),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Progress"
)]
pub async fn get_progress_handler(
    State(state): State<Arc<ProgressState>>,
) -> Result<Json<Vec<DailyProgressJson>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = ProgressService::new(&state.db);
    let as_of = chrono::Utc::now().date_naive();

    match service.progress_over_window(as_of).await {
        Ok(series) => Ok(Json(
            series.into_iter().map(DailyProgressJson::from).collect(),
        )),
        Err(err) => {
            tracing::error!("Failed to compute progress: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to compute progress".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the progress API router.
pub fn create_api_router(state: Arc<ProgressState>) -> Router {
    Router::new()
        .route("/progress", get(get_progress_handler))
        .with_state(state)
}
