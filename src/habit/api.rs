use crate::habit::{Habit, HabitService, HabitState};
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

/// JSON representation of a habit for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HabitJson {
    /// Unique identifier assigned by the store
    id: i32,
    /// Free-text habit label
    title: String,
    /// Daily target count; informational only
    target: i32,
}

impl From<Habit> for HabitJson {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id(),
            title: habit.title().to_string(),
            target: habit.target(),
        }
    }
}

/// Request body for creating a habit.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHabitRequest {
    /// Free-text habit label; empty string is accepted
    title: String,
    /// Daily target count, defaults to 1 when omitted
    #[serde(default)]
    target: Option<i32>,
}

/// Handler for GET /api/habits - Returns every stored habit as a JSON array.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/habits",
    responses(
        (status = 200, description = "Successfully retrieved habits", body = [HabitJson]),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Habits"
)]
pub async fn get_habits_handler(
    State(state): State<Arc<HabitState>>,
) -> Result<Json<Vec<HabitJson>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = HabitService::new(&state.db);

    match service.list_habits().await {
        Ok(habits) => Ok(Json(habits.into_iter().map(HabitJson::from).collect())),
        Err(err) => {
            tracing::error!("Failed to list habits: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to retrieve habits".to_string(),
                )),
            ))
        }
    }
}

/// Handler for POST /api/habits - Creates a habit and returns the persisted value.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/habits",
    request_body = CreateHabitRequest,
    responses(
        (status = 200, description = "Successfully created habit", body = HabitJson),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Habits"
)]
pub async fn create_habit_handler(
    State(state): State<Arc<HabitState>>,
    Json(request): Json<CreateHabitRequest>,
) -> Result<Json<HabitJson>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = HabitService::new(&state.db);

    match service.create_habit(request.title, request.target).await {
        Ok(habit) => Ok(Json(HabitJson::from(habit))),
        Err(err) => {
            tracing::error!("Failed to create habit: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to create habit".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the habits API router.
pub fn create_api_router(state: Arc<HabitState>) -> Router {
    Router::new()
        .route(
            "/habits",
            get(get_habits_handler).post(create_habit_handler),
        )
        .with_state(state)
}
