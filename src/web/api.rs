use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::entry::EntryState;
use crate::habit::HabitState;
use crate::progress::ProgressState;

/// JSON body returned when a request fails on the server side.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerErrorResponse {
    /// Human-readable description of the failure
    error: String,
}

impl ServerErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

/// OpenAPI document covering the JSON API surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::habit::api::get_habits_handler,
        crate::habit::api::create_habit_handler,
        crate::entry::api::record_entry_handler,
        crate::progress::api::get_progress_handler,
    ),
    components(schemas(
        crate::habit::api::HabitJson,
        crate::habit::api::CreateHabitRequest,
        crate::entry::api::EntryJson,
        crate::entry::api::RecordEntryRequest,
        crate::progress::api::DailyProgressJson,
        ServerErrorResponse,
    )),
    tags(
        (name = "Habits", description = "Habit definition endpoints"),
        (name = "Entries", description = "Daily completion endpoints"),
        (name = "Progress", description = "Derived progress endpoints")
    )
)]
pub struct ApiDoc;

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(
    habit_state: Arc<HabitState>,
    entry_state: Arc<EntryState>,
    progress_state: Arc<ProgressState>,
) -> axum::Router {
    let habits_router = crate::habit::api::create_api_router(habit_state);
    let entries_router = crate::entry::api::create_api_router(entry_state);
    let progress_router = crate::progress::api::create_api_router(progress_state);
    let api_routes = habits_router.merge(entries_router).merge(progress_router);
    Router::new().nest("/api", api_routes)
}
