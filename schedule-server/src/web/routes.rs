//! HTTP route handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::Uri,
    routing::{get, post},
};
use tracing::debug;

use crate::aggregate::AggregationResult;
use crate::departures::DepartureBoard;
use crate::domain::WeeklySchedule;

use super::dto::AggregateQuery;
use super::error::AppError;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schedule/aggregate", post(aggregate_schedule))
        .route("/schedule/departures", post(departure_board))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Aggregate a schedule for one day subset.
async fn aggregate_schedule(
    State(state): State<AppState>,
    query: Result<Query<AggregateQuery>, QueryRejection>,
    body: Result<Json<WeeklySchedule>, JsonRejection>,
) -> Result<Json<AggregationResult>, AppError> {
    let Query(query) = query?;
    let subset = query.subset()?;
    let Json(schedule) = body?;

    debug!(
        days = ?subset,
        entries = schedule.entry_count(),
        "aggregating schedule"
    );

    let result = state.aggregator.aggregate(&schedule, subset)?;
    Ok(Json(result))
}

/// Weekday and weekend departures for a route page.
async fn departure_board(
    State(state): State<AppState>,
    body: Result<Json<WeeklySchedule>, JsonRejection>,
) -> Result<Json<DepartureBoard>, AppError> {
    let Json(schedule) = body?;

    debug!(entries = schedule.entry_count(), "building departure board");

    let board = DepartureBoard::build(&schedule, state.aggregator.as_ref())?;
    Ok(Json(board))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        message: format!("no route for {uri}"),
    }
}
