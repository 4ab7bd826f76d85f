use crate::errors::AppError;
use crate::form::ExerciseForm;
use crate::history::{history_rows, HistoryRow};
use crate::models::{Exercise, ExercisePatch};
use crate::progress::{aggregate, summarize, ProgressReport, TimeRange};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, Utc};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub range: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.snapshot().await;
    Html(render_index(Local::now().date_naive(), &summarize(&snapshot)))
}

pub async fn list_exercises(State(state): State<AppState>) -> Json<Vec<Exercise>> {
    Json(state.snapshot().await.to_vec())
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<HistoryRow>> {
    Json(history_rows(&state.snapshot().await))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressReport>, AppError> {
    let range = match query.range.as_deref() {
        Some(text) => text.parse::<TimeRange>().map_err(AppError::bad_request)?,
        None => TimeRange::default(),
    };

    Ok(Json(aggregate(&state.snapshot().await, range)))
}

pub async fn create_exercise(
    State(state): State<AppState>,
    Json(form): Json<ExerciseForm>,
) -> Result<(StatusCode, Json<Exercise>), AppError> {
    let exercise = form.into_exercise(Utc::now())?;

    state.store.lock().await.add_exercise(exercise.clone());
    info!(id = %exercise.id, name = %exercise.name, minutes = exercise.duration, "exercise added");

    Ok((StatusCode::CREATED, Json(exercise)))
}

pub async fn update_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ExercisePatch>,
) -> Result<StatusCode, AppError> {
    patch.validate()?;
    if !patch.is_empty() {
        state.store.lock().await.update_exercise(&id, &patch);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_exercise(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let mut store = state.store.lock().await;
    if store.get(&id).is_some() {
        store.remove_exercise(&id);
        info!(%id, "exercise removed");
    } else {
        debug!(%id, "no exercise to remove");
    }
    StatusCode::NO_CONTENT
}
