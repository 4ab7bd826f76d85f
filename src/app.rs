use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/exercises",
            get(handlers::list_exercises).post(handlers::create_exercise),
        )
        .route(
            "/api/exercises/:id",
            axum::routing::patch(handlers::update_exercise).delete(handlers::delete_exercise),
        )
        .route("/api/history", get(handlers::get_history))
        .route("/api/progress", get(handlers::get_progress))
        .with_state(state)
}
