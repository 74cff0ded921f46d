use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/planner", get(handlers::get_planner))
        .route("/api/task/text", post(handlers::task_text))
        .route("/api/task/save", post(handlers::task_save))
        .route("/api/task/complete", post(handlers::task_complete))
        .route("/api/congrats/dismiss", post(handlers::congrats_dismiss))
        .route("/api/timer", get(handlers::get_timer))
        .route("/api/timer/duration", post(handlers::timer_duration))
        .route("/api/timer/start", post(handlers::timer_start))
        .route("/api/timer/pause", post(handlers::timer_pause))
        .route("/api/timer/ack", post(handlers::timer_ack))
        .with_state(state)
}
