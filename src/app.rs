use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/habits", post(handlers::add_habit))
        .route("/api/habits/:name", delete(handlers::remove_habit))
        .route("/api/habits/:name/completion", post(handlers::set_completion))
        .route("/api/navigate", post(handlers::navigate))
        .route("/api/date", post(handlers::jump_to_date))
        .route("/api/graph", post(handlers::select_graph))
        .route("/api/theme", post(handlers::toggle_theme))
        .with_state(state)
}
