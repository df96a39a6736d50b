use crate::errors::{AppError, TrackerError};
use crate::models::{
    AddHabitRequest, CompletionRequest, DashboardResponse, DateRequest, GraphRequest,
    NavigateRequest, ThemeRequest,
};
use crate::record::parse_date_key;
use crate::state::AppState;
use crate::storage::persist_store;
use crate::tracker::Tracker;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(&tracker.dashboard()))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.dashboard()))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<AddHabitRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.add_habit(&payload.name).map_err(rejected)?;
    info!(habit = payload.name.trim(), "habit added");
    commit(&state, &tracker).await
}

pub async fn remove_habit(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.remove_habit(&name).map_err(rejected)?;
    info!(habit = %name, "habit removed");
    commit(&state, &tracker).await
}

pub async fn set_completion(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker
        .set_completion(&name, payload.completed)
        .map_err(rejected)?;
    commit(&state, &tracker).await
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    match payload.direction.direction() {
        Some(direction) => {
            tracker.navigate(direction).map_err(rejected)?;
        }
        None => {
            tracker.go_today();
        }
    }
    commit(&state, &tracker).await
}

pub async fn jump_to_date(
    State(state): State<AppState>,
    Json(payload): Json<DateRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let date = parse_date_key(&payload.date)
        .ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))?;

    let mut tracker = state.tracker.lock().await;
    let outcome = tracker.jump_to(date);
    // A future date still moves the view to today, so persist before reporting.
    persist(&state, &tracker).await?;
    outcome.map_err(rejected)?;
    Ok(Json(tracker.dashboard()))
}

pub async fn select_graph(
    State(state): State<AppState>,
    Json(payload): Json<GraphRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.select_habit(payload.index).map_err(rejected)?;
    commit(&state, &tracker).await
}

pub async fn toggle_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let theme = match payload.theme {
        Some(theme) => {
            tracker.set_theme(theme);
            theme
        }
        None => tracker.toggle_theme(payload.system_dark),
    };
    info!(theme = theme.as_str(), "theme changed");
    commit(&state, &tracker).await
}

async fn commit(state: &AppState, tracker: &Tracker) -> Result<Json<DashboardResponse>, AppError> {
    persist(state, tracker).await?;
    Ok(Json(tracker.dashboard()))
}

async fn persist(state: &AppState, tracker: &Tracker) -> Result<(), AppError> {
    let mut store = state.store.lock().await;
    tracker.save(&mut *store);
    persist_store(&state.data_path, &store).await
}

fn rejected(err: TrackerError) -> AppError {
    warn!("rejected: {err}");
    AppError::from(err)
}
