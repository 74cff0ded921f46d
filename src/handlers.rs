use crate::clock::Today;
use crate::errors::AppError;
use crate::models::{
    PlannerResponse, TaskDayRequest, TaskTextRequest, TaskView, TimerDurationRequest,
    TimerResponse,
};
use crate::state::{AppState, Planner};
use crate::stats::build_analytics;
use crate::storage;
use crate::tasks::{self, Applied};
use crate::timer::CountdownState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use tracing::{info, warn};

pub async fn index() -> Html<String> {
    Html(render_index(&Today::now()))
}

pub async fn get_planner(State(state): State<AppState>) -> Result<Json<PlannerResponse>, AppError> {
    let today = Today::now();
    let mut planner = state.planner.lock().await;
    ensure_month(&state, &mut planner, &today).await;
    Ok(Json(snapshot(&planner, &today, None)))
}

pub async fn task_text(
    State(state): State<AppState>,
    Json(payload): Json<TaskTextRequest>,
) -> Result<Json<PlannerResponse>, AppError> {
    let response = apply(&state, payload.day, |planner, _today| {
        tasks::update_text(&mut planner.tasks, payload.day, payload.text)
    })
    .await?;
    Ok(Json(response))
}

pub async fn task_save(
    State(state): State<AppState>,
    Json(payload): Json<TaskDayRequest>,
) -> Result<Json<PlannerResponse>, AppError> {
    let response = apply(&state, payload.day, |planner, _today| {
        tasks::save(&mut planner.tasks, payload.day)
    })
    .await?;
    Ok(Json(response))
}

pub async fn task_complete(
    State(state): State<AppState>,
    Json(payload): Json<TaskDayRequest>,
) -> Result<Json<PlannerResponse>, AppError> {
    let response = apply(&state, payload.day, |planner, today| {
        let applied = tasks::mark_complete(&mut planner.tasks, payload.day, today.day);
        if applied.changed() {
            info!("day {} completed", payload.day);
            planner.congrats = true;
        }
        applied
    })
    .await?;
    Ok(Json(response))
}

pub async fn congrats_dismiss(
    State(state): State<AppState>,
) -> Result<Json<PlannerResponse>, AppError> {
    let today = Today::now();
    let mut planner = state.planner.lock().await;
    ensure_month(&state, &mut planner, &today).await;
    planner.congrats = false;
    Ok(Json(snapshot(&planner, &today, None)))
}

pub async fn get_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(to_timer_response(state.timer.snapshot().await))
}

pub async fn timer_duration(
    State(state): State<AppState>,
    Json(payload): Json<TimerDurationRequest>,
) -> Result<Json<TimerResponse>, AppError> {
    if payload.minutes == 0 {
        return Err(AppError::bad_request("minutes must be at least 1"));
    }
    Ok(Json(to_timer_response(
        state.timer.set_duration(payload.minutes).await,
    )))
}

pub async fn timer_start(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(to_timer_response(state.timer.start().await))
}

pub async fn timer_pause(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(to_timer_response(state.timer.pause().await))
}

pub async fn timer_ack(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(to_timer_response(state.timer.acknowledge().await))
}

/// Run one task-store transition under the planner lock: recheck the
/// active month, apply, and persist when the map actually changed. A
/// failed write is downgraded to a warning on the response; the in-memory
/// state is already correct.
async fn apply<F>(state: &AppState, day: u32, op: F) -> Result<PlannerResponse, AppError>
where
    F: FnOnce(&mut Planner, &Today) -> Applied,
{
    let today = Today::now();
    if day == 0 || day > today.days_in_month {
        return Err(AppError::bad_request("day out of range for this month"));
    }

    let mut planner = state.planner.lock().await;
    ensure_month(state, &mut planner, &today).await;

    let applied = op(&mut planner, &today);

    let mut storage_warning = None;
    if applied.changed() {
        if let Err(err) =
            storage::persist_month(&state.data_dir, &planner.month_key, &planner.tasks).await
        {
            warn!("failed to persist {}: {}", planner.month_key, err.message);
            storage_warning = Some(format!("changes not saved to disk: {}", err.message));
        }
    }

    Ok(snapshot(&planner, &today, storage_warning))
}

/// Live month rollover: when the wall clock has moved to a new month key,
/// swap in that month's stored snapshot. Session signals do not carry over.
async fn ensure_month(state: &AppState, planner: &mut Planner, today: &Today) {
    let key = today.month_key();
    if planner.month_key != key {
        info!("month rolled over to {key}");
        planner.tasks = storage::load_month(&state.data_dir, &key).await;
        planner.month_key = key;
        planner.congrats = false;
    }
}

fn snapshot(planner: &Planner, today: &Today, storage_warning: Option<String>) -> PlannerResponse {
    let analytics = build_analytics(today, &planner.tasks);
    let tasks = planner
        .tasks
        .iter()
        .map(|(&day, record)| TaskView {
            day,
            text: record.text().to_string(),
            saved: record.is_saved(),
            done: record.is_done(),
        })
        .collect();

    PlannerResponse {
        date: today.date.to_string(),
        day: today.day,
        days_in_month: today.days_in_month,
        month_label: today.month_label(),
        tasks,
        progress: analytics.progress,
        streak: analytics.streak,
        congrats: planner.congrats,
        storage_warning,
    }
}

fn to_timer_response(countdown: CountdownState) -> TimerResponse {
    TimerResponse {
        display: countdown.display(),
        remaining_seconds: countdown.remaining_seconds,
        running: countdown.running,
        expired: countdown.expired,
    }
}
