use crate::board::HabitBoard;
use crate::dashboard::{KpiChart, build_chart, resolve_direction};
use crate::errors::AppError;
use crate::history::{HistoryTable, UpdateDecision, build_table, guard_update};
use crate::models::{
    BoardView, ChartQuery, HabitId, HabitListItem, HistoryQuery, HistoryUpdateRequest,
    HistoryUpdateResponse, KpiDataForm, ToggleRequest,
};
use crate::rules::{RuleDraft, RuleRequest};
use crate::state::AppState;
use crate::storage::persist_board;
use crate::ui::render_index;
use crate::validation::validate_kpi_name;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::Html,
};
use tracing::{info, warn};

pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update habit status. Please try again.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete habit";
pub const HISTORY_RANGE_MESSAGE: &str = "Please select both start and end dates.";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let board = state.board.lock().await;
    Html(render_index(&board.view()))
}

pub async fn get_board(State(state): State<AppState>) -> Json<BoardView> {
    let board = state.board.lock().await;
    Json(board.view())
}

pub async fn replace_board(
    State(state): State<AppState>,
    Json(items): Json<Vec<HabitListItem>>,
) -> Result<Json<BoardView>, AppError> {
    let mut seen = std::collections::BTreeSet::new();
    if let Some(dup) = items.iter().find(|item| !seen.insert(item.id)) {
        return Err(AppError::bad_request(format!("habit {} listed twice", dup.id)));
    }

    let mut board = state.board.lock().await;
    *board = HabitBoard::new(items);
    persist_board(&state.data_path, &board.snapshot()).await?;
    info!(total = board.list().total(), "board initialized");
    Ok(Json(board.view()))
}

/// Reorders locally first, then confirms with the backend; a failed confirmation
/// puts the item back where it was.
pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<HabitId>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<BoardView>, AppError> {
    let undo = {
        let mut board = state.board.lock().await;
        board.apply_toggle(id, request.checked)?
    };

    match state
        .backend
        .update_habit(id, request.checked, request.date)
        .await
    {
        Ok(ack) => {
            info!(habit = id, checked = request.checked, "habit updated: {ack}");
            let board = state.board.lock().await;
            persist_board(&state.data_path, &board.snapshot()).await?;
            Ok(Json(board.view()))
        }
        Err(err) => {
            warn!(habit = id, "habit update failed, rolling back: {err}");
            state.board.lock().await.revert(undo);
            Err(AppError::bad_gateway(UPDATE_FAILED_MESSAGE))
        }
    }
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<HabitId>,
) -> Result<Json<BoardView>, AppError> {
    if state.board.lock().await.list().get(id).is_none() {
        return Err(AppError::not_found(format!("habit {id} is not on the list")));
    }

    if let Err(err) = state.backend.delete_habit(id).await {
        warn!(habit = id, "habit delete failed: {err}");
        return Err(AppError::bad_gateway(DELETE_FAILED_MESSAGE));
    }

    let mut board = state.board.lock().await;
    // A toggle may have dropped the item while the backend call was in flight.
    if let Err(err) = board.remove(id) {
        warn!(habit = id, "habit already gone after delete: {err}");
    }
    persist_board(&state.data_path, &board.snapshot()).await?;
    info!(habit = id, "habit deleted");
    Ok(Json(board.view()))
}

pub async fn refresh_streaks(State(state): State<AppState>) -> Result<Json<BoardView>, AppError> {
    let ids = state.board.lock().await.habit_ids();
    let streaks = state.backend.fetch_streaks(&ids).await?;

    let mut board = state.board.lock().await;
    board.set_streaks(&streaks);
    persist_board(&state.data_path, &board.snapshot()).await?;
    Ok(Json(board.view()))
}

pub async fn get_kpi_chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<KpiChart>, AppError> {
    let name = validate_kpi_name(&name)?;
    let points = state.backend.fetch_kpi_data(name, query.period).await?;
    let higher_is_better = resolve_direction(&points, query.higher_is_better);
    Ok(Json(build_chart(name, &points, higher_is_better)))
}

pub async fn add_kpi_data(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<KpiDataForm>,
) -> Result<String, AppError> {
    let name = validate_kpi_name(&name)?;
    if !form.value.is_finite() {
        return Err(AppError::bad_request("value must be a finite number"));
    }
    let result = state.backend.add_kpi_data(name, form.date, form.value).await?;
    info!(kpi = %name, date = %form.date, "kpi data added");
    Ok(result)
}

pub async fn delete_kpi(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, AppError> {
    let name = validate_kpi_name(&name)?;
    let result = state.backend.delete_kpi(name).await?;
    info!(kpi = %name, "kpi deleted");
    Ok(result)
}

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryTable>, AppError> {
    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(AppError::bad_request(HISTORY_RANGE_MESSAGE));
    };
    if start > end {
        return Err(AppError::bad_request("Start date must not be after end date."));
    }
    let rows = state.backend.fetch_history(start, end).await?;
    Ok(Json(build_table(&rows)))
}

/// Records a past day's completion unless the habit was inactive on that day.
pub async fn update_history(
    State(state): State<AppState>,
    Path(id): Path<HabitId>,
    Json(request): Json<HistoryUpdateRequest>,
) -> Result<Json<HistoryUpdateResponse>, AppError> {
    let rows = state
        .backend
        .fetch_history(request.date, request.date)
        .await?;
    let status = build_table(&rows).status_of(request.date, id);

    if guard_update(status) == UpdateDecision::ForceUnchecked {
        info!(habit = id, date = %request.date, "habit inactive on that day, update skipped");
        return Ok(Json(HistoryUpdateResponse {
            habit_id: id,
            date: request.date,
            checked: false,
            applied: false,
        }));
    }

    if let Err(err) = state
        .backend
        .update_habit(id, request.checked, Some(request.date))
        .await
    {
        warn!(habit = id, date = %request.date, "history update failed: {err}");
        return Err(AppError::bad_gateway(UPDATE_FAILED_MESSAGE));
    }

    Ok(Json(HistoryUpdateResponse {
        habit_id: id,
        date: request.date,
        checked: request.checked,
        applied: true,
    }))
}

pub async fn add_rule(
    State(state): State<AppState>,
    Json(draft): Json<RuleDraft>,
) -> Result<Json<RuleRequest>, AppError> {
    let rule = draft.build()?;
    state.backend.add_rule(&rule).await?;
    info!(main = rule.main_id, subs = rule.sub_ids.len(), frequency = rule.frequency, "rule added");
    Ok(Json(rule))
}
