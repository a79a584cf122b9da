use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/habits",
            get(handlers::get_board).put(handlers::replace_board),
        )
        .route("/api/habits/streaks", post(handlers::refresh_streaks))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/history", get(handlers::get_history))
        .route("/api/history/:id", post(handlers::update_history))
        .route("/api/rules", post(handlers::add_rule))
        .route("/api/kpis/:name", delete(handlers::delete_kpi))
        .route("/api/kpis/:name/chart", get(handlers::get_kpi_chart))
        .route("/api/kpis/:name/data", post(handlers::add_kpi_data))
        .with_state(state)
}
