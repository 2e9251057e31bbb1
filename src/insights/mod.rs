pub mod aggregate;
pub mod alignment;
mod dto;
mod handlers;
pub mod ledger;
pub mod recommend;
pub mod repo;
pub mod report;
pub mod streak;
pub mod trends;
pub mod types;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/insights", get(handlers::get_insights))
        .route("/goals/:id/streak", get(handlers::get_goal_streak))
}
