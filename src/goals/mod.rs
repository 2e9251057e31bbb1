pub mod dto;
mod handlers;
pub mod repo;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route("/goals/:id", delete(handlers::delete_goal))
}
