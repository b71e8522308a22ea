use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

mod dto;
pub mod enrollment;
pub mod handlers;
mod join_code;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard))
        .route("/courses", post(handlers::create_course))
        .route("/courses/join", post(handlers::join_course))
}
