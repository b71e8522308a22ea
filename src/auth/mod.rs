use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::login_page))
        .route("/auth", post(handlers::auth))
        .route("/logout", post(handlers::logout))
}
