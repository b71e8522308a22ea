use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/courses/:course_id/profile",
            get(handlers::profile_page).post(handlers::save_profile),
        )
        .route("/courses/:course_id/profiles", get(handlers::view_profiles))
}
