use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::repo::Role;
use crate::session::{session_from_jar, SessionData};
use crate::state::AppState;

/// Requires a live session; anonymous requests are sent to the login page.
pub struct CurrentUser(pub SessionData);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/"))?;
        let session = session_from_jar(&jar, &state.sessions).ok_or_else(|| Redirect::to("/"))?;
        Ok(CurrentUser(session))
    }
}

/// Requires a teacher session; other roles are sent back to the dashboard.
pub struct TeacherUser(pub SessionData);

#[async_trait]
impl FromRequestParts<AppState> for TeacherUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(session) = CurrentUser::from_request_parts(parts, state).await?;
        if session.role != Role::Teacher {
            return Err(Redirect::to("/dashboard"));
        }
        Ok(TeacherUser(session))
    }
}
