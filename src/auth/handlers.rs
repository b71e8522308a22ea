use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::auth::dto::AuthForm;
use crate::auth::repo::User;
use crate::auth::services::{self, is_valid_email};
use crate::error::AppError;
use crate::session::{logout_cookie, session_cookie, session_from_jar, session_token, SessionData};
use crate::state::AppState;
use crate::templates::{render, Flash, LoginPage};

#[instrument(skip(state, jar))]
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if session_from_jar(&jar, &state.sessions).is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(render(&LoginPage { flash: None })?.into_response())
}

/// Combined login-or-register: login is attempted first; a non-empty name
/// turns a failed login into a registration attempt.
#[instrument(skip(state, jar, form))]
pub async fn auth(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_string();
    let name = form.name.trim().to_string();

    if let Some(user) = services::authenticate(&state.db, &email, &form.password).await? {
        info!(user_id = user.id, "user logged in");
        return Ok(start_session(&state, jar, &user).into_response());
    }

    if name.is_empty() {
        warn!("login failed");
        return login_with_error("Invalid login credentials.");
    }

    if !is_valid_email(&email) {
        warn!("registration with malformed email");
        return login_with_error("Invalid email address.");
    }

    match services::register(&state.db, &email, &form.password, &name, form.role).await? {
        Some(user) => {
            info!(user_id = user.id, role = ?user.role, "user registered");
            Ok(start_session(&state, jar, &user).into_response())
        }
        None => login_with_error("Registration failed. Email may already exist."),
    }
}

#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(token) = session_token(&jar) {
        state.sessions.remove_session(token);
    }
    let jar = jar.add(logout_cookie(state.config.secure_cookies));
    (jar, Redirect::to("/"))
}

fn start_session(state: &AppState, jar: CookieJar, user: &User) -> (CookieJar, Redirect) {
    let token = state.sessions.create_session(SessionData::for_user(user));
    let jar = jar.add(session_cookie(token, state.config.secure_cookies));
    (jar, Redirect::to("/dashboard"))
}

fn login_with_error(message: &str) -> Result<Response, AppError> {
    let page = LoginPage {
        flash: Some(Flash::error(message)),
    };
    Ok(render(&page)?.into_response())
}
