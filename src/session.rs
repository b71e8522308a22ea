use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::auth::repo::{Role, User};

const SESSION_COOKIE_NAME: &str = "studentintro_session";
const SESSION_MAX_AGE: i64 = 24 * 60 * 60; // 24 hours

/// Authenticated identity held for the lifetime of a browser session.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl SessionData {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// In-process session map keyed by the opaque token carried in the cookie.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn create_session(&self, data: SessionData) -> String {
        let token = Uuid::new_v4().to_string();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.clone(), data);
        }
        token
    }

    pub fn get_session(&self, token: &str) -> Option<SessionData> {
        if let Ok(sessions) = self.sessions.read() {
            sessions.get(token).cloned()
        } else {
            None
        }
    }

    pub fn remove_session(&self, token: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
    }
}

pub fn session_from_jar(jar: &CookieJar, store: &SessionStore) -> Option<SessionData> {
    let cookie = jar.get(SESSION_COOKIE_NAME)?;
    store.get_session(cookie.value())
}

pub fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE_NAME).map(|c| c.value())
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(SESSION_MAX_AGE))
        .path("/")
        .build()
}

pub fn logout_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> SessionData {
        SessionData {
            user_id: 7,
            email: "s@x.com".into(),
            name: "Student S".into(),
            role: Role::Student,
        }
    }

    #[test]
    fn create_get_remove_roundtrip() {
        let store = SessionStore::new();
        let token = store.create_session(sample_session());

        let data = store.get_session(&token).expect("session stored");
        assert_eq!(data.user_id, 7);
        assert_eq!(data.role, Role::Student);

        store.remove_session(&token);
        assert!(store.get_session(&token).is_none());
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let store = SessionStore::new();
        let a = store.create_session(sample_session());
        let b = store.create_session(sample_session());
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_token_yields_none() {
        let store = SessionStore::new();
        assert!(store.get_session("not-a-token").is_none());
    }

    #[test]
    fn logout_cookie_expires_immediately() {
        let cookie = logout_cookie(false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(0)));
    }
}
