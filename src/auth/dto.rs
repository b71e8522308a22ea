use serde::Deserialize;

use crate::auth::repo::Role;

/// Combined login-or-register submission. A non-empty `name` switches a
/// failed login into a registration attempt.
#[derive(Debug, Deserialize)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}
