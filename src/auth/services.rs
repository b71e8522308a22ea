use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::warn;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{Role, User};
use crate::db::is_unique_violation;
use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Hashes the password and inserts the user. `Ok(None)` means the email is
/// already taken; the raw password is never persisted.
pub async fn register(
    db: &SqlitePool,
    email: &str,
    password: &str,
    name: &str,
    role: Role,
) -> Result<Option<User>, AppError> {
    let hash = hash_password(password)?;
    match User::create(db, email, &hash, name, role).await {
        Ok(user) => Ok(Some(user)),
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "registration with already-used email");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// `Ok(None)` covers both an unknown email and a wrong password, so a
/// caller cannot probe which emails are registered.
pub async fn authenticate(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = User::find_by_email(db, email).await? else {
        return Ok(None);
    };
    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn register_then_authenticate() {
        let db = memory_pool().await;
        let user = register(&db, "t@x.com", "pw", "Teacher T", Role::Teacher)
            .await
            .expect("register")
            .expect("email free");
        assert_eq!(user.role, Role::Teacher);
        assert_ne!(user.password_hash, "pw");

        let authed = authenticate(&db, "t@x.com", "pw")
            .await
            .expect("authenticate")
            .expect("correct password accepted");
        assert_eq!(authed.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_and_first_record_kept() {
        let db = memory_pool().await;
        let first = register(&db, "s@x.com", "pw", "First", Role::Student)
            .await
            .expect("register")
            .expect("email free");

        let second = register(&db, "s@x.com", "other", "Second", Role::Teacher)
            .await
            .expect("no fatal error");
        assert!(second.is_none());

        let stored = User::find_by_email(&db, "s@x.com")
            .await
            .expect("lookup")
            .expect("still present");
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.name, "First");
        assert_eq!(stored.role, Role::Student);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_alike() {
        let db = memory_pool().await;
        register(&db, "s@x.com", "pw2", "Student S", Role::Student)
            .await
            .expect("register")
            .expect("email free");

        let wrong_password = authenticate(&db, "s@x.com", "nope").await.expect("no error");
        let unknown_email = authenticate(&db, "ghost@x.com", "pw2")
            .await
            .expect("no error");
        assert!(wrong_password.is_none());
        assert!(unknown_email.is_none());
    }

    #[tokio::test]
    async fn email_comparison_is_case_sensitive() {
        let db = memory_pool().await;
        register(&db, "Case@x.com", "pw", "Cased", Role::Student)
            .await
            .expect("register")
            .expect("email free");

        assert!(authenticate(&db, "case@x.com", "pw")
            .await
            .expect("no error")
            .is_none());
        assert!(authenticate(&db, "Case@x.com", "pw")
            .await
            .expect("no error")
            .is_some());
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@c.d"));
    }
}
