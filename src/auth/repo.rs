use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

/// Account kind, fixed at registration. Plain equality, no hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Default for Role {
    fn default() -> Self {
        Role::Student
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Exact-match lookup; emails are stored and compared case-sensitively.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, role, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &SqlitePool,
        email: &str,
        password_hash: &str,
        name: &str,
        role: Role,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, role)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, password_hash, name, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .fetch_one(db)
        .await
    }
}
