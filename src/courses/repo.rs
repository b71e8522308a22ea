use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

use crate::courses::join_code::generate_join_code;
use crate::db::is_unique_violation;

/// How many fresh join codes to try before reporting the creation as failed.
const JOIN_CODE_ATTEMPTS: u32 = 4;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub join_code: String,
    pub teacher_id: i64,
    pub created_at: OffsetDateTime,
}

/// A student's course joined with the owning teacher's display name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CourseWithTeacher {
    pub id: i64,
    pub name: String,
    pub join_code: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub created_at: OffsetDateTime,
}

impl Course {
    /// Inserts the course under a freshly generated join code, retrying on a
    /// join-code collision. `Ok(None)` means every attempt collided and the
    /// creation failed.
    pub async fn create(
        db: &SqlitePool,
        teacher_id: i64,
        name: &str,
    ) -> sqlx::Result<Option<Course>> {
        for _ in 0..JOIN_CODE_ATTEMPTS {
            let code = generate_join_code();
            let inserted = sqlx::query_as::<_, Course>(
                r#"
                INSERT INTO courses (name, join_code, teacher_id)
                VALUES (?, ?, ?)
                RETURNING id, name, join_code, teacher_id, created_at
                "#,
            )
            .bind(name)
            .bind(&code)
            .bind(teacher_id)
            .fetch_one(db)
            .await;
            match inserted {
                Ok(course) => return Ok(Some(course)),
                Err(e) if is_unique_violation(&e) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Join codes are matched case-insensitively by normalizing the input.
    pub async fn find_by_join_code(db: &SqlitePool, code: &str) -> sqlx::Result<Option<Course>> {
        let code = code.trim().to_uppercase();
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, name, join_code, teacher_id, created_at
            FROM courses
            WHERE join_code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, course_id: i64) -> sqlx::Result<Option<Course>> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, name, join_code, teacher_id, created_at
            FROM courses
            WHERE id = ?
            "#,
        )
        .bind(course_id)
        .fetch_optional(db)
        .await
    }

    /// Ownership-scoped lookup used by the profile viewer.
    pub async fn find_for_teacher(
        db: &SqlitePool,
        course_id: i64,
        teacher_id: i64,
    ) -> sqlx::Result<Option<Course>> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, name, join_code, teacher_id, created_at
            FROM courses
            WHERE id = ? AND teacher_id = ?
            "#,
        )
        .bind(course_id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_for_teacher(db: &SqlitePool, teacher_id: i64) -> sqlx::Result<Vec<Course>> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, name, join_code, teacher_id, created_at
            FROM courses
            WHERE teacher_id = ?
            ORDER BY id
            "#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await
    }

    /// Courses the student has enrolled in, in enrollment order.
    pub async fn list_for_student(
        db: &SqlitePool,
        user_id: i64,
    ) -> sqlx::Result<Vec<CourseWithTeacher>> {
        sqlx::query_as::<_, CourseWithTeacher>(
            r#"
            SELECT c.id, c.name, c.join_code, c.teacher_id, u.name AS teacher_name, c.created_at
            FROM courses c
            JOIN course_enrollments ce ON c.id = ce.course_id
            JOIN users u ON c.teacher_id = u.id
            WHERE ce.user_id = ?
            ORDER BY ce.id
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}
