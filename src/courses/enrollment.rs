use sqlx::SqlitePool;

use crate::courses::repo::Course;
use crate::db::is_unique_violation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
    CourseNotFound,
}

/// Links a student to a course at most once. The UNIQUE(user_id, course_id)
/// constraint is the serialization point for concurrent joins.
pub async fn enroll(db: &SqlitePool, user_id: i64, course_id: i64) -> sqlx::Result<EnrollOutcome> {
    if Course::find_by_id(db, course_id).await?.is_none() {
        return Ok(EnrollOutcome::CourseNotFound);
    }
    let inserted = sqlx::query(
        r#"
        INSERT INTO course_enrollments (user_id, course_id)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .execute(db)
    .await;
    match inserted {
        Ok(_) => Ok(EnrollOutcome::Enrolled),
        Err(e) if is_unique_violation(&e) => Ok(EnrollOutcome::AlreadyEnrolled),
        Err(e) => Err(e),
    }
}
