use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub preferred_name: Option<String>,
    pub pronouns: Option<String>,
    pub major: Option<String>,
    pub goals: Option<String>,
    pub fun_fact: Option<String>,
    pub learning_needs: Option<String>,
    pub updated_at: OffsetDateTime,
}

/// A profile joined with its owner's account name and email, as shown to
/// the teacher.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileWithOwner {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub preferred_name: Option<String>,
    pub pronouns: Option<String>,
    pub major: Option<String>,
    pub goals: Option<String>,
    pub fun_fact: Option<String>,
    pub learning_needs: Option<String>,
    pub updated_at: OffsetDateTime,
    pub owner_name: String,
    pub owner_email: String,
}

/// The six free-text fields, already trimmed.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub preferred_name: String,
    pub pronouns: String,
    pub major: String,
    pub goals: String,
    pub fun_fact: String,
    pub learning_needs: String,
}

impl Profile {
    pub async fn find(
        db: &SqlitePool,
        user_id: i64,
        course_id: i64,
    ) -> sqlx::Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, course_id, preferred_name, pronouns, major,
                   goals, fun_fact, learning_needs, updated_at
            FROM student_profiles
            WHERE user_id = ? AND course_id = ?
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(db)
        .await
    }

    /// One conditional write keyed on the (user, course) unique constraint:
    /// race-safe without an application-level existence check.
    pub async fn upsert(
        db: &SqlitePool,
        user_id: i64,
        course_id: i64,
        fields: &ProfileFields,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO student_profiles
                (user_id, course_id, preferred_name, pronouns, major, goals, fun_fact, learning_needs)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, course_id) DO UPDATE SET
                preferred_name = excluded.preferred_name,
                pronouns = excluded.pronouns,
                major = excluded.major,
                goals = excluded.goals,
                fun_fact = excluded.fun_fact,
                learning_needs = excluded.learning_needs,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(&fields.preferred_name)
        .bind(&fields.pronouns)
        .bind(&fields.major)
        .bind(&fields.goals)
        .bind(&fields.fun_fact)
        .bind(&fields.learning_needs)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Profiles of one course whose owner name, owner email, preferred name
    /// or major contains `query` as a case-insensitive substring. The empty
    /// query matches every profile of the course; the course filter is
    /// always applied.
    pub async fn search_for_course(
        db: &SqlitePool,
        course_id: i64,
        query: &str,
    ) -> sqlx::Result<Vec<ProfileWithOwner>> {
        let pattern = format!("%{query}%");
        sqlx::query_as::<_, ProfileWithOwner>(
            r#"
            SELECT sp.id, sp.user_id, sp.course_id, sp.preferred_name, sp.pronouns,
                   sp.major, sp.goals, sp.fun_fact, sp.learning_needs, sp.updated_at,
                   u.name AS owner_name, u.email AS owner_email
            FROM student_profiles sp
            JOIN users u ON sp.user_id = u.id
            WHERE sp.course_id = ? AND (
                u.name LIKE ? OR
                u.email LIKE ? OR
                sp.preferred_name LIKE ? OR
                sp.major LIKE ?
            )
            ORDER BY u.name
            "#,
        )
        .bind(course_id)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::Role;
    use crate::auth::services::register;
    use crate::courses::repo::Course;
    use crate::db::memory_pool;

    async fn course(db: &SqlitePool, teacher_email: &str) -> Course {
        let teacher = register(db, teacher_email, "pw", "Teacher T", Role::Teacher)
            .await
            .expect("register")
            .expect("email free");
        Course::create(db, teacher.id, "CS101")
            .await
            .expect("create")
            .expect("code settles")
    }

    async fn student(db: &SqlitePool, email: &str, name: &str) -> i64 {
        register(db, email, "pw", name, Role::Student)
            .await
            .expect("register")
            .expect("email free")
            .id
    }

    fn fields(major: &str, goals: &str) -> ProfileFields {
        ProfileFields {
            major: major.into(),
            goals: goals.into(),
            ..ProfileFields::default()
        }
    }

    #[tokio::test]
    async fn upsert_keeps_one_row_and_last_write_wins() {
        let db = memory_pool().await;
        let course = course(&db, "t@x.com").await;
        let student_id = student(&db, "s@x.com", "Student S").await;

        Profile::upsert(&db, student_id, course.id, &fields("CS", "grad school"))
            .await
            .expect("first save");
        Profile::upsert(&db, student_id, course.id, &fields("Math", "industry"))
            .await
            .expect("second save");

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM student_profiles WHERE user_id = ? AND course_id = ?",
        )
        .bind(student_id)
        .bind(course.id)
        .fetch_one(&db)
        .await
        .expect("count");
        assert_eq!(count, 1);

        let stored = Profile::find(&db, student_id, course.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.major.as_deref(), Some("Math"));
        assert_eq!(stored.goals.as_deref(), Some("industry"));
    }

    #[tokio::test]
    async fn search_is_scoped_to_the_course() {
        let db = memory_pool().await;
        let course_a = course(&db, "ta@x.com").await;
        let course_b = course(&db, "tb@x.com").await;
        let in_a = student(&db, "a@x.com", "Ann A").await;
        let in_b = student(&db, "b@x.com", "Ben B").await;

        Profile::upsert(&db, in_a, course_a.id, &fields("CS", ""))
            .await
            .expect("save");
        Profile::upsert(&db, in_b, course_b.id, &fields("CS", ""))
            .await
            .expect("save");

        let all_in_a = Profile::search_for_course(&db, course_a.id, "")
            .await
            .expect("search");
        assert_eq!(all_in_a.len(), 1);
        assert_eq!(all_in_a[0].owner_email, "a@x.com");
    }

    #[tokio::test]
    async fn search_matches_case_insensitive_substrings() {
        let db = memory_pool().await;
        let course = course(&db, "t@x.com").await;
        let alice = student(&db, "alice@x.com", "Alice Smith").await;
        let bob = student(&db, "bob@x.com", "Bob Jones").await;

        Profile::upsert(&db, alice, course.id, &fields("Biology", ""))
            .await
            .expect("save");
        Profile::upsert(&db, bob, course.id, &fields("CS", ""))
            .await
            .expect("save");

        let by_name = Profile::search_for_course(&db, course.id, "ALI")
            .await
            .expect("search");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].owner_name, "Alice Smith");

        let by_major = Profile::search_for_course(&db, course.id, "cs")
            .await
            .expect("search");
        assert_eq!(by_major.len(), 1);
        assert_eq!(by_major[0].owner_name, "Bob Jones");

        let by_email = Profile::search_for_course(&db, course.id, "bob@")
            .await
            .expect("search");
        assert_eq!(by_email.len(), 1);

        assert!(Profile::search_for_course(&db, course.id, "zzz")
            .await
            .expect("search")
            .is_empty());
    }

    #[tokio::test]
    async fn search_matches_preferred_name() {
        let db = memory_pool().await;
        let course = course(&db, "t@x.com").await;
        let student_id = student(&db, "s@x.com", "Student S").await;

        let mut f = fields("", "");
        f.preferred_name = "Sam".into();
        Profile::upsert(&db, student_id, course.id, &f)
            .await
            .expect("save");

        let hits = Profile::search_for_course(&db, course.id, "sam")
            .await
            .expect("search");
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn results_are_ordered_by_owner_name() {
        let db = memory_pool().await;
        let course = course(&db, "t@x.com").await;
        let zed = student(&db, "z@x.com", "Zed Z").await;
        let ann = student(&db, "a@x.com", "Ann A").await;

        Profile::upsert(&db, zed, course.id, &fields("CS", ""))
            .await
            .expect("save");
        Profile::upsert(&db, ann, course.id, &fields("CS", ""))
            .await
            .expect("save");

        let names: Vec<String> = Profile::search_for_course(&db, course.id, "")
            .await
            .expect("search")
            .into_iter()
            .map(|p| p.owner_name)
            .collect();
        assert_eq!(names, vec!["Ann A", "Zed Z"]);
    }
}
