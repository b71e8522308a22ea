use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use tracing::{info, instrument, warn};

use crate::auth::extractors::{CurrentUser, TeacherUser};
use crate::auth::repo::Role;
use crate::courses::dto::{CreateCourseForm, JoinCourseForm};
use crate::courses::enrollment::{self, EnrollOutcome};
use crate::courses::repo::Course;
use crate::error::AppError;
use crate::session::SessionData;
use crate::state::AppState;
use crate::templates::{render, Flash, StudentDashboard, TeacherDashboard};

#[instrument(skip(state, user))]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    render_dashboard(&state, user, None).await
}

#[instrument(skip(state, user, form))]
pub async fn create_course(
    State(state): State<AppState>,
    TeacherUser(user): TeacherUser,
    Form(form): Form<CreateCourseForm>,
) -> Result<Response, AppError> {
    let name = form.course_name.trim();
    let flash = match Course::create(&state.db, user.user_id, name).await? {
        Some(course) => {
            info!(course_id = course.id, teacher_id = user.user_id, "course created");
            Flash::success(format!(
                "Course created successfully! Join code: {}",
                course.join_code
            ))
        }
        None => {
            warn!(teacher_id = user.user_id, "join code space exhausted");
            Flash::error("Failed to create course.")
        }
    };
    render_dashboard(&state, user, Some(flash)).await
}

#[instrument(skip(state, user, form))]
pub async fn join_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<JoinCourseForm>,
) -> Result<Response, AppError> {
    let flash = match Course::find_by_join_code(&state.db, &form.join_code).await? {
        None => Flash::error("Invalid join code."),
        Some(course) => match enrollment::enroll(&state.db, user.user_id, course.id).await? {
            EnrollOutcome::Enrolled => {
                info!(user_id = user.user_id, course_id = course.id, "enrolled");
                Flash::success("Successfully joined course!")
            }
            EnrollOutcome::AlreadyEnrolled => {
                Flash::error("You are already enrolled in this course.")
            }
            EnrollOutcome::CourseNotFound => Flash::error("Invalid join code."),
        },
    };
    render_dashboard(&state, user, Some(flash)).await
}

/// Role-specific dashboard, re-used by the mutating actions to show their
/// inline success or error message.
pub(crate) async fn render_dashboard(
    state: &AppState,
    user: SessionData,
    flash: Option<Flash>,
) -> Result<Response, AppError> {
    match user.role {
        Role::Teacher => {
            let courses = Course::list_for_teacher(&state.db, user.user_id).await?;
            let page = TeacherDashboard {
                user,
                courses,
                flash,
            };
            Ok(render(&page)?.into_response())
        }
        Role::Student => {
            let courses = Course::list_for_student(&state.db, user.user_id).await?;
            let page = StudentDashboard {
                user,
                courses,
                flash,
            };
            Ok(render(&page)?.into_response())
        }
    }
}
