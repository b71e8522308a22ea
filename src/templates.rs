//! Server-side rendering with Askama, one template struct per page.

use askama::Template;
use axum::response::Html;

use crate::courses::repo::{Course, CourseWithTeacher};
use crate::error::AppError;
use crate::profiles::repo::{Profile, ProfileFields, ProfileWithOwner};
use crate::session::SessionData;

/// Inline success or error banner shown at the top of a page.
#[derive(Debug, Clone)]
pub struct Flash {
    pub kind: &'static str,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "dashboard_student.html")]
pub struct StudentDashboard {
    pub user: SessionData,
    pub courses: Vec<CourseWithTeacher>,
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "dashboard_teacher.html")]
pub struct TeacherDashboard {
    pub user: SessionData,
    pub courses: Vec<Course>,
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub user: SessionData,
    pub course: Course,
    pub form: ProfileFormValues,
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "view_profiles.html")]
pub struct ViewProfilesPage {
    pub user: SessionData,
    pub course: Course,
    pub search: String,
    pub profiles: Vec<ProfileCard>,
    pub flash: Option<Flash>,
}

/// Current values of the profile editor; absent fields render as empty.
#[derive(Debug, Clone, Default)]
pub struct ProfileFormValues {
    pub preferred_name: String,
    pub pronouns: String,
    pub major: String,
    pub goals: String,
    pub fun_fact: String,
    pub learning_needs: String,
}

impl ProfileFormValues {
    pub fn from_fields(fields: ProfileFields) -> Self {
        Self {
            preferred_name: fields.preferred_name,
            pronouns: fields.pronouns,
            major: fields.major,
            goals: fields.goals,
            fun_fact: fields.fun_fact,
            learning_needs: fields.learning_needs,
        }
    }
}

impl From<Profile> for ProfileFormValues {
    fn from(profile: Profile) -> Self {
        Self {
            preferred_name: profile.preferred_name.unwrap_or_default(),
            pronouns: profile.pronouns.unwrap_or_default(),
            major: profile.major.unwrap_or_default(),
            goals: profile.goals.unwrap_or_default(),
            fun_fact: profile.fun_fact.unwrap_or_default(),
            learning_needs: profile.learning_needs.unwrap_or_default(),
        }
    }
}

/// One card in the teacher's profile viewer. Empty fields are not shown.
#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub name: String,
    pub email: String,
    pub preferred_name: String,
    pub pronouns: String,
    pub major: String,
    pub goals: String,
    pub fun_fact: String,
    pub learning_needs: String,
}

impl From<ProfileWithOwner> for ProfileCard {
    fn from(profile: ProfileWithOwner) -> Self {
        Self {
            name: profile.owner_name,
            email: profile.owner_email,
            preferred_name: profile.preferred_name.unwrap_or_default(),
            pronouns: profile.pronouns.unwrap_or_default(),
            major: profile.major.unwrap_or_default(),
            goals: profile.goals.unwrap_or_default(),
            fun_fact: profile.fun_fact.unwrap_or_default(),
            learning_needs: profile.learning_needs.unwrap_or_default(),
        }
    }
}
