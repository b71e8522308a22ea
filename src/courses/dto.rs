use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateCourseForm {
    pub course_name: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinCourseForm {
    pub join_code: String,
}
