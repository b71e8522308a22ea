use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::{info, instrument};

use crate::auth::extractors::{CurrentUser, TeacherUser};
use crate::courses::repo::Course;
use crate::error::AppError;
use crate::profiles::dto::{ProfileForm, SearchQuery};
use crate::profiles::repo::Profile;
use crate::state::AppState;
use crate::templates::{render, Flash, ProfileCard, ProfileFormValues, ProfilePage, ViewProfilesPage};

#[instrument(skip(state, user))]
pub async fn profile_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(course_id): Path<i64>,
) -> Result<Response, AppError> {
    let Some(course) = Course::find_by_id(&state.db, course_id).await? else {
        return Ok(Redirect::to("/dashboard").into_response());
    };
    let form = match Profile::find(&state.db, user.user_id, course_id).await? {
        Some(profile) => ProfileFormValues::from(profile),
        None => ProfileFormValues::default(),
    };
    let page = ProfilePage {
        user,
        course,
        form,
        flash: None,
    };
    Ok(render(&page)?.into_response())
}

#[instrument(skip(state, user, form))]
pub async fn save_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(course_id): Path<i64>,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    let Some(course) = Course::find_by_id(&state.db, course_id).await? else {
        return Ok(Redirect::to("/dashboard").into_response());
    };
    let fields = form.into_fields();
    Profile::upsert(&state.db, user.user_id, course_id, &fields).await?;
    info!(user_id = user.user_id, course_id, "profile saved");

    let page = ProfilePage {
        user,
        course,
        form: ProfileFormValues::from_fields(fields),
        flash: Some(Flash::success("Profile saved successfully!")),
    };
    Ok(render(&page)?.into_response())
}

#[instrument(skip(state, user))]
pub async fn view_profiles(
    State(state): State<AppState>,
    TeacherUser(user): TeacherUser,
    Path(course_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let Some(course) = Course::find_for_teacher(&state.db, course_id, user.user_id).await? else {
        return Ok(Redirect::to("/dashboard").into_response());
    };
    let profiles = Profile::search_for_course(&state.db, course_id, &query.search)
        .await?
        .into_iter()
        .map(ProfileCard::from)
        .collect();
    let page = ViewProfilesPage {
        user,
        course,
        search: query.search,
        profiles,
        flash: None,
    };
    Ok(render(&page)?.into_response())
}
