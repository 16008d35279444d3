use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CourseChanges, NewCourse},
    repo_types::{Course, CourseWithOwner},
};
use crate::{auth::AuthUser, error::AppError, json::JsonBody, state::AppState};

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// Look up a course by its raw path segment. A segment that is not an id
/// names no course.
async fn find_course(state: &AppState, raw_id: &str) -> Result<Option<Course>, AppError> {
    match raw_id.parse::<i64>() {
        Ok(id) => Ok(Course::find_by_id(&state.db, id).await?),
        Err(_) => Ok(None),
    }
}

#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithOwner>>, AppError> {
    Ok(Json(Course::find_all(&state.db).await?))
}

/// Unknown ids answer 200 with a `null` body.
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<CourseWithOwner>>, AppError> {
    let Ok(id) = id.parse::<i64>() else {
        return Ok(Json(None));
    };
    Ok(Json(Course::find_with_owner(&state.db, id).await?))
}

#[instrument(skip(state, user, payload))]
pub async fn create_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(payload): JsonBody<NewCourse>,
) -> Result<impl IntoResponse, AppError> {
    let course = Course::create(&state.db, user.id, &payload).await?;
    info!(course_id = course.id, user_id = user.id, "course created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/courses/{}", course.id))],
    ))
}

#[instrument(skip(state, user, payload))]
pub async fn update_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<CourseChanges>,
) -> Result<StatusCode, AppError> {
    let course = find_course(&state, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))?;
    course.update(&state.db, &payload).await?;
    info!(course_id = course.id, user_id = user.id, "course updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Deleting an unknown id is a no-op that still answers 204.
#[instrument(skip(state, user))]
pub async fn delete_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Some(course) = find_course(&state, &id).await? {
        course.delete(&state.db).await?;
        info!(course_id = course.id, user_id = user.id, "course deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_numeric_id_names_no_course() {
        let state = AppState::in_memory().await.unwrap();
        assert!(find_course(&state, "abc").await.unwrap().is_none());
        assert!(find_course(&state, "1.5").await.unwrap().is_none());
        assert!(find_course(&state, "1").await.unwrap().is_none());
    }
}
