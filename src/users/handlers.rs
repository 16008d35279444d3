use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::NewUser, repo_types::User};
use crate::{
    auth::{password::hash_password_blocking, AuthUser},
    error::AppError,
    json::JsonBody,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(current_user).post(create_user))
}

/// GET /users: the account the request authenticated as.
#[instrument(skip_all)]
pub async fn current_user(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// POST /users
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let valid = payload.validate()?;
    let digest = hash_password_blocking(valid.password.to_string()).await?;

    let user = User::create(&state.db, &valid, &digest).await?;
    info!(user_id = user.id, "user created");

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
