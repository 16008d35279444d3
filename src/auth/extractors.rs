use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::guard::{authenticate, GuardError};
use crate::error::AppError;
use crate::state::AppState;
use crate::users::repo_types::User;

/// The account that passed Basic authentication for this request.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(&state.db, &parts.headers).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(GuardError::Rejected(_)) => Err(AppError::Unauthorized),
            Err(GuardError::Lookup(e)) => Err(AppError::Internal(e)),
        }
    }
}
