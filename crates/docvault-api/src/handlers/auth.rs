//! Auth handlers: register, login, profile.

use axum::Json;
use axum::extract::State;

use crate::dto::request::RegisterRequest;
use crate::dto::response::{TokenResponse, UserProfile};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Credentials, ValidatedJson};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (_, token) = state.user_service.register(req.into()).await?;
    Ok(Json(token.into()))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Credentials(req): Credentials,
) -> Result<Json<TokenResponse>, ApiError> {
    let (_, token) = state
        .user_service
        .login(&req.username, &req.password)
        .await?;
    Ok(Json(token.into()))
}

/// GET /auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(user.into()))
}
