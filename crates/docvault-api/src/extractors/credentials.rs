//! Login credentials, accepted as a form or as JSON.

use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::{Form, Json};

use docvault_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::error::ApiError;

/// Credentials from an `application/x-www-form-urlencoded` or
/// `application/json` body.
#[derive(Debug, Clone)]
pub struct Credentials(pub LoginRequest);

impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        let login = if is_json {
            Json::<LoginRequest>::from_request(req, state)
                .await
                .map(|Json(login)| login)
                .map_err(|rejection| AppError::validation(rejection.body_text()))?
        } else {
            Form::<LoginRequest>::from_request(req, state)
                .await
                .map(|Form(login)| login)
                .map_err(|rejection| AppError::validation(rejection.body_text()))?
        };

        if login.username.trim().is_empty() || login.password.is_empty() {
            return Err(AppError::validation("Username and password are required").into());
        }
        Ok(Self(login))
    }
}
