//! Registration, login, profile, and token verification.

use std::sync::Arc;

use tracing::info;

use docvault_auth::jwt::{AccessToken, JwtDecoder, JwtEncoder};
use docvault_auth::password::{PasswordHasher, PasswordValidator};
use docvault_core::error::AppError;
use docvault_database::repositories::UserRepository;
use docvault_entity::user::{CreateUser, User};

use crate::context::RequestContext;

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 64;
const EMAIL_MAX_LEN: usize = 254;

/// Message for any failed login, so unknown users and bad passwords look alike.
const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Data for a new account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Handles accounts and bearer tokens.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Creates an account and returns it with a fresh token.
    pub async fn register(&self, req: RegisterRequest) -> Result<(User, AccessToken), AppError> {
        let username = validate_username(&req.username)?;
        let email = validate_email(&req.email)?;
        self.validator.validate(&req.password)?;

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        let token = self.encoder.issue(user.id, &user.username)?;
        Ok((user, token))
    }

    /// Verifies credentials and returns the user with a fresh token.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, AccessToken), AppError> {
        let user = self
            .user_repo
            .find_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(username = %user.username, "Login failed");
            return Err(AppError::unauthorized(BAD_CREDENTIALS));
        }

        info!(user_id = %user.id, "User logged in");
        let token = self.encoder.issue(user.id, &user.username)?;
        Ok((user, token))
    }

    /// The caller's own account.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(AppError::user_not_found)
    }

    /// Turns a bearer token into a request context. The token must be valid
    /// and its user must still exist under the same name.
    pub async fn authenticate(&self, token: &str) -> Result<RequestContext, AppError> {
        let claims = self.decoder.decode(token)?;
        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .filter(|user| user.username == claims.username())
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;
        Ok(RequestContext::new(user.id, user.username))
    }
}

fn validate_username(username: &str) -> Result<&str, AppError> {
    let username = username.trim();
    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username.len()) || !valid_chars {
        return Err(AppError::validation(format!(
            "Username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters of letters, digits, '_', '.' or '-'"
        )));
    }
    Ok(username)
}

fn validate_email(email: &str) -> Result<&str, AppError> {
    let email = email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed || email.len() > EMAIL_MAX_LEN {
        return Err(AppError::validation("Email address is invalid"));
    }
    Ok(email)
}
