use axum::{
    extract::rejection::JsonRejection,
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing, invalid or expired token")]
    Unauthorized,

    /// The record does not exist or belongs to someone else. The two cases
    /// are answered identically.
    #[error("{0} not found or unauthorized")]
    NotFoundOrUnauthorized(&'static str),

    #[error("token subject no longer exists")]
    PrincipalNotFound,

    #[error("user with this name already exists")]
    DuplicateIdentity,

    #[error("incorrect password or username")]
    InvalidCredentials,

    #[error("{0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),

    #[error("token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Maps a unique-constraint violation to `DuplicateIdentity`, for writes
    /// to the users table.
    pub fn from_user_write(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            AppError::DuplicateIdentity
        } else {
            AppError::Sqlx(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::PrincipalNotFound | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFoundOrUnauthorized(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateIdentity => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Sqlx(e) if is_unique_violation(e) => StatusCode::CONFLICT,
            AppError::Sqlx(_) | AppError::PasswordHash(_) | AppError::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match &self {
            AppError::PrincipalNotFound => {
                tracing::debug!("Token subject no longer resolves to a user");
                AppError::Unauthorized.to_string()
            }
            AppError::Sqlx(e) if status == StatusCode::CONFLICT => {
                tracing::debug!("Unique constraint violated: {}", e);
                "Record already exists".to_string()
            }
            AppError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            AppError::PasswordHash(e) => {
                tracing::error!("Password hashing error: {}", e);
                "Password hashing error".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {}", e);
                "Token error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        let mut response = (status, body).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
