use axum::extract::FromRequest;
use serde::Serialize;

use crate::error::AppError;

pub mod crud;
pub mod projects;
pub mod tasks;
pub mod users;

/// `Json` whose rejection is an `AppError`, so malformed bodies get the same
/// error shape as everything else.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub ok: bool,
}

impl Deleted {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}
