use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::User, AppState};

/// The user behind the bearer token of the current request.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = bearer_token(header).ok_or(AppError::Unauthorized)?;
        let user = resolve(state, token).await?;

        Ok(CurrentUser(user))
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

/// Decodes the token and loads the user named by its subject. Nothing is
/// cached: every call reads the current users table.
///
/// The row must also carry the id the token was issued for, so a name that
/// was renamed away or freed by a deleted account does not hand an old token
/// to whoever holds the name now.
pub async fn resolve(state: &AppState, token: &str) -> Result<User, AppError> {
    let claims = state.tokens.decode(token)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = ?")
        .bind(&claims.sub)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::PrincipalNotFound)?;

    if user.id != claims.uid {
        tracing::debug!(user_id = user.id, token_uid = claims.uid, "Token issued to another user");
        return Err(AppError::PrincipalNotFound);
    }

    Ok(user)
}
