use axum::{extract::State, Json};

use super::{require_non_empty, AppJson, Deleted};
use crate::{
    auth::{password, CurrentUser},
    error::AppError,
    models::user::{AuthResponse, CreateUser, LoginPayload, UpdateUser, User},
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUser>,
) -> Result<Json<User>, AppError> {
    require_non_empty("name", &payload.name)?;
    require_non_empty("password", &payload.password)?;

    let password_hash = password::hash_password(&payload.password)?;

    let mut tx = state.db.begin().await?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::from_user_write)?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(Json(user))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = ?")
        .bind(&payload.name)
        .fetch_optional(&state.db)
        .await?;

    let Some(user) = user else {
        password::verify_against_dummy(&payload.password);
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.name, user.id)?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(AuthResponse::bearer(token)))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Partial update of the caller's own account. A new password is re-hashed
/// before it is stored.
pub async fn update_me(
    CurrentUser(mut user): CurrentUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateUser>,
) -> Result<Json<User>, AppError> {
    if let Some(name) = payload.name {
        require_non_empty("name", &name)?;
        user.name = name;
    }
    if let Some(email) = payload.email {
        user.email = email;
    }
    if let Some(new_password) = payload.password {
        require_non_empty("password", &new_password)?;
        user.password_hash = password::hash_password(&new_password)?;
    }

    let mut tx = state.db.begin().await?;

    let updated = sqlx::query_as::<_, User>(
        "UPDATE users SET name = ?, email = ?, password_hash = ? WHERE id = ? RETURNING *",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(AppError::from_user_write)?
    .ok_or(AppError::PrincipalNotFound)?;

    tx.commit().await?;

    tracing::info!(user_id = updated.id, "User updated");
    Ok(Json(updated))
}

pub async fn delete_me(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Deleted>, AppError> {
    let mut tx = state.db.begin().await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, "User deleted");
    Ok(Json(Deleted::ok()))
}
