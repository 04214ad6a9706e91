//! Create/list/read/update/delete for any owned record kind.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{AppJson, Deleted};
use crate::{
    auth::CurrentUser,
    error::AppError,
    store::{self, Resource},
    AppState,
};

pub async fn create<R: Resource>(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    AppJson(fields): AppJson<R::Fields>,
) -> Result<Json<R>, AppError> {
    let mut tx = state.db.begin().await?;

    store::check_columns(&mut tx, &fields, &user).await?;
    let record = store::insert::<R>(&mut tx, &user, &fields).await?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, kind = R::KIND, id = record.id(), "Record created");
    Ok(Json(record))
}

pub async fn list<R: Resource>(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<R>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let records = store::list_owned::<R>(&mut conn, &user).await?;

    Ok(Json(records))
}

pub async fn read<R: Resource>(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<R>, AppError> {
    let mut conn = state.db.acquire().await?;
    let record = store::fetch_owned::<R>(&mut conn, id, &user).await?;

    Ok(Json(record))
}

pub async fn update<R: Resource>(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(patch): AppJson<R::Patch>,
) -> Result<Json<R>, AppError> {
    let mut tx = state.db.begin().await?;

    let mut record = store::fetch_owned::<R>(&mut tx, id, &user).await?;
    record.merge(patch);
    store::check_columns(&mut tx, record.fields(), &user).await?;
    let record = store::update(&mut tx, &record).await?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, kind = R::KIND, id, "Record updated");
    Ok(Json(record))
}

pub async fn delete<R: Resource>(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, AppError> {
    let mut tx = state.db.begin().await?;

    let record = store::fetch_owned::<R>(&mut tx, id, &user).await?;
    store::delete(&mut tx, &record).await?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, kind = R::KIND, id, "Record deleted");
    Ok(Json(Deleted::ok()))
}
