use axum::{extract::State, Json};

use super::AppJson;
use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{
        project::Project,
        tag::Tag,
        task::{NewTask, Task},
    },
    store::{self, links},
    AppState,
};

/// Creates a task and its project/tag links in one transaction. Every linked
/// project and tag must belong to the caller.
pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    AppJson(new_task): AppJson<NewTask>,
) -> Result<Json<Task>, AppError> {
    let project_ids = new_task.project_ids.unwrap_or_default();
    let tag_ids = new_task.tag_ids.unwrap_or_default();

    let mut tx = state.db.begin().await?;

    for &project_id in &project_ids {
        store::fetch_owned::<Project>(&mut tx, project_id, &user).await?;
    }
    for &tag_id in &tag_ids {
        store::fetch_owned::<Tag>(&mut tx, tag_id, &user).await?;
    }

    store::check_columns(&mut tx, &new_task.fields, &user).await?;
    let task = store::insert::<Task>(&mut tx, &user, &new_task.fields).await?;
    links::link_projects(&mut tx, task.id, &project_ids).await?;
    links::link_tags(&mut tx, task.id, &tag_ids).await?;

    tx.commit().await?;

    tracing::info!(
        user_id = user.id,
        id = task.id,
        projects = project_ids.len(),
        tags = tag_ids.len(),
        "Task created"
    );
    Ok(Json(task))
}
