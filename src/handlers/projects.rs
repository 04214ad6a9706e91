use axum::{extract::State, Json};

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::project::{Project, ProjectWithTasks},
    store::{self, links},
    AppState,
};

/// Lists the caller's projects with their linked tasks loaded.
pub async fn list(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectWithTasks>>, AppError> {
    let mut conn = state.db.acquire().await?;

    let projects = store::list_owned::<Project>(&mut conn, &user).await?;
    let mut tasks = links::tasks_by_project(&mut conn, &user).await?;

    let projects = projects
        .into_iter()
        .map(|project| ProjectWithTasks {
            tasks: tasks.remove(&project.id).unwrap_or_default(),
            project,
        })
        .collect();

    Ok(Json(projects))
}
