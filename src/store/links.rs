use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::error::AppError;
use crate::models::{task::Task, user::User};

#[derive(sqlx::FromRow)]
struct LinkedTask {
    link_project_id: i64,
    #[sqlx(flatten)]
    task: Task,
}

pub async fn link_projects(
    conn: &mut SqliteConnection,
    task_id: i64,
    project_ids: &[i64],
) -> Result<(), AppError> {
    insert_links(conn, "project_task_links", "project_id", task_id, project_ids).await
}

pub async fn link_tags(
    conn: &mut SqliteConnection,
    task_id: i64,
    tag_ids: &[i64],
) -> Result<(), AppError> {
    insert_links(conn, "tag_task_links", "tag_id", task_id, tag_ids).await
}

async fn insert_links(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
    task_id: i64,
    ids: &[i64],
) -> Result<(), AppError> {
    if ids.is_empty() {
        return Ok(());
    }

    let mut builder =
        QueryBuilder::<Sqlite>::new(format!("INSERT OR IGNORE INTO {table} (task_id, {column}) "));
    builder.push_values(ids, |mut row, id| {
        row.push_bind(task_id).push_bind(*id);
    });
    builder.build().execute(&mut *conn).await?;

    Ok(())
}

/// Tasks linked to each of the principal's projects, keyed by project id.
pub async fn tasks_by_project(
    conn: &mut SqliteConnection,
    principal: &User,
) -> Result<HashMap<i64, Vec<Task>>, AppError> {
    let rows = sqlx::query_as::<_, LinkedTask>(
        "SELECT l.project_id AS link_project_id, t.* \
         FROM project_task_links l \
         JOIN projects p ON p.id = l.project_id \
         JOIN tasks t ON t.id = l.task_id \
         WHERE p.user_id = ? \
         ORDER BY t.id",
    )
    .bind(principal.id)
    .fetch_all(&mut *conn)
    .await?;

    let mut grouped: HashMap<i64, Vec<Task>> = HashMap::new();
    for row in rows {
        grouped.entry(row.link_project_id).or_default().push(row.task);
    }

    Ok(grouped)
}
