use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use super::resource::{Columns, Resource};
use crate::error::AppError;
use crate::models::{task::Task, user::User};

/// Ownership guard: a missing record and someone else's record produce the
/// same error.
pub fn ensure_owned<R: Resource>(record: Option<R>, principal: &User) -> Result<R, AppError> {
    match record {
        Some(record) if record.owner_id() == principal.id => Ok(record),
        _ => Err(AppError::NotFoundOrUnauthorized(R::KIND)),
    }
}

pub async fn fetch_owned<R: Resource>(
    conn: &mut SqliteConnection,
    id: i64,
    principal: &User,
) -> Result<R, AppError> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", R::TABLE);
    let record = sqlx::query_as::<_, R>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    ensure_owned(record, principal)
}

pub async fn list_owned<R: Resource>(
    conn: &mut SqliteConnection,
    principal: &User,
) -> Result<Vec<R>, AppError> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ? ORDER BY id",
        R::TABLE,
        R::OWNER_COLUMN
    );
    let records = sqlx::query_as::<_, R>(&sql)
        .bind(principal.id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(records)
}

/// Checks the columns and, if they reference a task, that the task is the
/// principal's.
pub async fn check_columns<C: Columns>(
    conn: &mut SqliteConnection,
    columns: &C,
    principal: &User,
) -> Result<(), AppError> {
    columns.validate()?;

    if let Some(task_id) = columns.task_id() {
        fetch_owned::<Task>(conn, task_id, principal).await?;
    }

    Ok(())
}

pub async fn insert<R: Resource>(
    conn: &mut SqliteConnection,
    principal: &User,
    fields: &R::Fields,
) -> Result<R, AppError> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "INSERT INTO {} ({}, {}) ",
        R::TABLE,
        R::OWNER_COLUMN,
        <R::Fields as Columns>::NAMES.join(", ")
    ));
    builder.push_values(std::iter::once(fields), |mut row, fields| {
        row.push_bind(principal.id);
        fields.push_binds(&mut row);
    });
    builder.push(" RETURNING *");

    let record = builder
        .build_query_as::<R>()
        .fetch_one(&mut *conn)
        .await?;

    Ok(record)
}

/// Writes every mutable column of an already owner-checked record back.
pub async fn update<R: Resource>(conn: &mut SqliteConnection, record: &R) -> Result<R, AppError> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "UPDATE {} SET ({}) = (",
        R::TABLE,
        <R::Fields as Columns>::NAMES.join(", ")
    ));
    {
        let mut row = builder.separated(", ");
        record.fields().push_binds(&mut row);
    }
    builder
        .push(") WHERE id = ")
        .push_bind(record.id())
        .push(format!(" AND {} = ", R::OWNER_COLUMN))
        .push_bind(record.owner_id())
        .push(" RETURNING *");

    let updated = builder
        .build_query_as::<R>()
        .fetch_optional(&mut *conn)
        .await?;

    updated.ok_or(AppError::NotFoundOrUnauthorized(R::KIND))
}

pub async fn delete<R: Resource>(conn: &mut SqliteConnection, record: &R) -> Result<(), AppError> {
    let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
    sqlx::query(&sql)
        .bind(record.id())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tag::{Tag, TagFields};

    fn user(id: i64) -> User {
        User {
            id,
            name: format!("user-{id}"),
            email: format!("user-{id}@example.com"),
            password_hash: String::new(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn tag(owner: i64) -> Tag {
        Tag {
            id: 7,
            user_id: owner,
            fields: TagFields {
                name: "urgent".to_string(),
                color: "red".to_string(),
            },
        }
    }

    #[test]
    fn test_owner_passes_guard() {
        let owned = ensure_owned(Some(tag(1)), &user(1)).unwrap();
        assert_eq!(owned.id, 7);
    }

    #[test]
    fn test_foreign_and_missing_records_look_the_same() {
        let foreign = ensure_owned(Some(tag(1)), &user(2)).unwrap_err();
        let missing = ensure_owned::<Tag>(None, &user(2)).unwrap_err();

        assert_eq!(foreign.to_string(), missing.to_string());
        assert!(matches!(foreign, AppError::NotFoundOrUnauthorized("Tag")));
        assert!(matches!(missing, AppError::NotFoundOrUnauthorized("Tag")));
    }
}
