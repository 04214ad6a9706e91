use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Sqlite};

use crate::error::AppError;
use crate::store::{Columns, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimeLogFields {
    pub task_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TimeLog {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: TimeLogFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeLogPatch {
    pub task_id: Option<i64>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

impl Columns for TimeLogFields {
    const NAMES: &'static [&'static str] = &["task_id", "start_time", "end_time"];

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.task_id);
        row.push_bind(self.start_time);
        row.push_bind(self.end_time);
    }

    fn task_id(&self) -> Option<i64> {
        Some(self.task_id)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.end_time < self.start_time {
            return Err(AppError::BadRequest(
                "end_time must not be earlier than start_time".to_string(),
            ));
        }
        Ok(())
    }
}

impl Resource for TimeLog {
    const KIND: &'static str = "TimeLog";
    const TABLE: &'static str = "time_logs";

    type Fields = TimeLogFields;
    type Patch = TimeLogPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn fields(&self) -> &TimeLogFields {
        &self.fields
    }

    fn merge(&mut self, patch: TimeLogPatch) {
        if let Some(task_id) = patch.task_id {
            self.fields.task_id = task_id;
        }
        if let Some(start_time) = patch.start_time {
            self.fields.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.fields.end_time = end_time;
        }
    }
}
