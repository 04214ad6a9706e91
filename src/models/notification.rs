use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Sqlite};

use crate::store::{Columns, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationFields {
    pub task_id: i64,
    pub remind_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: NotificationFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationPatch {
    pub task_id: Option<i64>,
    pub remind_at: Option<NaiveDateTime>,
}

impl Columns for NotificationFields {
    const NAMES: &'static [&'static str] = &["task_id", "remind_at"];

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.task_id);
        row.push_bind(self.remind_at);
    }

    fn task_id(&self) -> Option<i64> {
        Some(self.task_id)
    }
}

impl Resource for Notification {
    const KIND: &'static str = "Notification";
    const TABLE: &'static str = "notifications";

    type Fields = NotificationFields;
    type Patch = NotificationPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn fields(&self) -> &NotificationFields {
        &self.fields
    }

    fn merge(&mut self, patch: NotificationPatch) {
        if let Some(task_id) = patch.task_id {
            self.fields.task_id = task_id;
        }
        if let Some(remind_at) = patch.remind_at {
            self.fields.remind_at = remind_at;
        }
    }
}
