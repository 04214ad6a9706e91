use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{query_builder::Separated, Sqlite};

use crate::store::{Columns, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Completed,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub difficulty: i64,
    pub priority: i64,
    pub deadline: NaiveDateTime,
    #[serde(default)]
    pub time_spent: Option<i64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: TaskFields,
}

/// Create payload: the task itself plus the projects and tags to link it to.
#[derive(Debug, Deserialize)]
pub struct NewTask {
    #[serde(flatten)]
    pub fields: TaskFields,
    #[serde(default)]
    pub project_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub difficulty: Option<i64>,
    pub priority: Option<i64>,
    pub deadline: Option<NaiveDateTime>,
    /// Absent leaves the stored value alone; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub time_spent: Option<Option<i64>>,
}

/// Wraps whatever is present, `null` included, so a missing key and an
/// explicit `null` stay distinguishable.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Columns for TaskFields {
    const NAMES: &'static [&'static str] = &[
        "name",
        "description",
        "status",
        "difficulty",
        "priority",
        "deadline",
        "time_spent",
    ];

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.description.clone());
        row.push_bind(self.status);
        row.push_bind(self.difficulty);
        row.push_bind(self.priority);
        row.push_bind(self.deadline);
        row.push_bind(self.time_spent);
    }
}

impl Resource for Task {
    const KIND: &'static str = "Task";
    const TABLE: &'static str = "tasks";

    type Fields = TaskFields;
    type Patch = TaskPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn fields(&self) -> &TaskFields {
        &self.fields
    }

    fn merge(&mut self, patch: TaskPatch) {
        let fields = &mut self.fields;
        if let Some(name) = patch.name {
            fields.name = name;
        }
        if let Some(description) = patch.description {
            fields.description = description;
        }
        if let Some(status) = patch.status {
            fields.status = status;
        }
        if let Some(difficulty) = patch.difficulty {
            fields.difficulty = difficulty;
        }
        if let Some(priority) = patch.priority {
            fields.priority = priority;
        }
        if let Some(deadline) = patch.deadline {
            fields.deadline = deadline;
        }
        if let Some(time_spent) = patch.time_spent {
            fields.time_spent = time_spent;
        }
    }
}
