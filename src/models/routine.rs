use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Sqlite};

use crate::store::{Columns, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoutineFields {
    pub name: String,
    pub frequency: Frequency,
    pub count: i64,
    pub task_id: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Routine {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: RoutineFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct RoutinePatch {
    pub name: Option<String>,
    pub frequency: Option<Frequency>,
    pub count: Option<i64>,
    pub task_id: Option<i64>,
}

impl Columns for RoutineFields {
    const NAMES: &'static [&'static str] = &["name", "frequency", "count", "task_id"];

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.frequency);
        row.push_bind(self.count);
        row.push_bind(self.task_id);
    }

    fn task_id(&self) -> Option<i64> {
        Some(self.task_id)
    }
}

impl Resource for Routine {
    const KIND: &'static str = "Routine";
    const TABLE: &'static str = "routines";

    type Fields = RoutineFields;
    type Patch = RoutinePatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn fields(&self) -> &RoutineFields {
        &self.fields
    }

    fn merge(&mut self, patch: RoutinePatch) {
        if let Some(name) = patch.name {
            self.fields.name = name;
        }
        if let Some(frequency) = patch.frequency {
            self.fields.frequency = frequency;
        }
        if let Some(count) = patch.count {
            self.fields.count = count;
        }
        if let Some(task_id) = patch.task_id {
            self.fields.task_id = task_id;
        }
    }
}
