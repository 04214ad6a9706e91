use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Sqlite};

use super::task::Task;
use crate::store::{Columns, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: ProjectFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A project as listed, with the tasks linked to it.
#[derive(Debug, Serialize)]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

impl Columns for ProjectFields {
    const NAMES: &'static [&'static str] = &["name", "description"];

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.description.clone());
    }
}

impl Resource for Project {
    const KIND: &'static str = "Project";
    const TABLE: &'static str = "projects";

    type Fields = ProjectFields;
    type Patch = ProjectPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn fields(&self) -> &ProjectFields {
        &self.fields
    }

    fn merge(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.fields.name = name;
        }
        if let Some(description) = patch.description {
            self.fields.description = description;
        }
    }
}
