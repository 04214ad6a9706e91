use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Sqlite};

use crate::store::{Columns, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TagFields {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: TagFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct TagPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl Columns for TagFields {
    const NAMES: &'static [&'static str] = &["name", "color"];

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.color.clone());
    }
}

impl Resource for Tag {
    const KIND: &'static str = "Tag";
    const TABLE: &'static str = "tags";

    type Fields = TagFields;
    type Patch = TagPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn fields(&self) -> &TagFields {
        &self.fields
    }

    fn merge(&mut self, patch: TagPatch) {
        if let Some(name) = patch.name {
            self.fields.name = name;
        }
        if let Some(color) = patch.color {
            self.fields.color = color;
        }
    }
}
