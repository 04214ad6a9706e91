use serde::{de::DeserializeOwned, Serialize};
use sqlx::{query_builder::Separated, sqlite::SqliteRow, FromRow, Sqlite};

use crate::error::AppError;

/// The caller-writable columns of a record kind.
///
/// `push_binds` must bind one value per entry of `NAMES`, in the same order;
/// inserts and updates are both built from that pairing.
pub trait Columns {
    const NAMES: &'static [&'static str];

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>);

    /// Task this row points at, if the kind has a task reference. Writes
    /// check that the task belongs to the writer.
    fn task_id(&self) -> Option<i64> {
        None
    }

    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// A record kind owned by a single user.
pub trait Resource:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Name used in "not found or unauthorized" answers.
    const KIND: &'static str;
    const TABLE: &'static str;
    const OWNER_COLUMN: &'static str = "user_id";

    type Fields: Columns + DeserializeOwned + Send + Sync + 'static;
    /// Partial update: `None` leaves the stored value untouched.
    type Patch: DeserializeOwned + Send + 'static;

    fn id(&self) -> i64;
    fn owner_id(&self) -> i64;
    fn fields(&self) -> &Self::Fields;
    fn merge(&mut self, patch: Self::Patch);
}
