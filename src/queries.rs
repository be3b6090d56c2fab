use log::debug;
use sqlx::{Executor as _, SqliteExecutor};

use crate::errors::MetaResult;

/// Create the metadata table of an empty archive.
///
/// The patcher itself never creates the table; this is a bootstrap helper
/// for tests and tooling that assemble archives in place.
pub async fn create_metadata_table<T>(conn: &mut T) -> MetaResult<()>
where
    for<'e> &'e mut T: SqliteExecutor<'e>,
{
    debug!("Creating metadata table if it doesn't already exist");
    conn.execute(
        "CREATE TABLE IF NOT EXISTS metadata (
             name text NOT NULL PRIMARY KEY,
             value text);",
    )
    .await?;

    Ok(())
}
