use std::collections::BTreeMap;

use futures::TryStreamExt as _;
use sqlx::{Row as _, SqliteExecutor, query};

use crate::Tileset;
use crate::errors::{MetaError, MetaResult};

impl Tileset {
    /// Get a single metadata value from the metadata table
    pub async fn get_metadata_value<T>(&self, conn: &mut T, key: &str) -> MetaResult<Option<String>>
    where
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        let row = query("SELECT value FROM metadata WHERE name = ?")
            .bind(key)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.and_then(|r| r.get::<Option<String>, _>(0)))
    }

    /// Read a `minzoom`/`maxzoom` style metadata value as a zoom level.
    pub async fn get_metadata_zoom_value<T>(
        &self,
        conn: &mut T,
        zoom_name: &'static str,
    ) -> MetaResult<Option<u8>>
    where
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        self.get_metadata_value(conn, zoom_name)
            .await?
            .map(|v| v.parse().map_err(|_| MetaError::InvalidZoomValue(zoom_name, v)))
            .transpose()
    }

    pub async fn set_metadata_value<T, S>(&self, conn: &mut T, key: &str, value: S) -> MetaResult<()>
    where
        S: ToString,
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        query("INSERT OR REPLACE INTO metadata(name, value) VALUES(?, ?)")
            .bind(key)
            .bind(value.to_string())
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn delete_metadata_value<T>(&self, conn: &mut T, key: &str) -> MetaResult<()>
    where
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        query("DELETE FROM metadata WHERE name=?")
            .bind(key)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// All non-empty metadata values, keyed by name.
    pub async fn read_all_metadata<T>(&self, conn: &mut T) -> MetaResult<BTreeMap<String, String>>
    where
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        let mut rows = query("SELECT name, value FROM metadata WHERE value IS NOT ''").fetch(&mut *conn);

        let mut result = BTreeMap::new();
        while let Some(row) = rows.try_next().await? {
            let name: Option<String> = row.get(0);
            let value: Option<String> = row.get(1);
            if let (Some(name), Some(value)) = (name, value) {
                result.insert(name, value);
            }
        }
        Ok(result)
    }
}
