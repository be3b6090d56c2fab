use std::path::Path;

use log::{debug, info};
use serde_json::Value as JSONValue;
use size_format::SizeFormatterBinary;
use sqlx::{Connection as _, SqliteExecutor};

use crate::Tileset;
use crate::bounds::MetadataRecord;
use crate::errors::MetaResult;

impl Tileset {
    /// Write `value` under `key` unless a non-empty value is already stored.
    ///
    /// `force` replaces the stored value unconditionally, and the `id` key
    /// is always replaced so the archive identity follows the caller.
    /// Returns whether the value was written.
    pub async fn upsert_metadata_value<T>(
        &self,
        conn: &mut T,
        key: &str,
        value: &str,
        force: bool,
    ) -> MetaResult<bool>
    where
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        if !force && key != "id" {
            if let Some(current) = self.get_metadata_value(&mut *conn, key).await? {
                if !current.is_empty() {
                    debug!("Keeping existing metadata {key}='{current}' in {self}");
                    return Ok(false);
                }
            }
        }
        debug!("Setting metadata {key}='{value}' in {self}");
        self.set_metadata_value(&mut *conn, key, value).await?;
        Ok(true)
    }

    /// Sanitize the `json` descriptor entry in place.
    ///
    /// Strips the `Layer` and `_prefs` fields, which carry tile-generator
    /// internals that must not ship to consumers, and aligns the `maxzoom`
    /// of every `vector_layers` element with the archive's `maxzoom` value.
    pub async fn normalize_json<T>(&self, conn: &mut T) -> MetaResult<()>
    where
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        let Some(raw) = self.get_metadata_value(&mut *conn, "json").await? else {
            return Ok(());
        };
        if raw.is_empty() {
            return Ok(());
        }

        // A descriptor that does not parse is a corrupt archive; abort the
        // run rather than overwrite the entry with guesswork.
        let mut descriptor: JSONValue = serde_json::from_str(&raw)?;

        if let JSONValue::Object(obj) = &mut descriptor {
            if obj.remove("Layer").is_some() {
                debug!("Removed Layer entry from json descriptor in {self}");
            }
            if obj.remove("_prefs").is_some() {
                debug!("Removed _prefs entry from json descriptor in {self}");
            }
            if let Some(JSONValue::Array(layers)) = obj.get_mut("vector_layers") {
                // A missing or garbage maxzoom value skips the sync instead
                // of failing the run.
                let max_zoom = self
                    .get_metadata_value(&mut *conn, "maxzoom")
                    .await?
                    .and_then(|v| v.parse::<u8>().ok())
                    .unwrap_or(0);
                if max_zoom > 0 {
                    for layer in layers.iter_mut() {
                        if let JSONValue::Object(layer) = layer {
                            layer.insert("maxzoom".to_string(), max_zoom.into());
                        }
                    }
                    debug!("Set maxzoom={max_zoom} on all vector_layers entries in {self}");
                }
            }
        }

        self.set_metadata_value(&mut *conn, "json", serde_json::to_string(&descriptor)?)
            .await
    }

    /// Merge `record` into the metadata table, then sanitize the descriptor.
    pub async fn patch_metadata<T>(
        &self,
        conn: &mut T,
        record: &MetadataRecord,
        force: bool,
    ) -> MetaResult<()>
    where
        for<'e> &'e mut T: SqliteExecutor<'e>,
    {
        info!(
            "Writing metadata into {self} ({:.2}B)",
            SizeFormatterBinary::new(record.filesize)
        );

        let mut written = 0;
        for (key, value) in record.entries() {
            if self
                .upsert_metadata_value(&mut *conn, key, &value, force)
                .await?
            {
                written += 1;
            }
        }
        info!("Updated {written} metadata values in {self}");

        self.normalize_json(&mut *conn).await
    }
}

/// Open `file`, merge `record` into its metadata table, sanitize the
/// descriptor, and release the connection.
pub async fn apply_metadata(file: &Path, record: &MetadataRecord, force: bool) -> MetaResult<()> {
    let tileset = Tileset::new(file)?;
    let mut conn = tileset.open().await?;
    tileset.patch_metadata(&mut conn, record, force).await?;
    conn.close().await?;
    Ok(())
}
