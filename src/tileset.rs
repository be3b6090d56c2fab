use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::Path;

use log::debug;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection as _, SqliteConnection};

use crate::errors::{MetaError, MetaResult};

/// Handle to an `.mbtiles` archive on disk.
///
/// Holds the validated path and the file stem; connections are opened per
/// operation. The archive must already exist: this tool patches stores
/// produced by a tile-generation pipeline and never creates them.
#[derive(Clone, Debug)]
pub struct Tileset {
    filepath: String,
    filename: String,
}

impl Display for Tileset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.filepath)
    }
}

impl Tileset {
    pub fn new<P: AsRef<Path>>(filepath: P) -> MetaResult<Self> {
        let path = filepath.as_ref();
        Ok(Self {
            filepath: path
                .to_str()
                .ok_or_else(|| MetaError::UnsupportedCharsInFilepath(path.to_path_buf()))?
                .to_string(),
            filename: path
                .file_stem()
                .unwrap_or_else(|| OsStr::new("unknown"))
                .to_string_lossy()
                .to_string(),
        })
    }

    pub async fn open(&self) -> MetaResult<SqliteConnection> {
        debug!("Opening w/ defaults {self}");
        let opt = SqliteConnectOptions::new().filename(self.filepath());
        Ok(SqliteConnection::connect_with(&opt).await?)
    }

    pub async fn open_readonly(&self) -> MetaResult<SqliteConnection> {
        debug!("Opening as readonly {self}");
        let opt = SqliteConnectOptions::new()
            .filename(self.filepath())
            .read_only(true);
        Ok(SqliteConnection::connect_with(&opt).await?)
    }

    #[must_use]
    pub fn filepath(&self) -> &str {
        &self.filepath
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub async fn open(filepath: &str) -> MetaResult<(SqliteConnection, Tileset)> {
        let ts = Tileset::new(filepath)?;
        ts.open().await.map(|conn| (conn, ts))
    }

    #[test]
    fn tileset_file_names() -> MetaResult<()> {
        let ts = Tileset::new("../fixtures/world_cities.mbtiles")?;
        assert_eq!(ts.filepath(), "../fixtures/world_cities.mbtiles");
        assert_eq!(ts.filename(), "world_cities");
        Ok(())
    }
}
