use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum MetaError {
    #[error(transparent)]
    SqlxError(#[from] sqlx::Error),

    #[error(transparent)]
    JsonSerdeError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("MBTiles filepath contains unsupported characters: {}", .0.display())]
    UnsupportedCharsInFilepath(PathBuf),

    #[error("Invalid {0} value: '{1}' is not a valid zoom level")]
    InvalidZoomValue(&'static str, String),

    #[error("Invalid bounds value '{0}': {1}")]
    InvalidBoundsValue(String, String),
}

pub type MetaResult<T> = Result<T, MetaError>;
