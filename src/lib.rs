mod bounds;
mod config;
mod env;
mod errors;
mod metadata;
mod patcher;
mod queries;
mod tileset;

pub use bounds::{BoundsCalculator, MetadataRecord};
pub use config::{DEFAULT_BBOX, PatchDefaults};
pub use env::{Env, FauxEnv, OsEnv};
pub use errors::{MetaError, MetaResult};
pub use patcher::apply_metadata;
pub use queries::create_metadata_table;
pub use tileset::Tileset;

/// Re-export of the `sqlx` version used by this crate.
pub use sqlx;
