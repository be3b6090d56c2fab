use std::ffi::OsStr;
use std::path::Path;

use serde::Serialize;
use tilejson::{Bounds, Center};

use crate::config::PatchDefaults;
use crate::errors::MetaResult;

/// Computes the `bounds` and `center` metadata values from geographic
/// coordinates, and assembles the full record to merge into an archive.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundsCalculator {
    pub bounds: Bounds,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub center_zoom: u8,
}

impl BoundsCalculator {
    #[must_use]
    pub fn new(bounds: Bounds, min_zoom: u8, max_zoom: u8, center_zoom: u8) -> Self {
        Self {
            bounds,
            min_zoom,
            max_zoom,
            center_zoom,
        }
    }

    /// Midpoint of the bounding box at the configured display zoom.
    #[must_use]
    pub fn center(&self) -> Center {
        Center::new(
            (self.bounds.left + self.bounds.right) / 2.0,
            (self.bounds.bottom + self.bounds.top) / 2.0,
            self.center_zoom,
        )
    }

    /// Build the metadata record for `file`.
    ///
    /// `basename` and `filesize` come from the archive itself, the
    /// descriptive fields from `defaults`, and the zoom/bounds/center
    /// values from this calculator. Unset `name`/`id` defaults fall back
    /// to the archive's file stem.
    pub fn build_record(
        &self,
        defaults: &PatchDefaults,
        file: &Path,
    ) -> MetaResult<MetadataRecord> {
        let stem = file
            .file_stem()
            .unwrap_or_else(|| OsStr::new("unknown"))
            .to_string_lossy()
            .to_string();
        let basename = file
            .file_name()
            .unwrap_or_else(|| OsStr::new("unknown"))
            .to_string_lossy()
            .to_string();
        let filesize = std::fs::metadata(file)?.len();

        Ok(MetadataRecord {
            name: defaults.name.clone().unwrap_or_else(|| stem.clone()),
            id: defaults.id.clone().unwrap_or(stem),
            layer_type: defaults.layer_type.clone(),
            attribution: defaults.attribution.clone(),
            description: defaults.description.clone(),
            version: defaults.version.clone(),
            minzoom: self.min_zoom,
            maxzoom: self.max_zoom,
            bounds: self.bounds,
            center: self.center(),
            basename,
            filesize,
        })
    }
}

/// The well-known metadata values written by
/// [`apply_metadata`](crate::apply_metadata).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetadataRecord {
    pub name: String,
    pub id: String,
    pub layer_type: String,
    pub attribution: String,
    pub description: String,
    pub version: String,
    pub minzoom: u8,
    pub maxzoom: u8,
    pub bounds: Bounds,
    pub center: Center,
    pub basename: String,
    pub filesize: u64,
}

impl MetadataRecord {
    /// Key/value pairs in the vocabulary of the mbtiles metadata table.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("id", self.id.clone()),
            ("type", self.layer_type.clone()),
            ("attribution", self.attribution.clone()),
            ("description", self.description.clone()),
            ("version", self.version.clone()),
            ("minzoom", self.minzoom.to_string()),
            ("maxzoom", self.maxzoom.to_string()),
            ("bounds", self.bounds.to_string()),
            ("center", self.center.to_string()),
            ("basename", self.basename.clone()),
            ("filesize", self.filesize.to_string()),
        ]
    }
}
