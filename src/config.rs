use std::str::FromStr as _;

use tilejson::Bounds;

use crate::env::Env;
use crate::errors::{MetaError, MetaResult};

/// Default bounding box, the whole world clipped to web-mercator latitudes.
pub const DEFAULT_BBOX: &str = "-180.0,-85.0511,180.0,85.0511";

const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_LAYER_TYPE: &str = "baselayer";
const DEFAULT_MIN_ZOOM: u8 = 0;
const DEFAULT_MAX_ZOOM: u8 = 14;
const DEFAULT_CENTER_ZOOM: u8 = 5;

/// Metadata defaults sourced from the process environment.
///
/// Read once at startup and passed explicitly to the record builder, so the
/// rest of the crate never touches ambient environment state.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchDefaults {
    /// Tileset name, falls back to the archive file stem when unset.
    pub name: Option<String>,
    /// Tileset identifier, falls back to the archive file stem when unset.
    pub id: Option<String>,
    pub version: String,
    pub attribution: String,
    pub description: String,
    /// Value for the `type` metadata key, `overlay` or `baselayer`.
    pub layer_type: String,
    pub bbox: Bounds,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub center_zoom: u8,
}

impl PatchDefaults {
    /// Read `NAME`, `ID`, `VERSION`, `ATTRIBUTION`, `DESCRIPTION`, `TYPE`,
    /// `BBOX`, `MIN_ZOOM`, `MAX_ZOOM` and `CENTER_ZOOM` from `env`.
    pub fn from_env(env: &impl Env) -> MetaResult<Self> {
        Ok(Self {
            name: env.get_env_str("NAME"),
            id: env.get_env_str("ID"),
            version: env
                .get_env_str("VERSION")
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            attribution: env.get_env_str("ATTRIBUTION").unwrap_or_default(),
            description: env.get_env_str("DESCRIPTION").unwrap_or_default(),
            layer_type: env
                .get_env_str("TYPE")
                .unwrap_or_else(|| DEFAULT_LAYER_TYPE.to_string()),
            bbox: parse_bounds(env.get_env_str("BBOX").as_deref().unwrap_or(DEFAULT_BBOX))?,
            min_zoom: parse_zoom(env, "MIN_ZOOM", DEFAULT_MIN_ZOOM)?,
            max_zoom: parse_zoom(env, "MAX_ZOOM", DEFAULT_MAX_ZOOM)?,
            center_zoom: parse_zoom(env, "CENTER_ZOOM", DEFAULT_CENTER_ZOOM)?,
        })
    }
}

fn parse_bounds(value: &str) -> MetaResult<Bounds> {
    Bounds::from_str(value)
        .map_err(|e| MetaError::InvalidBoundsValue(value.to_string(), e.to_string()))
}

fn parse_zoom(env: &impl Env, key: &'static str, default: u8) -> MetaResult<u8> {
    match env.get_env_str(key) {
        Some(v) => v.parse().map_err(|_| MetaError::InvalidZoomValue(key, v)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::env::FauxEnv;

    fn env_of(vars: &[(&'static str, &str)]) -> FauxEnv {
        FauxEnv(
            vars.iter()
                .map(|(k, v)| (*k, OsString::from(v)))
                .collect(),
        )
    }

    #[test]
    fn defaults_from_empty_env() {
        let defaults = PatchDefaults::from_env(&FauxEnv::default()).unwrap();
        assert_eq!(
            defaults,
            PatchDefaults {
                name: None,
                id: None,
                version: "1.0.0".to_string(),
                attribution: String::new(),
                description: String::new(),
                layer_type: "baselayer".to_string(),
                bbox: Bounds::new(-180.0, -85.0511, 180.0, 85.0511),
                min_zoom: 0,
                max_zoom: 14,
                center_zoom: 5,
            }
        );
    }

    #[test]
    fn overridden_env() {
        let env = env_of(&[
            ("NAME", "World Tiles"),
            ("ID", "world"),
            ("VERSION", "3.14"),
            ("ATTRIBUTION", "© Test"),
            ("DESCRIPTION", "Test tileset"),
            ("TYPE", "overlay"),
            ("BBOX", "-10.0,-20.0,10.0,20.0"),
            ("MIN_ZOOM", "2"),
            ("MAX_ZOOM", "9"),
            ("CENTER_ZOOM", "4"),
        ]);
        let defaults = PatchDefaults::from_env(&env).unwrap();
        assert_eq!(defaults.name.as_deref(), Some("World Tiles"));
        assert_eq!(defaults.id.as_deref(), Some("world"));
        assert_eq!(defaults.version, "3.14");
        assert_eq!(defaults.attribution, "© Test");
        assert_eq!(defaults.description, "Test tileset");
        assert_eq!(defaults.layer_type, "overlay");
        assert_eq!(defaults.bbox, Bounds::new(-10.0, -20.0, 10.0, 20.0));
        assert_eq!(
            (defaults.min_zoom, defaults.max_zoom, defaults.center_zoom),
            (2, 9, 4)
        );
    }

    #[test]
    fn malformed_bbox_is_an_error() {
        let env = env_of(&[("BBOX", "-10.0,-20.0,10.0")]);
        let err = PatchDefaults::from_env(&env).unwrap_err();
        assert!(matches!(err, MetaError::InvalidBoundsValue(v, _) if v == "-10.0,-20.0,10.0"));
    }

    #[test]
    fn malformed_zoom_is_an_error() {
        let env = env_of(&[("MAX_ZOOM", "fourteen")]);
        let err = PatchDefaults::from_env(&env).unwrap_err();
        assert!(matches!(
            err,
            MetaError::InvalidZoomValue("MAX_ZOOM", v) if v == "fourteen"
        ));
    }
}
