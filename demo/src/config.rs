//! Demo configuration, loaded from an optional JSON file.

use std::ffi::OsStr;
use std::fs;

use serde::{Deserialize, Serialize};
use tilenav_core::Point;
use tilenav_rl::{DEFAULT_VIEW_RADIUS, TerrainConfig};

use crate::DemoError;

/// Environment variable overriding [`DemoConfig::seed`].
pub const SEED_VAR: &str = "TILENAV_SEED";

/// Everything the demo needs to know. Missing JSON fields take their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub terrain: TerrainConfig,
    /// Terrain seed; a random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    pub start: Point,
    pub goal: Point,
    pub viewpoint: Point,
    pub view_radius: i32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            seed: None,
            start: Point::new(1, 1),
            goal: Point::new(8, 8),
            viewpoint: Point::new(2, 2),
            view_radius: DEFAULT_VIEW_RADIUS,
        }
    }
}

impl DemoConfig {
    /// Read the config file at `path` (defaults when `None`), then apply
    /// the `TILENAV_SEED` override.
    pub fn load(path: Option<&OsStr>) -> Result<Self, DemoError> {
        let mut cfg = match path {
            Some(path) => Self::from_json(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        cfg.override_seed(std::env::var(SEED_VAR).ok().as_deref())?;
        Ok(cfg)
    }

    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DemoError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replace the seed with `value` when one is given.
    pub fn override_seed(&mut self, value: Option<&str>) -> Result<(), DemoError> {
        if let Some(v) = value {
            let seed = v.trim().parse().map_err(|_| DemoError::Seed(v.to_owned()))?;
            self.seed = Some(seed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = DemoConfig::from_json(
            r#"{"seed": 77, "goal": {"x": 5, "y": 6}, "terrain": {"max_cost": 2}}"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(77));
        assert_eq!(cfg.goal, Point::new(5, 6));
        assert_eq!(cfg.start, Point::new(1, 1));
        assert_eq!(cfg.terrain.max_cost, 2);
        assert_eq!(cfg.terrain.width, 10);
        assert_eq!(cfg.view_radius, DEFAULT_VIEW_RADIUS);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = DemoConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, DemoError::Config(_)));
    }

    #[test]
    fn seed_override() {
        let mut cfg = DemoConfig::default();
        cfg.override_seed(None).unwrap();
        assert_eq!(cfg.seed, None);
        cfg.override_seed(Some(" 31 ")).unwrap();
        assert_eq!(cfg.seed, Some(31));
        assert!(matches!(
            cfg.override_seed(Some("abc")),
            Err(DemoError::Seed(s)) if s == "abc"
        ));
    }

    #[test]
    fn json_round_trip() {
        let cfg = DemoConfig {
            seed: Some(5),
            ..DemoConfig::default()
        };
        let text = serde_json::to_string(&cfg).unwrap();
        assert_eq!(DemoConfig::from_json(&text).unwrap(), cfg);
    }
}
