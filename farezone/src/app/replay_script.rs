use std::collections::HashSet;

use farezone_core::model::{LocationAnnotation, Route, ZoneId};
use geo::Point;
use serde::{Deserialize, Serialize};

use super::FarezoneCliError;

/// one host event in a recorded selection session. coordinates are `[x, y]`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    /// a map tap, routed by the current tap mode
    Tap { at: [f64; 2] },
    TapZone { at: [f64; 2] },
    TapRoute { at: [f64; 2] },
    SetMode { zone_tap_enabled: bool },
    SetCapacity {
        #[serde(default)]
        capacity: Option<usize>,
    },
    SetNeighbourHighlight { enabled: bool },
    Clear,
    HighlightOnly { zones: Vec<ZoneId> },
    HighlightOnlyRoutes {
        #[serde(default)]
        routes: Option<Vec<Vec<[f64; 2]>>>,
    },
    Seed {
        #[serde(default)]
        zones: Option<Vec<ZoneId>>,
        #[serde(default)]
        locations: Option<Vec<[f64; 2]>>,
        #[serde(default)]
        route: Option<Vec<[f64; 2]>>,
    },
    SelectRoute { index: usize },
}

impl ReplayStep {
    pub fn point(at: &[f64; 2]) -> Point<f64> {
        Point::new(at[0], at[1])
    }

    pub fn zone_set(zones: &[ZoneId]) -> HashSet<ZoneId> {
        zones.iter().cloned().collect()
    }

    pub fn routes(paths: &[Vec<[f64; 2]>]) -> Vec<Route> {
        paths.iter().map(|p| Route::from_points(p)).collect()
    }

    pub fn locations(points: &[[f64; 2]]) -> Vec<LocationAnnotation> {
        points
            .iter()
            .map(|p| LocationAnnotation::new(Self::point(p)))
            .collect()
    }
}

/// a session script, stored as a JSON array of steps.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ReplayScript {
    pub steps: Vec<ReplayStep>,
}

impl TryFrom<&String> for ReplayScript {
    type Error = FarezoneCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(f)
            .map_err(|e| FarezoneCliError::ReplayScriptError(format!("failure reading {f}: {e}")))?;
        serde_json::from_str(&s)
            .map_err(|e| FarezoneCliError::ReplayScriptError(format!("failure decoding {f}: {e}")))
    }
}
