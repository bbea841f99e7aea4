use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// a candidate path drawn on the map as a polyline. consecutive duplicate
/// points are permitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    pub path: LineString<f64>,
}

impl Route {
    pub fn new(path: LineString<f64>) -> Self {
        Self { path }
    }

    /// builds a route from `[x, y]` pairs.
    pub fn from_points(points: &[[f64; 2]]) -> Self {
        let coords = points
            .iter()
            .map(|[x, y]| Coord { x: *x, y: *y })
            .collect::<Vec<_>>();
        Self::new(LineString::new(coords))
    }

    pub fn len(&self) -> usize {
        self.path.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.0.is_empty()
    }
}
