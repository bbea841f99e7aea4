use std::collections::HashSet;

use geo::{Point, Polygon};
use serde::{Deserialize, Serialize};

use super::ZoneId;

/// a fare zone: a named, polygon-bounded region along with the zones
/// the dataset declares as adjacent to it. immutable once loaded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub neighbours: HashSet<ZoneId>,
    /// label position for the zone
    pub centroid: Point<f64>,
    pub boundary: Polygon<f64>,
}

impl Zone {
    pub fn new(
        id: ZoneId,
        name: String,
        neighbours: HashSet<ZoneId>,
        centroid: Point<f64>,
        boundary: Polygon<f64>,
    ) -> Self {
        Self {
            id,
            name,
            neighbours,
            centroid,
            boundary,
        }
    }
}
