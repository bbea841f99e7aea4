use serde::{Deserialize, Serialize};

/// defines behaviors for a selection engine
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// maximum distance, in map units, between a tap and the route it selects
    pub route_match_threshold: f64,
    /// limit on the number of selected zones, if any
    pub max_selected_zones: Option<usize>,
    /// make zone adjacency symmetric when attaching a dataset
    pub symmetrize_adjacency: bool,
    /// zone labels are hidden when the visible latitude span exceeds this
    pub zone_label_hide_span: f64,
    /// the viewport snaps back to the bounding region when the region fills
    /// less than this share of the visible width or height
    pub bounding_region_min_fill: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            route_match_threshold: 5000.0,
            max_selected_zones: None,
            symmetrize_adjacency: false,
            zone_label_hide_span: 0.55,
            bounding_region_min_fill: 0.8,
        }
    }
}
