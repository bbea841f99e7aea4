use geo::Point;
use serde::{Deserialize, Serialize};

/// a point of interest pinned to the map as part of a journey display.
/// the renderer decides how to draw it; callout timings are in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LocationAnnotation {
    pub coordinate: Point<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub show_callout_delay: Option<f64>,
    #[serde(default)]
    pub show_callout_duration: Option<f64>,
}

impl LocationAnnotation {
    pub fn new(coordinate: Point<f64>) -> Self {
        Self {
            coordinate,
            title: None,
            image_name: None,
            show_callout_delay: None,
            show_callout_duration: None,
        }
    }
}
