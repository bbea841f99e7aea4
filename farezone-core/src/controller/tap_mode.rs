use serde::{Deserialize, Serialize};

/// what a tap on the map means.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TapMode {
    /// taps select and deselect zones
    #[default]
    Zone,
    /// taps pick the nearest route
    Route,
}

impl TapMode {
    pub fn from_zone_tap_enabled(zone_tap_enabled: bool) -> Self {
        if zone_tap_enabled {
            TapMode::Zone
        } else {
            TapMode::Route
        }
    }
}
