use serde::{Deserialize, Serialize};

/// result of applying a tap to a zone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZoneAction {
    Selected,
    Deselected,
    /// the zone is not adjacent to the selection, or removing it would
    /// split the selection in two.
    Invalid,
    LimitReached,
}

impl ZoneAction {
    /// true if the action changed the selection.
    pub fn is_applied(&self) -> bool {
        matches!(self, ZoneAction::Selected | ZoneAction::Deselected)
    }
}
