use std::collections::BTreeSet;

use serde::Serialize;

use super::{RouteStyling, ZoneAction};
use crate::model::ZoneId;

/// the render instructions produced by a selection change.
///
/// a renderer applies `selected` and `deselected` first, then
/// `removed_neighbours`, then `added_neighbours`. `added_neighbours` and
/// `removed_neighbours` are disjoint, and no zone in either neighbour set
/// is selected after the change. `route_styling` is set when the operation
/// also changed how routes are drawn.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneDiff {
    /// the tap action, if this diff came from a tap
    pub action: Option<ZoneAction>,
    pub selected: BTreeSet<ZoneId>,
    pub deselected: BTreeSet<ZoneId>,
    pub added_neighbours: BTreeSet<ZoneId>,
    pub removed_neighbours: BTreeSet<ZoneId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_styling: Option<RouteStyling>,
}

impl ZoneDiff {
    /// an action that left the state unchanged.
    pub fn rejected(action: ZoneAction) -> Self {
        Self {
            action: Some(action),
            ..Default::default()
        }
    }

    /// true if there is nothing for a renderer to do.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
            && self.deselected.is_empty()
            && self.added_neighbours.is_empty()
            && self.removed_neighbours.is_empty()
            && self.route_styling.is_none()
    }
}
