use std::collections::HashSet;

use crate::model::ZoneId;

/// notifications from a [super::SelectionController]. every method has a
/// default so hosts implement only what they need.
pub trait SelectionObserver {
    /// asked before a tapped route becomes the selected route. returning
    /// false leaves route state unchanged.
    fn should_select_route(&mut self, _index: usize) -> bool {
        true
    }

    /// the selection after a zone tap that was not rejected as invalid.
    fn selected_zones(&mut self, _zones: &HashSet<ZoneId>) {}

    /// a tapped zone was not adjacent to the selection, or removing it would
    /// split the selection.
    fn selection_not_connected(&mut self) {}

    /// a tapped zone could not be added because the selection is full.
    fn selection_limit_reached(&mut self) {}
}
