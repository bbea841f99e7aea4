mod route_selection;
mod selection_state;
mod zone_action;
mod zone_diff;

pub use route_selection::{RouteSelection, RouteStyle, RouteStyling};
pub use selection_state::SelectionState;
pub use zone_action::ZoneAction;
pub use zone_diff::ZoneDiff;
