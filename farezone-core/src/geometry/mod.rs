mod hit_tester;
mod route_matcher;
mod viewport;
mod zone_index;

pub use hit_tester::{hit_test, polygon_contains};
pub use route_matcher::{distance_to_polyline, nearest_route, RouteMatch};
pub use viewport::{constrain_to_bounding_region, selection_bounds, zone_labels_hidden};
pub use zone_index::ZoneIndex;
