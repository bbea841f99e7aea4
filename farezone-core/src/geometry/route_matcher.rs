use geo::{Coord, LineString, Point};
use serde::Serialize;

/// the route nearest to a query point.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RouteMatch {
    pub index: usize,
    pub distance: f64,
}

/// planar distance from a point to the nearest location on a polyline.
///
/// zero-length segments are skipped, so a polyline made only of repeated
/// points (or fewer than two points) has no distance and returns None.
pub fn distance_to_polyline(point: &Point<f64>, polyline: &LineString<f64>) -> Option<f64> {
    let p = point.0;
    polyline
        .0
        .windows(2)
        .filter_map(|pair| segment_distance(p, pair[0], pair[1]))
        .min_by(f64::total_cmp)
}

/// finds the polyline closest to the query point. returns None unless that
/// polyline lies within `threshold`. on equal distance the lower index wins.
pub fn nearest_route<'a, I>(point: &Point<f64>, polylines: I, threshold: f64) -> Option<RouteMatch>
where
    I: IntoIterator<Item = &'a LineString<f64>>,
{
    let mut nearest: Option<RouteMatch> = None;
    for (index, polyline) in polylines.into_iter().enumerate() {
        let Some(distance) = distance_to_polyline(point, polyline) else {
            continue;
        };
        let closer = match &nearest {
            None => true,
            Some(best) => distance < best.distance,
        };
        if closer {
            nearest = Some(RouteMatch { index, distance });
        }
    }
    nearest.filter(|m| m.distance <= threshold)
}

/// projects p onto the line through a and b, clamps the projection onto the
/// segment, and returns the distance to that closest point.
fn segment_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> Option<f64> {
    let delta = b - a;
    let length_sq = delta.x * delta.x + delta.y * delta.y;
    if length_sq == 0.0 {
        return None;
    }
    let t = ((p.x - a.x) * delta.x + (p.y - a.y) * delta.y) / length_sq;
    let closest = a + delta * t.clamp(0.0, 1.0);
    Some((p.x - closest.x).hypot(p.y - closest.y))
}
