use geo::{Coord, LineString, Point, Polygon};

/// ray-casting (even-odd) containment test over the polygon's exterior ring
/// and any interior rings.
///
/// a point exactly on an edge is resolved by the half-open crossing rule:
/// points on a left or bottom edge count as inside, points on a right or top
/// edge count as outside. the result for a given point and polygon never changes.
pub fn polygon_contains(polygon: &Polygon<f64>, point: &Point<f64>) -> bool {
    let p = point.0;
    let mut inside = ring_crossings_odd(polygon.exterior(), p);
    for interior in polygon.interiors() {
        if ring_crossings_odd(interior, p) {
            inside = !inside;
        }
    }
    inside
}

/// resolves a point to the first candidate whose polygon contains it. candidates
/// are tested in the order given and the search stops at the first match.
pub fn hit_test<'a, K, I>(point: &Point<f64>, candidates: I) -> Option<K>
where
    I: IntoIterator<Item = (K, &'a Polygon<f64>)>,
{
    candidates
        .into_iter()
        .find(|(_, polygon)| polygon_contains(polygon, point))
        .map(|(key, _)| key)
}

fn ring_crossings_odd(ring: &LineString<f64>, p: Coord<f64>) -> bool {
    let coords = &ring.0;
    if coords.len() < 3 {
        return false;
    }
    let mut odd = false;
    let mut prev = coords[coords.len() - 1];
    for &curr in coords.iter() {
        let straddles = (curr.y > p.y) != (prev.y > p.y);
        if straddles {
            let x_cross = (prev.x - curr.x) * (p.y - curr.y) / (prev.y - curr.y) + curr.x;
            if p.x < x_cross {
                odd = !odd;
            }
        }
        prev = curr;
    }
    odd
}
