use std::collections::HashSet;

use geo::{BoundingRect, Contains, Intersects, MultiPolygon, Rect};

use crate::model::{ZoneDataset, ZoneId};

/// zone number labels are hidden once the visible latitude span is wider
/// than `hide_above_span`.
pub fn zone_labels_hidden(latitude_span: f64, hide_above_span: f64) -> bool {
    latitude_span > hide_above_span
}

/// keeps the viewport around a bounding region. returns the rect the viewport
/// should snap to, or None if the current viewport is acceptable.
///
/// the viewport snaps back to the bounding region when it has zoomed out so
/// far that the region fills less than `min_fill` of the visible width or
/// height, or when the region has panned completely out of view.
pub fn constrain_to_bounding_region(
    visible: &Rect<f64>,
    bounding: &Rect<f64>,
    min_fill: f64,
) -> Option<Rect<f64>> {
    if visible.contains(bounding) {
        let width_ratio = bounding.width() / visible.width();
        let height_ratio = bounding.height() / visible.height();
        if width_ratio < min_fill || height_ratio < min_fill {
            Some(*bounding)
        } else {
            None
        }
    } else if !visible.intersects(bounding) {
        Some(*bounding)
    } else {
        None
    }
}

/// the rect covering every selected zone's polygon, used to zoom to the selection.
pub fn selection_bounds(dataset: &ZoneDataset, selected: &HashSet<ZoneId>) -> Option<Rect<f64>> {
    let polygons = dataset
        .zones()
        .filter(|z| selected.contains(&z.id))
        .map(|z| z.boundary.clone())
        .collect::<Vec<_>>();
    MultiPolygon::new(polygons).bounding_rect()
}
