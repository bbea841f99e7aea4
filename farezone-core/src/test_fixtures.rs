use std::collections::HashSet;

use geo::{polygon, Point};

use crate::model::{Route, Zone, ZoneDataset, ZoneId};

/// a unit square zone with its lower-left corner at (x, y)
pub fn square_zone(id: &str, x: f64, y: f64, neighbours: &[&str]) -> Zone {
    let boundary = polygon![
        (x: x, y: y),
        (x: x + 1.0, y: y),
        (x: x + 1.0, y: y + 1.0),
        (x: x, y: y + 1.0),
    ];
    Zone::new(
        ZoneId::from(id),
        format!("zone {id}"),
        neighbours.iter().map(|n| ZoneId::from(*n)).collect::<HashSet<_>>(),
        Point::new(x + 0.5, y + 0.5),
        boundary,
    )
}

/// four zones in a row A-B-C-D, each adjacent only to its neighbours in the row
pub fn chain_dataset() -> ZoneDataset {
    let zones = vec![
        square_zone("A", 0.0, 0.0, &["B"]),
        square_zone("B", 1.0, 0.0, &["A", "C"]),
        square_zone("C", 2.0, 0.0, &["B", "D"]),
        square_zone("D", 3.0, 0.0, &["C"]),
    ];
    let routes = vec![
        Route::from_points(&[[0.0, 0.0], [10.0, 0.0]]),
        Route::from_points(&[[0.0, 10.0], [10.0, 10.0]]),
    ];
    ZoneDataset::new(zones, routes)
}

/// the centre of the unit square for a zone in [chain_dataset]
pub fn chain_point(id: &str) -> Point<f64> {
    let x = match id {
        "A" => 0.5,
        "B" => 1.5,
        "C" => 2.5,
        _ => 3.5,
    };
    Point::new(x, 0.5)
}

pub fn ids(values: &[&str]) -> HashSet<ZoneId> {
    values.iter().map(|v| ZoneId::from(*v)).collect()
}
