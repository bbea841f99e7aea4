use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use geo::{Coord, LineString, Point, Polygon};
use geojson::{Feature, GeoJson, Value};

use super::{DatasetError, DatasetSource};
use crate::model::{Route, Zone, ZoneDataset, ZoneId};

/// neighbour zone numbers in the source data are offset from the zone
/// Shortname by this amount.
const NEIGHBOUR_ZONE_OFFSET: i64 = 1000;

/// reads zones (and optionally routes) from a GeoJSON FeatureCollection file.
///
/// Polygon features become zones and must carry the properties `Name`,
/// `Shortname`, `NeighbourZones` and `PolygonCentroid`. LineString features
/// become routes. anything else is skipped with a warning.
#[derive(Debug, Clone)]
pub struct GeoJsonZoneSource {
    path: PathBuf,
}

impl GeoJsonZoneSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DatasetSource for GeoJsonZoneSource {
    fn load_dataset(&self) -> Result<ZoneDataset, DatasetError> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| DatasetError::ReadError(self.path.display().to_string(), e))?;
        let dataset = zone_dataset_from_geojson(&contents)?;
        log::info!(
            "loaded {} zones and {} routes from {}",
            dataset.len(),
            dataset.routes().len(),
            self.path.display()
        );
        Ok(dataset)
    }
}

/// decodes a zone dataset from GeoJSON text. feature order is preserved.
pub fn zone_dataset_from_geojson(contents: &str) -> Result<ZoneDataset, DatasetError> {
    let geojson = contents
        .parse::<GeoJson>()
        .map_err(|e| DatasetError::GeoJsonError(e.to_string()))?;
    let collection = match geojson {
        GeoJson::Geometry(_) => Err(DatasetError::NotAFeatureCollection(String::from(
            "Geometry",
        ))),
        GeoJson::Feature(_) => Err(DatasetError::NotAFeatureCollection(String::from(
            "Feature",
        ))),
        GeoJson::FeatureCollection(fc) => Ok(fc),
    }?;

    let mut zones = vec![];
    let mut routes = vec![];
    for (index, feature) in collection.features.iter().enumerate() {
        match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::Polygon(rings)) => match zone_from_feature(feature, rings) {
                Ok(zone) => zones.push(zone),
                Err(msg) => log::warn!("skipping zone feature {index}: {msg}"),
            },
            Some(Value::LineString(positions)) => {
                let coords = positions_to_coords(positions);
                if coords.len() < 2 {
                    log::warn!("skipping route feature {index}: fewer than 2 positions");
                } else {
                    routes.push(Route::new(LineString::new(coords)));
                }
            }
            Some(_) => log::warn!("skipping feature {index}: unsupported geometry type"),
            None => log::warn!("skipping feature {index}: no geometry"),
        }
    }

    if zones.is_empty() {
        return Err(DatasetError::NoZonesFound);
    }
    Ok(ZoneDataset::new(zones, routes))
}

fn zone_from_feature(feature: &Feature, rings: &[Vec<Vec<f64>>]) -> Result<Zone, String> {
    let exterior = rings
        .first()
        .map(|ring| positions_to_coords(ring))
        .unwrap_or_default();
    if exterior.len() < 3 {
        return Err(String::from("polygon ring has fewer than 3 positions"));
    }

    let name = string_property(feature, "Name")?;
    let id = string_property(feature, "Shortname")?;
    let neighbours = parse_neighbour_zones(string_property(feature, "NeighbourZones")?);
    let centroid = parse_centroid(string_property(feature, "PolygonCentroid")?)?;

    Ok(Zone::new(
        ZoneId::from(id),
        name.to_string(),
        neighbours,
        centroid,
        Polygon::new(LineString::new(exterior), vec![]),
    ))
}

/// positions are `[x, y, ...]`; positions with fewer than two values are dropped.
fn positions_to_coords(positions: &[Vec<f64>]) -> Vec<Coord<f64>> {
    positions
        .iter()
        .filter_map(|p| match p.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect()
}

fn string_property<'a>(feature: &'a Feature, key: &str) -> Result<&'a str, String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing string property '{key}'"))
}

/// comma-delimited zone numbers. tokens that are not integers are ignored.
fn parse_neighbour_zones(value: &str) -> HashSet<ZoneId> {
    value
        .split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .map(|n| ZoneId((n - NEIGHBOUR_ZONE_OFFSET).to_string()))
        .collect()
}

/// "x,y" label position
fn parse_centroid(value: &str) -> Result<Point<f64>, String> {
    let parts = value.split(',').map(|s| s.trim()).collect::<Vec<_>>();
    match parts.as_slice() {
        [x, y, ..] => {
            let x = x
                .parse::<f64>()
                .map_err(|_| format!("invalid centroid x value '{x}'"))?;
            let y = y
                .parse::<f64>()
                .map_err(|_| format!("invalid centroid y value '{y}'"))?;
            Ok(Point::new(x, y))
        }
        _ => Err(format!("expected centroid as 'x,y', found '{value}'")),
    }
}
