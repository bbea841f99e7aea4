use std::collections::HashSet;

use farezone_core::{
    geometry::selection_bounds,
    graph::ZoneGraph,
    model::{ZoneDataset, ZoneId},
    source::{GeoJsonZoneSource, PendingDataset},
};
use geo::{Point, Rect};
use serde::Serialize;

use super::FarezoneCliError;

/// what a loaded zone dataset contains, and whether its adjacency can be trusted.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub zone_count: usize,
    pub route_count: usize,
    /// every zone can reach every other zone through adjacency
    pub connected: bool,
    /// (a, b) where a lists b as a neighbour but b does not list a
    pub asymmetric_pairs: Vec<(ZoneId, ZoneId)>,
    /// neighbour ids that match no zone in the dataset
    pub unknown_neighbours: Vec<(ZoneId, ZoneId)>,
    pub bounds: Option<Rect<f64>>,
    /// zone number label positions in dataset order
    pub labels: Vec<(ZoneId, Point<f64>)>,
}

impl From<&ZoneDataset> for DatasetSummary {
    fn from(dataset: &ZoneDataset) -> Self {
        let graph = ZoneGraph::from(dataset);
        let all = dataset.zones().map(|z| z.id.clone()).collect::<HashSet<_>>();
        let mut unknown_neighbours = dataset
            .zones()
            .flat_map(|z| {
                z.neighbours
                    .iter()
                    .filter(|n| !dataset.contains(n))
                    .map(|n| (z.id.clone(), n.clone()))
            })
            .collect::<Vec<_>>();
        unknown_neighbours.sort();
        DatasetSummary {
            zone_count: dataset.len(),
            route_count: dataset.routes().len(),
            connected: graph.is_connected(&all),
            asymmetric_pairs: graph.asymmetric_pairs(),
            unknown_neighbours,
            bounds: selection_bounds(dataset, &all),
            labels: dataset
                .zone_labels()
                .into_iter()
                .map(|(id, position)| (id.clone(), position))
                .collect(),
        }
    }
}

/// loads the dataset and writes its summary to stdout as JSON.
pub fn run_inspect(dataset_file: &String) -> Result<(), FarezoneCliError> {
    let dataset = PendingDataset::spawn(GeoJsonZoneSource::new(dataset_file)).wait()?;
    let summary = DatasetSummary::from(&dataset);
    if !summary.asymmetric_pairs.is_empty() {
        log::warn!(
            "{} one-way adjacencies found in {dataset_file}",
            summary.asymmetric_pairs.len()
        );
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
