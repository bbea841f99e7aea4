use geo::Point;
use indexmap::{map::Entry, IndexMap};

use super::{Route, Zone, ZoneId};

/// the immutable zone and route dataset an engine attaches to.
///
/// zones keep the order they were delivered in; that order is the
/// hit-testing order, so the first zone containing a point wins.
#[derive(Debug, Clone, Default)]
pub struct ZoneDataset {
    zones: IndexMap<ZoneId, Zone>,
    routes: Vec<Route>,
}

impl ZoneDataset {
    /// builds a dataset from zones in delivery order. the first record for a
    /// zone id is kept; later records with the same id are dropped.
    pub fn new(zones: Vec<Zone>, routes: Vec<Route>) -> Self {
        let mut lookup: IndexMap<ZoneId, Zone> = IndexMap::with_capacity(zones.len());
        for (index, zone) in zones.into_iter().enumerate() {
            match lookup.entry(zone.id.clone()) {
                Entry::Occupied(kept) => log::warn!(
                    "dropping zone record {index} ('{}'), zone '{}' was already loaded as '{}'",
                    zone.name,
                    zone.id,
                    kept.get().name
                ),
                Entry::Vacant(slot) => {
                    slot.insert(zone);
                }
            }
        }
        Self {
            zones: lookup,
            routes,
        }
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.get(id)
    }

    pub fn zone_at(&self, index: usize) -> Option<&Zone> {
        self.zones.get_index(index).map(|(_, z)| z)
    }

    /// zones in delivery order
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn contains(&self, id: &ZoneId) -> bool {
        self.zones.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// (zone id, label position) pairs for drawing zone number labels.
    pub fn zone_labels(&self) -> Vec<(&ZoneId, Point<f64>)> {
        self.zones.values().map(|z| (&z.id, z.centroid)).collect()
    }
}
