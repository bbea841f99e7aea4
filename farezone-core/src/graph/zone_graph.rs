use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use super::bfs_within;
use crate::model::{ZoneDataset, ZoneId};

/// adjacency between fare zones, built once from a loaded dataset.
///
/// adjacency is stored as given. a zone listing another as a neighbour does
/// not imply the reverse; see [ZoneGraph::asymmetric_pairs] and
/// [ZoneGraph::symmetrized].
#[derive(Debug, Clone, Default)]
pub struct ZoneGraph {
    adjacency: HashMap<ZoneId, HashSet<ZoneId>>,
    empty: HashSet<ZoneId>,
}

impl ZoneGraph {
    pub fn new(adjacency: HashMap<ZoneId, HashSet<ZoneId>>) -> Self {
        Self {
            adjacency,
            empty: HashSet::new(),
        }
    }

    /// the stored neighbours of a zone, or the empty set for unknown zones.
    pub fn neighbours(&self, id: &ZoneId) -> &HashSet<ZoneId> {
        self.adjacency.get(id).unwrap_or(&self.empty)
    }

    pub fn contains(&self, id: &ZoneId) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// true if the subset is empty, a singleton, or forms a single connected
    /// component under the adjacency restricted to the subset.
    ///
    /// the search seeds from the smallest zone id, so the answer is
    /// deterministic even when adjacency is asymmetric.
    pub fn is_connected(&self, subset: &HashSet<ZoneId>) -> bool {
        if subset.len() <= 1 {
            return true;
        }
        match subset.iter().min() {
            None => true,
            Some(seed) => bfs_within(seed, self, subset).len() == subset.len(),
        }
    }

    /// every (a, b) where `a` lists `b` as a neighbour but `b` is a known zone
    /// that does not list `a` back. sorted.
    pub fn asymmetric_pairs(&self) -> Vec<(ZoneId, ZoneId)> {
        self.adjacency
            .iter()
            .flat_map(|(src, neighbours)| neighbours.iter().map(move |dst| (src, dst)))
            .filter(|(src, dst)| match self.adjacency.get(*dst) {
                Some(reverse) => !reverse.contains(*src),
                None => false,
            })
            .map(|(src, dst)| (src.clone(), dst.clone()))
            .sorted()
            .collect_vec()
    }

    /// a copy of this graph where every adjacency between two known zones
    /// holds in both directions.
    pub fn symmetrized(&self) -> ZoneGraph {
        let mut adjacency = self.adjacency.clone();
        for (src, dst) in self.asymmetric_pairs() {
            if let Some(reverse) = adjacency.get_mut(&dst) {
                reverse.insert(src);
            }
        }
        ZoneGraph::new(adjacency)
    }
}

impl From<&ZoneDataset> for ZoneGraph {
    fn from(dataset: &ZoneDataset) -> Self {
        let adjacency = dataset
            .zones()
            .map(|z| (z.id.clone(), z.neighbours.clone()))
            .collect::<HashMap<_, _>>();
        ZoneGraph::new(adjacency)
    }
}

#[cfg(test)]
mod tests {
    use super::ZoneGraph;
    use crate::{
        model::{ZoneDataset, ZoneId},
        test_fixtures::{chain_dataset, ids, square_zone},
    };

    #[test]
    fn test_unknown_zone_has_no_neighbours() {
        let graph = ZoneGraph::from(&chain_dataset());
        assert!(graph.neighbours(&ZoneId::from("Z")).is_empty());
        assert_eq!(graph.neighbours(&ZoneId::from("B")), &ids(&["A", "C"]));
    }

    #[test]
    fn test_is_connected() {
        let graph = ZoneGraph::from(&chain_dataset());
        assert!(graph.is_connected(&ids(&[])));
        assert!(graph.is_connected(&ids(&["D"])));
        assert!(graph.is_connected(&ids(&["A", "B", "C"])));
        assert!(graph.is_connected(&ids(&["B", "C", "D"])));
        assert!(!graph.is_connected(&ids(&["A", "C"])));
        assert!(!graph.is_connected(&ids(&["A", "B", "D"])));
    }

    #[test]
    fn test_is_connected_ignores_unknown_members() {
        // an id with no adjacency can never be reached from the rest of the subset
        let graph = ZoneGraph::from(&chain_dataset());
        assert!(!graph.is_connected(&ids(&["A", "B", "Q"])));
    }

    #[test]
    fn test_asymmetric_pairs_and_symmetrized() {
        let dataset = ZoneDataset::new(
            vec![
                square_zone("1", 0.0, 0.0, &["2"]),
                square_zone("2", 1.0, 0.0, &[]),
                square_zone("3", 2.0, 0.0, &["2", "999"]),
            ],
            vec![],
        );
        let graph = ZoneGraph::from(&dataset);
        let pairs = graph.asymmetric_pairs();
        assert_eq!(
            pairs,
            vec![
                (ZoneId::from("1"), ZoneId::from("2")),
                (ZoneId::from("3"), ZoneId::from("2")),
            ]
        );

        // seeding from "1" reaches "2", but nothing leads back out of "2"
        assert!(!graph.is_connected(&ids(&["1", "2", "3"])));

        let symmetric = graph.symmetrized();
        assert!(symmetric.asymmetric_pairs().is_empty());
        assert_eq!(symmetric.neighbours(&ZoneId::from("2")), &ids(&["1", "3"]));
        assert!(symmetric.is_connected(&ids(&["1", "2", "3"])));
        // references to zones outside the dataset are left alone
        assert!(!symmetric.contains(&ZoneId::from("999")));
    }
}
