use std::collections::{HashSet, VecDeque};

use itertools::Itertools;

use super::ZoneGraph;
use crate::model::ZoneId;

/// finds the set of zones reachable from `src` by following the zone graph
/// adjacency, never leaving `valid_set`.
///
/// search is modeled with an explicit FIFO queue so the depth of the search
/// is bounded by memory rather than by the call stack.
///
/// # Arguments
///
/// * `src` - origin of the search. always part of the result.
/// * `graph` - adjacency to follow
/// * `valid_set` - zones the search may visit
///
/// # Returns
///
/// the zones within `valid_set` reachable from `src`.
pub fn bfs_within<'a>(
    src: &'a ZoneId,
    graph: &'a ZoneGraph,
    valid_set: &'a HashSet<ZoneId>,
) -> HashSet<&'a ZoneId> {
    let mut visited: HashSet<&ZoneId> = HashSet::new();
    let mut frontier: VecDeque<&ZoneId> = VecDeque::new();
    frontier.push_back(src);

    while let Some(next_id) = frontier.pop_front() {
        if !visited.insert(next_id) {
            continue;
        }

        // sorted for deterministic frontier insertion order
        let valid_neighbours = graph
            .neighbours(next_id)
            .iter()
            .filter(|n| valid_set.contains(*n))
            .sorted();
        for neighbour in valid_neighbours {
            if !visited.contains(neighbour) {
                frontier.push_back(neighbour);
            }
        }
    }

    visited
}
