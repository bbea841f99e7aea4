mod search;
mod zone_graph;

pub use search::bfs_within;
pub use zone_graph::ZoneGraph;
