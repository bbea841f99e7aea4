pub mod controller;
pub mod geometry;
pub mod graph;
pub mod model;
pub mod selection;
pub mod source;

#[cfg(test)]
pub(crate) mod test_fixtures;
