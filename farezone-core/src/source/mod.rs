mod dataset_error;
mod dataset_source;
mod geojson_source;
mod pending_dataset;

pub use dataset_error::DatasetError;
pub use dataset_source::DatasetSource;
pub use geojson_source::{zone_dataset_from_geojson, GeoJsonZoneSource};
pub use pending_dataset::PendingDataset;
