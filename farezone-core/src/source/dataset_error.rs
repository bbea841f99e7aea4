use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failure reading zone dataset {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("failure decoding zone dataset as GeoJSON: {0}")]
    GeoJsonError(String),
    #[error("zone dataset must be a GeoJSON FeatureCollection but found a single {0}")]
    NotAFeatureCollection(String),
    #[error("zone dataset contains no usable zones")]
    NoZonesFound,
    #[error("zone dataset loader stopped before delivering a dataset")]
    LoaderDisconnected,
}
