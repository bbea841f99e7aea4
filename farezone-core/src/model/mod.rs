mod location_annotation;
mod route;
mod zone;
mod zone_dataset;
mod zone_id;

pub use location_annotation::LocationAnnotation;
pub use route::Route;
pub use zone::Zone;
pub use zone_dataset::ZoneDataset;
pub use zone_id::ZoneId;
