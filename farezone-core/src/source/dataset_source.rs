use super::DatasetError;
use crate::model::ZoneDataset;

/// supplies the zone dataset an engine attaches to. implementations may be
/// slow (file or network access); see [super::PendingDataset] for running
/// them off the event-handling thread.
pub trait DatasetSource: Send {
    fn load_dataset(&self) -> Result<ZoneDataset, DatasetError>;
}

impl DatasetSource for ZoneDataset {
    fn load_dataset(&self) -> Result<ZoneDataset, DatasetError> {
        if self.is_empty() {
            Err(DatasetError::NoZonesFound)
        } else {
            Ok(self.clone())
        }
    }
}
