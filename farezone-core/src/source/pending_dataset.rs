use std::{
    sync::mpsc::{self, Receiver, TryRecvError},
    thread::{self, JoinHandle},
};

use super::{DatasetError, DatasetSource};
use crate::model::ZoneDataset;

/// a dataset being loaded on a worker thread.
///
/// the worker builds the entire dataset before sending it, so a receiver
/// never observes a partially populated dataset. the result can be taken
/// exactly once.
pub struct PendingDataset {
    receiver: Receiver<Result<ZoneDataset, DatasetError>>,
    worker: Option<JoinHandle<()>>,
    delivered: bool,
}

impl PendingDataset {
    pub fn spawn<S>(source: S) -> Self
    where
        S: DatasetSource + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::spawn(move || {
            let result = source.load_dataset();
            if sender.send(result).is_err() {
                log::debug!("zone dataset finished loading after its receiver was dropped");
            }
        });
        Self {
            receiver,
            worker: Some(worker),
            delivered: false,
        }
    }

    /// the load result if it has arrived. returns None while loading is in
    /// progress and after the result has already been taken.
    pub fn try_take(&mut self) -> Option<Result<ZoneDataset, DatasetError>> {
        if self.delivered {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.finish();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finish();
                Some(Err(DatasetError::LoaderDisconnected))
            }
        }
    }

    /// blocks until the load result arrives.
    pub fn wait(mut self) -> Result<ZoneDataset, DatasetError> {
        if self.delivered {
            return Err(DatasetError::LoaderDisconnected);
        }
        let result = self
            .receiver
            .recv()
            .unwrap_or(Err(DatasetError::LoaderDisconnected));
        self.finish();
        result
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    fn finish(&mut self) {
        self.delivered = true;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("zone dataset loader thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PendingDataset;
    use crate::{
        model::ZoneDataset,
        source::{DatasetError, DatasetSource},
        test_fixtures::chain_dataset,
    };

    struct PanickingSource;

    impl DatasetSource for PanickingSource {
        fn load_dataset(&self) -> Result<ZoneDataset, DatasetError> {
            panic!("source failed")
        }
    }

    #[test]
    fn test_wait_delivers_whole_dataset() {
        let pending = PendingDataset::spawn(chain_dataset());
        let dataset = pending.wait().unwrap();
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn test_try_take_delivers_once() {
        let mut pending = PendingDataset::spawn(chain_dataset());
        let mut result = None;
        while result.is_none() {
            result = pending.try_take();
            std::thread::yield_now();
        }
        assert!(result.unwrap().is_ok());
        assert!(pending.is_delivered());
        assert!(pending.try_take().is_none());
    }

    #[test]
    fn test_failed_loads_are_reported() {
        let empty = PendingDataset::spawn(ZoneDataset::default());
        assert!(matches!(empty.wait(), Err(DatasetError::NoZonesFound)));
        let panicked = PendingDataset::spawn(PanickingSource);
        assert!(matches!(
            panicked.wait(),
            Err(DatasetError::LoaderDisconnected)
        ));
    }
}
