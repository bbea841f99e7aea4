mod engine_config;
mod rejection;
mod selection_controller;
mod selection_observer;
mod tap_mode;

pub use engine_config::EngineConfig;
pub use rejection::{Rejection, RouteTapOutcome, TapOutcome, ZoneTapOutcome};
pub use selection_controller::SelectionController;
pub use selection_observer::SelectionObserver;
pub use tap_mode::TapMode;
