use serde::Serialize;
use thiserror::Error;

use crate::{
    model::ZoneId,
    selection::{RouteStyling, ZoneDiff},
};

/// reasons a controller operation left state unchanged. these are ordinary
/// outcomes reported to the host, never failures of the engine.
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "rejection", content = "detail", rename_all = "snake_case")]
pub enum Rejection {
    #[error("zone {0} is not adjacent to the selection or would disconnect it")]
    InvalidSelection(ZoneId),
    #[error("zone {0} cannot be selected, the selection is at capacity")]
    LimitReached(ZoneId),
    #[error("tap did not match any zone or route")]
    NoHit,
    #[error("route {0} was declined by the observer")]
    RouteDeclined(usize),
    #[error("zone dataset is not available")]
    DatasetUnavailable,
}

pub type ZoneTapOutcome = Result<ZoneDiff, Rejection>;

pub type RouteTapOutcome = Result<RouteStyling, Rejection>;

/// the outcome of a tap routed by the current [super::TapMode].
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TapOutcome {
    Zone(ZoneTapOutcome),
    Route(RouteTapOutcome),
}
