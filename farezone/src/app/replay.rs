use std::{
    collections::HashSet,
    io::{BufWriter, Write},
};

use farezone_core::{
    controller::{
        RouteTapOutcome, SelectionController, SelectionObserver, TapMode, TapOutcome,
        ZoneTapOutcome,
    },
    model::{Route, ZoneId},
    source::{GeoJsonZoneSource, PendingDataset},
};
use serde::Serialize;

use super::{FarezoneCliError, ReplayConfiguration, ReplayScript, ReplayStep};

/// reports selection notifications to the log.
pub struct LoggingObserver;

impl SelectionObserver for LoggingObserver {
    fn should_select_route(&mut self, index: usize) -> bool {
        log::debug!("route {index} proposed for selection");
        true
    }

    fn selected_zones(&mut self, zones: &HashSet<ZoneId>) {
        log::info!("{} zones selected", zones.len());
    }

    fn selection_not_connected(&mut self) {
        log::info!("tap rejected, selection would not be connected");
    }

    fn selection_limit_reached(&mut self) {
        log::info!("tap rejected, zone limit reached");
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StepOutcome {
    Tap(TapOutcome),
    Zone(ZoneTapOutcome),
    Route(RouteTapOutcome),
    Mode { mode: TapMode },
}

/// one line of replay output.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReplayRecord {
    pub step: usize,
    pub op: ReplayStep,
    pub outcome: StepOutcome,
}

pub fn apply_step(controller: &mut SelectionController, step: &ReplayStep) -> StepOutcome {
    match step {
        ReplayStep::Tap { at } => StepOutcome::Tap(controller.handle_tap(&ReplayStep::point(at))),
        ReplayStep::TapZone { at } => {
            StepOutcome::Zone(controller.tap_zone(&ReplayStep::point(at)))
        }
        ReplayStep::TapRoute { at } => {
            StepOutcome::Route(controller.tap_route(&ReplayStep::point(at)))
        }
        ReplayStep::SetMode { zone_tap_enabled } => {
            controller.set_mode(*zone_tap_enabled);
            StepOutcome::Mode {
                mode: controller.mode(),
            }
        }
        ReplayStep::SetCapacity { capacity } => StepOutcome::Zone(controller.set_capacity(*capacity)),
        ReplayStep::SetNeighbourHighlight { enabled } => {
            StepOutcome::Zone(controller.set_neighbour_highlight(*enabled))
        }
        ReplayStep::Clear => StepOutcome::Zone(controller.clear()),
        ReplayStep::HighlightOnly { zones } => {
            StepOutcome::Zone(controller.highlight_only(ReplayStep::zone_set(zones)))
        }
        ReplayStep::HighlightOnlyRoutes { routes } => StepOutcome::Route(
            controller.highlight_only_routes(routes.as_deref().map(ReplayStep::routes)),
        ),
        ReplayStep::Seed {
            zones,
            locations,
            route,
        } => StepOutcome::Zone(controller.seed_selection(
            zones.as_deref().map(ReplayStep::zone_set),
            locations.as_deref().map(ReplayStep::locations),
            route.as_deref().map(Route::from_points),
        )),
        ReplayStep::SelectRoute { index } => StepOutcome::Route(controller.select_route(*index)),
    }
}

/// runs every step in order against the controller.
pub fn replay(controller: &mut SelectionController, script: &ReplayScript) -> Vec<ReplayRecord> {
    script
        .steps
        .iter()
        .enumerate()
        .map(|(step, op)| ReplayRecord {
            step,
            op: op.clone(),
            outcome: apply_step(controller, op),
        })
        .collect()
}

/// loads the dataset, replays the script and writes one JSON record per step to stdout.
pub fn run_replay(
    dataset_file: &String,
    script_file: &String,
    configuration_file: &Option<String>,
) -> Result<(), FarezoneCliError> {
    let conf = match configuration_file {
        None => Ok(ReplayConfiguration::default()),
        Some(f) => {
            log::info!("reading replay configuration from {f}");
            ReplayConfiguration::try_from(f)
        }
    }?;
    let script = ReplayScript::try_from(script_file)?;

    let pending = PendingDataset::spawn(GeoJsonZoneSource::new(dataset_file));
    let dataset = pending.wait()?;
    let mut controller =
        SelectionController::new(conf.engine).with_observer(Box::new(LoggingObserver));
    if !controller.attach(Ok(dataset)) {
        return Err(FarezoneCliError::ConfigurationError(format!(
            "zone dataset {dataset_file} could not be attached"
        )));
    }
    controller.set_mode(conf.initial_mode == TapMode::Zone);

    let records = replay(&mut controller, &script);
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for record in records.iter() {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    log::info!("replayed {} steps", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{replay, StepOutcome};
    use crate::app::{ReplayScript, ReplayStep};
    use farezone_core::{
        controller::{EngineConfig, Rejection, SelectionController, TapMode, TapOutcome},
        source::zone_dataset_from_geojson,
    };

    const PAIR: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]},
                "properties": {"Name": "West", "Shortname": "1", "NeighbourZones": "1002", "PolygonCentroid": "0.5,0.5"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 0.0]]]},
                "properties": {"Name": "East", "Shortname": "2", "NeighbourZones": "1001", "PolygonCentroid": "1.5,0.5"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[0.0, 3.0], [2.0, 3.0]]},
                "properties": {}
            }
        ]
    }"#;

    fn controller() -> SelectionController {
        let mut controller = SelectionController::new(EngineConfig {
            max_selected_zones: Some(1),
            route_match_threshold: 1.0,
            ..Default::default()
        });
        assert!(controller.attach(zone_dataset_from_geojson(PAIR)));
        controller
    }

    #[test]
    fn test_replay_records_each_step() {
        let script = ReplayScript {
            steps: vec![
                ReplayStep::Tap { at: [0.5, 0.5] },
                ReplayStep::TapZone { at: [1.5, 0.5] },
                ReplayStep::SetMode {
                    zone_tap_enabled: false,
                },
                ReplayStep::Tap { at: [1.0, 2.5] },
                ReplayStep::TapRoute { at: [1.0, 0.5] },
            ],
        };
        let mut controller = controller();
        let records = replay(&mut controller, &script);
        assert_eq!(records.len(), 5);
        assert!(matches!(
            records[0].outcome,
            StepOutcome::Tap(TapOutcome::Zone(Ok(_)))
        ));
        assert!(matches!(
            records[1].outcome,
            StepOutcome::Zone(Err(Rejection::LimitReached(_)))
        ));
        assert_eq!(
            records[2].outcome,
            StepOutcome::Mode {
                mode: TapMode::Route
            }
        );
        assert!(matches!(
            records[3].outcome,
            StepOutcome::Tap(TapOutcome::Route(Ok(_)))
        ));
        assert_eq!(records[4].outcome, StepOutcome::Route(Err(Rejection::NoHit)));
        assert_eq!(controller.routes().selected(), Some(0));
    }

    #[test]
    fn test_records_serialize_as_json_lines() {
        let script: ReplayScript =
            serde_json::from_str(r#"[{"op": "tap_zone", "at": [5.0, 5.0]}]"#).unwrap();
        let records = replay(&mut controller(), &script);
        let line = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(line["step"], 0);
        assert_eq!(line["op"]["op"], "tap_zone");
        assert_eq!(line["outcome"]["Err"]["rejection"], "no_hit");
    }
}
