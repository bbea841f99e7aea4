use std::collections::HashSet;

use geo::{Point, Rect};
use itertools::Itertools;

use super::{
    EngineConfig, Rejection, RouteTapOutcome, SelectionObserver, TapMode, TapOutcome,
    ZoneTapOutcome,
};
use crate::{
    geometry::{self, ZoneIndex},
    graph::ZoneGraph,
    model::{LocationAnnotation, Route, ZoneDataset, ZoneId},
    selection::{RouteSelection, SelectionState, ZoneAction, ZoneDiff},
    source::{DatasetError, PendingDataset},
};

/// the dataset and the structures derived from it, built together so the
/// controller never sees one without the others.
struct AttachedDataset {
    dataset: ZoneDataset,
    graph: ZoneGraph,
    index: ZoneIndex,
}

/// drives zone and route selection from map taps.
///
/// every operation is synchronous and runs to completion before the next one
/// starts. until a dataset is attached, every dataset-dependent operation
/// returns [Rejection::DatasetUnavailable] and changes nothing.
pub struct SelectionController {
    config: EngineConfig,
    attached: Option<AttachedDataset>,
    selection: SelectionState,
    routes: RouteSelection,
    locations: Vec<LocationAnnotation>,
    mode: TapMode,
    observer: Option<Box<dyn SelectionObserver>>,
}

impl SelectionController {
    pub fn new(config: EngineConfig) -> Self {
        let selection = SelectionState::new(config.max_selected_zones);
        Self {
            config,
            attached: None,
            selection,
            routes: RouteSelection::default(),
            locations: vec![],
            mode: TapMode::default(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SelectionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn SelectionObserver>>) {
        self.observer = observer;
    }

    /// hands a loaded dataset to the controller. a failed or empty delivery
    /// leaves the controller without a dataset. only the first successful
    /// delivery is attached.
    pub fn attach(&mut self, delivery: Result<ZoneDataset, DatasetError>) -> bool {
        if self.attached.is_some() {
            log::warn!("zone dataset already attached, ignoring new delivery");
            return false;
        }
        let dataset = match delivery {
            Ok(dataset) if dataset.is_empty() => {
                log::warn!("zone dataset unavailable: delivered dataset has no zones");
                return false;
            }
            Ok(dataset) => dataset,
            Err(e) => {
                log::warn!("zone dataset unavailable: {e}");
                return false;
            }
        };

        let mut graph = ZoneGraph::from(&dataset);
        let asymmetric = graph.asymmetric_pairs();
        if !asymmetric.is_empty() {
            if self.config.symmetrize_adjacency {
                log::info!(
                    "symmetrizing {} one-way zone adjacencies",
                    asymmetric.len()
                );
                graph = graph.symmetrized();
            } else {
                let sample = asymmetric
                    .iter()
                    .take(5)
                    .map(|(a, b)| format!("{a}->{b}"))
                    .join(", ");
                log::warn!(
                    "zone dataset has {} one-way adjacencies, kept as given (e.g. {sample})",
                    asymmetric.len()
                );
            }
        }

        let index = ZoneIndex::new(&dataset);
        self.routes = RouteSelection::new(dataset.routes().to_vec());
        log::info!(
            "attached zone dataset with {} zones and {} routes",
            dataset.len(),
            dataset.routes().len()
        );
        self.attached = Some(AttachedDataset {
            dataset,
            graph,
            index,
        });
        true
    }

    /// attaches a background load if it has finished.
    pub fn try_attach(&mut self, pending: &mut PendingDataset) -> bool {
        match pending.try_take() {
            Some(delivery) => self.attach(delivery),
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn dataset(&self) -> Option<&ZoneDataset> {
        self.attached.as_ref().map(|a| &a.dataset)
    }

    pub fn graph(&self) -> Option<&ZoneGraph> {
        self.attached.as_ref().map(|a| &a.graph)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn routes(&self) -> &RouteSelection {
        &self.routes
    }

    pub fn locations(&self) -> &[LocationAnnotation] {
        &self.locations
    }

    pub fn mode(&self) -> TapMode {
        self.mode
    }

    /// when zone taps are disabled, taps pick routes instead.
    pub fn set_mode(&mut self, zone_tap_enabled: bool) {
        self.mode = TapMode::from_zone_tap_enabled(zone_tap_enabled);
    }

    /// handles a tap according to the current mode.
    pub fn handle_tap(&mut self, point: &Point<f64>) -> TapOutcome {
        match self.mode {
            TapMode::Zone => TapOutcome::Zone(self.tap_zone(point)),
            TapMode::Route => TapOutcome::Route(self.tap_route(point)),
        }
    }

    pub fn tap_zone(&mut self, point: &Point<f64>) -> ZoneTapOutcome {
        let attached = self
            .attached
            .as_ref()
            .ok_or(Rejection::DatasetUnavailable)?;
        let id = attached
            .index
            .locate(&attached.dataset, point)
            .cloned()
            .ok_or(Rejection::NoHit)?;

        let diff = self.selection.apply(&attached.graph, &id);
        log::debug!("tap on zone {id}: {:?}", diff.action);

        if diff.action == Some(ZoneAction::Invalid) {
            if let Some(observer) = self.observer.as_mut() {
                observer.selection_not_connected();
            }
            return Err(Rejection::InvalidSelection(id));
        }
        if let Some(observer) = self.observer.as_mut() {
            if diff.action == Some(ZoneAction::LimitReached) {
                observer.selection_limit_reached();
            }
            observer.selected_zones(self.selection.selected());
        }
        match diff.action {
            Some(ZoneAction::LimitReached) => Err(Rejection::LimitReached(id)),
            _ => Ok(diff),
        }
    }

    pub fn tap_route(&mut self, point: &Point<f64>) -> RouteTapOutcome {
        if self.attached.is_none() {
            return Err(Rejection::DatasetUnavailable);
        }
        let nearest = self
            .routes
            .nearest(point, self.config.route_match_threshold)
            .ok_or(Rejection::NoHit)?;
        if let Some(observer) = self.observer.as_mut() {
            if !observer.should_select_route(nearest.index) {
                return Err(Rejection::RouteDeclined(nearest.index));
            }
        }
        log::debug!(
            "tap selected route {} at distance {}",
            nearest.index,
            nearest.distance
        );
        self.routes.select(nearest.index).ok_or(Rejection::NoHit)
    }

    /// selects a route by index. indices past the end are rejected.
    pub fn select_route(&mut self, index: usize) -> RouteTapOutcome {
        if self.attached.is_none() {
            return Err(Rejection::DatasetUnavailable);
        }
        self.routes.select(index).ok_or(Rejection::NoHit)
    }

    /// sets up an externally driven journey: zones are added to the selection
    /// without adjacency or capacity checks, locations are pinned, and the
    /// route is appended. taps switch to picking routes. the diff carries the
    /// route styling when a route was appended.
    pub fn seed_selection(
        &mut self,
        zones: Option<HashSet<ZoneId>>,
        locations: Option<Vec<LocationAnnotation>>,
        route: Option<Route>,
    ) -> ZoneTapOutcome {
        let attached = self
            .attached
            .as_ref()
            .ok_or(Rejection::DatasetUnavailable)?;
        self.mode = TapMode::Route;
        let mut diff = match zones {
            Some(zones) => self
                .selection
                .seed(&attached.graph, zones.into_iter().sorted()),
            None => ZoneDiff::default(),
        };
        if let Some(locations) = locations {
            self.locations.extend(locations);
        }
        if let Some(route) = route {
            self.routes.push(route);
            diff.route_styling = Some(self.routes.styling());
        }
        Ok(diff)
    }

    /// replaces the selection with exactly these zones.
    pub fn highlight_only(&mut self, zones: HashSet<ZoneId>) -> ZoneTapOutcome {
        let attached = self
            .attached
            .as_ref()
            .ok_or(Rejection::DatasetUnavailable)?;
        Ok(self.selection.replace(&attached.graph, zones))
    }

    /// replaces the tracked routes. all new routes are highlighted and no
    /// route is selected.
    pub fn highlight_only_routes(&mut self, routes: Option<Vec<Route>>) -> RouteTapOutcome {
        if self.attached.is_none() {
            return Err(Rejection::DatasetUnavailable);
        }
        Ok(self.routes.replace(routes))
    }

    pub fn set_capacity(&mut self, capacity: Option<usize>) -> ZoneTapOutcome {
        if self.attached.is_none() {
            return Err(Rejection::DatasetUnavailable);
        }
        Ok(self.selection.set_capacity(capacity))
    }

    pub fn set_neighbour_highlight(&mut self, enabled: bool) -> ZoneTapOutcome {
        if self.attached.is_none() {
            return Err(Rejection::DatasetUnavailable);
        }
        Ok(self.selection.set_neighbour_highlight(enabled))
    }

    /// empties the zone selection, unselects the route and removes pinned
    /// locations. the diff always carries the route styling.
    pub fn clear(&mut self) -> ZoneTapOutcome {
        if self.attached.is_none() {
            return Err(Rejection::DatasetUnavailable);
        }
        let route_styling = self.routes.clear_selection();
        self.locations.clear();
        let mut diff = self.selection.clear();
        diff.route_styling = Some(route_styling);
        Ok(diff)
    }

    /// true if zone labels should be hidden at this latitude span.
    pub fn zone_labels_hidden(&self, latitude_span: f64) -> bool {
        geometry::zone_labels_hidden(latitude_span, self.config.zone_label_hide_span)
    }

    /// where the viewport should snap to, if anywhere, to stay on the bounding region.
    pub fn constrain_viewport(&self, visible: &Rect<f64>, bounding: &Rect<f64>) -> Option<Rect<f64>> {
        geometry::constrain_to_bounding_region(
            visible,
            bounding,
            self.config.bounding_region_min_fill,
        )
    }

    /// the rect to zoom to so every selected zone is visible.
    pub fn selection_bounds(&self) -> Option<Rect<f64>> {
        let attached = self.attached.as_ref()?;
        geometry::selection_bounds(&attached.dataset, self.selection.selected())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashSet, rc::Rc};

    use geo::{coord, point, Rect};

    use super::SelectionController;
    use crate::{
        controller::{EngineConfig, Rejection, SelectionObserver, TapMode, TapOutcome},
        model::{LocationAnnotation, Route, ZoneDataset, ZoneId},
        selection::{RouteStyle, ZoneAction},
        source::{DatasetError, PendingDataset},
        test_fixtures::{chain_dataset, chain_point, ids, square_zone},
    };

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
        decline_routes: bool,
    }

    impl SelectionObserver for Recorder {
        fn should_select_route(&mut self, index: usize) -> bool {
            self.events.borrow_mut().push(format!("route?{index}"));
            !self.decline_routes
        }

        fn selected_zones(&mut self, zones: &HashSet<ZoneId>) {
            self.events.borrow_mut().push(format!("selected:{}", zones.len()));
        }

        fn selection_not_connected(&mut self) {
            self.events.borrow_mut().push(String::from("not_connected"));
        }

        fn selection_limit_reached(&mut self) {
            self.events.borrow_mut().push(String::from("limit"));
        }
    }

    fn attached(config: EngineConfig) -> SelectionController {
        let mut controller = SelectionController::new(config);
        assert!(controller.attach(Ok(chain_dataset())));
        controller
    }

    #[test]
    fn test_unavailable_until_attached() {
        let mut controller = SelectionController::new(EngineConfig::default());
        assert_eq!(
            controller.tap_zone(&chain_point("A")),
            Err(Rejection::DatasetUnavailable)
        );
        assert_eq!(
            controller.tap_route(&point!(x: 5.0, y: 0.0)),
            Err(Rejection::DatasetUnavailable)
        );
        assert_eq!(controller.clear(), Err(Rejection::DatasetUnavailable));
        assert_eq!(
            controller.highlight_only(ids(&["A"])),
            Err(Rejection::DatasetUnavailable)
        );

        assert!(!controller.attach(Err(DatasetError::NoZonesFound)));
        assert!(!controller.attach(Ok(ZoneDataset::default())));
        assert!(!controller.is_attached());
        assert!(controller.selection().selected().is_empty());

        assert!(controller.attach(Ok(chain_dataset())));
        assert!(controller.tap_zone(&chain_point("A")).is_ok());
        // the first dataset stays attached
        assert!(!controller.attach(Ok(chain_dataset())));
    }

    #[test]
    fn test_attach_from_background_load() {
        let mut controller = SelectionController::new(EngineConfig::default());
        let mut pending = PendingDataset::spawn(chain_dataset());
        while !controller.try_attach(&mut pending) {
            assert!(!pending.is_delivered());
            std::thread::yield_now();
        }
        assert_eq!(controller.dataset().map(|d| d.len()), Some(4));
        assert_eq!(controller.routes().routes().len(), 2);
    }

    #[test]
    fn test_tap_zone_outcomes_and_notifications() {
        let events = Rc::new(RefCell::new(vec![]));
        let recorder = Recorder {
            events: events.clone(),
            decline_routes: false,
        };
        let config = EngineConfig {
            max_selected_zones: Some(2),
            ..Default::default()
        };
        let mut controller = attached(config).with_observer(Box::new(recorder));

        let diff = controller.tap_zone(&chain_point("A")).unwrap();
        assert_eq!(diff.action, Some(ZoneAction::Selected));
        assert_eq!(
            controller.tap_zone(&chain_point("C")),
            Err(Rejection::InvalidSelection(ZoneId::from("C")))
        );
        controller.tap_zone(&chain_point("B")).unwrap();
        assert_eq!(
            controller.tap_zone(&chain_point("C")),
            Err(Rejection::LimitReached(ZoneId::from("C")))
        );
        assert_eq!(
            controller.tap_zone(&point!(x: 20.0, y: 20.0)),
            Err(Rejection::NoHit)
        );
        assert_eq!(
            *events.borrow(),
            vec!["selected:1", "not_connected", "selected:2", "limit", "selected:2"]
        );
    }

    #[test]
    fn test_mode_switches_tap_handling() {
        let mut controller = attached(EngineConfig {
            route_match_threshold: 3.0,
            ..Default::default()
        });
        assert_eq!(controller.mode(), TapMode::Zone);
        assert!(matches!(
            controller.handle_tap(&chain_point("A")),
            TapOutcome::Zone(Ok(_))
        ));

        controller.set_mode(false);
        match controller.handle_tap(&point!(x: 5.0, y: 0.5)) {
            TapOutcome::Route(Ok(styling)) => {
                assert_eq!(styling.selected, Some(0));
                assert_eq!(styling.styles, vec![RouteStyle::Emphasis, RouteStyle::Default]);
            }
            other => panic!("expected route selection, found {other:?}"),
        }
        assert_eq!(
            controller.handle_tap(&point!(x: 5.0, y: 6.0)),
            TapOutcome::Route(Err(Rejection::NoHit))
        );
        assert_eq!(controller.routes().selected(), Some(0));
        // zone taps are not applied while picking routes
        assert_eq!(controller.selection().selected(), &ids(&["A"]));
    }

    #[test]
    fn test_observer_can_decline_route() {
        let events = Rc::new(RefCell::new(vec![]));
        let recorder = Recorder {
            events: events.clone(),
            decline_routes: true,
        };
        let mut controller = attached(EngineConfig::default()).with_observer(Box::new(recorder));
        assert_eq!(
            controller.tap_route(&point!(x: 5.0, y: 9.0)),
            Err(Rejection::RouteDeclined(1))
        );
        assert_eq!(controller.routes().selected(), None);
        assert_eq!(*events.borrow(), vec!["route?1"]);
    }

    #[test]
    fn test_seed_selection_sets_up_journey() {
        let mut controller = attached(EngineConfig::default());
        let location = LocationAnnotation::new(point!(x: 0.5, y: 0.5));
        let diff = controller
            .seed_selection(
                Some(ids(&["A", "D"])),
                Some(vec![location.clone()]),
                Some(Route::from_points(&[[0.0, 5.0], [4.0, 5.0]])),
            )
            .unwrap();
        assert_eq!(diff.selected.len(), 2);
        assert_eq!(controller.selection().neighbours(), &ids(&["B", "C"]));
        assert_eq!(controller.mode(), TapMode::Route);
        assert_eq!(controller.locations(), &[location]);
        assert_eq!(controller.routes().routes().len(), 3);
        assert_eq!(controller.select_route(2).map(|s| s.raised), Ok(Some(2)));
        assert_eq!(controller.select_route(3), Err(Rejection::NoHit));

        let diff = controller.clear().unwrap();
        assert_eq!(diff.deselected.len(), 2);
        assert!(controller.locations().is_empty());
        assert_eq!(controller.routes().selected(), None);
    }

    #[test]
    fn test_highlight_only_and_routes() {
        let mut controller = attached(EngineConfig::default());
        let diff = controller.highlight_only(ids(&["B", "C"])).unwrap();
        assert_eq!(diff.selected.len(), 2);
        assert_eq!(controller.selection().neighbours(), &ids(&["A", "D"]));

        controller.select_route(0).unwrap();
        let styling = controller
            .highlight_only_routes(Some(vec![Route::from_points(&[[0.0, 0.0], [1.0, 1.0]])]))
            .unwrap();
        assert_eq!(styling.selected, None);
        assert_eq!(styling.styles, vec![RouteStyle::Emphasis]);
        let styling = controller.highlight_only_routes(None).unwrap();
        assert!(styling.styles.is_empty());
        assert_eq!(controller.tap_route(&point!(x: 0.0, y: 0.0)), Err(Rejection::NoHit));
    }

    #[test]
    fn test_symmetrize_adjacency_on_attach() {
        let one_way = ZoneDataset::new(
            vec![
                square_zone("1", 0.0, 0.0, &["2"]),
                square_zone("2", 1.0, 0.0, &[]),
            ],
            vec![],
        );
        let mut raw = SelectionController::new(EngineConfig::default());
        raw.attach(Ok(one_way.clone()));
        assert!(raw.graph().unwrap().neighbours(&ZoneId::from("2")).is_empty());
        raw.tap_zone(&point!(x: 1.5, y: 0.5)).unwrap();
        assert_eq!(
            raw.tap_zone(&point!(x: 0.5, y: 0.5)),
            Err(Rejection::InvalidSelection(ZoneId::from("1")))
        );

        let mut symmetric = SelectionController::new(EngineConfig {
            symmetrize_adjacency: true,
            ..Default::default()
        });
        symmetric.attach(Ok(one_way));
        symmetric.tap_zone(&point!(x: 1.5, y: 0.5)).unwrap();
        assert!(symmetric.tap_zone(&point!(x: 0.5, y: 0.5)).is_ok());
    }

    #[test]
    fn test_viewport_helpers() {
        let mut controller = attached(EngineConfig::default());
        assert!(controller.zone_labels_hidden(0.6));
        assert!(!controller.zone_labels_hidden(0.5));
        let bounding = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 1.0 });
        let far = Rect::new(coord! { x: 10.0, y: 10.0 }, coord! { x: 11.0, y: 11.0 });
        assert_eq!(controller.constrain_viewport(&far, &bounding), Some(bounding));

        assert!(controller.selection_bounds().is_none());
        controller.tap_zone(&chain_point("A")).unwrap();
        controller.tap_zone(&chain_point("B")).unwrap();
        assert_eq!(
            controller.selection_bounds(),
            Some(Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 1.0 }))
        );
    }

    #[test]
    fn test_clear_reports_route_styling() {
        let mut controller = attached(EngineConfig::default());
        let styling = controller.select_route(0).unwrap();
        assert_eq!(styling.styles, vec![RouteStyle::Emphasis, RouteStyle::Default]);

        let diff = controller.clear().unwrap();
        let styling = diff.route_styling.unwrap();
        assert_eq!(styling.selected, None);
        assert_eq!(styling.raised, None);
        assert_eq!(styling.styles, vec![RouteStyle::Default, RouteStyle::Default]);
        assert_eq!(controller.routes().styling(), styling);
    }

    #[test]
    fn test_seed_route_reaches_styling() {
        let mut controller = attached(EngineConfig::default());
        let diff = controller.seed_selection(None, None, None).unwrap();
        assert!(diff.is_empty());

        let diff = controller
            .seed_selection(
                None,
                None,
                Some(Route::from_points(&[[0.0, 5.0], [4.0, 5.0]])),
            )
            .unwrap();
        assert!(diff.selected.is_empty());
        let styling = diff.route_styling.unwrap();
        assert_eq!(styling.styles.len(), 3);
        assert_eq!(controller.routes().routes().len(), 3);
        assert_eq!(controller.routes().styling(), styling);
    }
}
