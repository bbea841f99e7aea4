use std::collections::BTreeSet;

use geo::Point;
use serde::Serialize;

use crate::{
    geometry::{nearest_route, RouteMatch},
    model::Route,
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteStyle {
    Default,
    Emphasis,
}

/// how every tracked route should be drawn after a route change.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteStyling {
    pub selected: Option<usize>,
    /// one style per route, by route index
    pub styles: Vec<RouteStyle>,
    /// route to draw above all others
    pub raised: Option<usize>,
}

/// the routes on the map, the one the user picked, and the routes grouped
/// for presentation by the host.
#[derive(Debug, Clone, Default)]
pub struct RouteSelection {
    routes: Vec<Route>,
    selected: Option<usize>,
    highlighted: BTreeSet<usize>,
}

impl RouteSelection {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            selected: None,
            highlighted: BTreeSet::new(),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn highlighted(&self) -> &BTreeSet<usize> {
        &self.highlighted
    }

    /// appends a route without highlighting it, returning its index.
    pub fn push(&mut self, route: Route) -> usize {
        self.routes.push(route);
        self.routes.len() - 1
    }

    /// the route nearest to a point, within the threshold.
    pub fn nearest(&self, point: &Point<f64>, threshold: f64) -> Option<RouteMatch> {
        nearest_route(point, self.routes.iter().map(|r| &r.path), threshold)
    }

    /// makes a route the selected one. the selected route is drawn with
    /// emphasis and raised; every other route returns to the default style.
    /// indices past the end are ignored.
    pub fn select(&mut self, index: usize) -> Option<RouteStyling> {
        if index >= self.routes.len() {
            return None;
        }
        self.selected = Some(index);
        let styles = (0..self.routes.len())
            .map(|i| {
                if i == index {
                    RouteStyle::Emphasis
                } else {
                    RouteStyle::Default
                }
            })
            .collect();
        Some(RouteStyling {
            selected: self.selected,
            styles,
            raised: self.selected,
        })
    }

    /// replaces the tracked routes and highlights all of them. clears any
    /// selected route.
    pub fn replace(&mut self, routes: Option<Vec<Route>>) -> RouteStyling {
        self.routes = routes.unwrap_or_default();
        self.selected = None;
        self.highlighted = (0..self.routes.len()).collect();
        self.styling()
    }

    pub fn clear_selection(&mut self) -> RouteStyling {
        self.selected = None;
        self.styling()
    }

    /// the full styling for the current state. selected and highlighted
    /// routes are drawn with emphasis.
    pub fn styling(&self) -> RouteStyling {
        let styles = (0..self.routes.len())
            .map(|i| {
                if Some(i) == self.selected || self.highlighted.contains(&i) {
                    RouteStyle::Emphasis
                } else {
                    RouteStyle::Default
                }
            })
            .collect();
        RouteStyling {
            selected: self.selected,
            styles,
            raised: self.selected,
        }
    }
}
