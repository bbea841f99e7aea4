use std::collections::HashSet;

use super::{ZoneAction, ZoneDiff};
use crate::{graph::ZoneGraph, model::ZoneId};

/// the zones a user has selected, the zones eligible to be selected next,
/// and an optional limit on the number of selected zones.
///
/// `neighbours` never overlaps `selected`. whenever more than one zone is
/// selected through [SelectionState::apply], the selected zones form a single
/// connected component of the zone graph. rejected taps never change state.
///
/// neighbour highlighting is suppressed while the selection is at capacity or
/// while highlighting is switched off; the logical neighbour set is still kept
/// up to date, and the produced diffs reflect only what is visible.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: HashSet<ZoneId>,
    neighbours: HashSet<ZoneId>,
    capacity: Option<usize>,
    neighbour_highlight: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SelectionState {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            selected: HashSet::new(),
            neighbours: HashSet::new(),
            capacity,
            neighbour_highlight: true,
        }
    }

    pub fn selected(&self) -> &HashSet<ZoneId> {
        &self.selected
    }

    pub fn neighbours(&self) -> &HashSet<ZoneId> {
        &self.neighbours
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_at_capacity(&self) -> bool {
        match self.capacity {
            Some(limit) => self.selected.len() >= limit,
            None => false,
        }
    }

    /// true if neighbour zones should currently be drawn as selectable.
    pub fn neighbours_visible(&self) -> bool {
        self.neighbour_highlight && !self.is_at_capacity()
    }

    /// the neighbours a renderer should currently draw as selectable.
    pub fn visible_neighbours(&self) -> HashSet<ZoneId> {
        if self.neighbours_visible() {
            self.neighbours.clone()
        } else {
            HashSet::new()
        }
    }

    /// applies a tap on a zone.
    ///
    /// a selected zone is deselected unless that would disconnect the rest of
    /// the selection. an unselected zone is selected if the selection is empty
    /// or the zone is a neighbour of it, and the selection is below capacity.
    pub fn apply(&mut self, graph: &ZoneGraph, id: &ZoneId) -> ZoneDiff {
        if self.selected.contains(id) {
            let mut after_removal = self.selected.clone();
            after_removal.remove(id);
            if after_removal.len() > 1 && !graph.is_connected(&after_removal) {
                log::debug!("deselecting zone {id} would disconnect the selection");
                return ZoneDiff::rejected(ZoneAction::Invalid);
            }
            let visible_before = self.visible_neighbours();
            self.selected = after_removal;
            self.release_neighbours(graph, id);
            let mut diff = self.neighbour_diff(&visible_before);
            diff.action = Some(ZoneAction::Deselected);
            diff.deselected.insert(id.clone());
            diff
        } else if self.is_at_capacity() {
            log::debug!("zone {id} rejected, selection is at capacity");
            ZoneDiff::rejected(ZoneAction::LimitReached)
        } else if self.selected.is_empty() || self.neighbours.contains(id) {
            let visible_before = self.visible_neighbours();
            self.selected.insert(id.clone());
            self.claim_neighbours(graph, id);
            let mut diff = self.neighbour_diff(&visible_before);
            diff.action = Some(ZoneAction::Selected);
            diff.selected.insert(id.clone());
            diff
        } else {
            log::debug!("zone {id} is not adjacent to the selection");
            ZoneDiff::rejected(ZoneAction::Invalid)
        }
    }

    /// adds zones to the selection without checking adjacency or capacity.
    /// neighbours are maintained as if each zone had been tapped in turn.
    pub fn seed<I>(&mut self, graph: &ZoneGraph, zones: I) -> ZoneDiff
    where
        I: IntoIterator<Item = ZoneId>,
    {
        let visible_before = self.visible_neighbours();
        let mut newly_selected = vec![];
        for id in zones.into_iter() {
            if self.selected.insert(id.clone()) {
                self.claim_neighbours(graph, &id);
                newly_selected.push(id);
            }
        }
        let mut diff = self.neighbour_diff(&visible_before);
        diff.selected.extend(newly_selected);
        diff
    }

    /// replaces the selection wholesale and recomputes neighbours from scratch.
    pub fn replace(&mut self, graph: &ZoneGraph, zones: HashSet<ZoneId>) -> ZoneDiff {
        let visible_before = self.visible_neighbours();
        let deselected = self.selected.difference(&zones).cloned().collect();
        let selected = zones.difference(&self.selected).cloned().collect();
        self.selected = zones;
        self.recompute_neighbours(graph);
        let mut diff = self.neighbour_diff(&visible_before);
        diff.selected = selected;
        diff.deselected = deselected;
        diff
    }

    /// changes the selection limit. an existing selection larger than the new
    /// limit is kept, but no zone can be added until it drops below the limit.
    pub fn set_capacity(&mut self, capacity: Option<usize>) -> ZoneDiff {
        let visible_before = self.visible_neighbours();
        self.capacity = capacity;
        self.neighbour_diff(&visible_before)
    }

    /// shows or hides neighbour highlighting without changing the selection.
    pub fn set_neighbour_highlight(&mut self, enabled: bool) -> ZoneDiff {
        let visible_before = self.visible_neighbours();
        self.neighbour_highlight = enabled;
        self.neighbour_diff(&visible_before)
    }

    /// empties the selection. capacity and highlight settings are kept.
    pub fn clear(&mut self) -> ZoneDiff {
        let visible_before = self.visible_neighbours();
        let deselected = self.selected.drain().collect();
        self.neighbours.clear();
        let mut diff = self.neighbour_diff(&visible_before);
        diff.deselected = deselected;
        diff
    }

    /// `id` has just been selected: it stops being a neighbour and its
    /// unselected neighbours become selectable.
    fn claim_neighbours(&mut self, graph: &ZoneGraph, id: &ZoneId) {
        self.neighbours.remove(id);
        for neighbour in graph.neighbours(id) {
            if !self.selected.contains(neighbour) {
                self.neighbours.insert(neighbour.clone());
            }
        }
    }

    /// `id` has just been deselected: its neighbours stop being selectable
    /// unless some remaining selected zone still lists them, and `id` itself
    /// becomes selectable again if the remaining selection lists it.
    fn release_neighbours(&mut self, graph: &ZoneGraph, id: &ZoneId) {
        let mut candidate_removal = graph
            .neighbours(id)
            .iter()
            .filter(|n| !self.selected.contains(*n))
            .collect::<HashSet<_>>();
        for remaining in self.selected.iter() {
            for neighbour in graph.neighbours(remaining) {
                candidate_removal.remove(neighbour);
            }
        }
        for zone in candidate_removal {
            self.neighbours.remove(zone);
        }

        let still_adjacent = self
            .selected
            .iter()
            .any(|remaining| graph.neighbours(remaining).contains(id));
        if still_adjacent {
            self.neighbours.insert(id.clone());
        }
    }

    fn recompute_neighbours(&mut self, graph: &ZoneGraph) {
        self.neighbours = self
            .selected
            .iter()
            .flat_map(|s| graph.neighbours(s).iter())
            .filter(|n| !self.selected.contains(*n))
            .cloned()
            .collect();
    }

    /// compares what was visible before a change with what is visible now.
    /// zones that left the neighbour set because they became selected are
    /// covered by the selection delta and are not reported as removed.
    fn neighbour_diff(&self, visible_before: &HashSet<ZoneId>) -> ZoneDiff {
        let visible_after = self.visible_neighbours();
        let added_neighbours = visible_after
            .difference(visible_before)
            .cloned()
            .collect();
        let removed_neighbours = visible_before
            .difference(&visible_after)
            .filter(|z| !self.selected.contains(*z))
            .cloned()
            .collect();
        ZoneDiff {
            action: None,
            added_neighbours,
            removed_neighbours,
            ..Default::default()
        }
    }
}
