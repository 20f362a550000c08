//! Modulation matrix: routes from sources to destinations with a signed
//! amount, and the grid controller that edits them.
//!
//! Rows are sources, columns are destinations. A cell holds at most one
//! route.

use crate::geometry::{Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, PointerEvent, Update};
use crate::scale::{clamp_bipolar, clamp_unit};
use alloc::vec::Vec;

/// Modulation source identifier (LFO 1, envelope 2, velocity, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u16);

/// Modulation destination identifier (cutoff, pitch, pan, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestinationId(pub u16);

/// One source → destination connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModRoute {
    /// Modulation source.
    pub source: SourceId,
    /// Modulated parameter.
    pub destination: DestinationId,
    /// Signed depth in \[-1, 1\].
    pub amount: f32,
    /// Bypassed routes keep their amount.
    pub enabled: bool,
}

impl ModRoute {
    /// An enabled route with a clamped amount.
    pub fn new(source: SourceId, destination: DestinationId, amount: f32) -> Self {
        Self {
            source,
            destination,
            amount: clamp_bipolar(amount),
            enabled: true,
        }
    }

    /// Depth actually applied: zero when bypassed.
    pub fn effective_amount(&self) -> f32 {
        if self.enabled { self.amount } else { 0.0 }
    }
}

/// Ordered route list with at most one route per (source, destination).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModMatrix {
    routes: Vec<ModRoute>,
}

impl ModMatrix {
    /// An empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from routes. Later duplicates of a cell replace earlier ones;
    /// amounts are clamped.
    pub fn from_routes(routes: impl IntoIterator<Item = ModRoute>) -> Self {
        let mut m = Self::new();
        for r in routes {
            m.upsert(r);
        }
        m
    }

    /// Routes in insertion order.
    pub fn routes(&self) -> &[ModRoute] {
        &self.routes
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether there are no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn position(&self, source: SourceId, destination: DestinationId) -> Option<usize> {
        self.routes
            .iter()
            .position(|r| r.source == source && r.destination == destination)
    }

    /// The route in a cell.
    pub fn get(&self, source: SourceId, destination: DestinationId) -> Option<&ModRoute> {
        self.position(source, destination).map(|i| &self.routes[i])
    }

    /// Amount in a cell, zero when empty.
    pub fn amount(&self, source: SourceId, destination: DestinationId) -> f32 {
        self.get(source, destination).map_or(0.0, |r| r.amount)
    }

    fn upsert(&mut self, route: ModRoute) {
        let route = ModRoute {
            amount: clamp_bipolar(route.amount),
            ..route
        };
        match self.position(route.source, route.destination) {
            Some(i) => self.routes[i] = route,
            None => self.routes.push(route),
        }
    }

    /// Set a cell's amount, creating an enabled route if the cell is empty.
    pub fn set_amount(
        &mut self,
        source: SourceId,
        destination: DestinationId,
        amount: f32,
    ) -> &mut Self {
        match self.position(source, destination) {
            Some(i) => self.routes[i].amount = clamp_bipolar(amount),
            None => self.routes.push(ModRoute::new(source, destination, amount)),
        }
        self
    }

    /// Flip a route's enabled flag. Empty cells are ignored.
    pub fn toggle(&mut self, source: SourceId, destination: DestinationId) -> &mut Self {
        if let Some(i) = self.position(source, destination) {
            self.routes[i].enabled = !self.routes[i].enabled;
        }
        self
    }

    /// Remove a route, returning it.
    pub fn remove(&mut self, source: SourceId, destination: DestinationId) -> Option<ModRoute> {
        self.position(source, destination).map(|i| self.routes.remove(i))
    }

    /// Routes leaving a source.
    pub fn routes_from(&self, source: SourceId) -> impl Iterator<Item = &ModRoute> {
        self.routes.iter().filter(move |r| r.source == source)
    }

    /// Routes arriving at a destination.
    pub fn routes_to(&self, destination: DestinationId) -> impl Iterator<Item = &ModRoute> {
        self.routes.iter().filter(move |r| r.destination == destination)
    }

    /// Sum of effective amounts arriving at a destination, clamped.
    pub fn total_to(&self, destination: DestinationId) -> f32 {
        clamp_bipolar(self.routes_to(destination).map(ModRoute::effective_amount).sum())
    }

    /// Remove every route.
    pub fn clear(&mut self) -> &mut Self {
        self.routes.clear();
        self
    }
}

/// A grid cell: row = source index, column = destination index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixCell {
    /// Source row.
    pub source: SourceId,
    /// Destination column.
    pub destination: DestinationId,
}

/// Controller for the matrix grid.
///
/// Drag a cell vertically to change its amount (up = more positive,
/// `Feel::sensitivity` of the bipolar span per pixel). Double-tap removes the
/// route; the alt or secondary modifier on press flips enabled.
#[derive(Debug, Clone)]
pub struct MatrixControl {
    bounds: Bounds,
    sources: usize,
    destinations: usize,
    feel: Feel,
    state: GestureState<MatrixCell, ModMatrix>,
}

impl MatrixControl {
    /// A `sources` x `destinations` grid over `bounds`. Ids are the row and
    /// column indices.
    pub fn new(bounds: Bounds, sources: usize, destinations: usize) -> Self {
        Self {
            bounds,
            sources,
            destinations,
            feel: Feel::default(),
            state: GestureState::default(),
        }
    }

    /// Override interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = feel;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<MatrixCell, ModMatrix>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<MatrixCell, ModMatrix> {
        self.state
    }

    /// The cell under `pos`.
    pub fn cell_at(&self, pos: Point) -> Option<MatrixCell> {
        let col = self.bounds.column_at(pos.x, self.destinations)?;
        let row = self.bounds.row_at(pos.y, self.sources)?;
        Some(MatrixCell {
            source: SourceId(u16::try_from(row).ok()?),
            destination: DestinationId(u16::try_from(col).ok()?),
        })
    }

    /// Rectangle of a cell.
    pub fn cell_bounds(&self, cell: MatrixCell) -> Bounds {
        self.bounds
            .row(usize::from(cell.source.0), self.sources)
            .column(usize::from(cell.destination.0), self.destinations)
    }
}

impl Control for MatrixControl {
    type Target = MatrixCell;
    type Value = ModMatrix;

    fn handle(&mut self, event: &PointerEvent, current: &ModMatrix) -> Update<ModMatrix> {
        match *event {
            PointerEvent::Down { pos, time, modifiers } => {
                let Some(cell) = self.cell_at(pos) else {
                    return Update::none();
                };
                let mut next = current.clone();
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    next.remove(cell.source, cell.destination);
                    return Update::one_shot(next);
                }
                if modifiers.alt || modifiers.secondary {
                    next.toggle(cell.source, cell.destination);
                    return Update::one_shot(next);
                }
                let amount = current.amount(cell.source, cell.destination);
                // Bipolar span is 2; progress runs in [0, 1].
                self.state.begin(cell, pos, next).progress = (amount + 1.0) * 0.5;
                Update::began()
            }
            PointerEvent::Move { pos, modifiers } => {
                let feel = self.feel;
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                let (_, dy) = session.advance(pos, &feel);
                let step = dy * feel.sensitivity_for(modifiers);
                session.progress = clamp_unit(session.progress - step);
                let cell = session.target;
                let mut next = session.start_value.clone();
                next.set_amount(cell.source, cell.destination, session.progress * 2.0 - 1.0);
                session.current = next.clone();
                Update::changed(next)
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => {
                if self.state.end().is_none() {
                    Update::none()
                } else {
                    Update::ended(None)
                }
            }
        }
    }

    fn gesture(&self) -> &GestureState<MatrixCell, ModMatrix> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<MatrixCell, ModMatrix> {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Modifiers, drive};

    const LFO: SourceId = SourceId(0);
    const ENV: SourceId = SourceId(1);
    const CUTOFF: DestinationId = DestinationId(0);
    const PITCH: DestinationId = DestinationId(1);

    #[test]
    fn one_route_per_cell() {
        let mut m = ModMatrix::new();
        m.set_amount(LFO, CUTOFF, 0.5).set_amount(LFO, CUTOFF, -0.25);
        assert_eq!(m.len(), 1);
        assert_eq!(m.amount(LFO, CUTOFF), -0.25);
    }

    #[test]
    fn amounts_clamped() {
        let m = ModMatrix::from_routes([ModRoute::new(LFO, PITCH, 4.0)]);
        assert_eq!(m.amount(LFO, PITCH), 1.0);
    }

    #[test]
    fn toggle_keeps_amount() {
        let mut m = ModMatrix::new();
        m.set_amount(ENV, CUTOFF, 0.6).toggle(ENV, CUTOFF);
        let r = m.get(ENV, CUTOFF).unwrap();
        assert!(!r.enabled);
        assert_eq!(r.amount, 0.6);
        assert_eq!(r.effective_amount(), 0.0);
    }

    #[test]
    fn routes_from_and_to() {
        let mut m = ModMatrix::new();
        m.set_amount(LFO, CUTOFF, 0.2)
            .set_amount(LFO, PITCH, 0.3)
            .set_amount(ENV, CUTOFF, 0.4);
        assert_eq!(m.routes_from(LFO).count(), 2);
        assert_eq!(m.routes_to(CUTOFF).count(), 2);
        assert!((m.total_to(CUTOFF) - 0.6).abs() < 1e-6);
        assert!(m.remove(LFO, PITCH).is_some());
        assert!(m.remove(LFO, PITCH).is_none());
    }

    fn grid() -> MatrixControl {
        // 2 sources x 2 destinations, 50 px cells.
        MatrixControl::new(Bounds::from_size(100.0, 100.0), 2, 2)
    }

    #[test]
    fn drag_up_creates_positive_route() {
        let mut c = grid();
        let ups = drive(
            &mut c,
            &[
                PointerEvent::down(75.0, 25.0, 0.0),
                PointerEvent::moved(75.0, -25.0),
                PointerEvent::up(75.0, -25.0),
            ],
            &ModMatrix::new(),
        );
        let m = ups.iter().rev().find_map(|u| u.value.clone()).unwrap();
        // 50 px * 0.004 = 0.2 of the unit progress = 0.4 bipolar.
        assert!((m.amount(LFO, PITCH) - 0.4).abs() < 1e-5);
    }

    #[test]
    fn double_tap_removes_route() {
        let mut m = ModMatrix::new();
        m.set_amount(ENV, CUTOFF, 0.5);
        let mut c = grid();
        c.handle(&PointerEvent::down(25.0, 75.0, 0.0), &m);
        c.handle(&PointerEvent::up(25.0, 75.0), &m);
        let u = c.handle(&PointerEvent::down(25.0, 75.0, 0.1), &m);
        assert!(u.value.unwrap().is_empty());
    }

    #[test]
    fn alt_press_toggles_enabled() {
        let mut m = ModMatrix::new();
        m.set_amount(ENV, CUTOFF, 0.5);
        let mut c = grid();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        let u = c.handle(&PointerEvent::down(25.0, 75.0, 0.0).with_modifiers(alt), &m);
        assert!(!u.value.unwrap().get(ENV, CUTOFF).unwrap().enabled);
        assert!(!c.is_dragging());
    }
}
