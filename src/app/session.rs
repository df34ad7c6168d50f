//! Drawing session context
//!
//! The session owns everything that changes while the user draws: the path
//! accumulator, the tap and path state machines and the ids of transient
//! markers. Handlers receive the canvas explicitly so the session holds no
//! reference to any view or scene.

use crate::app::state::PathState;
use crate::config::DrawingConfig;
use crate::domain::core::Point;
use crate::domain::path::{Path, PathAccumulator};
use crate::domain::tap::{TapMachine, TapState};
use crate::input::event::{classify, InputEvent, InputKind, PathAction};
use crate::ui::scene::{Canvas, Marker, Polyline, Shape, ShapeId};

/// Drawing session state
#[derive(Debug)]
pub struct DrawingSession {
    paths: PathAccumulator,
    tap: TapMachine,
    state: PathState,
    spot_radius: f32,
    follow_touch: bool,
    /// Marker shown under the finger before a path is started
    provisional: Option<ShapeId>,
    /// Anchor highlights from the last touch-down
    anchors: Vec<ShapeId>,
    /// Polyline shape of the path under construction
    current_shape: Option<ShapeId>,
}

impl DrawingSession {
    /// Creates an empty session configured from `config`
    pub fn new(config: &DrawingConfig) -> Self {
        Self {
            paths: PathAccumulator::new(),
            tap: TapMachine::new(config.double_tap_interval(), config.stale_double_tap),
            state: PathState::NoPath,
            spot_radius: config.spot_radius,
            follow_touch: config.follow_touch,
            provisional: None,
            anchors: Vec::new(),
            current_shape: None,
        }
    }

    pub fn paths(&self) -> &PathAccumulator {
        &self.paths
    }

    pub fn path_state(&self) -> PathState {
        self.state
    }

    pub fn tap_state(&self) -> TapState {
        self.tap.state()
    }

    pub fn spot_radius(&self) -> f32 {
        self.spot_radius
    }

    /// Classifies an event (already in scene space) and runs its handler
    ///
    /// A recognized tap only arms double-tap detection while no path is
    /// open, so quick taps inside a path each commit a point.
    ///
    /// # Returns
    /// The action that was dispatched, if any
    pub fn handle_event<C: Canvas>(
        &mut self,
        event: &InputEvent,
        canvas: &mut C,
    ) -> Option<PathAction> {
        if event.kind == InputKind::Tap && !self.state.accepts_double_tap() {
            log::debug!("Tap in {:?} does not arm double tap", self.state);
            return None;
        }

        let action = classify(event, &mut self.tap)?;
        self.dispatch(action, canvas);
        Some(action)
    }

    /// Runs the handler for an already classified action
    pub fn dispatch<C: Canvas>(&mut self, action: PathAction, canvas: &mut C) {
        match action {
            PathAction::TouchDown(point) => self.on_single_touch_down(point, canvas),
            PathAction::TouchUp(point) => self.on_single_touch_up(point, canvas),
            PathAction::TouchMoved(point) => self.on_single_touch_moved(point, canvas),
            PathAction::DoubleTap(point) => self.on_double_tap(point, canvas),
            PathAction::Cancelled => self.on_cancelled(canvas),
        }
    }

    /// Provisional touch-down: visual feedback only, never a mutation
    pub fn on_single_touch_down<C: Canvas>(&mut self, point: Point, canvas: &mut C) {
        match self.state {
            PathState::NoPath => {
                log::debug!("NoPath: touch down at ({}, {})", point.x, point.y);
                let moved = self
                    .provisional
                    .is_some_and(|id| canvas.move_shape(id, point));
                if !moved {
                    let marker = Marker::provisional(point, self.spot_radius);
                    self.provisional = Some(canvas.add_shape(Shape::Marker(marker)));
                }
            }
            PathState::StartPoint => {}
            PathState::EndPath => {
                self.clear_anchors(canvas);
                for start in self.paths.starts_near(&point, self.spot_radius) {
                    log::debug!("EndPath: anchor at ({}, {})", start.x, start.y);
                    let marker = Marker::anchor(start, self.spot_radius);
                    self.anchors.push(canvas.add_shape(Shape::Marker(marker)));
                }
            }
        }
    }

    /// Confirmed tap: the only place paths are created, extended or closed
    pub fn on_single_touch_up<C: Canvas>(&mut self, point: Point, canvas: &mut C) {
        match self.state {
            PathState::NoPath => {
                if let Some(id) = self.provisional.take() {
                    canvas.remove_shape(id);
                }

                let path = Path::new(point);
                canvas.add_shape(Shape::Marker(Marker::spot(point, self.spot_radius)));
                self.current_shape = Some(canvas.add_shape(Shape::Polyline(
                    Polyline::from_path(&path),
                )));
                self.paths.push(path);
                log::info!(
                    "Path {} started at ({}, {})",
                    self.paths.len(),
                    point.x,
                    point.y
                );
            }
            PathState::StartPoint => {
                let Some(path) = self.paths.current_mut() else {
                    log::warn!("StartPoint without an open path, resetting");
                    self.state = PathState::NoPath;
                    return;
                };
                if let Err(err) = path.add_line(point) {
                    log::warn!("Cannot extend path: {}", err);
                    return;
                }
                log::debug!("StartPoint: line to ({}, {})", point.x, point.y);
                canvas.add_shape(Shape::Marker(Marker::spot(point, self.spot_radius)));
                self.refresh_current_shape(canvas);
            }
            PathState::EndPath => {
                if let Some(path) = self.paths.current_mut() {
                    path.close();
                }
                self.refresh_current_shape(canvas);
                self.current_shape = None;
                self.clear_anchors(canvas);
                log::info!("Path {} closed", self.paths.len());
            }
        }

        let next = self.state.after_touch_up();
        log::debug!("path state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Clears everything when idle; ignored while a path is open
    pub fn on_double_tap<C: Canvas>(&mut self, point: Point, canvas: &mut C) {
        if !self.state.accepts_double_tap() {
            log::debug!(
                "Double tap at ({}, {}) ignored in {:?}",
                point.x,
                point.y,
                self.state
            );
            return;
        }
        self.clear(canvas);
    }

    /// Removes every path and shape
    ///
    /// # Returns
    /// false if a path is open and nothing was cleared
    pub fn clear<C: Canvas>(&mut self, canvas: &mut C) -> bool {
        if !self.state.accepts_double_tap() {
            return false;
        }

        log::info!("Clearing {} paths", self.paths.len());
        self.paths.clear();
        canvas.remove_all();
        self.provisional = None;
        self.anchors.clear();
        self.current_shape = None;
        true
    }

    /// Repositions the provisional marker when following the finger
    pub fn on_single_touch_moved<C: Canvas>(&mut self, point: Point, canvas: &mut C) {
        if !self.follow_touch || self.state.is_drawing() {
            return;
        }
        if let Some(id) = self.provisional {
            canvas.move_shape(id, point);
        }
    }

    /// Drops transient markers of a contact the platform cancelled
    pub fn on_cancelled<C: Canvas>(&mut self, canvas: &mut C) {
        log::debug!("Touch cancelled in {:?}", self.state);
        if let Some(id) = self.provisional.take() {
            canvas.remove_shape(id);
        }
        self.clear_anchors(canvas);
    }

    fn refresh_current_shape<C: Canvas>(&mut self, canvas: &mut C) {
        let (Some(id), Some(path)) = (self.current_shape, self.paths.current()) else {
            return;
        };
        canvas.replace_shape(id, Shape::Polyline(Polyline::from_path(path)));
    }

    fn clear_anchors<C: Canvas>(&mut self, canvas: &mut C) {
        for id in self.anchors.drain(..) {
            canvas.remove_shape(id);
        }
    }
}
