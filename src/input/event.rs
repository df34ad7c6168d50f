//! Uniform input event record and its classification
//!
//! Every platform delivers pointer activity as an [`InputEvent`]. The
//! [`classify`] function runs the event through the tap machine and tells
//! the drawing session which handler to call, if any.

use std::time::Duration;

use crate::domain::core::{convert_to_point_in_scene, Point};
use crate::domain::tap::{TapMachine, TapOutcome};

/// Phase of a continuous recognized gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
}

/// Kind of input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Raw contact started
    TouchDown,
    /// Raw contact moved while down
    TouchMoved,
    /// Raw contact lifted
    TouchUp,
    /// Platform lost the contact
    TouchCancelled,
    /// Recognized single tap, delivered after its `TouchUp`
    Tap,
    /// Double tap recognized by the platform itself
    DoubleTap,
    /// Recognized pan gesture
    Pan(GesturePhase),
}

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub point: Point,
    /// Number of contacts down when the event was produced
    pub finger_count: u32,
    /// Time since the input epoch
    pub time: Duration,
}

impl InputEvent {
    /// Creates a single-finger event
    pub fn new(kind: InputKind, point: Point, time: Duration) -> Self {
        Self {
            kind,
            point,
            finger_count: 1,
            time,
        }
    }

    /// Returns a copy with a different finger count
    pub fn with_fingers(mut self, finger_count: u32) -> Self {
        self.finger_count = finger_count;
        self
    }

    /// Returns a copy with the point converted from view to scene space
    pub fn in_scene(mut self, view_height: f32) -> Self {
        self.point = convert_to_point_in_scene(self.point, view_height);
        self
    }
}

/// Handler the drawing session must run for a classified event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathAction {
    TouchDown(Point),
    TouchUp(Point),
    TouchMoved(Point),
    DoubleTap(Point),
    Cancelled,
}

impl PathAction {
    /// Maps a tap machine outcome to the handler it triggers
    pub fn from_outcome(outcome: TapOutcome) -> Option<Self> {
        match outcome {
            TapOutcome::SingleTouchDown(point) => Some(PathAction::TouchDown(point)),
            TapOutcome::SingleTouchUp(point) => Some(PathAction::TouchUp(point)),
            TapOutcome::SingleTouchMoved(point) => Some(PathAction::TouchMoved(point)),
            TapOutcome::DoubleTap(point) => Some(PathAction::DoubleTap(point)),
            TapOutcome::Cancelled => Some(PathAction::Cancelled),
            TapOutcome::Ignored => None,
        }
    }
}

/// Classifies an input event, advancing the tap machine
///
/// Events with anything but exactly one finger are ignored without
/// touching the tap machine.
///
/// # Returns
/// The session handler to run, or None if the event has no effect
pub fn classify(event: &InputEvent, tap: &mut TapMachine) -> Option<PathAction> {
    if event.finger_count != 1 {
        log::debug!(
            "Ignoring {:?} with {} fingers",
            event.kind,
            event.finger_count
        );
        return None;
    }

    let outcome = match event.kind {
        InputKind::TouchDown => tap.touch_down(event.point, event.time),
        InputKind::TouchMoved => tap.touch_moved(event.point),
        InputKind::TouchUp => tap.touch_up(event.point),
        InputKind::TouchCancelled => tap.cancel(),
        InputKind::Tap => {
            tap.tap_recognized();
            TapOutcome::Ignored
        }
        InputKind::DoubleTap => {
            tap.reset();
            TapOutcome::DoubleTap(event.point)
        }
        InputKind::Pan(GesturePhase::Began | GesturePhase::Changed) => {
            tap.touch_moved(event.point)
        }
        InputKind::Pan(GesturePhase::Ended) => TapOutcome::Ignored,
    };

    PathAction::from_outcome(outcome)
}
