//! Tap gesture synthesis
//!
//! Win32 pointer messages only describe raw contacts. This recognizer
//! watches the raw stream and emits a `Tap` event right after a `TouchUp`
//! when the contact was short and stayed within the touch slop.

use std::time::Duration;

use crate::config::TapConfig;
use crate::domain::core::Point;
use crate::input::event::{InputEvent, InputKind};

/// Contact currently being watched
#[derive(Debug, Clone, Copy)]
struct PendingContact {
    origin: Point,
    started: Duration,
}

/// Recognizes single taps from raw touch events
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    max_duration: Duration,
    slop: f32,
    pending: Option<PendingContact>,
}

impl TapRecognizer {
    pub fn new(config: &TapConfig) -> Self {
        Self {
            max_duration: config.max_duration(),
            slop: config.slop,
            pending: None,
        }
    }

    /// Observes a raw event
    ///
    /// # Returns
    /// A synthesized `Tap` event when `event` completes a tap
    pub fn observe(&mut self, event: &InputEvent) -> Option<InputEvent> {
        if event.finger_count != 1 {
            self.pending = None;
            return None;
        }

        match event.kind {
            InputKind::TouchDown => {
                self.pending = Some(PendingContact {
                    origin: event.point,
                    started: event.time,
                });
                None
            }
            InputKind::TouchMoved => {
                if let Some(pending) = self.pending {
                    if pending.origin.distance_to(&event.point) > self.slop {
                        self.pending = None;
                    }
                }
                None
            }
            InputKind::TouchUp => {
                let pending = self.pending.take()?;
                let held = event.time.saturating_sub(pending.started);
                let travelled = pending.origin.distance_to(&event.point);

                if held <= self.max_duration && travelled <= self.slop {
                    Some(InputEvent::new(InputKind::Tap, event.point, event.time))
                } else {
                    None
                }
            }
            InputKind::TouchCancelled => {
                self.pending = None;
                None
            }
            InputKind::Tap | InputKind::DoubleTap | InputKind::Pan(_) => None,
        }
    }
}
