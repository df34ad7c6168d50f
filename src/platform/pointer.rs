//! Win32 pointer message decoding
//!
//! `WM_POINTER*` messages pack the pointer id and message flags into
//! `wParam` and the screen position into `lParam`. Decoding is plain bit
//! manipulation, kept free of Win32 types so it is testable everywhere.
//!
//! Finger counting: Win32 delivers one message per contact, so the
//! [`ContactTracker`] remembers which pointer ids are currently down.

use std::time::Duration;

use crate::domain::core::Point;
use crate::input::event::{InputEvent, InputKind};

pub const WM_POINTERUPDATE: u32 = 0x0245;
pub const WM_POINTERDOWN: u32 = 0x0246;
pub const WM_POINTERUP: u32 = 0x0247;
pub const WM_POINTERCAPTURECHANGED: u32 = 0x024C;

/// Contact is touching the surface (or a mouse button is pressed)
pub const POINTER_MESSAGE_FLAG_INCONTACT: u32 = 0x0004;
/// Contact was cancelled by the system
pub const POINTER_MESSAGE_FLAG_CANCELED: u32 = 0x8000;

/// Fields packed into a pointer message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMessage {
    pub pointer_id: u32,
    pub flags: u32,
    pub screen_x: i32,
    pub screen_y: i32,
}

impl PointerMessage {
    /// Unpacks raw `wParam`/`lParam` values
    pub fn decode(wparam: usize, lparam: isize) -> Self {
        Self {
            pointer_id: (wparam & 0xFFFF) as u32,
            flags: ((wparam >> 16) & 0xFFFF) as u32,
            // Coordinates are signed: secondary monitors can be left of or above the primary
            screen_x: (lparam & 0xFFFF) as u16 as i16 as i32,
            screen_y: ((lparam >> 16) & 0xFFFF) as u16 as i16 as i32,
        }
    }

    pub fn in_contact(&self) -> bool {
        self.flags & POINTER_MESSAGE_FLAG_INCONTACT != 0
    }

    pub fn cancelled(&self) -> bool {
        self.flags & POINTER_MESSAGE_FLAG_CANCELED != 0
    }
}

/// Tracks which pointers are currently in contact
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: Vec<u32>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts currently down
    pub fn count(&self) -> u32 {
        self.active.len() as u32
    }

    /// Converts a pointer message into an input event
    ///
    /// # Arguments
    /// * `message` - Window message id (`WM_POINTERDOWN`, ...)
    /// * `pointer` - Decoded message parameters
    /// * `client` - Pointer position already converted to client coordinates
    /// * `time` - Time since the input epoch
    ///
    /// # Returns
    /// None for hover updates, unknown pointers and unrelated messages
    pub fn translate(
        &mut self,
        message: u32,
        pointer: &PointerMessage,
        client: Point,
        time: Duration,
    ) -> Option<InputEvent> {
        let id = pointer.pointer_id;

        match message {
            WM_POINTERDOWN => {
                if !self.active.contains(&id) {
                    self.active.push(id);
                }
                let event = InputEvent::new(InputKind::TouchDown, client, time);
                Some(event.with_fingers(self.count()))
            }
            WM_POINTERUPDATE => {
                if !pointer.in_contact() || !self.active.contains(&id) {
                    return None;
                }
                let event = InputEvent::new(InputKind::TouchMoved, client, time);
                Some(event.with_fingers(self.count()))
            }
            WM_POINTERUP => {
                if !self.active.contains(&id) {
                    return None;
                }
                let fingers = self.count();
                self.active.retain(|active| *active != id);

                let kind = if pointer.cancelled() {
                    InputKind::TouchCancelled
                } else {
                    InputKind::TouchUp
                };
                Some(InputEvent::new(kind, client, time).with_fingers(fingers))
            }
            WM_POINTERCAPTURECHANGED => {
                if !self.active.contains(&id) {
                    return None;
                }
                let fingers = self.count();
                self.active.retain(|active| *active != id);
                Some(InputEvent::new(InputKind::TouchCancelled, client, time).with_fingers(fingers))
            }
            _ => None,
        }
    }
}
