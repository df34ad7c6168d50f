//! Input handling
//!
//! Turns platform pointer and keyboard activity into uniform events and
//! classifies them for the drawing session.

pub mod event;
pub mod keys;
pub mod recognizer;

pub use event::{classify, GesturePhase, InputEvent, InputKind, PathAction};
pub use keys::KeyCommand;
pub use recognizer::TapRecognizer;
