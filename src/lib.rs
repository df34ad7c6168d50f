//! Tactile-Paths: tap-driven polyline drawing for Windows touch screens
//!
//! Single taps build closed polylines one point at a time, a double tap
//! while idle clears the drawing. Everything except the window and Win32
//! glue is platform independent:
//!
//! - `domain`: points, paths and the tap state machine
//! - `input`: uniform input events, tap recognition and event classification
//! - `app`: the drawing session, the path state machine and the controller
//! - `ui`: retained scene, ruler layout and tiny-skia rendering
//! - `platform`: pointer message decoding and Win32 helpers

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod platform;
pub mod ui;

pub use app::{AppController, AppError};
pub use config::DrawingConfig;
