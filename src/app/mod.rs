//! Application orchestration layer
//!
//! This module coordinates between input, domain, UI, and platform layers.
//! It owns the drawing session and the path state machine.

pub mod controller;
pub mod session;
pub mod state;

pub use controller::{AppController, AppError};
