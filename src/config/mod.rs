//! Configuration module for tactile-paths
//!
//! Holds the user-facing drawing configuration shared between the input
//! layer, the drawing session and the renderer, and loads it from TOML.

pub mod drawing;

pub use drawing::{ConfigError, DrawingConfig, RulerConfig, TapConfig};
