//! Domain logic and core data structures
//!
//! This module contains pure drawing logic that is independent
//! of Win32 APIs, rasterization and platform-specific implementations.

pub mod core;
pub mod path;
pub mod tap;
