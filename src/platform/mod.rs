//! Platform-specific Windows implementations
//!
//! Pointer message decoding is plain data and builds everywhere. The Win32
//! helpers are only compiled on Windows.

pub mod pointer;
#[cfg(windows)]
pub mod windows;
