//! General Windows platform utilities
//!
//! Process-wide setup and coordinate helpers that don't belong to the
//! drawing window itself.

use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::Graphics::Gdi::ScreenToClient;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::Input::Pointer::EnableMouseInPointer;

use crate::domain::core::Point;

/// Opts the process into per-monitor DPI awareness
///
/// Must run before any window is created, otherwise pointer coordinates are
/// scaled and no longer match canvas pixels.
pub fn enable_dpi_awareness() -> windows::core::Result<()> {
    unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
}

/// Routes mouse input through `WM_POINTER*` so mouse and touch share one path
pub fn enable_mouse_in_pointer() -> windows::core::Result<()> {
    unsafe { EnableMouseInPointer(true) }
}

/// Converts a screen position to client coordinates of `hwnd`
///
/// # Returns
/// The client position, or the unconverted position if Win32 rejects it
pub fn screen_to_client(hwnd: HWND, x: i32, y: i32) -> Point {
    let mut point = POINT { x, y };
    let converted = unsafe { ScreenToClient(hwnd, &mut point) };
    if !converted.as_bool() {
        log::warn!("ScreenToClient failed for ({}, {})", x, y);
    }
    Point::new(point.x as f32, point.y as f32)
}
