//! Drawing window
//!
//! A fixed-size top-level window whose client area is the canvas. Pointer
//! messages are turned into input events for the controller, and every
//! paint blits the controller's cached frame through a DIB section.
//!
//! The per-window state lives in a `Box` whose pointer is stored in
//! `GWLP_USERDATA`. It is cleared on `WM_DESTROY`, before the box is freed.

use std::ffi::c_void;
use std::time::Instant;

use tiny_skia::Pixmap;
use windows::core::w;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, BitBlt, CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, EndPaint,
    InvalidateRect, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HDC,
    HGDIOBJ, PAINTSTRUCT, SRCCOPY,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GetMessageW, GetWindowLongPtrW, LoadCursorW, PostQuitMessage, RegisterClassW,
    SetWindowLongPtrW, ShowWindow, TranslateMessage, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT,
    GWLP_USERDATA, IDC_ARROW, MSG, SW_SHOW, WINDOW_EX_STYLE, WM_DESTROY, WM_ERASEBKGND,
    WM_KEYDOWN, WM_PAINT, WNDCLASSW, WS_CAPTION, WS_MINIMIZEBOX, WS_OVERLAPPED, WS_SYSMENU,
};

use crate::app::{AppController, AppError};
use crate::config::DrawingConfig;
use crate::input::KeyCommand;
use crate::platform::pointer::{
    ContactTracker, PointerMessage, WM_POINTERCAPTURECHANGED, WM_POINTERDOWN, WM_POINTERUP,
    WM_POINTERUPDATE,
};
use crate::platform::windows::{enable_dpi_awareness, enable_mouse_in_pointer, screen_to_client};
use crate::ui::renderer::pixmap_to_bgra;

/// Window management errors
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to register drawing window class")]
    WindowClassRegistrationFailed,

    #[error("Failed to create drawing window")]
    WindowCreationFailed,

    #[error("Failed to create memory device context")]
    MemoryDeviceContextFailed,

    #[error("Failed to create DIB section for frame")]
    DibSectionCreationFailed,

    #[error("Failed to select bitmap into memory DC")]
    BitmapSelectionFailed,

    #[error("Failed to copy frame to the window")]
    PresentFailed,

    #[error("Win32 call failed: {0}")]
    Win32(#[from] windows::core::Error),
}

/// State reachable from the window procedure
struct WindowState {
    controller: AppController,
    contacts: ContactTracker,
    /// Input timestamps are measured from here
    epoch: Instant,
}

/// Creates the drawing window and runs the message loop until it closes
pub fn run(config: &DrawingConfig) -> Result<(), AppError> {
    // Before any window exists, otherwise pointer positions are DPI-scaled
    if let Err(err) = enable_dpi_awareness() {
        log::warn!("Per-monitor DPI awareness unavailable: {}", err);
    }
    if let Err(err) = enable_mouse_in_pointer() {
        log::warn!("Mouse input will not be routed as pointer input: {}", err);
    }

    let controller = AppController::new(config)?;
    let size = controller.canvas_size();
    let mut state = Box::new(WindowState {
        controller,
        contacts: ContactTracker::new(),
        epoch: Instant::now(),
    });

    let class_name = w!("TactilePathsWindow");
    register_window_class(class_name)?;
    let hwnd = create_window(class_name, size.width as i32, size.height as i32)?;

    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, &mut *state as *mut WindowState as isize);
        ShowWindow(hwnd, SW_SHOW);
        InvalidateRect(hwnd, None, false);
    }
    log::info!("Drawing window open ({}x{})", size.width, size.height);

    let mut msg = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut msg, HWND(0), 0, 0) };
        if result.0 == 0 {
            break;
        }
        if result.0 == -1 {
            return Err(WindowError::Win32(windows::core::Error::from_win32()).into());
        }
        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    log::info!("Drawing window closed");
    drop(state);
    Ok(())
}

fn register_window_class(class_name: windows::core::PCWSTR) -> Result<(), WindowError> {
    let hinstance = unsafe { GetModuleHandleW(None)? };
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW)? };

    let wc = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(window_proc),
        hInstance: hinstance.into(),
        hCursor: cursor,
        lpszClassName: class_name,
        ..Default::default()
    };

    if unsafe { RegisterClassW(&wc) } == 0 {
        return Err(WindowError::WindowClassRegistrationFailed);
    }
    Ok(())
}

/// Creates a non-resizable window whose client area is `width` x `height`
fn create_window(
    class_name: windows::core::PCWSTR,
    width: i32,
    height: i32,
) -> Result<HWND, WindowError> {
    let hinstance = unsafe { GetModuleHandleW(None)? };
    let style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX;

    let mut frame = RECT {
        left: 0,
        top: 0,
        right: width,
        bottom: height,
    };
    unsafe { AdjustWindowRectEx(&mut frame, style, BOOL(0), WINDOW_EX_STYLE(0))? };

    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            class_name,
            w!("Tactile Paths"),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            frame.right - frame.left,
            frame.bottom - frame.top,
            None,
            None,
            hinstance,
            None,
        )
    };

    if hwnd.0 == 0 {
        return Err(WindowError::WindowCreationFailed);
    }
    Ok(hwnd)
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let state_ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut WindowState;
    if state_ptr.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }
    let state = unsafe { &mut *state_ptr };

    match msg {
        WM_POINTERDOWN | WM_POINTERUPDATE | WM_POINTERUP | WM_POINTERCAPTURECHANGED => {
            let pointer = PointerMessage::decode(wparam.0, lparam.0);
            let client = screen_to_client(hwnd, pointer.screen_x, pointer.screen_y);
            let time = state.epoch.elapsed();

            if let Some(event) = state.contacts.translate(msg, &pointer, client, time) {
                if state.controller.handle_input(event) {
                    unsafe { InvalidateRect(hwnd, None, false) };
                }
            }
            LRESULT(0)
        }
        WM_KEYDOWN => {
            let Some(command) = KeyCommand::from_vk_code(wparam.0 as u32) else {
                return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
            };
            if !state.controller.handle_key(command) {
                if let Err(err) = unsafe { DestroyWindow(hwnd) } {
                    log::error!("Failed to close drawing window: {}", err);
                }
            } else if state.controller.needs_redraw() {
                unsafe { InvalidateRect(hwnd, None, false) };
            }
            LRESULT(0)
        }
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
            match state.controller.frame() {
                Ok(pixmap) => {
                    if let Err(err) = present(hdc, pixmap) {
                        log::error!("Failed to present frame: {}", err);
                    }
                }
                Err(err) => log::error!("Failed to render frame: {}", err),
            }
            unsafe { EndPaint(hwnd, &ps) };
            LRESULT(0)
        }
        // The frame covers the whole client area
        WM_ERASEBKGND => LRESULT(1),
        WM_DESTROY => {
            unsafe {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                PostQuitMessage(0);
            }
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Copies the pixmap to `hdc` through a top-down 32-bit DIB section
fn present(hdc: HDC, pixmap: &Pixmap) -> Result<(), WindowError> {
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let pixels = pixmap_to_bgra(pixmap);

    unsafe {
        let memory_dc = CreateCompatibleDC(hdc);
        if memory_dc.0 == 0 {
            return Err(WindowError::MemoryDeviceContextFailed);
        }

        let mut bitmap_info = BITMAPINFO::default();
        bitmap_info.bmiHeader = BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        };

        let mut pixel_ptr: *mut c_void = std::ptr::null_mut();
        let dib = match CreateDIBSection(
            memory_dc,
            &bitmap_info,
            DIB_RGB_COLORS,
            &mut pixel_ptr,
            None,
            0,
        ) {
            Ok(bitmap) => bitmap,
            Err(_) => {
                DeleteDC(memory_dc);
                return Err(WindowError::DibSectionCreationFailed);
            }
        };
        let dib_object: HGDIOBJ = dib.into();

        if pixel_ptr.is_null() {
            DeleteObject(dib_object);
            DeleteDC(memory_dc);
            return Err(WindowError::DibSectionCreationFailed);
        }

        std::slice::from_raw_parts_mut(pixel_ptr as *mut u8, pixels.len())
            .copy_from_slice(&pixels);

        let old_bitmap = SelectObject(memory_dc, dib_object);
        if old_bitmap.0 == 0 {
            DeleteObject(dib_object);
            DeleteDC(memory_dc);
            return Err(WindowError::BitmapSelectionFailed);
        }

        let blit = BitBlt(hdc, 0, 0, width, height, memory_dc, 0, 0, SRCCOPY);

        SelectObject(memory_dc, old_bitmap);
        DeleteObject(dib_object);
        DeleteDC(memory_dc);

        if blit.is_err() {
            return Err(WindowError::PresentFailed);
        }
    }

    Ok(())
}
