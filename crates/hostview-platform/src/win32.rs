//! Win32 window API.
//!
//! Handles cross the trait boundary as `u64` and are turned back into
//! `HWND`s here; no other module touches raw window pointers.

use std::ffi::c_void;

use hostview_common::{PixelPoint, PixelSize, PlatformError, WindowHandle};
use ::windows::core::{w, PCWSTR};
use ::windows::Win32::Foundation::{
    GetLastError, SetLastError, HINSTANCE, HWND, LPARAM, RECT, WIN32_ERROR, WPARAM,
};
use ::windows::Win32::System::LibraryLoader::GetModuleHandleW;
use ::windows::Win32::UI::HiDpi::GetDpiForSystem;
use ::windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, FindWindowW, GetClientRect, GetWindowLongW, IsWindow,
    PostMessageW, SetParent, SetWindowLongW, SetWindowPos, GWL_STYLE, SWP_NOACTIVATE, SWP_NOMOVE,
    SWP_NOZORDER, WINDOW_EX_STYLE, WINDOW_STYLE,
};

use super::style::PLACEHOLDER_STYLE;
use super::{NativeWindowApi, Result, WindowMessage, WindowSignature, BASE_DPI};

pub struct Win32WindowApi;

impl Win32WindowApi {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Win32WindowApi {
    fn default() -> Self {
        Self::new()
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as isize as *mut c_void)
}

fn handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize as u64)
}

fn widestring(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

fn native_error(operation: &'static str, err: ::windows::core::Error) -> PlatformError {
    PlatformError::NativeApi {
        operation,
        code: err.code().0,
    }
}

fn last_error(operation: &'static str) -> PlatformError {
    PlatformError::NativeApi {
        operation,
        code: unsafe { GetLastError() }.0 as i32,
    }
}

impl NativeWindowApi for Win32WindowApi {
    fn create_child(&self, parent: WindowHandle, size: PixelSize) -> Result<WindowHandle> {
        unsafe {
            let instance = GetModuleHandleW(PCWSTR::null())
                .map_err(|e| native_error("GetModuleHandleW", e))?;
            let window = CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("STATIC"),
                w!(""),
                WINDOW_STYLE(PLACEHOLDER_STYLE),
                0,
                0,
                size.width,
                size.height,
                hwnd(parent),
                None,
                HINSTANCE(instance.0),
                None,
            )
            .map_err(|e| native_error("CreateWindowExW", e))?;
            tracing::debug!(parent = %parent, child = %handle(window), "CreateWindowExW placeholder");
            Ok(handle(window))
        }
    }

    fn destroy_window(&self, window: WindowHandle) -> Result<()> {
        unsafe { DestroyWindow(hwnd(window)) }.map_err(|e| native_error("DestroyWindow", e))
    }

    fn find_window(&self, signature: &WindowSignature) -> Option<WindowHandle> {
        let class_name = widestring(&signature.class_name);
        let title = widestring(&signature.title);
        let found = unsafe { FindWindowW(PCWSTR(class_name.as_ptr()), PCWSTR(title.as_ptr())) };
        match found {
            Ok(window) if !window.0.is_null() => Some(handle(window)),
            Ok(_) => None,
            Err(e) => {
                tracing::trace!(class = %signature.class_name, code = e.code().0, "FindWindowW miss");
                None
            }
        }
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        unsafe { IsWindow(hwnd(window)) }.as_bool()
    }

    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<()> {
        unsafe { SetParent(hwnd(child), hwnd(parent)) }
            .map(|_| ())
            .map_err(|e| native_error("SetParent", e))
    }

    fn window_style(&self, window: WindowHandle) -> Result<u32> {
        unsafe {
            SetLastError(WIN32_ERROR(0));
            let style = GetWindowLongW(hwnd(window), GWL_STYLE);
            if style == 0 && GetLastError().0 != 0 {
                return Err(last_error("GetWindowLongW"));
            }
            Ok(style as u32)
        }
    }

    fn set_window_style(&self, window: WindowHandle, style: u32) -> Result<()> {
        unsafe {
            SetLastError(WIN32_ERROR(0));
            let previous = SetWindowLongW(hwnd(window), GWL_STYLE, style as i32);
            if previous == 0 && GetLastError().0 != 0 {
                return Err(last_error("SetWindowLongW"));
            }
        }
        Ok(())
    }

    fn client_size(&self, window: WindowHandle) -> Result<PixelSize> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd(window), &mut rect) }
            .map_err(|e| native_error("GetClientRect", e))?;
        Ok(PixelSize::new(rect.right - rect.left, rect.bottom - rect.top))
    }

    fn set_window_size(&self, window: WindowHandle, size: PixelSize) -> Result<()> {
        unsafe {
            SetWindowPos(
                hwnd(window),
                HWND::default(),
                0,
                0,
                size.width,
                size.height,
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_NOMOVE,
            )
        }
        .map_err(|e| native_error("SetWindowPos", e))
    }

    fn set_window_rect(&self, window: WindowHandle, origin: PixelPoint, size: PixelSize) -> Result<()> {
        unsafe {
            SetWindowPos(
                hwnd(window),
                HWND::default(),
                origin.x,
                origin.y,
                size.width,
                size.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| native_error("SetWindowPos", e))
    }

    fn post_message(&self, window: WindowHandle, message: WindowMessage) -> Result<()> {
        let encoded = message.encode();
        unsafe {
            PostMessageW(
                hwnd(window),
                encoded.id,
                WPARAM(encoded.wparam),
                LPARAM(encoded.lparam),
            )
        }
        .map_err(|e| native_error("PostMessageW", e))
    }

    fn system_dpi_scale(&self) -> f64 {
        let dpi = unsafe { GetDpiForSystem() };
        if dpi == 0 {
            tracing::warn!("GetDpiForSystem returned 0; assuming 96 DPI");
            1.0
        } else {
            f64::from(dpi) / BASE_DPI
        }
    }
}
