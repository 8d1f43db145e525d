//! Scriptable in-memory window API that records every call.
//!
//! Used by tests across the workspace to assert which native operations
//! the embedding core issued, and in which order.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use hostview_common::{PixelPoint, PixelSize, PlatformError, WindowHandle};

use super::{NativeWindowApi, Result, WindowMessage, WindowSignature};

/// One native operation, as observed by [`RecordingWindowApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    CreateChild { parent: WindowHandle, size: PixelSize },
    Destroy(WindowHandle),
    Find(WindowSignature),
    SetParent { child: WindowHandle, parent: WindowHandle },
    SetStyle { window: WindowHandle, style: u32 },
    SetSize { window: WindowHandle, size: PixelSize },
    SetRect { window: WindowHandle, origin: PixelPoint, size: PixelSize },
    Post { window: WindowHandle, message: WindowMessage },
}

#[derive(Debug)]
struct State {
    calls: Vec<NativeCall>,
    next_handle: u64,
    live: HashSet<WindowHandle>,
    styles: HashMap<WindowHandle, u32>,
    sizes: HashMap<WindowHandle, PixelSize>,
    origins: HashMap<WindowHandle, PixelPoint>,
    renderer: Option<WindowHandle>,
    reveal_after: u32,
    lookups: u32,
    client_size: PixelSize,
    create_error: Option<i32>,
    resize_error: Option<i32>,
    dpi_scale: f64,
}

pub struct RecordingWindowApi {
    state: Mutex<State>,
}

impl RecordingWindowApi {
    /// An API where no renderer window ever appears.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                calls: Vec::new(),
                next_handle: 0x100,
                live: HashSet::new(),
                styles: HashMap::new(),
                sizes: HashMap::new(),
                origins: HashMap::new(),
                renderer: None,
                reveal_after: 0,
                lookups: 0,
                client_size: PixelSize::new(0, 0),
                create_error: None,
                resize_error: None,
                dpi_scale: 1.0,
            }),
        }
    }

    /// The renderer window becomes discoverable on lookup number `after + 1`.
    pub fn with_renderer_window(self, window: WindowHandle, style: u32, after: u32) -> Self {
        {
            let mut state = self.lock();
            state.renderer = Some(window);
            state.reveal_after = after;
            state.live.insert(window);
            state.styles.insert(window, style);
        }
        self
    }

    /// Client size reported for every window.
    pub fn with_client_size(self, size: PixelSize) -> Self {
        self.lock().client_size = size;
        self
    }

    pub fn with_dpi_scale(self, scale: f64) -> Self {
        self.lock().dpi_scale = scale;
        self
    }

    /// Make `create_child` fail with the given platform error code.
    pub fn failing_create(self, code: i32) -> Self {
        self.lock().create_error = Some(code);
        self
    }

    /// Make `set_window_size` and `set_window_rect` fail with the given platform error code.
    pub fn set_resize_failure(&self, code: Option<i32>) {
        self.lock().resize_error = code;
    }

    /// Simulate the renderer closing its window.
    pub fn remove_window(&self, window: WindowHandle) {
        self.lock().live.remove(&window);
    }

    pub fn calls(&self) -> Vec<NativeCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Number of `find_window` calls so far.
    pub fn lookups(&self) -> u32 {
        self.lock().lookups
    }

    /// Last size applied to a window, if any.
    pub fn size_of(&self, window: WindowHandle) -> Option<PixelSize> {
        self.lock().sizes.get(&window).copied()
    }

    /// Last position applied through `set_window_rect`, if any.
    pub fn origin_of(&self, window: WindowHandle) -> Option<PixelPoint> {
        self.lock().origins.get(&window).copied()
    }

    pub fn style_of(&self, window: WindowHandle) -> Option<u32> {
        self.lock().styles.get(&window).copied()
    }

    pub fn is_live(&self, window: WindowHandle) -> bool {
        self.lock().live.contains(&window)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for RecordingWindowApi {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeWindowApi for RecordingWindowApi {
    fn create_child(&self, parent: WindowHandle, size: PixelSize) -> Result<WindowHandle> {
        let mut state = self.lock();
        state.calls.push(NativeCall::CreateChild { parent, size });
        if let Some(code) = state.create_error {
            return Err(PlatformError::NativeApi {
                operation: "create_child",
                code,
            });
        }
        let handle = WindowHandle(state.next_handle);
        state.next_handle += 1;
        state.live.insert(handle);
        state.sizes.insert(handle, size);
        Ok(handle)
    }

    fn destroy_window(&self, window: WindowHandle) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(NativeCall::Destroy(window));
        state.live.remove(&window);
        Ok(())
    }

    fn find_window(&self, signature: &WindowSignature) -> Option<WindowHandle> {
        let mut state = self.lock();
        state.calls.push(NativeCall::Find(signature.clone()));
        state.lookups += 1;
        let renderer = state.renderer?;
        if state.lookups > state.reveal_after && state.live.contains(&renderer) {
            Some(renderer)
        } else {
            None
        }
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        self.lock().live.contains(&window)
    }

    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<()> {
        self.lock().calls.push(NativeCall::SetParent { child, parent });
        Ok(())
    }

    fn window_style(&self, window: WindowHandle) -> Result<u32> {
        Ok(self.lock().styles.get(&window).copied().unwrap_or(0))
    }

    fn set_window_style(&self, window: WindowHandle, style: u32) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(NativeCall::SetStyle { window, style });
        state.styles.insert(window, style);
        Ok(())
    }

    fn client_size(&self, _window: WindowHandle) -> Result<PixelSize> {
        Ok(self.lock().client_size)
    }

    fn set_window_size(&self, window: WindowHandle, size: PixelSize) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(NativeCall::SetSize { window, size });
        if let Some(code) = state.resize_error {
            return Err(PlatformError::NativeApi {
                operation: "set_window_size",
                code,
            });
        }
        state.sizes.insert(window, size);
        Ok(())
    }

    fn set_window_rect(&self, window: WindowHandle, origin: PixelPoint, size: PixelSize) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(NativeCall::SetRect { window, origin, size });
        if let Some(code) = state.resize_error {
            return Err(PlatformError::NativeApi {
                operation: "set_window_rect",
                code,
            });
        }
        state.origins.insert(window, origin);
        state.sizes.insert(window, size);
        Ok(())
    }

    fn post_message(&self, window: WindowHandle, message: WindowMessage) -> Result<()> {
        self.lock().calls.push(NativeCall::Post { window, message });
        Ok(())
    }

    fn system_dpi_scale(&self) -> f64 {
        self.lock().dpi_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature() -> WindowSignature {
        WindowSignature::new("cls", "title")
    }

    #[test]
    fn renderer_window_revealed_after_lookups() {
        let api = RecordingWindowApi::new().with_renderer_window(WindowHandle(9), 0, 2);
        assert!(api.find_window(&signature()).is_none());
        assert!(api.find_window(&signature()).is_none());
        assert_eq!(api.find_window(&signature()), Some(WindowHandle(9)));
        assert_eq!(api.lookups(), 3);
    }

    #[test]
    fn removed_window_is_no_longer_found() {
        let api = RecordingWindowApi::new().with_renderer_window(WindowHandle(9), 0, 0);
        api.remove_window(WindowHandle(9));
        assert!(api.find_window(&signature()).is_none());
        assert!(!api.is_window(WindowHandle(9)));
    }

    #[test]
    fn create_allocates_distinct_live_handles() {
        let api = RecordingWindowApi::new();
        let a = api.create_child(WindowHandle(1), PixelSize::new(10, 10)).unwrap();
        let b = api.create_child(WindowHandle(1), PixelSize::new(10, 10)).unwrap();
        assert_ne!(a, b);
        assert!(api.is_live(a));
        api.destroy_window(a).unwrap();
        assert!(!api.is_live(a));
    }

    #[test]
    fn failing_create_reports_code() {
        let api = RecordingWindowApi::new().failing_create(1407);
        let err = api
            .create_child(WindowHandle(1), PixelSize::new(10, 10))
            .unwrap_err();
        assert_eq!(err.code(), Some(1407));
    }

    #[test]
    fn calls_are_recorded_in_order() {
        let api = RecordingWindowApi::new();
        let w = WindowHandle(5);
        api.set_window_size(w, PixelSize::new(3, 4)).unwrap();
        api.post_message(w, WindowMessage::Close).unwrap();
        assert_eq!(
            api.calls(),
            vec![
                NativeCall::SetSize {
                    window: w,
                    size: PixelSize::new(3, 4)
                },
                NativeCall::Post {
                    window: w,
                    message: WindowMessage::Close
                },
            ]
        );
        api.clear_calls();
        assert!(api.calls().is_empty());
    }

    #[test]
    fn resize_failure_is_switchable() {
        let api = RecordingWindowApi::new();
        api.set_resize_failure(Some(5));
        assert!(api.set_window_size(WindowHandle(1), PixelSize::new(1, 1)).is_err());
        assert!(api
            .set_window_rect(WindowHandle(1), PixelPoint::new(2, 2), PixelSize::new(1, 1))
            .is_err());
        api.set_resize_failure(None);
        assert!(api.set_window_size(WindowHandle(1), PixelSize::new(1, 1)).is_ok());
        assert_eq!(api.size_of(WindowHandle(1)), Some(PixelSize::new(1, 1)));
        assert_eq!(api.origin_of(WindowHandle(1)), None);
    }

    #[test]
    fn rect_records_origin_and_size() {
        let api = RecordingWindowApi::new();
        let w = WindowHandle(7);
        api.set_window_rect(w, PixelPoint::new(336, 32), PixelSize::new(928, 700))
            .unwrap();
        assert_eq!(api.origin_of(w), Some(PixelPoint::new(336, 32)));
        assert_eq!(api.size_of(w), Some(PixelSize::new(928, 700)));
        assert_eq!(
            api.calls(),
            vec![NativeCall::SetRect {
                window: w,
                origin: PixelPoint::new(336, 32),
                size: PixelSize::new(928, 700)
            }]
        );
    }
}
