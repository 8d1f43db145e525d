//! Window style bits used when turning a top-level window into a child.
//!
//! Values follow the Win32 `WS_*` encoding, which is what the renderer's
//! window reports through [`crate::NativeWindowApi::window_style`].

pub const WS_POPUP: u32 = 0x8000_0000;
pub const WS_CHILD: u32 = 0x4000_0000;
pub const WS_VISIBLE: u32 = 0x1000_0000;
pub const WS_CLIPSIBLINGS: u32 = 0x0400_0000;
pub const WS_CLIPCHILDREN: u32 = 0x0200_0000;

/// Caption, sizing frame, system menu and min/max boxes.
pub const DECORATION_MASK: u32 = 0x00CF_0000;

/// Style of the host-owned placeholder window.
pub const PLACEHOLDER_STYLE: u32 = WS_CHILD | WS_VISIBLE | WS_CLIPCHILDREN | WS_CLIPSIBLINGS;

/// Strip decorations and popup-ness, then mark the window as a visible,
/// clipping child.
pub fn embedded_child_style(style: u32) -> u32 {
    (style & !(DECORATION_MASK | WS_POPUP)) | PLACEHOLDER_STYLE
}
