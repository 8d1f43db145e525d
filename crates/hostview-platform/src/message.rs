//! Messages posted to the renderer window.
//!
//! The encoding here is the renderer's compatibility boundary: the size
//! notification must stay bit-identical to a Win32 `WM_SIZE` with
//! `SIZE_RESTORED`, width in the low word and height in the high word.

use hostview_common::PixelSize;

/// `WM_SIZE`.
pub const WM_SIZE: u32 = 0x0005;
/// `WM_CLOSE`.
pub const WM_CLOSE: u32 = 0x0010;
/// `SIZE_RESTORED` state flag carried in `wParam`.
pub const SIZE_RESTORED: usize = 0;

/// A notification delivered to a native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    /// The window's client area changed to the given size.
    SizeChanged(PixelSize),
    /// Ask the window to close itself.
    Close,
}

/// Raw `(message, wParam, lParam)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedMessage {
    pub id: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl WindowMessage {
    pub fn encode(self) -> EncodedMessage {
        match self {
            Self::SizeChanged(size) => EncodedMessage {
                id: WM_SIZE,
                wparam: SIZE_RESTORED,
                lparam: pack_size(size),
            },
            Self::Close => EncodedMessage {
                id: WM_CLOSE,
                wparam: 0,
                lparam: 0,
            },
        }
    }
}

/// Pack a size as `MAKELPARAM(width, height)`.
///
/// Each dimension is truncated to 16 bits; the result is zero-extended.
pub fn pack_size(size: PixelSize) -> isize {
    let low = (size.width as u32) & 0xFFFF;
    let high = (size.height as u32) & 0xFFFF;
    ((high << 16) | low) as isize
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `LOWORD`/`HIWORD`, as the renderer reads the size.
    fn unpack_size(lparam: isize) -> PixelSize {
        let raw = lparam as u32;
        PixelSize::new((raw & 0xFFFF) as i32, (raw >> 16) as i32)
    }

    #[test]
    fn size_packs_width_low_height_high() {
        assert_eq!(pack_size(PixelSize::new(1920, 1080)), 0x0438_0780);
        assert_eq!(pack_size(PixelSize::new(800, 600)), (600 << 16) | 800);
    }

    #[test]
    fn size_message_is_wm_size_restored() {
        let encoded = WindowMessage::SizeChanged(PixelSize::new(1024, 768)).encode();
        assert_eq!(encoded.id, 0x0005);
        assert_eq!(encoded.wparam, 0);
        assert_eq!(unpack_size(encoded.lparam), PixelSize::new(1024, 768));
    }

    #[test]
    fn maximum_packed_dimensions_stay_positive() {
        let lparam = pack_size(PixelSize::new(0xFFFF, 0xFFFF));
        assert_eq!(lparam, 0xFFFF_FFFF_u32 as isize);
        assert_eq!(unpack_size(lparam), PixelSize::new(0xFFFF, 0xFFFF));
    }

    #[test]
    fn oversized_dimensions_truncate_to_16_bits() {
        let lparam = pack_size(PixelSize::new(0x1_0010, 0x2_0020));
        assert_eq!(unpack_size(lparam), PixelSize::new(0x10, 0x20));
    }

    #[test]
    fn close_message_has_no_payload() {
        let encoded = WindowMessage::Close.encode();
        assert_eq!(encoded.id, WM_CLOSE);
        assert_eq!((encoded.wparam, encoded.lparam), (0, 0));
    }
}
