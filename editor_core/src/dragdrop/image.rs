//! The blank drag image shared by every editor surface.
//!
//! Dragged text is tracked by the in-document cursor, so the platform's own
//! drag feedback is replaced by a transparent 1x1 GIF. The image is decoded
//! once on first use and never mutated afterwards.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;

/// Transparent 1x1 GIF.
const BLANK_GIF_BASE64: &str = "R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";

/// An encoded image used as drag feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragImage {
    pub width: u16,
    pub height: u16,
    /// Encoded GIF bytes.
    pub data: Vec<u8>,
}

impl DragImage {
    /// Decodes a base64 GIF, reading its logical screen size from the header.
    fn from_base64_gif(encoded: &str) -> Self {
        let data = match STANDARD.decode(encoded) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("Failed to decode drag image: {}", err);
                Vec::new()
            }
        };
        let (width, height) = match data.get(6..10) {
            Some(&[w0, w1, h0, h1]) => (u16::from_le_bytes([w0, w1]), u16::from_le_bytes([h0, h1])),
            _ => (0, 0),
        };
        Self {
            width,
            height,
            data,
        }
    }

    /// Returns true if the bytes carry a GIF signature.
    pub fn is_gif(&self) -> bool {
        self.data.starts_with(b"GIF8")
    }
}

static BLANK_DRAG_IMAGE: Lazy<DragImage> = Lazy::new(|| DragImage::from_base64_gif(BLANK_GIF_BASE64));

/// Returns the process-wide blank drag image.
pub fn blank_drag_image() -> &'static DragImage {
    &BLANK_DRAG_IMAGE
}
