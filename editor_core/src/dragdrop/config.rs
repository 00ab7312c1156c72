//! Drag-and-drop settings.

use super::effect::CopyModifier;
use serde::{Deserialize, Serialize};

/// Settings for a [`DragDropHandler`](super::DragDropHandler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragDropConfig {
    /// Modifier that forces a copy.
    pub copy_modifier: CopyModifier,
    /// Format the dragged text is stored under in the transport.
    pub payload_format: String,
    /// Visual state applied to the surface while a drag is over it.
    pub dragging_class: String,
    /// Class of the marker standing in for the origin selection.
    pub marker_class: String,
    /// Attach the blank drag image to the surface in `DragDropHandler::install`.
    /// Some platforms only honour a drag image that is part of the document.
    pub attach_drag_image: bool,
}

impl Default for DragDropConfig {
    fn default() -> Self {
        Self {
            copy_modifier: CopyModifier::platform_default(),
            payload_format: "Text".to_string(),
            dragging_class: "ace_dragging".to_string(),
            marker_class: "ace_selection".to_string(),
            attach_drag_image: false,
        }
    }
}
