//! Inbound drag events.

use super::effect::Modifiers;
use super::transfer::DataTransfer;
use serde::{Deserialize, Serialize};

/// Identity of an element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// The kinds of drag events a surface receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragEventKind {
    Start,
    End,
    Enter,
    Over,
    Leave,
    Drop,
}

/// A platform drag event.
pub struct DragEvent<'a> {
    /// Pointer position in screen coordinates.
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
    /// Element the platform reports as the event target.
    pub target: Option<TargetId>,
    /// Legacy alias for `target` some platforms fill instead.
    pub src_element: Option<TargetId>,
    pub transfer: &'a mut dyn DataTransfer,
}

impl<'a> DragEvent<'a> {
    pub fn new(x: f32, y: f32, transfer: &'a mut dyn DataTransfer) -> Self {
        Self {
            x,
            y,
            modifiers: Modifiers::default(),
            target: None,
            src_element: None,
            transfer,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    /// The element actually under the pointer, whichever accessor carries it.
    pub fn pointer_target(&self) -> Option<TargetId> {
        self.target.or(self.src_element)
    }
}

/// What the host should do with the platform's default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Let the platform handle the event.
    Continue,
    /// Suppress the default handling; the surface accepts the drop.
    PreventDefault,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dragdrop::transfer::MemoryTransfer;

    #[test]
    fn test_pointer_target_falls_back_to_src_element() {
        let mut transfer = MemoryTransfer::new();
        let mut event = DragEvent::new(0.0, 0.0, &mut transfer);
        assert_eq!(event.pointer_target(), None);

        event.src_element = Some(TargetId(7));
        assert_eq!(event.pointer_target(), Some(TargetId(7)));

        event.target = Some(TargetId(3));
        assert_eq!(event.pointer_target(), Some(TargetId(3)));
    }
}
