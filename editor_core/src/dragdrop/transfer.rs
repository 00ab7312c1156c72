//! The transport carrying a drag payload between source and target.

use super::effect::{DropEffect, EffectAllowed};
use super::image::DragImage;
use std::collections::HashMap;
use thiserror::Error;

/// Failure reading a transport property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The source withholds the property, e.g. an untrusted foreign application.
    #[error("transport property `{0}` is not readable")]
    Unreadable(&'static str),
}

/// Payload carrier handed to every drag event.
pub trait DataTransfer {
    /// Returns the payload stored under a format, or an empty string.
    fn get_data(&self, format: &str) -> String;

    /// Stores a payload under a format.
    fn set_data(&mut self, format: &str, data: &str);

    /// Reads the raw allowed-effects token.
    fn effect_allowed(&self) -> Result<String, TransferError>;

    fn set_effect_allowed(&mut self, effect: EffectAllowed);

    /// Reads the raw drop effect token.
    fn drop_effect(&self) -> String;

    fn set_drop_effect(&mut self, effect: DropEffect);

    /// Replaces the platform's drag feedback image. Transports without
    /// drag image support ignore the call.
    fn set_drag_image(&mut self, _image: &'static DragImage, _x: i32, _y: i32) {}

    /// Decodes the allowed effects, treating a failed read as `Uninitialized`.
    fn allowed_effects(&self) -> EffectAllowed {
        match self.effect_allowed() {
            Ok(token) => EffectAllowed::parse(&token),
            Err(err) => {
                log::warn!("{}; assuming uninitialized", err);
                EffectAllowed::Uninitialized
            }
        }
    }
}

/// An in-process transport.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransfer {
    /// Data by format.
    data: HashMap<String, String>,
    /// Raw allowed-effects token.
    effect_allowed: String,
    /// Raw drop effect token.
    drop_effect: String,
    /// Simulates a foreign source that refuses capability reads.
    unreadable: bool,
    /// Drag image and its hotspot, once set.
    drag_image: Option<(&'static DragImage, i32, i32)>,
}

impl MemoryTransfer {
    pub fn new() -> Self {
        Self {
            effect_allowed: EffectAllowed::Uninitialized.as_str().to_string(),
            drop_effect: DropEffect::None.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Creates a transport carrying text, as dragged in from elsewhere.
    pub fn with_text(format: &str, text: &str) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(format, text);
        transfer
    }

    /// Overrides the allowed-effects token with raw text.
    pub fn set_raw_effect_allowed(&mut self, token: &str) {
        self.effect_allowed = token.to_string();
    }

    /// Overrides the drop effect with raw text, as a platform does on completion.
    pub fn set_raw_drop_effect(&mut self, token: &str) {
        self.drop_effect = token.to_string();
    }

    /// Makes capability reads fail.
    pub fn set_unreadable(&mut self, unreadable: bool) {
        self.unreadable = unreadable;
    }

    /// Returns the drag image set by the source, with its hotspot.
    pub fn drag_image(&self) -> Option<(&'static DragImage, i32, i32)> {
        self.drag_image
    }
}

impl DataTransfer for MemoryTransfer {
    fn get_data(&self, format: &str) -> String {
        self.data.get(format).cloned().unwrap_or_default()
    }

    fn set_data(&mut self, format: &str, data: &str) {
        self.data.insert(format.to_string(), data.to_string());
    }

    fn effect_allowed(&self) -> Result<String, TransferError> {
        if self.unreadable {
            Err(TransferError::Unreadable("effectAllowed"))
        } else {
            Ok(self.effect_allowed.clone())
        }
    }

    fn set_effect_allowed(&mut self, effect: EffectAllowed) {
        self.effect_allowed = effect.as_str().to_string();
    }

    fn drop_effect(&self) -> String {
        self.drop_effect.clone()
    }

    fn set_drop_effect(&mut self, effect: DropEffect) {
        self.drop_effect = effect.as_str().to_string();
    }

    fn set_drag_image(&mut self, image: &'static DragImage, x: i32, y: i32) {
        self.drag_image = Some((image, x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_round_trip_by_format() {
        let mut transfer = MemoryTransfer::new();
        transfer.set_data("Text", "abc");
        assert_eq!(transfer.get_data("Text"), "abc");
        assert_eq!(transfer.get_data("text/html"), "");
    }

    #[test]
    fn test_unreadable_capability_is_uninitialized() {
        let mut transfer = MemoryTransfer::new();
        transfer.set_raw_effect_allowed("move");
        assert_eq!(transfer.allowed_effects(), EffectAllowed::Move);

        transfer.set_unreadable(true);
        assert!(transfer.effect_allowed().is_err());
        assert_eq!(transfer.allowed_effects(), EffectAllowed::Uninitialized);
    }

    #[test]
    fn test_effects_written_as_tokens() {
        let mut transfer = MemoryTransfer::new();
        transfer.set_effect_allowed(EffectAllowed::CopyMove);
        transfer.set_drop_effect(DropEffect::Copy);
        assert_eq!(transfer.effect_allowed(), Ok("copyMove".to_string()));
        assert_eq!(transfer.drop_effect(), "copy");
    }
}
