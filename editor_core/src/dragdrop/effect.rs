//! Drop effect resolution.
//!
//! The transport describes what the drag source permits with a free-text
//! token. It is decoded once into [`EffectAllowed`] at the boundary, and the
//! rest of the crate only ever matches on the enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations a drag source permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectAllowed {
    None,
    Copy,
    CopyLink,
    CopyMove,
    Link,
    LinkMove,
    Move,
    All,
    /// The source never declared anything, or the token could not be read.
    #[default]
    Uninitialized,
    /// A token that is not part of the known vocabulary.
    Unknown,
}

impl EffectAllowed {
    /// Decodes a raw capability token. Matching ignores ASCII case.
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "none" => EffectAllowed::None,
            "copy" => EffectAllowed::Copy,
            "copylink" => EffectAllowed::CopyLink,
            "copymove" => EffectAllowed::CopyMove,
            "link" => EffectAllowed::Link,
            "linkmove" => EffectAllowed::LinkMove,
            "move" => EffectAllowed::Move,
            "all" => EffectAllowed::All,
            "uninitialized" => EffectAllowed::Uninitialized,
            _ => EffectAllowed::Unknown,
        }
    }

    /// Returns the canonical token written back to a transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectAllowed::None => "none",
            EffectAllowed::Copy => "copy",
            EffectAllowed::CopyLink => "copyLink",
            EffectAllowed::CopyMove => "copyMove",
            EffectAllowed::Link => "link",
            EffectAllowed::LinkMove => "linkMove",
            EffectAllowed::Move => "move",
            EffectAllowed::All => "all",
            EffectAllowed::Uninitialized => "uninitialized",
            // Outside the vocabulary; permits nothing
            EffectAllowed::Unknown => "unknown",
        }
    }

    /// Returns true if a copy may be performed.
    pub fn permits_copy(&self) -> bool {
        matches!(
            self,
            EffectAllowed::Copy
                | EffectAllowed::CopyMove
                | EffectAllowed::All
                | EffectAllowed::Uninitialized
        )
    }

    /// Returns true if a move may be performed.
    pub fn permits_move(&self) -> bool {
        matches!(
            self,
            EffectAllowed::Move
                | EffectAllowed::CopyMove
                | EffectAllowed::LinkMove
                | EffectAllowed::All
                | EffectAllowed::Uninitialized
        )
    }
}

impl fmt::Display for EffectAllowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation a drop performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Link,
    Move,
}

impl DropEffect {
    /// Decodes a raw effect token. Anything unrecognized is `None`.
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "copy" => DropEffect::Copy,
            "link" => DropEffect::Link,
            "move" => DropEffect::Move,
            _ => DropEffect::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DropEffect::None => "none",
            DropEffect::Copy => "copy",
            DropEffect::Link => "link",
            DropEffect::Move => "move",
        }
    }
}

impl fmt::Display for DropEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier keys held while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Which modifier forces a copy instead of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyModifier {
    Ctrl,
    Alt,
}

impl CopyModifier {
    /// Alt on macOS, Ctrl everywhere else.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            CopyModifier::Alt
        } else {
            CopyModifier::Ctrl
        }
    }

    /// Returns true if this modifier is held.
    pub fn is_held(&self, modifiers: Modifiers) -> bool {
        match self {
            CopyModifier::Ctrl => modifiers.ctrl,
            CopyModifier::Alt => modifiers.alt,
        }
    }
}

impl Default for CopyModifier {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Computes the effect for the current instant.
///
/// A held copy modifier wins only when the source permits copying;
/// otherwise a move is preferred over a copy.
pub fn resolve_drop_effect(copy_requested: bool, allowed: EffectAllowed) -> DropEffect {
    if copy_requested && allowed.permits_copy() {
        DropEffect::Copy
    } else if allowed.permits_move() {
        DropEffect::Move
    } else if allowed.permits_copy() {
        DropEffect::Copy
    } else {
        DropEffect::None
    }
}
