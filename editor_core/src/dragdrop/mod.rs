//! Drag-and-drop of text within and onto an editor surface.
//!
//! [`DragDropHandler`] is the gesture state machine. It resolves copy or
//! move with [`resolve_drop_effect`] on every pointer movement and hands the
//! result to the commit step on drop. The surface it drives is described by
//! the traits in [`host`].

mod commit;
pub mod config;
pub mod effect;
pub mod event;
pub mod handler;
pub mod host;
pub mod image;
pub mod transfer;


pub use commit::DropOutcome;
pub use config::DragDropConfig;
pub use effect::{resolve_drop_effect, CopyModifier, DropEffect, EffectAllowed, Modifiers};
pub use event::{DragEvent, DragEventKind, EventResponse, TargetId};
pub use handler::{DragDropHandler, DragSession, DragSource, SurfaceState};
pub use host::{
    CoordinateMapper, DragHost, MarkerId, MarkerStyle, SelectionSurface, SurfaceView,
    TextDocument,
};
pub use image::{blank_drag_image, DragImage};
pub use transfer::{DataTransfer, MemoryTransfer, TransferError};
