//! Editor Core - Pure text editor logic.
//!
//! This crate contains editor state and drag-and-drop behavior without any
//! dependencies on windowing or rendering systems.

pub mod buffer;
pub mod cursor;
pub mod dragdrop;
pub mod editor;
pub mod history;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Position, Range, Selection};
pub use dragdrop::{DragDropConfig, DragDropHandler, DragEvent, DragEventKind, DropEffect};
pub use editor::{Editor, Marker};
pub use history::{EditOperation, History};
