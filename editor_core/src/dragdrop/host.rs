//! Collaborators a drag handler drives.
//!
//! The handler never touches rendering or storage directly. A surface
//! implements these traits and the handler calls them.

use super::event::TargetId;
use super::image::DragImage;
use crate::cursor::{Position, Range};
use serde::{Deserialize, Serialize};

/// Handle of a marker added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub usize);

/// How a selection-like marker is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Highlight only the covered characters.
    #[default]
    Text,
    /// Highlight full lines.
    Line,
}

/// Text storage addressed by document positions.
pub trait TextDocument {
    fn remove_range(&mut self, range: Range);

    /// Inserts text and returns the position just past it.
    fn insert_at(&mut self, pos: Position, text: &str) -> Position;

    /// Moves the text of `range` to `dest`, where `dest` is given in
    /// coordinates from before the move. Returns the range the text
    /// occupies afterwards.
    fn move_range(&mut self, range: Range, dest: Position) -> Range;

    fn text_in_range(&self, range: Range) -> String;
}

/// The live selection and the markers painted over the document.
pub trait SelectionSurface {
    fn selection_range(&self) -> Range;
    fn set_selection_range(&mut self, range: Range, backwards: bool);
    fn clear_selection(&mut self);
    fn is_backwards(&self) -> bool;

    /// Moves the caret, collapsing the selection there.
    fn move_cursor_to(&mut self, pos: Position);

    fn selection_style(&self) -> MarkerStyle;
    fn add_marker(&mut self, range: Range, class: &str, style: MarkerStyle) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);
}

/// Visual state of the surface container.
pub trait SurfaceView {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_cursor_blinking(&mut self, blinking: bool);
    fn focus(&mut self);

    /// The element the surface itself hit-tests pointer events against.
    fn mouse_event_target(&self) -> TargetId;

    fn set_draggable(&mut self, draggable: bool);

    /// Makes a drag image part of the surface's document.
    fn attach_drag_image(&mut self, _image: &'static DragImage) {}
}

/// Maps screen coordinates onto the document.
pub trait CoordinateMapper {
    fn screen_to_document(&self, x: f32, y: f32) -> Position;
}

/// Everything a drag handler needs from its surface.
pub trait DragHost: TextDocument + SelectionSurface + SurfaceView + CoordinateMapper {}

impl<T> DragHost for T where T: TextDocument + SelectionSurface + SurfaceView + CoordinateMapper {}
