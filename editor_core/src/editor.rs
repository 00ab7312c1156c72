//! Main editor logic.
//!
//! [`Editor`] is a complete drag-and-drop surface: it owns the text, the
//! live selection, undo history, the markers painted over the text and the
//! visual state a drag toggles.

use crate::buffer::TextBuffer;
use crate::cursor::{Cursor, Position, Range};
use crate::dragdrop::{
    CoordinateMapper, DragImage, MarkerId, MarkerStyle, SelectionSurface, SurfaceView, TargetId,
    TextDocument,
};
use crate::history::{EditOperation, History};

/// A highlight painted over a range of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub id: MarkerId,
    pub range: Range,
    pub class: String,
    pub style: MarkerStyle,
}

/// The main editor state.
#[derive(Debug)]
pub struct Editor {
    /// The text buffer.
    buffer: TextBuffer,
    /// The cursor.
    cursor: Cursor,
    /// Undo/redo history.
    history: History,
    /// Whether the buffer has unsaved changes.
    modified: bool,
    /// Markers in insertion order.
    markers: Vec<Marker>,
    /// Next marker ID to assign.
    next_marker_id: usize,
    /// How the selection is painted.
    selection_style: MarkerStyle,
    /// Visual state classes on the container.
    classes: Vec<String>,
    /// Whether the caret blinks.
    cursor_blinking: bool,
    /// Whether the editor has input focus.
    focused: bool,
    /// Whether pressing on the text starts a native drag.
    draggable: bool,
    /// Drag image attached to the surface, if any.
    drag_image: Option<&'static DragImage>,
    /// Identity the surface hit-tests pointer events against.
    target: TargetId,
    /// Width of one character cell in screen units.
    cell_width: f32,
    /// Height of one line in screen units.
    line_height: f32,
    /// First visible line.
    scroll_offset: usize,
    /// First visible column.
    horizontal_scroll: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates a new empty editor.
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::new(),
            history: History::default(),
            modified: false,
            markers: Vec::new(),
            next_marker_id: 0,
            selection_style: MarkerStyle::Text,
            classes: Vec::new(),
            cursor_blinking: true,
            focused: false,
            draggable: false,
            drag_image: None,
            target: TargetId(0),
            cell_width: 8.0,
            line_height: 16.0,
            scroll_offset: 0,
            horizontal_scroll: 0,
        }
    }

    /// Creates an editor holding the given text.
    pub fn from_str(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_str(text),
            ..Self::new()
        }
    }

    /// Returns a reference to the buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the entire text.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Returns whether the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the cursor position as (line, column).
    pub fn cursor_position(&self) -> Position {
        self.buffer.char_to_position(self.cursor.position())
    }

    /// Returns true if there is an active selection.
    pub fn has_selection(&self) -> bool {
        self.cursor.has_selection()
    }

    /// Returns the selected text, if any.
    pub fn selected_text(&self) -> Option<String> {
        self.cursor
            .selected_range()
            .map(|(start, end)| self.buffer.slice(start, end))
    }

    /// Sets the identity used for pointer hit-testing.
    pub fn set_target(&mut self, target: TargetId) {
        self.target = target;
    }

    /// Sets the size of one character cell.
    pub fn set_cell_size(&mut self, width: f32, height: f32) {
        self.cell_width = width.max(1.0);
        self.line_height = height.max(1.0);
    }

    /// Sets the scroll offsets (first visible line and column).
    pub fn set_scroll(&mut self, line: usize, col: usize) {
        let max_offset = self.buffer.len_lines().saturating_sub(1);
        self.scroll_offset = line.min(max_offset);
        self.horizontal_scroll = col;
    }

    pub fn set_selection_style(&mut self, style: MarkerStyle) {
        self.selection_style = style;
    }

    /// Returns the markers currently painted.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns true if the container carries a visual state class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_cursor_blinking(&self) -> bool {
        self.cursor_blinking
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn drag_image(&self) -> Option<&'static DragImage> {
        self.drag_image
    }

    // ==================== Undo/Redo ====================

    /// Begins a new edit operation.
    fn begin_edit(&mut self) {
        self.history.begin_edit(self.cursor.selection);
    }

    /// Finishes the current edit operation.
    fn finish_edit(&mut self) {
        self.cursor.clamp_to_buffer(&self.buffer);
        self.history.set_selection_after(self.cursor.selection);
        self.history.commit_edit();
        self.modified = true;
    }

    /// Undoes the last edit.
    pub fn undo(&mut self) {
        if let Some((ops, selection)) = self.history.undo() {
            for op in ops {
                self.apply_operation(&op);
            }
            self.cursor.selection = selection;
            self.cursor.clamp_to_buffer(&self.buffer);
        }
    }

    /// Redoes the last undone edit.
    pub fn redo(&mut self) {
        if let Some((ops, selection)) = self.history.redo() {
            for op in ops {
                self.apply_operation(&op);
            }
            self.cursor.selection = selection;
            self.cursor.clamp_to_buffer(&self.buffer);
        }
    }

    /// Applies an edit operation to the buffer.
    fn apply_operation(&mut self, op: &EditOperation) {
        match op {
            EditOperation::Insert { position, text } => {
                self.buffer.insert(*position, text);
            }
            EditOperation::Delete { position, text } => {
                self.buffer.remove(*position, *position + text.chars().count());
            }
        }
    }

    /// Returns true if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

// ==================== Drag Collaborators ====================

impl TextDocument for Editor {
    fn remove_range(&mut self, range: Range) {
        let (start, end) = self.buffer.range_to_chars(range);
        if start == end {
            return;
        }

        self.begin_edit();
        let text = self.buffer.slice(start, end);
        self.buffer.remove(start, end);
        self.history.record(EditOperation::Delete {
            position: start,
            text,
        });
        self.finish_edit();
    }

    fn insert_at(&mut self, pos: Position, text: &str) -> Position {
        let idx = self.buffer.position_to_char(pos);
        if text.is_empty() {
            return self.buffer.char_to_position(idx);
        }

        self.begin_edit();
        self.buffer.insert(idx, text);
        self.history.record(EditOperation::Insert {
            position: idx,
            text: text.to_string(),
        });
        self.finish_edit();
        self.buffer.char_to_position(idx + text.chars().count())
    }

    fn move_range(&mut self, range: Range, dest: Position) -> Range {
        let (start, end) = self.buffer.range_to_chars(range);
        let dest = self.buffer.position_to_char(dest);
        let len = end - start;

        // Destination in post-removal coordinates
        let dest = if dest >= end {
            dest - len
        } else if dest > start {
            start
        } else {
            dest
        };
        if len == 0 {
            let pos = self.buffer.char_to_position(dest);
            return Range::collapsed(pos);
        }

        self.begin_edit();
        let text = self.buffer.slice(start, end);
        self.buffer.remove(start, end);
        self.history.record(EditOperation::Delete {
            position: start,
            text: text.clone(),
        });
        self.buffer.insert(dest, &text);
        self.history.record(EditOperation::Insert {
            position: dest,
            text,
        });
        self.finish_edit();

        Range::new(
            self.buffer.char_to_position(dest),
            self.buffer.char_to_position(dest + len),
        )
    }

    fn text_in_range(&self, range: Range) -> String {
        self.buffer.text_in_range(range)
    }
}

impl SelectionSurface for Editor {
    fn selection_range(&self) -> Range {
        self.cursor.range(&self.buffer)
    }

    fn set_selection_range(&mut self, range: Range, backwards: bool) {
        self.cursor.select_range(&self.buffer, range, backwards);
    }

    fn clear_selection(&mut self) {
        self.cursor.collapse_selection();
    }

    fn is_backwards(&self) -> bool {
        self.cursor.selection.is_backwards()
    }

    fn move_cursor_to(&mut self, pos: Position) {
        let idx = self.buffer.position_to_char(pos);
        self.cursor.set_position(idx, false);
    }

    fn selection_style(&self) -> MarkerStyle {
        self.selection_style
    }

    fn add_marker(&mut self, range: Range, class: &str, style: MarkerStyle) -> MarkerId {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;
        self.markers.push(Marker {
            id,
            range,
            class: class.to_string(),
            style,
        });
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        match self.markers.iter().position(|m| m.id == id) {
            Some(index) => {
                self.markers.remove(index);
            }
            None => log::warn!("Marker {:?} is not on this editor", id),
        }
    }
}

impl SurfaceView for Editor {
    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn set_cursor_blinking(&mut self, blinking: bool) {
        self.cursor_blinking = blinking;
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn mouse_event_target(&self) -> TargetId {
        self.target
    }

    fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    fn attach_drag_image(&mut self, image: &'static DragImage) {
        self.drag_image = Some(image);
    }
}

impl CoordinateMapper for Editor {
    fn screen_to_document(&self, x: f32, y: f32) -> Position {
        // Rows snap to the line under the pointer, columns to the nearest gap
        let row = (y.max(0.0) / self.line_height).floor() as usize;
        let col = (x.max(0.0) / self.cell_width).round() as usize;
        // Casts saturate on huge or infinite coordinates
        self.buffer.clamp_position(Position::new(
            row.saturating_add(self.scroll_offset),
            col.saturating_add(self.horizontal_scroll),
        ))
    }
}
