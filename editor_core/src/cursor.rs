//! Cursor and selection handling.

use crate::buffer::TextBuffer;
use serde::{Deserialize, Serialize};

/// Represents a position in the buffer as (line, column).
/// Both are 0-indexed. Positions order by line, then column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// An ordered span of the document between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Creates a range, ordering the endpoints.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Creates a zero-length range at a position.
    pub fn collapsed(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns true if start == end.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the position lies within the range.
    /// Both endpoints count as inside.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}

/// A text selection with an anchor and a cursor position.
/// When anchor == cursor, there is no active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// The anchor point (where selection started).
    pub anchor: usize,
    /// The cursor position (where selection ends / caret is).
    pub cursor: usize,
}

impl Selection {
    /// Creates a new selection at the given position (no active selection).
    pub fn new(pos: usize) -> Self {
        Self {
            anchor: pos,
            cursor: pos,
        }
    }

    /// Creates a selection from anchor to cursor.
    pub fn with_range(anchor: usize, cursor: usize) -> Self {
        Self { anchor, cursor }
    }

    /// Returns true if there's an active selection (anchor != cursor).
    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Returns true if the caret sits before the anchor.
    pub fn is_backwards(&self) -> bool {
        self.cursor < self.anchor
    }

    /// Returns the start and end of the selection (ordered).
    pub fn range(&self) -> (usize, usize) {
        if self.anchor <= self.cursor {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    /// Collapses the selection to the cursor position.
    pub fn collapse(&mut self) {
        self.anchor = self.cursor;
    }

    /// Sets the cursor position, optionally extending the selection.
    pub fn set_cursor(&mut self, pos: usize, extend: bool) {
        self.cursor = pos;
        if !extend {
            self.anchor = pos;
        }
    }
}

/// Cursor manager that tracks the live selection relative to a buffer.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    /// Current selection (includes cursor position).
    pub selection: Selection,
}

impl Cursor {
    /// Creates a new cursor at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current cursor position (character index).
    pub fn position(&self) -> usize {
        self.selection.cursor
    }

    /// Sets the cursor position.
    pub fn set_position(&mut self, pos: usize, extend: bool) {
        self.selection.set_cursor(pos, extend);
    }

    /// Returns true if there's an active selection.
    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    /// Returns the selected range if any.
    pub fn selected_range(&self) -> Option<(usize, usize)> {
        if self.has_selection() {
            Some(self.selection.range())
        } else {
            None
        }
    }

    /// Collapses the selection to the cursor.
    pub fn collapse_selection(&mut self) {
        self.selection.collapse();
    }

    /// Selects a document range, keeping the requested direction.
    pub fn select_range(&mut self, buffer: &TextBuffer, range: Range, backwards: bool) {
        let (start, end) = buffer.range_to_chars(range);
        self.selection = if backwards {
            Selection::with_range(end, start)
        } else {
            Selection::with_range(start, end)
        };
    }

    /// Returns the selection as an ordered document range.
    pub fn range(&self, buffer: &TextBuffer) -> Range {
        let (start, end) = self.selection.range();
        Range::new(buffer.char_to_position(start), buffer.char_to_position(end))
    }

    /// Clamps the cursor position to valid buffer bounds.
    pub fn clamp_to_buffer(&mut self, buffer: &TextBuffer) {
        let max = buffer.len_chars();
        if self.selection.cursor > max {
            self.selection.cursor = max;
        }
        if self.selection.anchor > max {
            self.selection.anchor = max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_range() {
        let sel = Selection::with_range(5, 10);
        assert_eq!(sel.range(), (5, 10));
        assert!(!sel.is_backwards());

        let sel = Selection::with_range(10, 5);
        assert_eq!(sel.range(), (5, 10));
        assert!(sel.is_backwards());
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }

    #[test]
    fn test_range_new_orders_endpoints() {
        let range = Range::new(Position::new(3, 1), Position::new(1, 4));
        assert_eq!(range.start, Position::new(1, 4));
        assert_eq!(range.end, Position::new(3, 1));
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = Range::new(Position::new(0, 2), Position::new(0, 5));
        assert!(range.contains(Position::new(0, 2)));
        assert!(range.contains(Position::new(0, 4)));
        assert!(range.contains(Position::new(0, 5)));
        assert!(!range.contains(Position::new(0, 6)));
        assert!(!range.contains(Position::new(1, 3)));
    }

    #[test]
    fn test_select_range_backwards() {
        let buffer = TextBuffer::from_str("hello\nworld");
        let mut cursor = Cursor::new();
        let range = Range::new(Position::new(0, 1), Position::new(1, 2));

        cursor.select_range(&buffer, range, true);
        assert!(cursor.selection.is_backwards());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.range(&buffer), range);

        cursor.select_range(&buffer, range, false);
        assert!(!cursor.selection.is_backwards());
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_clamp_to_buffer() {
        let buffer = TextBuffer::from_str("abc");
        let mut cursor = Cursor::new();
        cursor.selection = Selection::with_range(10, 2);
        cursor.clamp_to_buffer(&buffer);
        assert_eq!(cursor.selection, Selection::with_range(3, 2));
    }
}
