//! Text buffer implementation using ropey.

use crate::cursor::{Position, Range};
use ropey::Rope;

/// A text buffer backed by a rope data structure.
/// Drag commits address it by (line, column) positions; the rope works in
/// character indices, so most helpers here convert between the two.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a text buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the total number of lines in the buffer.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Inserts a string at the given character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Removes text in the given character range.
    pub fn remove(&mut self, start: usize, end: usize) {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Returns the text between two character indices.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.slice(start..end).to_string()
        } else {
            String::new()
        }
    }

    /// Converts a character index to a (line, column) position.
    /// Both line and column are 0-indexed.
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col = char_idx - line_start;
        (line, col)
    }

    /// Converts a (line, column) position to a character index.
    /// Both line and column are 0-indexed.
    pub fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        if line >= self.len_lines() {
            return self.len_chars();
        }
        let line_start = self.rope.line_to_char(line);
        let line_len = self.line_len_chars(line);
        line_start + col.min(line_len)
    }

    /// Converts a character index to a position.
    pub fn char_to_position(&self, char_idx: usize) -> Position {
        let (line, col) = self.char_to_line_col(char_idx);
        Position::new(line, col)
    }

    /// Converts a position to a character index, clamping to the buffer.
    pub fn position_to_char(&self, pos: Position) -> usize {
        self.line_col_to_char(pos.line, pos.col)
    }

    /// Clamps a position to the nearest valid position in the buffer.
    /// Rows past the end land on the last line, keeping the column if it fits.
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.len_lines().saturating_sub(1));
        Position::new(line, pos.col.min(self.line_len_chars(line)))
    }

    /// Returns the ordered character indices covered by a range.
    pub fn range_to_chars(&self, range: Range) -> (usize, usize) {
        let a = self.position_to_char(range.start);
        let b = self.position_to_char(range.end);
        (a.min(b), a.max(b))
    }

    /// Returns the text covered by a range.
    pub fn text_in_range(&self, range: Range) -> String {
        let (start, end) = self.range_to_chars(range);
        self.slice(start, end)
    }

    /// Returns the length of a line in characters (excluding newline).
    pub fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let len = line_slice.len_chars();
        // Subtract newline character if present
        if len > 0 {
            let last_char = line_slice.char(len - 1);
            if last_char == '\n' {
                return len - 1;
            }
        }
        len
    }

    /// Returns the line at the given index as a string.
    pub fn line(&self, line: usize) -> Option<String> {
        if line >= self.len_lines() {
            None
        } else {
            let line_slice = self.rope.line(line);
            let mut s = line_slice.to_string();
            // Remove trailing newline for consistency
            if s.ends_with('\n') {
                s.pop();
            }
            Some(s)
        }
    }

    /// Returns the entire buffer as a string.
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.len_lines(), 1); // Empty buffer has 1 line
    }

    #[test]
    fn test_insert_and_remove() {
        let mut buf = TextBuffer::from_str("hello");
        buf.insert(5, " world");
        assert_eq!(buf.to_string(), "hello world");
        buf.remove(5, 11);
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_remove_clamps_out_of_bounds() {
        let mut buf = TextBuffer::from_str("abc");
        buf.remove(1, 100);
        assert_eq!(buf.to_string(), "a");
        buf.remove(5, 2);
        assert_eq!(buf.to_string(), "a");
    }

    #[test]
    fn test_line_operations() {
        let buf = TextBuffer::from_str("line1\nline2\nline3");
        assert_eq!(buf.len_lines(), 3);
        assert_eq!(buf.line(0), Some("line1".to_string()));
        assert_eq!(buf.line(2), Some("line3".to_string()));
        assert_eq!(buf.line(3), None);
    }

    #[test]
    fn test_line_len_chars() {
        let buf = TextBuffer::from_str("abc\ndefgh\n");
        assert_eq!(buf.line_len_chars(0), 3);
        assert_eq!(buf.line_len_chars(1), 5);
        assert_eq!(buf.line_len_chars(2), 0);
    }

    #[test]
    fn test_position_conversion() {
        let buf = TextBuffer::from_str("abc\ndefgh");
        assert_eq!(buf.char_to_position(6), Position::new(1, 2));
        assert_eq!(buf.position_to_char(Position::new(1, 2)), 6);
        // Column past line end clamps to the line end
        assert_eq!(buf.position_to_char(Position::new(0, 10)), 3);
        assert_eq!(buf.clamp_position(Position::new(7, 2)), Position::new(1, 2));
        assert_eq!(buf.clamp_position(Position::new(0, 9)), Position::new(0, 3));
    }

    #[test]
    fn test_text_in_range() {
        let buf = TextBuffer::from_str("xxabcxxx\nsecond");
        let range = Range::new(Position::new(0, 2), Position::new(0, 5));
        assert_eq!(buf.text_in_range(range), "abc");

        let across = Range::new(Position::new(0, 6), Position::new(1, 3));
        assert_eq!(buf.text_in_range(across), "xx\nsec");
    }
}
