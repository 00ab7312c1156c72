//! Undo/Redo history system.
//!
//! Every drop commit becomes exactly one group, so undoing a drag-move puts
//! the text back where it came from in a single step.

use crate::cursor::Selection;

/// Represents a single edit operation that can be undone/redone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    /// Insert text at position.
    Insert { position: usize, text: String },
    /// Delete text at range.
    Delete { position: usize, text: String },
}

impl EditOperation {
    /// Returns the inverse operation (for undo).
    pub fn inverse(&self) -> EditOperation {
        match self {
            EditOperation::Insert { position, text } => EditOperation::Delete {
                position: *position,
                text: text.clone(),
            },
            EditOperation::Delete { position, text } => EditOperation::Insert {
                position: *position,
                text: text.clone(),
            },
        }
    }
}

/// A group of edit operations that should be undone/redone together.
#[derive(Debug, Clone)]
pub struct EditGroup {
    /// The operations in this group (in order of execution).
    pub operations: Vec<EditOperation>,
    /// Cursor selection before the edit.
    pub selection_before: Selection,
    /// Cursor selection after the edit.
    pub selection_after: Selection,
}

impl EditGroup {
    pub fn new(selection_before: Selection) -> Self {
        Self {
            operations: Vec::new(),
            selection_before,
            selection_after: selection_before,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Manages undo/redo history.
#[derive(Debug)]
pub struct History {
    /// Stack of operations that can be undone.
    undo_stack: Vec<EditGroup>,
    /// Stack of operations that can be redone.
    redo_stack: Vec<EditGroup>,
    /// Maximum number of undo levels.
    max_size: usize,
    /// Current edit group being built.
    current_group: Option<EditGroup>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl History {
    /// Creates a new history with the given maximum size.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            current_group: None,
        }
    }

    /// Starts a new edit group, committing any group still open.
    pub fn begin_edit(&mut self, selection: Selection) {
        if self.current_group.is_some() {
            self.commit_edit();
        }
        self.current_group = Some(EditGroup::new(selection));
    }

    /// Records an operation in the current group.
    pub fn record(&mut self, op: EditOperation) {
        if let Some(group) = &mut self.current_group {
            group.operations.push(op);
        }
    }

    /// Sets the selection after the current edit.
    pub fn set_selection_after(&mut self, selection: Selection) {
        if let Some(group) = &mut self.current_group {
            group.selection_after = selection;
        }
    }

    /// Commits the current edit group. Empty groups are dropped.
    pub fn commit_edit(&mut self) {
        if let Some(group) = self.current_group.take() {
            if !group.is_empty() {
                self.push_undo(group);
            }
        }
    }

    /// Pushes an edit group to the undo stack.
    fn push_undo(&mut self, group: EditGroup) {
        self.undo_stack.push(group);
        // Clear redo stack on new edit
        self.redo_stack.clear();
        // Enforce size limit
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Returns true if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pops the last edit group for undo.
    /// Returns the operations to undo and the selection to restore.
    pub fn undo(&mut self) -> Option<(Vec<EditOperation>, Selection)> {
        self.commit_edit();

        self.undo_stack.pop().map(|group| {
            let selection = group.selection_before;
            // Inverse operations in reverse order
            let ops: Vec<EditOperation> = group
                .operations
                .iter()
                .rev()
                .map(|op| op.inverse())
                .collect();
            self.redo_stack.push(group);
            (ops, selection)
        })
    }

    /// Pops the last undone edit group for redo.
    /// Returns the operations to redo and the selection to restore.
    pub fn redo(&mut self) -> Option<(Vec<EditOperation>, Selection)> {
        self.redo_stack.pop().map(|group| {
            let selection = group.selection_after;
            let ops = group.operations.clone();
            self.undo_stack.push(group);
            (ops, selection)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(position: usize, text: &str) -> EditOperation {
        EditOperation::Insert {
            position,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new(100);

        history.begin_edit(Selection::new(0));
        history.record(insert(0, "hello"));
        history.set_selection_after(Selection::new(5));
        history.commit_edit();

        assert!(history.can_undo());
        assert!(!history.can_redo());

        let (ops, sel) = history.undo().unwrap();
        assert_eq!(sel, Selection::new(0));
        assert_eq!(
            ops,
            vec![EditOperation::Delete {
                position: 0,
                text: "hello".to_string()
            }]
        );
        assert!(history.can_redo());

        let (ops, sel) = history.redo().unwrap();
        assert_eq!(sel, Selection::new(5));
        assert_eq!(ops, vec![insert(0, "hello")]);
    }

    #[test]
    fn test_move_group_undoes_in_reverse() {
        let mut history = History::new(100);
        history.begin_edit(Selection::with_range(2, 5));
        history.record(EditOperation::Delete {
            position: 2,
            text: "abc".to_string(),
        });
        history.record(insert(4, "abc"));
        history.commit_edit();

        let (ops, sel) = history.undo().unwrap();
        assert_eq!(sel, Selection::with_range(2, 5));
        assert_eq!(
            ops,
            vec![
                EditOperation::Delete {
                    position: 4,
                    text: "abc".to_string()
                },
                insert(2, "abc"),
            ]
        );
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let mut history = History::new(100);
        history.begin_edit(Selection::new(0));
        history.commit_edit();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_cleared_on_new_edit() {
        let mut history = History::new(100);

        history.begin_edit(Selection::new(0));
        history.record(insert(0, "a"));
        history.commit_edit();

        history.undo();
        assert!(history.can_redo());

        history.begin_edit(Selection::new(0));
        history.record(insert(0, "b"));
        history.commit_edit();

        assert!(!history.can_redo());
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut history = History::new(2);
        for text in ["a", "b", "c"] {
            history.begin_edit(Selection::new(0));
            history.record(insert(0, text));
            history.commit_edit();
        }
        assert_eq!(history.undo_stack.len(), 2);
        let (ops, _) = history.undo().unwrap();
        assert_eq!(ops[0].inverse(), insert(0, "c"));
    }
}
