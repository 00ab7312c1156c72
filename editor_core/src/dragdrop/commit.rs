//! Applying a drop to the document.

use super::effect::DropEffect;
use super::host::DragHost;
use super::transfer::DataTransfer;
use crate::cursor::{Position, Range};

/// What a drop did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Text was dropped onto itself; nothing moved.
    Unchanged(Range),
    /// Text was relocated within the document.
    Moved(Range),
    /// Text was inserted, from a copy or from another source.
    Inserted(Range),
}

impl DropOutcome {
    /// The range that becomes the live selection.
    pub fn range(&self) -> Range {
        match *self {
            DropOutcome::Unchanged(range)
            | DropOutcome::Moved(range)
            | DropOutcome::Inserted(range) => range,
        }
    }
}

/// Inputs to a commit, gathered by the state machine at drop time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DropPlan {
    /// Resolved effect; `None` if never resolved or forced unset.
    pub effect: Option<DropEffect>,
    /// The dragged range when the drag started on this surface.
    pub origin: Option<Range>,
    /// Where the text lands.
    pub target: Position,
}

pub(crate) fn commit_drop<H>(
    host: &mut H,
    plan: DropPlan,
    transfer: &dyn DataTransfer,
    payload_format: &str,
) -> DropOutcome
where
    H: DragHost + ?Sized,
{
    match (plan.effect, plan.origin) {
        (Some(DropEffect::Move), Some(origin)) if origin.contains(plan.target) => {
            DropOutcome::Unchanged(Range::collapsed(plan.target))
        }
        (Some(DropEffect::Move), Some(origin)) => {
            DropOutcome::Moved(host.move_range(origin, plan.target))
        }
        _ => {
            let text = transfer.get_data(payload_format);
            let end = host.insert_at(plan.target, &text);
            // A drop from elsewhere does not carry focus with it
            host.focus();
            DropOutcome::Inserted(Range::new(plan.target, end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dragdrop::transfer::MemoryTransfer;
    use crate::editor::Editor;
    use proptest::prelude::*;

    fn range(l0: usize, c0: usize, l1: usize, c1: usize) -> Range {
        Range::new(Position::new(l0, c0), Position::new(l1, c1))
    }

    fn move_plan(origin: Range, target: Position) -> DropPlan {
        DropPlan {
            effect: Some(DropEffect::Move),
            origin: Some(origin),
            target,
        }
    }

    #[test]
    fn test_move_inside_origin_is_noop() {
        let mut editor = Editor::from_str("xxabcxxx");
        let transfer = MemoryTransfer::new();
        let plan = move_plan(range(0, 2, 0, 5), Position::new(0, 3));

        let outcome = commit_drop(&mut editor, plan, &transfer, "Text");

        assert_eq!(outcome, DropOutcome::Unchanged(Range::collapsed(Position::new(0, 3))));
        assert_eq!(editor.text(), "xxabcxxx");
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_move_on_origin_edge_is_noop() {
        let mut editor = Editor::from_str("xxabcxxx");
        let transfer = MemoryTransfer::new();
        let plan = move_plan(range(0, 2, 0, 5), Position::new(0, 5));

        let outcome = commit_drop(&mut editor, plan, &transfer, "Text");

        assert!(matches!(outcome, DropOutcome::Unchanged(_)));
        assert_eq!(editor.text(), "xxabcxxx");
    }

    #[test]
    fn test_move_after_origin() {
        let mut editor = Editor::from_str("xxabcxxx");
        let transfer = MemoryTransfer::new();
        let plan = move_plan(range(0, 2, 0, 5), Position::new(0, 7));

        let outcome = commit_drop(&mut editor, plan, &transfer, "Text");

        assert_eq!(editor.text(), "xxxxabcx");
        assert_eq!(outcome, DropOutcome::Moved(range(0, 4, 0, 7)));
        assert!(!editor.is_focused());
    }

    #[test]
    fn test_move_before_origin_across_lines() {
        let mut editor = Editor::from_str("first\nsecond abc\n");
        let transfer = MemoryTransfer::new();
        let plan = move_plan(range(1, 7, 1, 10), Position::new(0, 0));

        let outcome = commit_drop(&mut editor, plan, &transfer, "Text");

        assert_eq!(editor.text(), "abcfirst\nsecond \n");
        assert_eq!(outcome.range(), range(0, 0, 0, 3));
    }

    #[test]
    fn test_copy_inserts_payload_and_focuses() {
        let mut editor = Editor::from_str("xxabcxxx");
        let transfer = MemoryTransfer::with_text("Text", "abc");
        let plan = DropPlan {
            effect: Some(DropEffect::Copy),
            origin: Some(range(0, 2, 0, 5)),
            target: Position::new(0, 8),
        };

        let outcome = commit_drop(&mut editor, plan, &transfer, "Text");

        assert_eq!(editor.text(), "xxabcxxxabc");
        assert_eq!(outcome, DropOutcome::Inserted(range(0, 8, 0, 11)));
        assert!(editor.is_focused());
    }

    #[test]
    fn test_move_without_origin_inserts() {
        let mut editor = Editor::from_str("line\n");
        let transfer = MemoryTransfer::with_text("Text", "hi\nthere");
        let plan = DropPlan {
            effect: Some(DropEffect::Move),
            origin: None,
            target: Position::new(1, 0),
        };

        let outcome = commit_drop(&mut editor, plan, &transfer, "Text");

        assert_eq!(editor.text(), "line\nhi\nthere");
        assert_eq!(outcome, DropOutcome::Inserted(range(1, 0, 2, 5)));
    }

    proptest! {
        #[test]
        fn prop_move_preserves_length_and_text(
            text in "[a-z\n]{1,40}",
            a in 0usize..40,
            b in 0usize..40,
            dest in 0usize..40,
        ) {
            let mut editor = Editor::from_str(&text);
            let len = editor.buffer().len_chars();
            let (a, b, dest) = (a.min(len), b.min(len), dest.min(len));
            let origin = Range::new(
                editor.buffer().char_to_position(a),
                editor.buffer().char_to_position(b),
            );
            let target = editor.buffer().char_to_position(dest);
            let dragged = editor.buffer().text_in_range(origin);
            let transfer = MemoryTransfer::new();

            let outcome = commit_drop(&mut editor, move_plan(origin, target), &transfer, "Text");

            prop_assert_eq!(editor.buffer().len_chars(), len);
            match outcome {
                DropOutcome::Unchanged(_) => prop_assert_eq!(editor.text(), text),
                DropOutcome::Moved(moved) => {
                    prop_assert_eq!(editor.buffer().text_in_range(moved), dragged)
                }
                DropOutcome::Inserted(_) => prop_assert!(false, "move never inserts"),
            }
        }
    }
}
