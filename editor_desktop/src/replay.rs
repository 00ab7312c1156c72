//! Scripted drag gestures.
//!
//! A scenario is a JSON document describing an editor and the sequence of
//! platform drag events delivered to it. Replaying it drives a real
//! [`DragDropHandler`] against an [`Editor`] and reports where the text and
//! selection ended up.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use textdrop_core::dragdrop::{
    DragEvent, DropOutcome, EventResponse, MemoryTransfer, Modifiers, SelectionSurface,
    SurfaceView, TargetId,
};
use textdrop_core::{DragDropConfig, DragDropHandler, DragEventKind, Editor, Position, Range};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
}

/// An editor plus the events delivered to it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub text: String,
    #[serde(default)]
    pub selection: Option<Range>,
    #[serde(default)]
    pub backwards: bool,
    #[serde(default)]
    pub config: DragDropConfig,
    /// Character cell size as `[width, height]`.
    #[serde(default)]
    pub cell_size: Option<(f32, f32)>,
    /// Identity of the editor surface.
    #[serde(default = "default_surface")]
    pub surface: u64,
    #[serde(default)]
    pub transfer: TransferSetup,
    pub events: Vec<ScriptedEvent>,
}

fn default_surface() -> u64 {
    1
}

/// Initial contents of the drag transport.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransferSetup {
    /// Text already on the transport, for drags that begin elsewhere.
    pub data: Option<String>,
    pub effect_allowed: Option<String>,
    pub unreadable: bool,
}

/// One platform event.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedEvent {
    pub kind: DragEventKind,
    /// Document position under the pointer; takes precedence over `x`/`y`.
    #[serde(default)]
    pub at: Option<Position>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Element under the pointer; the editor surface when absent.
    #[serde(default)]
    pub target: Option<u64>,
    /// Effect the platform reports before delivering the event.
    #[serde(default)]
    pub drop_effect: Option<String>,
}

/// Response to one replayed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub kind: DragEventKind,
    pub prevent_default: bool,
}

/// Where a drop landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropSummary {
    pub kind: &'static str,
    pub range: Range,
}

impl From<DropOutcome> for DropSummary {
    fn from(outcome: DropOutcome) -> Self {
        let kind = match outcome {
            DropOutcome::Unchanged(_) => "unchanged",
            DropOutcome::Moved(_) => "moved",
            DropOutcome::Inserted(_) => "inserted",
        };
        Self {
            kind,
            range: outcome.range(),
        }
    }
}

/// Final state of the editor after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub text: String,
    pub selection: Range,
    pub backwards: bool,
    pub steps: Vec<Step>,
    pub drops: Vec<DropSummary>,
}

/// Loads a scenario from a JSON file.
pub fn load(path: &Path) -> Result<Scenario, ReplayError> {
    let json = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Runs every event of `scenario` through a fresh editor and handler.
pub fn replay(scenario: &Scenario) -> Report {
    let mut editor = Editor::from_str(&scenario.text);
    let surface = TargetId(scenario.surface);
    editor.set_target(surface);
    let (cell_width, line_height) = scenario.cell_size.unwrap_or((8.0, 16.0));
    editor.set_cell_size(cell_width, line_height);
    if let Some(selection) = scenario.selection {
        editor.set_selection_range(selection, scenario.backwards);
    }
    // A drag only starts from a draggable surface
    editor.set_draggable(true);

    let mut transfer = match &scenario.transfer.data {
        Some(text) => MemoryTransfer::with_text(&scenario.config.payload_format, text),
        None => MemoryTransfer::new(),
    };
    if let Some(token) = &scenario.transfer.effect_allowed {
        transfer.set_raw_effect_allowed(token);
    }
    transfer.set_unreadable(scenario.transfer.unreadable);

    let mut handler = DragDropHandler::new(scenario.config.clone());
    handler.install(&mut editor);

    let mut steps = Vec::with_capacity(scenario.events.len());
    let mut drops = Vec::new();
    for scripted in &scenario.events {
        if let Some(token) = &scripted.drop_effect {
            transfer.set_raw_drop_effect(token);
        }
        let (x, y) = match scripted.at {
            Some(pos) => cell_center(pos, cell_width, line_height),
            None => (scripted.x, scripted.y),
        };
        let mut event = DragEvent::new(x, y, &mut transfer).with_modifiers(scripted.modifiers);
        event.target = Some(scripted.target.map_or(surface, TargetId));

        log::debug!("Replaying {:?} at ({}, {})", scripted.kind, x, y);
        let response = match scripted.kind {
            DragEventKind::Drop => {
                drops.push(DropSummary::from(handler.on_drop(&mut editor, &mut event)));
                EventResponse::PreventDefault
            }
            kind => handler.dispatch(kind, &mut editor, &mut event),
        };
        steps.push(Step {
            kind: scripted.kind,
            prevent_default: response == EventResponse::PreventDefault,
        });
    }

    Report {
        text: editor.text(),
        selection: editor.selection_range(),
        backwards: editor.is_backwards(),
        steps,
        drops,
    }
}

/// Screen point that maps back onto `pos`.
fn cell_center(pos: Position, cell_width: f32, line_height: f32) -> (f32, f32) {
    (
        pos.col as f32 * cell_width,
        pos.line as f32 * line_height + line_height / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_scenario(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn range(l0: usize, c0: usize, l1: usize, c1: usize) -> Range {
        Range::new(Position::new(l0, c0), Position::new(l1, c1))
    }

    const INTERNAL_MOVE: &str = r#"{
        "text": "xxabcxxx",
        "selection": {"start": {"line": 0, "col": 2}, "end": {"line": 0, "col": 5}},
        "config": {"copy_modifier": "ctrl"},
        "events": [
            {"kind": "start"},
            {"kind": "enter", "at": {"line": 0, "col": 7}},
            {"kind": "over", "at": {"line": 0, "col": 7}},
            {"kind": "drop", "at": {"line": 0, "col": 7}},
            {"kind": "end", "drop_effect": "move"}
        ]
    }"#;

    #[test]
    fn test_replay_internal_move_from_file() {
        let file = write_scenario(INTERNAL_MOVE);
        let scenario = load(file.path()).unwrap();

        let report = replay(&scenario);

        assert_eq!(report.text, "xxxxabcx");
        assert_eq!(report.selection, range(0, 4, 0, 7));
        assert!(!report.backwards);
        assert_eq!(
            report.drops,
            vec![DropSummary {
                kind: "moved",
                range: range(0, 4, 0, 7)
            }]
        );
        let prevented: Vec<bool> = report.steps.iter().map(|s| s.prevent_default).collect();
        assert_eq!(prevented, vec![false, true, true, true, false]);
    }

    #[test]
    fn test_replay_copy_with_modifier() {
        let json = INTERNAL_MOVE.replace(
            r#"{"kind": "over", "at": {"line": 0, "col": 7}}"#,
            r#"{"kind": "over", "at": {"line": 0, "col": 7}, "modifiers": {"ctrl": true}}"#,
        );
        let scenario: Scenario = serde_json::from_str(&json).unwrap();

        let report = replay(&scenario);

        assert_eq!(report.text, "xxabcxxabcx");
        assert_eq!(report.drops[0].kind, "inserted");
    }

    #[test]
    fn test_replay_external_drop() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "text": "line\n",
                "transfer": {"data": "hello", "effect_allowed": "copyMove"},
                "events": [
                    {"kind": "enter", "at": {"line": 1, "col": 0}},
                    {"kind": "over", "at": {"line": 1, "col": 0}},
                    {"kind": "drop"}
                ]
            }"#,
        )
        .unwrap();

        let report = replay(&scenario);

        assert_eq!(report.text, "line\nhello");
        assert_eq!(report.selection, range(1, 0, 1, 5));
    }

    #[test]
    fn test_replay_moved_to_other_surface() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "text": "xxabcxxx",
                "selection": {"start": {"line": 0, "col": 2}, "end": {"line": 0, "col": 5}},
                "events": [
                    {"kind": "start"},
                    {"kind": "end", "drop_effect": "move"}
                ]
            }"#,
        )
        .unwrap();

        let report = replay(&scenario);

        assert_eq!(report.text, "xxxxx");
        assert_eq!(report.selection, Range::collapsed(Position::new(0, 2)));
        assert!(report.drops.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_scenario(r#"{"text": "abc", "events": [{"kind": "hover"}]}"#);
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ReplayError::Json(_)));
    }
}
