//! Scripted editing sessions.
//!
//! A script is a JSON document listing input events in order. The CLI
//! replays it against an [`Editor`] to produce an image without a window:
//!
//! ```json
//! {
//!   "events": [
//!     { "type": "select_tool", "id": "lip-red" },
//!     { "type": "pointer_down", "x": 40, "y": 40 },
//!     { "type": "pointer_move", "x": 80, "y": 60 },
//!     { "type": "pointer_up", "x": 80, "y": 60 },
//!     { "type": "key_press", "key": { "char": "z" } }
//!   ]
//! }
//! ```

use crate::config::Action;
use crate::input::{Editor, Key, PlacementOutcome};
use crate::resource::ResourceLoader;
use crate::util::Point;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scripted input event. Coordinates are in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerCancel,
    /// Negative delta zooms in
    Wheel { x: f64, y: f64, delta: f64 },
    KeyPress { key: Key },
    KeyRelease { key: Key },
    /// Runs a bound action directly
    Action { action: Action },
    /// Activates a catalog preset
    SelectTool { id: String },
    ClearTool,
    ToggleEraser,
    /// Sets scale and rotation of the selected sticker
    Transform { scale: f64, rotation: f64 },
    Undo,
    Redo,
    /// Waits for queued sticker loads to finish
    Resolve,
}

/// A sequence of events to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// Summary of a replayed script.
#[derive(Debug, Default)]
pub struct ScriptReport {
    pub events_applied: usize,
    /// Human-readable messages for stickers that failed to load
    pub warnings: Vec<String>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse session script")
    }

    /// Reads a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Replays every event, then resolves any sticker loads still pending.
    pub async fn run(&self, editor: &mut Editor, loader: &dyn ResourceLoader) -> ScriptReport {
        let mut report = ScriptReport::default();

        for event in &self.events {
            log::debug!("Script event: {:?}", event);
            if let ScriptEvent::Resolve = event {
                collect_warnings(&mut report, editor.resolve_pending(loader).await);
            } else {
                apply_event(editor, event);
            }
            report.events_applied += 1;
        }

        if editor.has_pending_work() {
            collect_warnings(&mut report, editor.resolve_pending(loader).await);
        }
        report
    }
}

fn collect_warnings(report: &mut ScriptReport, outcomes: Vec<PlacementOutcome>) {
    for outcome in outcomes {
        match outcome {
            PlacementOutcome::Failed { source_id, error } => {
                report
                    .warnings
                    .push(format!("Could not load sticker '{source_id}': {error}"));
            }
            PlacementOutcome::ReacquireFailed { id, error } => {
                report
                    .warnings
                    .push(format!("Could not reload {id}: {error}"));
            }
            PlacementOutcome::Placed { .. } | PlacementOutcome::Reacquired { .. } => {}
        }
    }
}

/// Applies a synchronous event to the editor.
fn apply_event(editor: &mut Editor, event: &ScriptEvent) {
    match event {
        ScriptEvent::PointerDown { x, y } => editor.on_pointer_down(Point::new(*x, *y)),
        ScriptEvent::PointerMove { x, y } => editor.on_pointer_move(Point::new(*x, *y)),
        ScriptEvent::PointerUp { x, y } => editor.on_pointer_up(Point::new(*x, *y)),
        ScriptEvent::PointerCancel => editor.on_pointer_cancel(),
        ScriptEvent::Wheel { x, y, delta } => editor.on_wheel(Point::new(*x, *y), *delta),
        ScriptEvent::KeyPress { key } => editor.on_key_press(*key),
        ScriptEvent::KeyRelease { key } => editor.on_key_release(*key),
        ScriptEvent::Action { action } => editor.handle_action(*action),
        ScriptEvent::SelectTool { id } => {
            editor.select_tool_by_id(id);
        }
        ScriptEvent::ClearTool => editor.set_tool(None),
        ScriptEvent::ToggleEraser => editor.toggle_eraser(),
        ScriptEvent::Transform { scale, rotation } => {
            editor.set_selected_transform(*scale, *rotation);
        }
        ScriptEvent::Undo => {
            editor.undo();
        }
        ScriptEvent::Redo => {
            editor.redo();
        }
        ScriptEvent::Resolve => {}
    }
}
