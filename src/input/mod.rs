//! Input handling and the interaction state machine.
//!
//! This module translates pointer, wheel and keyboard events into scene
//! mutations and undo entries. [`Editor`] owns one editing surface: its
//! scene, view transform, history and current gesture.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

pub use events::Key;
pub use modifiers::Modifiers;
pub use state::{Editor, EditorSettings, InteractionState, PlacementOutcome, PlacementRequest};
pub use tool::{BrushTool, StickerTool, Tool, ToolPreset};
