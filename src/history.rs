//! Undo/redo log for scene edits.
//!
//! Every entry carries just enough state to reverse and reapply itself.
//! History is linear: recording a new action discards the redo stack.

use crate::scene::{IndexedStroke, ItemId, ItemSnapshot, ItemTransform, Scene, Stroke};
use std::collections::VecDeque;

/// Default number of undo entries kept.
pub const DEFAULT_MAX_UNDO: usize = 50;

/// A recorded, invertible scene edit.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoAction {
    AddStroke {
        stroke: Stroke,
    },
    AddItem {
        item: ItemSnapshot,
    },
    /// Undo re-inserts the item on top, not at its former depth.
    DeleteItem {
        item: ItemSnapshot,
    },
    TransformItem {
        id: ItemId,
        before: ItemTransform,
        after: ItemTransform,
    },
    EraseBatch {
        strokes: Vec<IndexedStroke>,
        items: Vec<ItemSnapshot>,
    },
    /// Kept for history display only; undo and redo do nothing.
    Reorder {
        id: ItemId,
    },
}

impl UndoAction {
    /// Short label for status displays and logs.
    pub fn label(&self) -> &'static str {
        match self {
            UndoAction::AddStroke { .. } => "Add stroke",
            UndoAction::AddItem { .. } => "Add sticker",
            UndoAction::DeleteItem { .. } => "Delete sticker",
            UndoAction::TransformItem { .. } => "Transform sticker",
            UndoAction::EraseBatch { .. } => "Erase",
            UndoAction::Reorder { .. } => "Bring to front",
        }
    }

    fn revert(&self, scene: &mut Scene) {
        match self {
            UndoAction::AddStroke { stroke } => {
                scene.remove_stroke(stroke.id());
            }
            UndoAction::AddItem { item } => {
                scene.delete_item(item.id);
            }
            UndoAction::DeleteItem { item } => {
                scene.restore_item(item.clone());
            }
            UndoAction::TransformItem { id, before, .. } => {
                scene.transform_item(*id, before.scale, before.rotation);
            }
            UndoAction::EraseBatch { strokes, items } => {
                let mut ordered: Vec<&IndexedStroke> = strokes.iter().collect();
                ordered.sort_by_key(|entry| entry.index);
                for entry in ordered {
                    scene.restore_stroke(entry.stroke.clone(), Some(entry.index));
                }
                for item in items {
                    scene.restore_item(item.clone());
                }
            }
            UndoAction::Reorder { id } => {
                log::debug!("Reorder of {id} is not reversible; skipping");
            }
        }
    }

    fn reapply(&self, scene: &mut Scene) {
        match self {
            UndoAction::AddStroke { stroke } => {
                scene.restore_stroke(stroke.clone(), None);
            }
            UndoAction::AddItem { item } => {
                scene.restore_item(item.clone());
            }
            UndoAction::DeleteItem { item } => {
                scene.delete_item(item.id);
            }
            UndoAction::TransformItem { id, after, .. } => {
                scene.transform_item(*id, after.scale, after.rotation);
            }
            UndoAction::EraseBatch { strokes, items } => {
                for entry in strokes {
                    scene.remove_stroke(entry.stroke.id());
                }
                for item in items {
                    scene.delete_item(item.id);
                }
            }
            UndoAction::Reorder { .. } => {}
        }
    }
}

/// Bounded undo stack plus redo stack.
#[derive(Debug)]
pub struct History {
    undo: VecDeque<UndoAction>,
    redo: Vec<UndoAction>,
    max_undo: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}

impl History {
    /// Creates an empty history keeping at most `max_undo` entries (minimum 1).
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_undo: max_undo.max(1),
        }
    }

    /// Records a new action, clearing the redo stack and dropping the oldest
    /// entry when the cap is exceeded.
    pub fn record(&mut self, action: UndoAction) {
        log::debug!("Recording '{}'", action.label());
        self.redo.clear();
        self.undo.push_back(action);
        while self.undo.len() > self.max_undo {
            self.undo.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Most recent undoable action.
    pub fn peek_undo(&self) -> Option<&UndoAction> {
        self.undo.back()
    }

    pub fn peek_redo(&self) -> Option<&UndoAction> {
        self.redo.last()
    }

    /// Reverts the latest action. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> Option<&UndoAction> {
        let action = self.undo.pop_back()?;
        action.revert(scene);
        log::debug!("Undid '{}'", action.label());
        self.redo.push(action);
        self.redo.last()
    }

    /// Reapplies the latest undone action. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> Option<&UndoAction> {
        let action = self.redo.pop()?;
        action.reapply(scene);
        log::debug!("Redid '{}'", action.label());
        self.undo.push_back(action);
        self.undo.back()
    }
}
