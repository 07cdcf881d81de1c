use crate::history::UndoAction;
use crate::input::tool::Tool;
use crate::scene::{IndexedStroke, ItemSnapshot, StrokeDraft};
use crate::util::Point;
use log::debug;

use super::{Editor, InteractionState, PlacementRequest};

impl Editor {
    /// Processes a primary pointer press at `screen`.
    ///
    /// The first matching rule wins:
    /// 1. Pan trigger (Space held, pan lock, or no tool with pan-without-tool) → `Panning`
    /// 2. Eraser → `Erasing`, erasing immediately
    /// 3. Brush → `Drawing` with a one-point stroke
    /// 4. Pointer on an item → select it and start `DraggingItem`
    /// 5. Sticker → queue a placement, stay `Idle`
    /// 6. Otherwise clear the selection
    pub fn on_pointer_down(&mut self, screen: Point) {
        self.pointer = Some(screen);
        if !self.state.is_idle() {
            debug!("Pointer down ignored while {}", self.state.name());
            return;
        }

        if self.pan_trigger_active() {
            self.state = InteractionState::Panning { last: screen };
            return;
        }

        let world = self.view.screen_to_world(screen);

        match self.tool.clone() {
            Some(Tool::Eraser) => {
                self.state = InteractionState::Erasing {
                    strokes: Vec::new(),
                    items: Vec::new(),
                };
                self.erase_at(world);
                self.needs_redraw = true;
            }
            Some(Tool::Brush(brush)) => {
                self.state = InteractionState::Drawing {
                    draft: StrokeDraft::start(world, brush.style()),
                };
                self.needs_redraw = true;
            }
            tool => {
                let sticker = match tool {
                    Some(Tool::Sticker(sticker)) => Some(sticker.source_id),
                    _ => None,
                };
                if let Some(id) = self.scene.find_topmost_item_at(world) {
                    let origin = self.scene.item(id).map_or(world, |item| item.position());
                    self.scene.select(id);
                    self.state = InteractionState::DraggingItem {
                        id,
                        grab_offset: world - origin,
                        origin,
                    };
                    self.needs_redraw = true;
                } else if let Some(source_id) = sticker {
                    debug!("Queueing placement of {source_id}");
                    self.pending_placements.push(PlacementRequest {
                        source_id,
                        position: world,
                    });
                } else {
                    self.clear_selection();
                }
            }
        }
    }

    /// Processes pointer motion at `screen`.
    pub fn on_pointer_move(&mut self, screen: Point) {
        let previous = self.pointer.replace(screen);
        let world = self.view.screen_to_world(screen);

        if matches!(self.state, InteractionState::Erasing { .. }) {
            self.erase_at(world);
            self.needs_redraw = true;
            return;
        }

        match &mut self.state {
            InteractionState::Idle => {
                // The eraser cursor follows the pointer.
                if matches!(self.tool, Some(Tool::Eraser)) && previous != Some(screen) {
                    self.needs_redraw = true;
                }
            }
            InteractionState::Panning { last } => {
                let delta = screen - *last;
                *last = screen;
                self.view.pan(delta.x, delta.y);
                self.needs_redraw = true;
            }
            InteractionState::Drawing { draft } => {
                draft.push(world);
                self.needs_redraw = true;
            }
            InteractionState::DraggingItem { id, grab_offset, .. } => {
                let id = *id;
                let position = world - *grab_offset;
                if self.scene.set_item_position(id, position) {
                    self.needs_redraw = true;
                }
            }
            InteractionState::Erasing { .. } => {}
        }
    }

    /// Processes a primary pointer release.
    ///
    /// A stroke in progress is committed and recorded; an erase gesture is
    /// recorded as one batch. Every other state just returns to `Idle`.
    pub fn on_pointer_up(&mut self, screen: Point) {
        self.pointer = Some(screen);
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Drawing { draft } => {
                let id = self.scene.add_stroke(draft);
                if let Some(stroke) = self.scene.stroke(id).cloned() {
                    debug!("Committed {} with {} point(s)", id, stroke.points().len());
                    self.record(UndoAction::AddStroke { stroke });
                }
            }
            InteractionState::Erasing { strokes, items } => {
                self.record_erase_batch(strokes, items);
            }
            InteractionState::Idle
            | InteractionState::Panning { .. }
            | InteractionState::DraggingItem { .. } => {}
        }
    }

    /// Aborts the current gesture and returns to `Idle`.
    ///
    /// A stroke in progress is discarded and a dragged item returns to where
    /// the drag started. Content already erased stays erased and is recorded
    /// so it can be undone.
    pub fn on_pointer_cancel(&mut self) {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Drawing { draft } => {
                debug!("Discarding stroke with {} point(s)", draft.points().len());
                self.needs_redraw = true;
            }
            InteractionState::DraggingItem { id, origin, .. } => {
                self.scene.set_item_position(id, origin);
                self.needs_redraw = true;
            }
            InteractionState::Erasing { strokes, items } => {
                self.record_erase_batch(strokes, items);
            }
            InteractionState::Idle | InteractionState::Panning { .. } => {}
        }
    }

    /// Processes a wheel event: negative `delta` zooms in, positive zooms out.
    pub fn on_wheel(&mut self, screen: Point, delta: f64) {
        self.pointer = Some(screen);
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let factor = if delta < 0.0 {
            self.settings.zoom_step
        } else {
            1.0 / self.settings.zoom_step
        };
        self.zoom_at(screen, factor);
    }

    /// Erases at `world` and folds the removed content into the current gesture.
    fn erase_at(&mut self, world: Point) {
        let erased = self.scene.erase_at(world, self.settings.eraser_radius);
        if erased.is_empty() {
            return;
        }
        if let InteractionState::Erasing { strokes, items } = &mut self.state {
            merge_erased_strokes(strokes, erased.strokes);
            items.extend(erased.items.iter().map(|item| item.snapshot()));
        }
    }

    fn record_erase_batch(&mut self, strokes: Vec<IndexedStroke>, items: Vec<ItemSnapshot>) {
        if strokes.is_empty() && items.is_empty() {
            return;
        }
        self.record(UndoAction::EraseBatch { strokes, items });
    }
}

/// Merges strokes removed by one erase call into a gesture's accumulated list.
///
/// Indices in `batch` refer to the scene after the earlier removals of the
/// gesture; they are shifted so all indices refer to the scene as it was
/// when the gesture started. `acc` stays sorted by index.
pub(crate) fn merge_erased_strokes(acc: &mut Vec<IndexedStroke>, batch: Vec<IndexedStroke>) {
    let shifted: Vec<IndexedStroke> = batch
        .into_iter()
        .map(|mut entry| {
            let mut index = entry.index;
            for earlier in acc.iter() {
                if earlier.index <= index {
                    index += 1;
                } else {
                    break;
                }
            }
            entry.index = index;
            entry
        })
        .collect();
    acc.extend(shifted);
    acc.sort_by_key(|entry| entry.index);
}
