//! Editor context and interaction state.

use crate::config::{Action, Config, KeyBinding};
use crate::draw::SelectionStyle;
use crate::draw::color::CRIMSON;
use crate::history::{DEFAULT_MAX_UNDO, History, UndoAction};
use crate::input::{
    modifiers::Modifiers,
    tool::{BrushTool, Tool, ToolPreset},
};
use crate::scene::{IndexedStroke, ItemId, ItemSnapshot, Scene, StrokeDraft};
use crate::util::Point;
use crate::view::ViewTransform;
use std::collections::HashMap;

/// Pointer gesture state machine.
///
/// Every gesture starts and ends in `Idle`; there is no terminal state.
#[derive(Debug)]
pub enum InteractionState {
    /// Waiting for input
    Idle,
    /// Dragging the view; `last` is the previous pointer position (screen space)
    Panning { last: Point },
    /// Brush stroke in progress (world space)
    Drawing { draft: StrokeDraft },
    /// Moving a selected item
    DraggingItem {
        id: ItemId,
        /// Grab point minus item position, in world space
        grab_offset: Point,
        /// Item position when the drag started
        origin: Point,
    },
    /// Eraser held down; everything removed so far in this gesture
    Erasing {
        strokes: Vec<IndexedStroke>,
        items: Vec<ItemSnapshot>,
    },
}

impl InteractionState {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Panning { .. } => "panning",
            InteractionState::Drawing { .. } => "drawing",
            InteractionState::DraggingItem { .. } => "dragging",
            InteractionState::Erasing { .. } => "erasing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Tunable editor parameters, normally derived from [`crate::Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    /// Eraser radius in world units
    pub eraser_radius: f64,
    /// Zoom factor applied per wheel notch or zoom key
    pub zoom_step: f64,
    /// Maximum number of undo entries
    pub max_undo: usize,
    /// Largest base size given to a newly placed sticker
    pub max_sticker_width: f64,
    pub max_sticker_height: f64,
    /// Scale change per ScaleUp/ScaleDown key press
    pub scale_step: f64,
    /// Rotation change in degrees per RotateLeft/RotateRight key press
    pub rotation_step: f64,
    /// Pointer-down with no tool selected pans the view
    pub pan_without_tool: bool,
    pub selection: SelectionStyle,
    /// Brush used when the eraser is toggled off with nothing to return to
    pub default_brush: BrushTool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            eraser_radius: 20.0,
            zoom_step: 1.1,
            max_undo: DEFAULT_MAX_UNDO,
            max_sticker_width: 300.0,
            max_sticker_height: 200.0,
            scale_step: 0.1,
            rotation_step: 15.0,
            pan_without_tool: false,
            selection: SelectionStyle::default(),
            default_brush: BrushTool {
                color: CRIMSON,
                width: 18.0,
                opacity: 0.6,
            },
        }
    }
}

/// A sticker placement waiting for its bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub source_id: String,
    /// Item center in world space
    pub position: Point,
}

/// One editing surface: scene, view, history and the input state machine.
///
/// Editors share nothing, so several canvases can be driven independently.
pub struct Editor {
    pub(crate) scene: Scene,
    pub(crate) view: ViewTransform,
    pub(crate) history: History,
    /// Current gesture
    pub state: InteractionState,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    pub(crate) settings: EditorSettings,
    pub(crate) tool: Option<Tool>,
    /// Tool to restore when the eraser is toggled off; `Some(None)` restores no tool
    pub(crate) tool_before_eraser: Option<Option<Tool>>,
    /// Catalog index of the active tool, if it came from the catalog
    pub(crate) active_preset: Option<usize>,
    pub(crate) catalog: Vec<ToolPreset>,
    /// Latched pan mode
    pub(crate) pan_locked: bool,
    /// Last pointer position in screen space
    pub(crate) pointer: Option<Point>,
    pub(crate) pending_placements: Vec<PlacementRequest>,
    action_map: HashMap<KeyBinding, Action>,
}

impl Editor {
    /// Creates an editor with an empty scene, identity view and no tool.
    pub fn new(
        settings: EditorSettings,
        action_map: HashMap<KeyBinding, Action>,
        catalog: Vec<ToolPreset>,
    ) -> Self {
        Self {
            scene: Scene::new(),
            view: ViewTransform::new(),
            history: History::new(settings.max_undo),
            state: InteractionState::Idle,
            modifiers: Modifiers::new(),
            needs_redraw: true,
            settings,
            tool: None,
            tool_before_eraser: None,
            active_preset: None,
            catalog,
            pan_locked: false,
            pointer: None,
            pending_placements: Vec::new(),
            action_map,
        }
    }

    /// Creates an editor configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.editor_settings(),
            config.action_map(),
            config.tool_catalog(),
        )
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn tool(&self) -> Option<&Tool> {
        self.tool.as_ref()
    }

    pub fn catalog(&self) -> &[ToolPreset] {
        &self.catalog
    }

    /// Id of the active catalog preset, if any.
    pub fn active_preset_id(&self) -> Option<&str> {
        self.active_preset
            .and_then(|index| self.catalog.get(index))
            .map(|preset| preset.id.as_str())
    }

    pub fn is_pan_locked(&self) -> bool {
        self.pan_locked
    }

    /// Last known pointer position in screen space.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    // ------------------------------------------------------------------
    // Tools
    // ------------------------------------------------------------------

    /// Activates a tool, or clears it with `None`.
    pub fn set_tool(&mut self, tool: Option<Tool>) {
        self.active_preset = None;
        self.tool_before_eraser = None;
        self.apply_tool(tool);
    }

    fn apply_tool(&mut self, tool: Option<Tool>) {
        match &tool {
            Some(tool) => log::debug!("Active tool: {}", tool.kind()),
            None => log::debug!("Active tool cleared"),
        }
        self.tool = tool;
        self.needs_redraw = true;
    }

    /// Activates a catalog preset by id. Returns false if the id is unknown.
    pub fn select_tool_by_id(&mut self, id: &str) -> bool {
        match self.catalog.iter().position(|preset| preset.id == id) {
            Some(index) => {
                self.activate_preset(index);
                true
            }
            None => {
                log::warn!("Unknown tool preset '{id}'");
                false
            }
        }
    }

    fn activate_preset(&mut self, index: usize) {
        let tool = self.catalog[index].tool.clone();
        self.tool_before_eraser = None;
        self.active_preset = Some(index);
        self.apply_tool(Some(tool));
    }

    /// Advances to the next catalog preset, wrapping around.
    pub fn cycle_tool(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let next = self
            .active_preset
            .map_or(0, |index| (index + 1) % self.catalog.len());
        self.activate_preset(next);
    }

    /// Switches to the eraser, or back to the tool used before it.
    ///
    /// If the eraser was not entered through this toggle, the default brush
    /// is restored.
    pub fn toggle_eraser(&mut self) {
        if matches!(self.tool, Some(Tool::Eraser)) {
            let previous = self
                .tool_before_eraser
                .take()
                .unwrap_or(Some(Tool::Brush(self.settings.default_brush)));
            self.apply_tool(previous);
        } else {
            self.tool_before_eraser = Some(self.tool.take());
            self.apply_tool(Some(Tool::Eraser));
        }
        self.active_preset = None;
    }

    /// Latches or releases pan mode.
    pub fn toggle_pan_lock(&mut self) {
        self.pan_locked = !self.pan_locked;
        log::debug!("Pan lock {}", if self.pan_locked { "on" } else { "off" });
    }

    /// Returns true if a pointer-down should start panning.
    pub(crate) fn pan_trigger_active(&self) -> bool {
        self.modifiers.pan_requested()
            || self.pan_locked
            || (self.tool.is_none() && self.settings.pan_without_tool)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Records an action. Every recorded action mutated the scene.
    pub(crate) fn record(&mut self, action: UndoAction) {
        self.history.record(action);
        self.needs_redraw = true;
    }

    /// Reverts the latest action. Ignored while a gesture is in progress.
    pub fn undo(&mut self) -> bool {
        if !self.state.is_idle() {
            log::debug!("Ignoring undo while {}", self.state.name());
            return false;
        }
        let undone = self.history.undo(&mut self.scene).is_some();
        if undone {
            self.needs_redraw = true;
        }
        undone
    }

    /// Reapplies the latest undone action. Ignored while a gesture is in progress.
    pub fn redo(&mut self) -> bool {
        if !self.state.is_idle() {
            log::debug!("Ignoring redo while {}", self.state.name());
            return false;
        }
        let redone = self.history.redo(&mut self.scene).is_some();
        if redone {
            self.needs_redraw = true;
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Selected item
    // ------------------------------------------------------------------

    /// Sets the selected item's scale and rotation, as a slider would.
    ///
    /// Records a `TransformItem` entry. Returns false with no selection,
    /// for a non-positive scale, or when nothing changed.
    pub fn set_selected_transform(&mut self, scale: f64, rotation_degrees: f64) -> bool {
        let Some(id) = self.scene.selected() else {
            return false;
        };
        let Some(before) = self.scene.transform_item(id, scale, rotation_degrees) else {
            return false;
        };
        let after = self.scene.item(id).map(|item| item.transform()).unwrap_or(before);
        if after == before {
            return false;
        }
        self.record(UndoAction::TransformItem { id, before, after });
        true
    }

    /// Adjusts the selected item's scale by `delta`, keeping it positive.
    pub fn nudge_selected_scale(&mut self, delta: f64) -> bool {
        let Some(item) = self.scene.selected_item() else {
            return false;
        };
        let scale = (item.scale() + delta).clamp(MIN_ITEM_SCALE, MAX_ITEM_SCALE);
        let rotation = item.rotation();
        self.set_selected_transform(scale, rotation)
    }

    /// Rotates the selected item by `delta` degrees, wrapped to [-180, 180).
    pub fn nudge_selected_rotation(&mut self, delta: f64) -> bool {
        let Some(item) = self.scene.selected_item() else {
            return false;
        };
        let scale = item.scale();
        let rotation = (item.rotation() + delta + 180.0).rem_euclid(360.0) - 180.0;
        self.set_selected_transform(scale, rotation)
    }

    /// Deletes the selected item and records `DeleteItem`.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.scene.selected() else {
            return false;
        };
        match self.scene.delete_item(id) {
            Some(item) => {
                self.record(UndoAction::DeleteItem {
                    item: item.snapshot(),
                });
                true
            }
            None => false,
        }
    }

    /// Makes the selected item topmost and records `Reorder`.
    pub fn bring_selected_to_front(&mut self) -> bool {
        let Some(id) = self.scene.selected() else {
            return false;
        };
        if !self.scene.reorder_to_front(id) {
            return false;
        }
        self.record(UndoAction::Reorder { id });
        true
    }

    /// Clears the selection without touching the scene contents.
    pub fn clear_selection(&mut self) {
        if self.scene.selected().is_some() {
            self.scene.clear_selection();
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// Zooms by `factor` keeping `anchor` (screen space) fixed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.view.zoom_at(anchor, factor);
        self.needs_redraw = true;
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        self.needs_redraw = true;
    }

    /// Zoom anchor for keyboard zoom: the pointer if known, else the origin.
    pub(crate) fn keyboard_zoom_anchor(&self) -> Point {
        self.pointer.unwrap_or(Point::ZERO)
    }

    // ------------------------------------------------------------------
    // Keybindings
    // ------------------------------------------------------------------

    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }
}

/// Bounds for keyboard scale nudges.
pub const MIN_ITEM_SCALE: f64 = 0.1;
pub const MAX_ITEM_SCALE: f64 = 10.0;
