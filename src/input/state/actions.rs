use crate::config::Action;
use crate::input::events::Key;

use super::Editor;

impl Editor {
    /// Processes a key press.
    ///
    /// Modifier keys (including Space, the momentary pan key) only update
    /// modifier state. Other keys are looked up in the keybinding map.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            Key::Space => {
                self.modifiers.space = true;
                return;
            }
            _ => {}
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };

        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
        }
    }

    /// Processes a key release; only modifier state is affected.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            Key::Space => self.modifiers.space = false,
            _ => {}
        }
    }

    /// Handle an action triggered by a keybinding.
    pub fn handle_action(&mut self, action: Action) {
        log::debug!("Action {:?}", action);
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::DeleteSelected => {
                self.delete_selected();
            }
            Action::BringToFront => {
                self.bring_selected_to_front();
            }
            Action::ResetView => {
                self.reset_view();
            }
            Action::ZoomIn => {
                let anchor = self.keyboard_zoom_anchor();
                self.zoom_at(anchor, self.settings.zoom_step);
            }
            Action::ZoomOut => {
                let anchor = self.keyboard_zoom_anchor();
                self.zoom_at(anchor, 1.0 / self.settings.zoom_step);
            }
            Action::ToggleEraser => {
                self.toggle_eraser();
            }
            Action::TogglePanLock => {
                self.toggle_pan_lock();
            }
            Action::CycleTool => {
                self.cycle_tool();
            }
            Action::ClearTool => {
                self.set_tool(None);
            }
            Action::ScaleUp => {
                self.nudge_selected_scale(self.settings.scale_step);
            }
            Action::ScaleDown => {
                self.nudge_selected_scale(-self.settings.scale_step);
            }
            Action::RotateLeft => {
                self.nudge_selected_rotation(-self.settings.rotation_step);
            }
            Action::RotateRight => {
                self.nudge_selected_rotation(self.settings.rotation_step);
            }
            Action::Cancel => {
                if self.state.is_idle() {
                    self.clear_selection();
                } else {
                    self.on_pointer_cancel();
                }
            }
        }
    }
}
