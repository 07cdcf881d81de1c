//! Keybinding configuration types and parsing.
//!
//! Every keyboard action can be rebound in the `[keybindings]` table of the
//! configuration file.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // History
    Undo,
    Redo,

    // Selected sticker
    DeleteSelected,
    BringToFront,
    ScaleUp,
    ScaleDown,
    RotateLeft,
    RotateRight,

    // View
    ResetView,
    ZoomIn,
    ZoomOut,
    TogglePanLock,

    // Tools
    ToggleEraser,
    CycleTool,
    ClearTool,

    /// Abort the current gesture, or clear the selection when idle
    Cancel,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Delete".
    ///
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    /// A trailing "++" binds the '+' key itself.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]; the empty parts are the '+' key.
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Shift+Z", "Ctrl+Y"]
/// toggle_eraser = ["E"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_delete_selected")]
    pub delete_selected: Vec<String>,

    #[serde(default = "default_bring_to_front")]
    pub bring_to_front: Vec<String>,

    #[serde(default = "default_scale_up")]
    pub scale_up: Vec<String>,

    #[serde(default = "default_scale_down")]
    pub scale_down: Vec<String>,

    #[serde(default = "default_rotate_left")]
    pub rotate_left: Vec<String>,

    #[serde(default = "default_rotate_right")]
    pub rotate_right: Vec<String>,

    #[serde(default = "default_reset_view")]
    pub reset_view: Vec<String>,

    #[serde(default = "default_zoom_in")]
    pub zoom_in: Vec<String>,

    #[serde(default = "default_zoom_out")]
    pub zoom_out: Vec<String>,

    #[serde(default = "default_toggle_pan_lock")]
    pub toggle_pan_lock: Vec<String>,

    #[serde(default = "default_toggle_eraser")]
    pub toggle_eraser: Vec<String>,

    #[serde(default = "default_cycle_tool")]
    pub cycle_tool: Vec<String>,

    #[serde(default = "default_clear_tool")]
    pub clear_tool: Vec<String>,

    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            delete_selected: default_delete_selected(),
            bring_to_front: default_bring_to_front(),
            scale_up: default_scale_up(),
            scale_down: default_scale_down(),
            rotate_left: default_rotate_left(),
            rotate_right: default_rotate_right(),
            reset_view: default_reset_view(),
            zoom_in: default_zoom_in(),
            zoom_out: default_zoom_out(),
            toggle_pan_lock: default_toggle_pan_lock(),
            toggle_eraser: default_toggle_eraser(),
            cycle_tool: default_cycle_tool(),
            clear_tool: default_clear_tool(),
            cancel: default_cancel(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let bindings: [(&[String], Action); 16] = [
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.delete_selected, Action::DeleteSelected),
            (&self.bring_to_front, Action::BringToFront),
            (&self.scale_up, Action::ScaleUp),
            (&self.scale_down, Action::ScaleDown),
            (&self.rotate_left, Action::RotateLeft),
            (&self.rotate_right, Action::RotateRight),
            (&self.reset_view, Action::ResetView),
            (&self.zoom_in, Action::ZoomIn),
            (&self.zoom_out, Action::ZoomOut),
            (&self.toggle_pan_lock, Action::TogglePanLock),
            (&self.toggle_eraser, Action::ToggleEraser),
            (&self.cycle_tool, Action::CycleTool),
            (&self.clear_tool, Action::ClearTool),
            (&self.cancel, Action::Cancel),
        ];

        for (binding_strs, action) in bindings {
            for binding_str in binding_strs {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string(), "Ctrl+Y".to_string()]
}

fn default_delete_selected() -> Vec<String> {
    vec!["Delete".to_string(), "Backspace".to_string()]
}

fn default_bring_to_front() -> Vec<String> {
    vec!["F".to_string()]
}

fn default_scale_up() -> Vec<String> {
    vec!["]".to_string()]
}

fn default_scale_down() -> Vec<String> {
    vec!["[".to_string()]
}

fn default_rotate_left() -> Vec<String> {
    vec!["Q".to_string()]
}

fn default_rotate_right() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_reset_view() -> Vec<String> {
    vec!["0".to_string()]
}

fn default_zoom_in() -> Vec<String> {
    vec!["+".to_string(), "Shift++".to_string(), "=".to_string()]
}

fn default_zoom_out() -> Vec<String> {
    vec!["-".to_string()]
}

fn default_toggle_pan_lock() -> Vec<String> {
    vec!["H".to_string()]
}

fn default_toggle_eraser() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_cycle_tool() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_clear_tool() -> Vec<String> {
    vec!["Ctrl+T".to_string()]
}

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("E").unwrap();
        assert_eq!(binding.key, "E");
        assert!(!binding.ctrl && !binding.shift && !binding.alt);
    }

    #[test]
    fn test_parse_modifiers_any_order() {
        let a = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        let b = KeyBinding::parse("Shift + Ctrl + Z").unwrap();
        assert_eq!(a, b);
        assert!(a.ctrl && a.shift && !a.alt);
    }

    #[test]
    fn test_parse_plus_key() {
        let plain = KeyBinding::parse("+").unwrap();
        assert_eq!(plain.key, "+");

        let shifted = KeyBinding::parse("Shift++").unwrap();
        assert_eq!(shifted.key, "+");
        assert!(shifted.shift);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert!(binding.matches("z", true, false, false));
        assert!(!binding.matches("z", true, true, false));
    }

    #[test]
    fn test_build_action_map() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        let ctrl_z = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));

        let ctrl_y = KeyBinding::parse("Ctrl+Y").unwrap();
        assert_eq!(map.get(&ctrl_y), Some(&Action::Redo));

        let delete = KeyBinding::parse("Delete").unwrap();
        assert_eq!(map.get(&delete), Some(&Action::DeleteSelected));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.toggle_eraser = vec!["Ctrl+Z".to_string()];

        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));
        assert!(err.contains("Ctrl+Z"));
    }

    #[test]
    fn test_duplicate_with_different_modifier_order() {
        let mut config = KeybindingsConfig::default();
        config.redo = vec!["Shift+Ctrl+Z".to_string()];
        config.cycle_tool = vec!["Ctrl+Shift+Z".to_string()];

        assert!(config.build_action_map().is_err());
    }
}
