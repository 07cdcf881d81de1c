//! Configuration file support for mirrorpaint.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/mirrorpaint/config.toml`.
//! Settings include brush and eraser defaults, zoom behavior, history size,
//! sticker sizing, the tool catalog and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{
    BrushConfig, BrushPreset, EraserConfig, ExportConfig, HistoryConfig, SelectionConfig,
    StickerConfig, StickerPreset, ToolsConfig, ViewConfig,
};

use crate::draw::{Color, SelectionStyle};
use crate::input::{BrushTool, EditorSettings, StickerTool, Tool, ToolPreset};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [brush]
/// default_color = "crimson"
/// default_width = 18.0
/// default_opacity = 0.6
///
/// [eraser]
/// radius = 20.0
///
/// [view]
/// zoom_step = 1.1
///
/// [history]
/// max_undo = 50
///
/// [[tools.stickers]]
/// id = "glasses-round"
/// label = "Glasses Round"
/// source = "glasses/glasses-round.png"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Fallback brush
    #[serde(default)]
    pub brush: BrushConfig,

    #[serde(default)]
    pub eraser: EraserConfig,

    /// Pan and zoom behavior
    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    /// Sticker sizing and transform steps
    #[serde(default)]
    pub stickers: StickerConfig,

    /// Selection outline appearance
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Brush and sticker presets
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// Clamps `value` into `min..=max`, logging a warning when it was out of range.
fn clamp_logged(name: &str, value: &mut f64, min: f64, max: f64) {
    if value.is_nan() {
        warn!("Invalid {name} NaN, using {min:.2}");
        *value = min;
    } else if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.2}, clamping to {min:.2}-{max:.2} range");
        *value = value.clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged. Catalog entries with duplicate ids are dropped.
    fn validate_and_clamp(&mut self) {
        clamp_logged("brush width", &mut self.brush.default_width, 1.0, 100.0);
        clamp_logged("brush opacity", &mut self.brush.default_opacity, 0.0, 1.0);
        clamp_logged("eraser radius", &mut self.eraser.radius, 2.0, 200.0);
        clamp_logged("zoom_step", &mut self.view.zoom_step, 1.01, 2.0);

        if !(1..=1000).contains(&self.history.max_undo) {
            warn!(
                "Invalid max_undo {}, clamping to 1-1000 range",
                self.history.max_undo
            );
            self.history.max_undo = self.history.max_undo.clamp(1, 1000);
        }

        clamp_logged("max_base_width", &mut self.stickers.max_base_width, 16.0, 4096.0);
        clamp_logged("max_base_height", &mut self.stickers.max_base_height, 16.0, 4096.0);
        clamp_logged("scale_step", &mut self.stickers.scale_step, 0.01, 1.0);
        clamp_logged("rotation_step", &mut self.stickers.rotation_step, 1.0, 90.0);

        for channel in &mut self.selection.color {
            clamp_logged("selection color channel", channel, 0.0, 1.0);
        }
        clamp_logged("selection line_width", &mut self.selection.line_width, 0.5, 10.0);
        clamp_logged("selection dash", &mut self.selection.dash, 1.0, 50.0);

        for preset in &mut self.tools.brushes {
            clamp_logged(&format!("{} width", preset.id), &mut preset.width, 1.0, 100.0);
            clamp_logged(&format!("{} opacity", preset.id), &mut preset.opacity, 0.0, 1.0);
        }

        let mut seen = HashSet::new();
        self.tools.brushes.retain(|preset| {
            let fresh = seen.insert(preset.id.clone());
            if !fresh {
                warn!("Duplicate tool id '{}', ignoring later entry", preset.id);
            }
            fresh
        });
        self.tools.stickers.retain(|preset| {
            let fresh = seen.insert(preset.id.clone());
            if !fresh {
                warn!("Duplicate tool id '{}', ignoring later entry", preset.id);
            }
            fresh
        });
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mirrorpaint");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or if
    /// the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn config_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Builds the keybinding map, falling back to the defaults when the
    /// configured bindings are invalid.
    pub fn action_map(&self) -> HashMap<KeyBinding, Action> {
        match self.keybindings.build_action_map() {
            Ok(map) => map,
            Err(err) => {
                warn!("Invalid keybindings ({err}), using defaults");
                KeybindingsConfig::default()
                    .build_action_map()
                    .unwrap_or_default()
            }
        }
    }

    /// Editor parameters derived from this configuration.
    pub fn editor_settings(&self) -> EditorSettings {
        let [r, g, b, a] = self.selection.color;
        EditorSettings {
            eraser_radius: self.eraser.radius,
            zoom_step: self.view.zoom_step,
            max_undo: self.history.max_undo,
            max_sticker_width: self.stickers.max_base_width,
            max_sticker_height: self.stickers.max_base_height,
            scale_step: self.stickers.scale_step,
            rotation_step: self.stickers.rotation_step,
            pan_without_tool: self.view.pan_without_tool,
            selection: SelectionStyle {
                color: Color::new(r, g, b, a),
                line_width: self.selection.line_width,
                dash: self.selection.dash,
            },
            default_brush: BrushTool {
                color: self.brush.default_color.to_color(),
                width: self.brush.default_width,
                opacity: self.brush.default_opacity,
            },
        }
    }

    /// The tool catalog: brushes first, then stickers, in file order.
    pub fn tool_catalog(&self) -> Vec<ToolPreset> {
        let brushes = self.tools.brushes.iter().map(|preset| ToolPreset {
            id: preset.id.clone(),
            label: preset.label.clone(),
            tool: Tool::Brush(BrushTool {
                color: preset.color.to_color(),
                width: preset.width,
                opacity: preset.opacity,
            }),
        });
        let stickers = self.tools.stickers.iter().map(|preset| ToolPreset {
            id: preset.id.clone(),
            label: preset.label.clone(),
            tool: Tool::Sticker(StickerTool {
                source_id: preset.source.clone(),
            }),
        });
        brushes.chain(stickers).collect()
    }
}
