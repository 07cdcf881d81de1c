//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush used when the eraser is toggled off and no tool preceded it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Brush color, named or `[r, g, b]`
    #[serde(default = "default_brush_color")]
    pub default_color: ColorSpec,

    /// Line width in world units (valid range: 1.0 - 100.0)
    #[serde(default = "default_brush_width")]
    pub default_width: f64,

    /// Stroke opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_brush_opacity")]
    pub default_opacity: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_color: default_brush_color(),
            default_width: default_brush_width(),
            default_opacity: default_brush_opacity(),
        }
    }
}

/// Eraser settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Erase radius in world units (valid range: 2.0 - 200.0)
    #[serde(default = "default_eraser_radius")]
    pub radius: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            radius: default_eraser_radius(),
        }
    }
}

/// Pan and zoom behavior.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewConfig {
    /// Zoom factor per wheel notch or zoom key (valid range: 1.01 - 2.0)
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Dragging with no tool selected pans the view
    #[serde(default)]
    pub pan_without_tool: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
            pan_without_tool: false,
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Undo entries kept before the oldest is dropped (valid range: 1 - 1000)
    #[serde(default = "default_max_undo")]
    pub max_undo: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_undo: default_max_undo(),
        }
    }
}

/// Sticker placement and keyboard transform steps.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StickerConfig {
    /// Largest base width of a newly placed sticker (valid range: 16 - 4096)
    #[serde(default = "default_max_base_width")]
    pub max_base_width: f64,

    /// Largest base height of a newly placed sticker (valid range: 16 - 4096)
    #[serde(default = "default_max_base_height")]
    pub max_base_height: f64,

    /// Scale change per ScaleUp/ScaleDown press (valid range: 0.01 - 1.0)
    #[serde(default = "default_scale_step")]
    pub scale_step: f64,

    /// Rotation in degrees per RotateLeft/RotateRight press (valid range: 1 - 90)
    #[serde(default = "default_rotation_step")]
    pub rotation_step: f64,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            max_base_width: default_max_base_width(),
            max_base_height: default_max_base_height(),
            scale_step: default_scale_step(),
            rotation_step: default_rotation_step(),
        }
    }
}

/// Dashed outline drawn around the selected sticker.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// Outline color as [r, g, b, a], each 0.0 - 1.0
    #[serde(default = "default_selection_color")]
    pub color: [f64; 4],

    /// Outline width in screen pixels (valid range: 0.5 - 10.0)
    #[serde(default = "default_selection_width")]
    pub line_width: f64,

    /// Dash and gap length in screen pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_selection_dash")]
    pub dash: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            color: default_selection_color(),
            line_width: default_selection_width(),
            dash: default_selection_dash(),
        }
    }
}

/// A brush entry of the tool catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushPreset {
    pub id: String,
    pub label: String,
    /// Grouping shown by hosts, e.g. "makeup"
    #[serde(default)]
    pub category: String,
    pub color: ColorSpec,
    pub width: f64,
    pub opacity: f64,
}

/// A sticker entry of the tool catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StickerPreset {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub category: String,
    /// Source identifier handed to the resource loader
    pub source: String,
}

/// The tool catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    #[serde(default = "default_brush_presets")]
    pub brushes: Vec<BrushPreset>,

    #[serde(default = "default_sticker_presets")]
    pub stickers: Vec<StickerPreset>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            brushes: default_brush_presets(),
            stickers: default_sticker_presets(),
        }
    }
}

/// PNG export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// chrono format string for exported file names, without extension
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("crimson".to_string())
}

fn default_brush_width() -> f64 {
    18.0
}

fn default_brush_opacity() -> f64 {
    0.6
}

fn default_eraser_radius() -> f64 {
    20.0
}

fn default_zoom_step() -> f64 {
    1.1
}

fn default_max_undo() -> usize {
    crate::history::DEFAULT_MAX_UNDO
}

fn default_max_base_width() -> f64 {
    300.0
}

fn default_max_base_height() -> f64 {
    200.0
}

fn default_scale_step() -> f64 {
    0.1
}

fn default_rotation_step() -> f64 {
    15.0
}

fn default_selection_color() -> [f64; 4] {
    [1.0, 1.0, 1.0, 0.8]
}

fn default_selection_width() -> f64 {
    2.0
}

fn default_selection_dash() -> f64 {
    6.0
}

fn default_filename_template() -> String {
    "mirrorpaint_%Y-%m-%d_%H%M%S".to_string()
}

fn brush(
    id: &str,
    label: &str,
    color: [u8; 3],
    width: f64,
    opacity: f64,
) -> BrushPreset {
    BrushPreset {
        id: id.to_string(),
        label: label.to_string(),
        category: "makeup".to_string(),
        color: ColorSpec::Rgb(color),
        width,
        opacity,
    }
}

fn sticker(id: &str, label: &str, category: &str, source: &str) -> StickerPreset {
    StickerPreset {
        id: id.to_string(),
        label: label.to_string(),
        category: category.to_string(),
        source: source.to_string(),
    }
}

fn default_brush_presets() -> Vec<BrushPreset> {
    vec![
        brush("lip-red", "Lipstick Red", [220, 20, 60], 18.0, 0.6),
        brush("lip-pink", "Lipstick Pink", [255, 102, 178], 16.0, 0.5),
        brush("eyeliner-black", "Eyeliner Black", [20, 20, 20], 4.0, 0.95),
        brush("blush-rose", "Blush Rose", [255, 20, 150], 40.0, 0.18),
    ]
}

fn default_sticker_presets() -> Vec<StickerPreset> {
    vec![
        sticker("glasses-black", "Glasses Black", "glasses", "glasses/glasses-black.png"),
        sticker("glasses-round", "Glasses Round", "glasses", "glasses/glasses-round.png"),
        sticker("glasses-aviator", "Aviator", "glasses", "glasses/glasses-cat.png"),
        sticker("earring-hoop", "Earring Hoop", "jewelry", "jewelry/earring-hoop.png"),
        sticker("earring-stud", "Earring Stud", "jewelry", "jewelry/earring-stud.png"),
        sticker("necklace-gold", "Necklace Gold", "jewelry", "jewelry/necklace-gold.png"),
        sticker("nose-ring", "Nose Ring", "jewelry", "jewelry/nose-ring.png"),
    ]
}
