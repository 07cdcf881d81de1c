//! Tool selection.

use crate::draw::Color;
use crate::scene::StrokeStyle;

/// A freehand brush with fixed appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushTool {
    pub color: Color,
    /// Line width in world units
    pub width: f64,
    /// Opacity in `[0, 1]`, multiplied with the color's alpha
    pub opacity: f64,
}

impl BrushTool {
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width,
            opacity: self.opacity,
        }
    }
}

/// Places a sticker loaded from `source_id` on click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerTool {
    pub source_id: String,
}

/// The active tool. `None` in the editor means no tool is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    /// Freehand drawing
    Brush(BrushTool),
    /// Click to place an image item
    Sticker(StickerTool),
    /// Removes strokes and items under the pointer
    Eraser,
}

impl Tool {
    /// Short name for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Tool::Brush(_) => "brush",
            Tool::Sticker(_) => "sticker",
            Tool::Eraser => "eraser",
        }
    }
}

/// A named entry of the tool catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPreset {
    pub id: String,
    pub label: String,
    pub tool: Tool,
}
