//! Rendering primitives (Cairo-based).
//!
//! This module defines the drawing types used by the canvas:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Overlay`]: transient state drawn above the scene (draft stroke, eraser cursor)
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod render;

// Re-export commonly used types at module level
pub use color::Color;
pub use render::{
    EraserCursor, Overlay, SelectionStyle, render_frame, render_item, render_selection,
    render_stroke,
};
