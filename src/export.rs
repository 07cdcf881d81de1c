//! Rendering the current frame to a final bitmap and writing it as PNG.
//!
//! The exported frame contains the background, strokes and items. The
//! selection outline, eraser cursor and any stroke still being drawn are
//! left out.

use crate::background::BackgroundSource;
use crate::draw::{Overlay, render_frame};
use crate::input::Editor;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export size {width}x{height}")]
    Surface { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    PngWrite(String),
}

/// Renders the editor's scene to a new `width`×`height` image surface.
pub fn render_to_surface(
    editor: &Editor,
    background: Option<&dyn BackgroundSource>,
    width: i32,
    height: i32,
) -> Result<cairo::ImageSurface, ExportError> {
    if width <= 0 || height <= 0 {
        return Err(ExportError::Surface { width, height });
    }

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_frame(
            &ctx,
            editor.scene(),
            editor.view(),
            &Overlay::default(),
            background,
            width as f64,
            height as f64,
        );
    }
    surface.flush();
    Ok(surface)
}

/// Encodes a surface as PNG bytes.
pub fn encode_png(surface: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    surface
        .write_to_png(&mut buffer)
        .map_err(|err| ExportError::PngWrite(err.to_string()))?;
    Ok(buffer)
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    format!("{}.{}", now.format(template), format)
}

/// Ensure the output directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    Ok(directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf()))
}

/// Writes PNG bytes to `path`, creating parent directories.
pub fn save_png(png: &[u8], path: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }

    log::info!("Saving export to: {} ({} bytes)", path.display(), png.len());
    fs::write(path, png)?;
    Ok(path.to_path_buf())
}

/// Renders and saves a PNG into `directory` with a timestamped name.
pub fn export_to_directory(
    editor: &Editor,
    background: Option<&dyn BackgroundSource>,
    width: i32,
    height: i32,
    directory: &Path,
    filename_template: &str,
) -> Result<PathBuf, ExportError> {
    let surface = render_to_surface(editor, background, width, height)?;
    let png = encode_png(&surface)?;
    let directory = ensure_directory_exists(directory)?;
    save_png(&png, &directory.join(generate_filename(filename_template, "png")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EditorSettings, StickerTool, Tool};
    use crate::util::Point;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn editor() -> Editor {
        Editor::new(EditorSettings::default(), HashMap::new(), Vec::new())
    }

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("mirror_%Y%m%d", "png");
        assert!(filename.starts_with("mirror_"));
        assert!(filename.ends_with(".png"));
        assert_eq!(filename.len(), "mirror_".len() + 8 + ".png".len());
    }

    #[test]
    fn rejects_empty_surface() {
        assert!(matches!(
            render_to_surface(&editor(), None, 0, 10),
            Err(ExportError::Surface {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn exported_png_decodes_at_requested_size() {
        let mut editor = editor();
        editor.set_tool(Some(Tool::Brush(EditorSettings::default().default_brush)));
        editor.on_pointer_down(Point::new(10.0, 10.0));
        editor.on_pointer_up(Point::new(10.0, 10.0));

        let surface = render_to_surface(&editor, None, 64, 48).unwrap();
        let png = encode_png(&surface).unwrap();
        let decoded = cairo::ImageSurface::create_from_png(&mut png.as_slice()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn export_writes_timestamped_file() {
        let temp = TempDir::new().unwrap();
        let mut editor = editor();
        editor.set_tool(Some(Tool::Sticker(StickerTool {
            source_id: "unused.png".into(),
        })));

        let path = export_to_directory(
            &editor,
            None,
            32,
            32,
            &temp.path().join("out"),
            "mirror_%H%M%S",
        )
        .unwrap();

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(fs::read(&path).unwrap().starts_with(b"\x89PNG"));
    }
}
