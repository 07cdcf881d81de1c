//! Sticker bitmap resolution.
//!
//! Placing a sticker or redoing a placement needs a decoded bitmap for a
//! source identifier. Loading is asynchronous and may fail, so every item
//! tracks its bitmap through an [`ImageHandle`] and the renderer skips
//! anything that is not [`ImageHandle::Ready`].

use async_trait::async_trait;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

/// Decoded pixels ready to be painted.
#[derive(Clone)]
pub struct Bitmap {
    surface: cairo::ImageSurface,
}

impl Bitmap {
    /// Wraps an existing Cairo image surface.
    pub fn from_surface(surface: cairo::ImageSurface) -> Result<Self, ResourceError> {
        if surface.width() <= 0 || surface.height() <= 0 {
            return Err(ResourceError::InvalidSize {
                width: surface.width(),
                height: surface.height(),
            });
        }
        Ok(Self { surface })
    }

    /// Allocates a blank ARGB bitmap, mostly useful for tests and synthetic sources.
    pub fn blank(width: i32, height: i32) -> Result<Self, ResourceError> {
        if width <= 0 || height <= 0 {
            return Err(ResourceError::InvalidSize { width, height });
        }
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .map_err(|err| ResourceError::Decode(err.to_string()))?;
        Ok(Self { surface })
    }

    /// Decodes PNG bytes.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, ResourceError> {
        let surface = cairo::ImageSurface::create_from_png(&mut Cursor::new(bytes))
            .map_err(|err| ResourceError::Decode(err.to_string()))?;
        Self::from_surface(surface)
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub(crate) fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Resolution state of an item's bitmap.
#[derive(Debug, Clone)]
pub enum ImageHandle {
    /// Waiting for the resource loader.
    Pending,
    /// Bitmap available for rendering.
    Ready(Bitmap),
    /// Loading failed; the item stays in the scene but is never drawn.
    Failed(String),
}

impl ImageHandle {
    pub fn bitmap(&self) -> Option<&Bitmap> {
        match self {
            ImageHandle::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ImageHandle::Pending)
    }
}

/// Errors that can occur while resolving a sticker bitmap.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Sticker source not found: {0}")]
    NotFound(String),

    #[error("Failed to read sticker '{source_id}': {error}")]
    Io {
        source_id: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to decode sticker image: {0}")]
    Decode(String),

    #[error("Sticker has invalid dimensions {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

/// Turns a sticker source identifier into a decoded bitmap.
///
/// Bitmaps are not thread-safe, so implementations are driven from the
/// editor's own thread.
#[async_trait(?Send)]
pub trait ResourceLoader {
    async fn load(&self, source_id: &str) -> Result<Bitmap, ResourceError>;
}

/// Loads PNG stickers from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileResourceLoader {
    root: PathBuf,
}

impl FileResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, source_id: &str) -> PathBuf {
        self.root.join(source_id)
    }
}

#[async_trait(?Send)]
impl ResourceLoader for FileResourceLoader {
    async fn load(&self, source_id: &str) -> Result<Bitmap, ResourceError> {
        let path = self.resolve(source_id);
        log::debug!("Loading sticker '{}' from {}", source_id, path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(source_id.to_string())
            } else {
                ResourceError::Io {
                    source_id: source_id.to_string(),
                    error,
                }
            }
        })?;

        Bitmap::from_png_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(path: &std::path::Path, width: i32, height: i32) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let mut file = std::fs::File::create(path).unwrap();
        surface.write_to_png(&mut file).unwrap();
    }

    #[test]
    fn blank_rejects_degenerate_sizes() {
        assert!(matches!(
            Bitmap::blank(0, 10),
            Err(ResourceError::InvalidSize {
                width: 0,
                height: 10
            })
        ));
        let ok = Bitmap::blank(4, 3).unwrap();
        assert_eq!((ok.width(), ok.height()), (4, 3));
    }

    #[test]
    fn handle_exposes_bitmap_only_when_ready() {
        assert!(ImageHandle::Pending.bitmap().is_none());
        assert!(ImageHandle::Failed("nope".into()).bitmap().is_none());
        let ready = ImageHandle::Ready(Bitmap::blank(2, 2).unwrap());
        assert_eq!(ready.bitmap().map(Bitmap::width), Some(2));
    }

    #[tokio::test]
    async fn file_loader_decodes_png() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("glasses")).unwrap();
        write_png(&temp.path().join("glasses/round.png"), 40, 16);

        let loader = FileResourceLoader::new(temp.path());
        let bitmap = loader.load("glasses/round.png").await.unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (40, 16));
    }

    #[tokio::test]
    async fn file_loader_reports_missing_and_corrupt_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("broken.png"), b"not a png").unwrap();
        let loader = FileResourceLoader::new(temp.path());

        assert!(matches!(
            loader.load("missing.png").await,
            Err(ResourceError::NotFound(id)) if id == "missing.png"
        ));
        assert!(matches!(
            loader.load("broken.png").await,
            Err(ResourceError::Decode(_))
        ));
    }
}
