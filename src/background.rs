//! Background sources drawn beneath the annotations.
//!
//! A source is either a decoded still image or the latest frame delivered by
//! a live feed. Frame delivery happens outside the editor; the renderer only
//! asks whether a frame is currently available.

use crate::resource::Bitmap;

/// Anything that can provide the current background frame.
pub trait BackgroundSource {
    /// The frame to draw, or `None` if nothing is available yet.
    fn current_frame(&self) -> Option<&Bitmap>;

    /// Pixel dimensions of the current frame.
    fn frame_size(&self) -> Option<(i32, i32)> {
        self.current_frame().map(|bmp| (bmp.width(), bmp.height()))
    }
}

/// A decoded still image.
#[derive(Debug, Clone)]
pub struct StaticImage {
    bitmap: Bitmap,
}

impl StaticImage {
    pub fn new(bitmap: Bitmap) -> Self {
        Self { bitmap }
    }
}

impl BackgroundSource for StaticImage {
    fn current_frame(&self) -> Option<&Bitmap> {
        Some(&self.bitmap)
    }
}

/// Holds the most recent frame pushed by a live video feed.
#[derive(Debug, Default)]
pub struct FrameSlot {
    latest: Option<Bitmap>,
    frames_received: u64,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current frame. Returns true so callers can request a redraw.
    pub fn push_frame(&mut self, frame: Bitmap) -> bool {
        self.latest = Some(frame);
        self.frames_received += 1;
        true
    }

    /// Drops the current frame, e.g. when the feed stops.
    pub fn clear(&mut self) {
        self.latest = None;
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }
}

impl BackgroundSource for FrameSlot {
    fn current_frame(&self) -> Option<&Bitmap> {
        self.latest.as_ref()
    }
}

/// Computes the cover fit of a `src_w`×`src_h` image into a `dst_w`×`dst_h` box.
///
/// Returns `(x, y, scale)`: the image is scaled uniformly by `scale` so it
/// fills the box, centered, with the overflow cropped.
pub fn cover_fit(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> (f64, f64, f64) {
    let scale = (dst_w / src_w).max(dst_h / src_h);
    let x = (dst_w - src_w * scale) / 2.0;
    let y = (dst_h - src_h * scale) / 2.0;
    (x, y, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_slot_tracks_latest_frame() {
        let mut slot = FrameSlot::new();
        assert!(slot.current_frame().is_none());

        slot.push_frame(Bitmap::blank(4, 4).unwrap());
        slot.push_frame(Bitmap::blank(8, 6).unwrap());
        assert_eq!(slot.frame_size(), Some((8, 6)));
        assert_eq!(slot.frames_received(), 2);

        slot.clear();
        assert!(slot.frame_size().is_none());
    }

    #[test]
    fn cover_fit_crops_wider_images() {
        let (x, y, scale) = cover_fit(200.0, 100.0, 100.0, 100.0);
        assert_eq!(scale, 1.0);
        assert_eq!((x, y), (-50.0, 0.0));

        let (x, y, scale) = cover_fit(50.0, 100.0, 100.0, 100.0);
        assert_eq!(scale, 2.0);
        assert_eq!((x, y), (0.0, -50.0));
    }
}
