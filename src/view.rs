//! Pan/zoom transform between screen and world coordinates.

use crate::util::Point;

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.2;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 8.0;

/// Current pan offset and zoom scale of the canvas.
///
/// Offsets are in screen pixels and are applied before scaling, so
/// `screen = offset + world * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    /// Identity transform: scale 1, no offset.
    pub const fn new() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            self.offset_x + world.x * self.scale,
            self.offset_y + world.y * self.scale,
        )
    }

    /// Multiplies the zoom by `factor` while keeping the world point under
    /// `anchor` (screen space) fixed on screen.
    ///
    /// The resulting scale is clamped to [`MIN_SCALE`]..=[`MAX_SCALE`]. Non-finite
    /// or non-positive factors are ignored.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::debug!("Ignoring invalid zoom factor {factor}");
            return;
        }

        let world = self.screen_to_world(anchor);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.offset_x = anchor.x - world.x * self.scale;
        self.offset_y = anchor.y - world.y * self.scale;
    }

    /// Shifts the view by a screen-space delta, independent of zoom.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies this transform to a Cairo context so subsequent drawing uses world coordinates.
    pub(crate) fn apply(&self, ctx: &cairo::Context) {
        ctx.translate(self.offset_x, self.offset_y);
        ctx.scale(self.scale, self.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let anchors = [
            Point::new(0.0, 0.0),
            Point::new(320.0, 240.0),
            Point::new(-15.5, 999.25),
        ];
        let factors = [1.1, 0.5, 3.0, 100.0, 0.001];

        for anchor in anchors {
            for factor in factors {
                let mut view = ViewTransform::new();
                view.pan(37.0, -12.0);
                view.zoom_at(Point::new(50.0, 50.0), 1.7);

                let before = view.screen_to_world(anchor);
                view.zoom_at(anchor, factor);
                let after = view.screen_to_world(anchor);

                assert!(
                    before.approx_eq(after, 1e-6),
                    "anchor {anchor:?} factor {factor}: {before:?} != {after:?}"
                );
            }
        }
    }

    #[test]
    fn zoom_clamps_scale() {
        let mut view = ViewTransform::new();
        view.zoom_at(Point::new(10.0, 10.0), 1000.0);
        assert_eq!(view.scale(), MAX_SCALE);

        view.zoom_at(Point::new(10.0, 10.0), 1e-6);
        assert_eq!(view.scale(), MIN_SCALE);
    }

    #[test]
    fn invalid_zoom_factor_is_ignored() {
        let mut view = ViewTransform::new();
        view.zoom_at(Point::new(10.0, 10.0), 0.0);
        view.zoom_at(Point::new(10.0, 10.0), f64::NAN);
        assert_eq!(view, ViewTransform::new());
    }

    #[test]
    fn pan_is_additive() {
        let mut split = ViewTransform::new();
        split.zoom_at(Point::new(100.0, 100.0), 2.0);
        let mut joined = split;

        split.pan(12.5, -3.0);
        split.pan(-4.0, 8.25);
        joined.pan(8.5, 5.25);

        assert!(split.offset().approx_eq(joined.offset(), EPS));
        assert_eq!(split.scale(), joined.scale());
    }

    #[test]
    fn screen_world_round_trip() {
        let mut view = ViewTransform::new();
        view.pan(-80.0, 44.0);
        view.zoom_at(Point::new(200.0, 150.0), 2.75);

        for p in [
            Point::new(0.0, 0.0),
            Point::new(1920.0, 1080.0),
            Point::new(-33.3, 17.7),
        ] {
            let round = view.world_to_screen(view.screen_to_world(p));
            assert!(round.approx_eq(p, 1e-9));
        }
    }

    #[test]
    fn reset_restores_identity() {
        let mut view = ViewTransform::new();
        view.pan(5.0, 5.0);
        view.zoom_at(Point::new(1.0, 1.0), 4.0);
        view.reset();
        assert_eq!(view, ViewTransform::new());
        assert_eq!(view.screen_to_world(Point::new(7.0, 9.0)), Point::new(7.0, 9.0));
    }
}
