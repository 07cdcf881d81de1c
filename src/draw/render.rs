//! Cairo-based rendering of the scene.
//!
//! Rendering is a pure function of the scene, the view transform and the
//! overlay state. Layers are painted in a fixed order: background, strokes,
//! items, selection outline, then screen-space cursors.

use super::color::{CANVAS_EMPTY, Color};
use crate::background::{BackgroundSource, cover_fit};
use crate::scene::{Item, Scene, StrokeStyle};
use crate::util::Point;
use crate::view::ViewTransform;

/// Appearance of the dashed selection outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionStyle {
    pub color: Color,
    /// Outline width in screen pixels
    pub line_width: f64,
    /// Dash and gap length in screen pixels
    pub dash: f64,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            color: Color::new(1.0, 1.0, 1.0, 0.8),
            line_width: 2.0,
            dash: 6.0,
        }
    }
}

/// Circular eraser indicator, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserCursor {
    pub center: Point,
    pub radius: f64,
}

/// Transient state drawn on top of the scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Points of the stroke currently being drawn (world space)
    pub draft: Option<(&'a [Point], StrokeStyle)>,
    pub eraser: Option<EraserCursor>,
    /// Selection outline style; `None` hides the outline (e.g. for export)
    pub selection: Option<SelectionStyle>,
}

/// Renders a complete frame to a `width`×`height` Cairo target.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `scene` - Strokes, items and selection
/// * `view` - Current pan/zoom
/// * `overlay` - In-progress stroke, eraser cursor and selection styling
/// * `background` - Optional image or video frame painted beneath everything
/// * `width`, `height` - Target size in pixels
pub fn render_frame(
    ctx: &cairo::Context,
    scene: &Scene,
    view: &ViewTransform,
    overlay: &Overlay<'_>,
    background: Option<&dyn BackgroundSource>,
    width: f64,
    height: f64,
) {
    render_background(ctx, view, background, width, height);

    ctx.save().ok();
    view.apply(ctx);

    for stroke in scene.strokes() {
        render_stroke(ctx, stroke.points(), stroke.style());
    }
    if let Some((points, style)) = overlay.draft {
        render_stroke(ctx, points, style);
    }

    for item in scene.items() {
        render_item(ctx, item);
    }

    if let (Some(item), Some(style)) = (scene.selected_item(), overlay.selection.as_ref()) {
        // No outline around a sticker that is not drawn.
        if item.image().bitmap().is_some() {
            render_selection(ctx, item, view.scale(), style);
        }
    }

    ctx.restore().ok();

    if let Some(cursor) = overlay.eraser {
        render_eraser_cursor(ctx, cursor);
    }
}

/// Fills the target and paints the background frame, if any.
///
/// The frame is cover-fitted to the world rectangle `(0, 0, width, height)`
/// and then follows the view transform, so annotations stay registered to it.
pub fn render_background(
    ctx: &cairo::Context,
    view: &ViewTransform,
    background: Option<&dyn BackgroundSource>,
    width: f64,
    height: f64,
) {
    ctx.save().ok();
    CANVAS_EMPTY.apply(ctx);
    let _ = ctx.paint();

    if let Some(frame) = background.and_then(|bg| bg.current_frame()) {
        let (x, y, scale) = cover_fit(frame.width() as f64, frame.height() as f64, width, height);
        view.apply(ctx);
        ctx.rectangle(0.0, 0.0, width, height);
        ctx.clip();
        ctx.translate(x, y);
        ctx.scale(scale, scale);
        if ctx.set_source_surface(frame.surface(), 0.0, 0.0).is_ok() {
            let _ = ctx.paint();
        }
    }
    ctx.restore().ok();
}

/// Renders a stroke as a smoothed polyline.
///
/// Consecutive points are joined through their midpoints with quadratic
/// curves; the tail is a straight segment to the last point. A single point
/// renders as a round dot.
pub fn render_stroke(ctx: &cairo::Context, points: &[Point], style: StrokeStyle) {
    let Some(&first) = points.first() else {
        return;
    };

    ctx.save().ok();
    style
        .color
        .with_alpha(style.color.a * style.opacity.clamp(0.0, 1.0))
        .apply(ctx);
    ctx.set_line_width(style.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    let mut current = first;
    for pair in points[1..].windows(2) {
        let control = pair[0];
        let mid = control.midpoint(pair[1]);
        quad_to(ctx, current, control, mid);
        current = mid;
    }
    let last = points[points.len() - 1];
    ctx.line_to(last.x, last.y);

    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Quadratic Bézier from `from` through `control` to `to`, as Cairo only has cubics.
fn quad_to(ctx: &cairo::Context, from: Point, control: Point, to: Point) {
    let c1 = from + (control - from).scaled(2.0 / 3.0);
    let c2 = to + (control - to).scaled(2.0 / 3.0);
    ctx.curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
}

/// Renders a sticker centered on its position; unresolved bitmaps are skipped.
pub fn render_item(ctx: &cairo::Context, item: &Item) {
    let Some(bitmap) = item.image().bitmap() else {
        return;
    };
    let (base_w, base_h) = item.base_size();
    let position = item.position();

    ctx.save().ok();
    ctx.translate(position.x, position.y);
    ctx.rotate(item.rotation().to_radians());
    ctx.scale(item.scale(), item.scale());
    ctx.translate(-base_w / 2.0, -base_h / 2.0);
    ctx.scale(
        base_w / bitmap.width() as f64,
        base_h / bitmap.height() as f64,
    );
    if ctx.set_source_surface(bitmap.surface(), 0.0, 0.0).is_ok() {
        let _ = ctx.paint();
    }
    ctx.restore().ok();
}

/// Dashed outline around the selected item, constant width on screen.
pub fn render_selection(ctx: &cairo::Context, item: &Item, view_scale: f64, style: &SelectionStyle) {
    let (half_w, half_h) = item.half_extents();
    let position = item.position();
    let dash = style.dash / view_scale;

    ctx.save().ok();
    ctx.translate(position.x, position.y);
    ctx.rotate(item.rotation().to_radians());
    style.color.apply(ctx);
    ctx.set_line_width(style.line_width / view_scale);
    ctx.set_dash(&[dash, dash], 0.0);
    ctx.rectangle(-half_w, -half_h, half_w * 2.0, half_h * 2.0);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Renders the eraser outline with a faint fill at the pointer position.
pub fn render_eraser_cursor(ctx: &cairo::Context, cursor: EraserCursor) {
    let radius = cursor.radius.max(1.0);

    ctx.save().ok();
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.15);
    ctx.arc(
        cursor.center.x,
        cursor.center.y,
        radius,
        0.0,
        std::f64::consts::PI * 2.0,
    );
    let _ = ctx.fill_preserve();
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.9);
    ctx.set_line_width(1.5);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::StaticImage;
    use crate::draw::color::{BLACK, RED};
    use crate::resource::{Bitmap, ImageHandle};
    use crate::scene::StrokeDraft;

    fn surface(w: i32, h: i32) -> cairo::ImageSurface {
        cairo::ImageSurface::create(cairo::Format::ARgb32, w, h).unwrap()
    }

    /// Returns (r, g, b, a) of a pixel, premultiplied as stored by Cairo.
    fn pixel(surface: &mut cairo::ImageSurface, x: i32, y: i32) -> (u8, u8, u8, u8) {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y as usize * stride + x as usize * 4;
        // ARGB32 is native-endian; on little endian the byte order is B, G, R, A.
        let px = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        (
            (px >> 16) as u8,
            (px >> 8) as u8,
            px as u8,
            (px >> 24) as u8,
        )
    }

    fn solid_bitmap(w: i32, h: i32, color: Color) -> Bitmap {
        let surface = surface(w, h);
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            color.apply(&ctx);
            ctx.paint().unwrap();
        }
        Bitmap::from_surface(surface).unwrap()
    }

    fn render(scene: &Scene, view: &ViewTransform, bg: Option<&dyn BackgroundSource>) -> cairo::ImageSurface {
        let target = surface(100, 100);
        {
            let ctx = cairo::Context::new(&target).unwrap();
            render_frame(&ctx, scene, view, &Overlay::default(), bg, 100.0, 100.0);
        }
        target
    }

    #[test]
    fn empty_canvas_uses_base_fill() {
        let mut target = render(&Scene::new(), &ViewTransform::new(), None);
        assert_eq!(pixel(&mut target, 50, 50), (10, 6, 16, 255));
    }

    #[test]
    fn single_point_stroke_renders_a_dot() {
        let mut scene = Scene::new();
        scene.add_stroke(StrokeDraft::start(
            Point::new(50.0, 50.0),
            StrokeStyle {
                color: RED,
                width: 10.0,
                opacity: 1.0,
            },
        ));

        let mut target = render(&scene, &ViewTransform::new(), None);
        assert_eq!(pixel(&mut target, 50, 50), (255, 0, 0, 255));
        assert_eq!(pixel(&mut target, 70, 70), (10, 6, 16, 255));
    }

    #[test]
    fn items_follow_view_transform_and_pending_items_are_skipped() {
        let mut scene = Scene::new();
        let ready = ImageHandle::Ready(solid_bitmap(10, 10, RED));
        scene.place_item("red.png", ready, 10.0, 10.0, Point::new(10.0, 10.0));
        scene.place_item("late.png", ImageHandle::Pending, 10.0, 10.0, Point::new(80.0, 80.0));
        scene.clear_selection();

        let mut view = ViewTransform::new();
        view.zoom_at(Point::ZERO, 2.0);
        let mut target = render(&scene, &view, None);

        // World (10, 10) lands at screen (20, 20) at 2x.
        assert_eq!(pixel(&mut target, 20, 20), (255, 0, 0, 255));
        assert_eq!(pixel(&mut target, 5, 5), (10, 6, 16, 255));
        assert_eq!(pixel(&mut target, 80, 80), (10, 6, 16, 255));
    }

    #[test]
    fn selection_outline_needs_a_loaded_bitmap() {
        let style = SelectionStyle {
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            line_width: 4.0,
            dash: 100.0,
        };
        let overlay = Overlay {
            selection: Some(style),
            ..Overlay::default()
        };
        let outline_drawn = |image: ImageHandle| {
            let mut scene = Scene::new();
            scene.place_item("s.png", image, 40.0, 40.0, Point::new(50.0, 50.0));
            let mut target = surface(100, 100);
            {
                let ctx = cairo::Context::new(&target).unwrap();
                render_frame(&ctx, &scene, &ViewTransform::new(), &overlay, None, 100.0, 100.0);
            }
            // Top edge of the 40x40 box centered at (50, 50).
            pixel(&mut target, 50, 30) == (255, 255, 255, 255)
        };

        assert!(outline_drawn(ImageHandle::Ready(solid_bitmap(4, 4, BLACK))));
        assert!(!outline_drawn(ImageHandle::Pending));
        assert!(!outline_drawn(ImageHandle::Failed("gone".into())));
    }

    #[test]
    fn background_is_drawn_beneath_strokes() {
        let bg = StaticImage::new(solid_bitmap(20, 10, BLACK));
        let mut scene = Scene::new();
        scene.add_stroke(StrokeDraft::start(
            Point::new(50.0, 50.0),
            StrokeStyle {
                color: RED,
                width: 6.0,
                opacity: 1.0,
            },
        ));

        let mut target = render(&scene, &ViewTransform::new(), Some(&bg));
        assert_eq!(pixel(&mut target, 5, 5), (0, 0, 0, 255));
        assert_eq!(pixel(&mut target, 50, 50), (255, 0, 0, 255));
    }
}
