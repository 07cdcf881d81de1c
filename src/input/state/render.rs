use crate::background::BackgroundSource;
use crate::draw::{EraserCursor, Overlay, render_frame};
use crate::input::tool::Tool;

use super::{Editor, InteractionState};

impl Editor {
    /// Transient state to draw above the scene.
    ///
    /// The eraser cursor is sized in screen pixels so it matches the
    /// world-space radius at the current zoom.
    pub fn overlay(&self) -> Overlay<'_> {
        let draft = match &self.state {
            InteractionState::Drawing { draft } => Some((draft.points(), draft.style())),
            _ => None,
        };
        let eraser = match (&self.tool, self.pointer) {
            (Some(Tool::Eraser), Some(center)) => Some(EraserCursor {
                center,
                radius: self.settings.eraser_radius * self.view.scale(),
            }),
            _ => None,
        };
        Overlay {
            draft,
            eraser,
            selection: Some(self.settings.selection),
        }
    }

    /// Renders the current frame and clears the redraw flag.
    pub fn render(
        &mut self,
        ctx: &cairo::Context,
        background: Option<&dyn BackgroundSource>,
        width: f64,
        height: f64,
    ) {
        render_frame(
            ctx,
            &self.scene,
            &self.view,
            &self.overlay(),
            background,
            width,
            height,
        );
        self.needs_redraw = false;
    }
}
