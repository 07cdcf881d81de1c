use crate::history::UndoAction;
use crate::resource::{Bitmap, ImageHandle, ResourceError, ResourceLoader};
use crate::scene::ItemId;
use futures::future::join_all;
use log::{info, warn};

use super::{Editor, PlacementRequest};

/// Result of resolving one queued placement or pending item.
#[derive(Debug)]
pub enum PlacementOutcome {
    /// A new sticker was placed and recorded.
    Placed { id: ItemId, source_id: String },
    /// The bitmap could not be loaded; the scene is unchanged.
    Failed {
        source_id: String,
        error: ResourceError,
    },
    /// An item restored by undo/redo got its bitmap back.
    Reacquired { id: ItemId },
    /// An item restored by undo/redo could not get its bitmap back; it stays unrendered.
    ReacquireFailed { id: ItemId, error: ResourceError },
}

impl PlacementOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PlacementOutcome::Failed { .. } | PlacementOutcome::ReacquireFailed { .. }
        )
    }
}

impl Editor {
    /// Returns and clears the queued sticker placements.
    ///
    /// Hosts that load bitmaps themselves take the queue and call
    /// [`Editor::place_loaded`] for each success.
    pub fn take_pending_placements(&mut self) -> Vec<PlacementRequest> {
        std::mem::take(&mut self.pending_placements)
    }

    /// Returns true if placements are queued or items are waiting for bitmaps.
    pub fn has_pending_work(&self) -> bool {
        !self.pending_placements.is_empty() || !self.scene.pending_items().is_empty()
    }

    /// Places a sticker whose bitmap is already loaded and records `AddItem`.
    ///
    /// Base size is the bitmap size clamped to the configured maximum.
    pub fn place_loaded(&mut self, request: PlacementRequest, bitmap: Bitmap) -> ItemId {
        let base_width = (bitmap.width() as f64).min(self.settings.max_sticker_width);
        let base_height = (bitmap.height() as f64).min(self.settings.max_sticker_height);
        let id = self.scene.place_item(
            request.source_id,
            ImageHandle::Ready(bitmap),
            base_width,
            base_height,
            request.position,
        );
        if let Some(item) = self.scene.item(id) {
            let snapshot = item.snapshot();
            self.record(UndoAction::AddItem { item: snapshot });
        }
        id
    }

    /// Loads every queued placement and every item still waiting for its
    /// bitmap, then applies the results in request order.
    ///
    /// A failed placement leaves the scene and history untouched.
    pub async fn resolve_pending(&mut self, loader: &dyn ResourceLoader) -> Vec<PlacementOutcome> {
        let requests = self.take_pending_placements();
        let reacquire = self.scene.pending_items();
        if requests.is_empty() && reacquire.is_empty() {
            return Vec::new();
        }

        let placement_loads = join_all(requests.iter().map(|req| loader.load(&req.source_id)));
        let reacquire_loads = join_all(reacquire.iter().map(|(_, source)| loader.load(source)));
        let (placed, reacquired) = futures::join!(placement_loads, reacquire_loads);

        let mut outcomes = Vec::with_capacity(requests.len() + reacquire.len());

        for ((id, source_id), result) in reacquire.into_iter().zip(reacquired) {
            match result {
                Ok(bitmap) => {
                    self.scene.set_item_image(id, ImageHandle::Ready(bitmap));
                    outcomes.push(PlacementOutcome::Reacquired { id });
                }
                Err(error) => {
                    warn!("Could not reload sticker '{source_id}' for {id}: {error}");
                    self.scene
                        .set_item_image(id, ImageHandle::Failed(error.to_string()));
                    outcomes.push(PlacementOutcome::ReacquireFailed { id, error });
                }
            }
            self.needs_redraw = true;
        }

        for (request, result) in requests.into_iter().zip(placed) {
            match result {
                Ok(bitmap) => {
                    let source_id = request.source_id.clone();
                    let id = self.place_loaded(request, bitmap);
                    info!("Placed sticker '{source_id}' as {id}");
                    outcomes.push(PlacementOutcome::Placed { id, source_id });
                }
                Err(error) => {
                    warn!("Failed to place sticker '{}': {error}", request.source_id);
                    outcomes.push(PlacementOutcome::Failed {
                        source_id: request.source_id,
                        error,
                    });
                }
            }
        }

        outcomes
    }
}
