//! Scene model: strokes, sticker items and the current selection.
//!
//! Render order is strokes in insertion order, then items in sequence order
//! (last item = topmost). Item order only changes through three mutators:
//! append, remove and move-to-front.

mod item;
mod stroke;
#[cfg(test)]
mod tests;

pub use item::{Item, ItemId, ItemSnapshot, ItemTransform};
pub use stroke::{Stroke, StrokeDraft, StrokeId, StrokeStyle};

use crate::resource::ImageHandle;
use crate::util::Point;

/// A stroke removed from the scene together with its former index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedStroke {
    pub index: usize,
    pub stroke: Stroke,
}

/// Everything removed by one erase call.
#[derive(Debug, Default)]
pub struct Erased {
    pub strokes: Vec<IndexedStroke>,
    pub items: Vec<Item>,
}

impl Erased {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.items.is_empty()
    }
}

/// Container for all strokes and items of one editing surface.
#[derive(Debug, Default)]
pub struct Scene {
    strokes: Vec<Stroke>,
    items: Vec<Item>,
    selected: Option<ItemId>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Items from bottom to top.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id == id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.items.is_empty()
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.and_then(|id| self.item(id))
    }

    /// Geometry of all items in render order, for comparisons and diagnostics.
    pub fn item_snapshots(&self) -> Vec<ItemSnapshot> {
        self.items.iter().map(Item::snapshot).collect()
    }

    /// Items still waiting for a bitmap, as `(id, source)` pairs.
    pub fn pending_items(&self) -> Vec<(ItemId, String)> {
        self.items
            .iter()
            .filter(|it| it.image.is_pending())
            .map(|it| (it.id, it.source_id.clone()))
            .collect()
    }

    /// Returns true if `point` lies inside `item`'s rotated, scaled bounds.
    pub fn hit_test(point: Point, item: &Item) -> bool {
        item.contains(point)
    }

    /// Finds the topmost item under `point` (world space).
    ///
    /// Items whose bitmap failed to load are never drawn and are skipped.
    /// Pending items still hit: they are waiting on the next resolve pass.
    pub fn find_topmost_item_at(&self, point: Point) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .filter(|it| !matches!(it.image, ImageHandle::Failed(_)))
            .find(|it| Self::hit_test(point, it))
            .map(|it| it.id)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects an item; ignored if the id is absent.
    pub fn select(&mut self, id: ItemId) {
        if self.item(id).is_some() {
            self.selected = Some(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ------------------------------------------------------------------
    // Strokes
    // ------------------------------------------------------------------

    /// Commits a drawn stroke on top of existing strokes.
    pub fn add_stroke(&mut self, draft: StrokeDraft) -> StrokeId {
        let id = StrokeId(self.generate_id());
        self.strokes.push(draft.finish(id));
        id
    }

    /// Puts a previously removed stroke back, keeping its id.
    ///
    /// With `index` the stroke returns to its former depth (clamped to the
    /// current length); otherwise it is appended.
    pub(crate) fn restore_stroke(&mut self, stroke: Stroke, index: Option<usize>) {
        if self.stroke(stroke.id).is_some() {
            log::debug!("Stroke {} already present, skipping restore", stroke.id);
            return;
        }
        match index {
            Some(index) => {
                let index = index.min(self.strokes.len());
                self.strokes.insert(index, stroke);
            }
            None => self.strokes.push(stroke),
        }
    }

    pub fn remove_stroke(&mut self, id: StrokeId) -> Option<IndexedStroke> {
        let index = self.strokes.iter().position(|s| s.id == id)?;
        let stroke = self.strokes.remove(index);
        Some(IndexedStroke { index, stroke })
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    fn append_item(&mut self, item: Item) {
        self.items.push(item);
    }

    fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|it| it.id == id)?;
        let item = self.items.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(item)
    }

    fn move_item_to_front(&mut self, id: ItemId) -> bool {
        match self.items.iter().position(|it| it.id == id) {
            Some(index) => {
                let item = self.items.remove(index);
                self.items.push(item);
                true
            }
            None => false,
        }
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|it| it.id == id)
    }

    /// Places a new item on top of all others and selects it.
    ///
    /// The caller resolves `image` beforehand; base dimensions must be positive.
    pub fn place_item(
        &mut self,
        source_id: impl Into<String>,
        image: ImageHandle,
        base_width: f64,
        base_height: f64,
        position: Point,
    ) -> ItemId {
        let id = ItemId(self.generate_id());
        self.append_item(Item {
            id,
            source_id: source_id.into(),
            image,
            base_width: base_width.max(1.0),
            base_height: base_height.max(1.0),
            position,
            transform: ItemTransform::IDENTITY,
        });
        self.selected = Some(id);
        id
    }

    /// Re-inserts an item from its snapshot at the top of the z-order.
    pub(crate) fn restore_item(&mut self, snapshot: ItemSnapshot) {
        if self.item(snapshot.id).is_some() {
            log::debug!("Item {} already present, skipping restore", snapshot.id);
            return;
        }
        self.append_item(snapshot.into_item());
    }

    /// Removes an item, clearing the selection if it pointed at it. No-op for absent ids.
    pub fn delete_item(&mut self, id: ItemId) -> Option<Item> {
        self.remove_item(id)
    }

    /// Makes an item topmost. Returns false for absent ids.
    pub fn reorder_to_front(&mut self, id: ItemId) -> bool {
        self.move_item_to_front(id)
    }

    /// Sets scale and rotation in place. Invalid transforms and absent ids are ignored.
    ///
    /// Returns the previous transform when something was applied.
    pub fn transform_item(
        &mut self,
        id: ItemId,
        scale: f64,
        rotation_degrees: f64,
    ) -> Option<ItemTransform> {
        let transform = ItemTransform {
            scale,
            rotation: rotation_degrees,
        };
        if !transform.is_valid() {
            log::warn!("Rejecting invalid transform {transform:?} for {id}");
            return None;
        }
        let item = self.item_mut(id)?;
        let before = item.transform;
        item.transform = transform;
        Some(before)
    }

    /// Moves an item's center. Not recorded in the undo history.
    pub fn set_item_position(&mut self, id: ItemId, position: Point) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.position = position;
                true
            }
            None => false,
        }
    }

    /// Attaches a resolved (or failed) bitmap to an item.
    pub fn set_item_image(&mut self, id: ItemId, image: ImageHandle) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.image = image;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Eraser
    // ------------------------------------------------------------------

    /// Removes every stroke with a point within `radius` of `point`, and
    /// every item whose center is within `radius`.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> Erased {
        let mut erased = Erased::default();

        let mut index = 0;
        let mut original_index = 0;
        while index < self.strokes.len() {
            if self.strokes[index].touches(point, radius) {
                let stroke = self.strokes.remove(index);
                erased.strokes.push(IndexedStroke {
                    index: original_index,
                    stroke,
                });
            } else {
                index += 1;
            }
            original_index += 1;
        }

        let hit: Vec<ItemId> = self
            .items
            .iter()
            .filter(|it| it.position.distance(point) <= radius)
            .map(|it| it.id)
            .collect();
        for id in hit {
            if let Some(item) = self.remove_item(id) {
                erased.items.push(item);
            }
        }

        if !erased.is_empty() {
            log::debug!(
                "Erased {} stroke(s) and {} item(s) at ({:.1}, {:.1})",
                erased.strokes.len(),
                erased.items.len(),
                point.x,
                point.y
            );
        }
        erased
    }
}
