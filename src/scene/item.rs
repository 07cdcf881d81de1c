//! Placeable, transformable sticker items.

use crate::resource::ImageHandle;
use crate::util::Point;
use std::fmt;

/// Identifier of a sticker item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// Scale and rotation of an item, as edited by the transform controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    /// Uniform scale factor; always > 0
    pub scale: f64,
    /// Clockwise rotation in degrees
    pub rotation: f64,
}

impl ItemTransform {
    pub const IDENTITY: ItemTransform = ItemTransform {
        scale: 1.0,
        rotation: 0.0,
    };

    /// Returns true if the transform can be applied to an item.
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0 && self.rotation.is_finite()
    }
}

/// A sticker placed on the canvas, centered on `position`.
#[derive(Debug, Clone)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) source_id: String,
    pub(crate) image: ImageHandle,
    pub(crate) base_width: f64,
    pub(crate) base_height: f64,
    pub(crate) position: Point,
    pub(crate) transform: ItemTransform,
}

impl Item {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn base_size(&self) -> (f64, f64) {
        (self.base_width, self.base_height)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn transform(&self) -> ItemTransform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    /// Half of the scaled width and height, in the item's local frame.
    pub fn half_extents(&self) -> (f64, f64) {
        (
            self.base_width * self.transform.scale / 2.0,
            self.base_height * self.transform.scale / 2.0,
        )
    }

    /// Returns true if the world-space `point` falls inside the rotated, scaled bounds (inclusive).
    pub fn contains(&self, point: Point) -> bool {
        let local = (point - self.position).rotated(-self.transform.rotation);
        let (half_w, half_h) = self.half_extents();
        local.x.abs() <= half_w && local.y.abs() <= half_h
    }

    /// Geometry and identity of the item, without the live bitmap.
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            source_id: self.source_id.clone(),
            base_width: self.base_width,
            base_height: self.base_height,
            position: self.position,
            transform: self.transform,
        }
    }
}

/// Immutable record of an item used by the undo history.
///
/// Restoring a snapshot yields an item whose bitmap is [`ImageHandle::Pending`];
/// the bitmap is re-acquired through the resource loader.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub source_id: String,
    pub base_width: f64,
    pub base_height: f64,
    pub position: Point,
    pub transform: ItemTransform,
}

impl ItemSnapshot {
    pub(crate) fn into_item(self) -> Item {
        Item {
            id: self.id,
            source_id: self.source_id,
            image: ImageHandle::Pending,
            base_width: self.base_width,
            base_height: self.base_height,
            position: self.position,
            transform: self.transform,
        }
    }
}
