use super::*;
use crate::draw::color::CRIMSON;

fn style() -> StrokeStyle {
    StrokeStyle {
        color: CRIMSON,
        width: 18.0,
        opacity: 0.6,
    }
}

fn stroke_through(scene: &mut Scene, points: &[(f64, f64)]) -> StrokeId {
    let mut iter = points.iter().map(|&p| Point::from(p));
    let mut draft = StrokeDraft::start(iter.next().unwrap(), style());
    for p in iter {
        draft.push(p);
    }
    scene.add_stroke(draft)
}

fn place(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64) -> ItemId {
    scene.place_item("sticker.png", ImageHandle::Pending, w, h, Point::new(x, y))
}

#[test]
fn hit_test_respects_rotation() {
    let mut scene = Scene::new();
    let id = place(&mut scene, 0.0, 0.0, 100.0, 40.0);

    let item = scene.item(id).unwrap();
    assert!(Scene::hit_test(Point::new(49.0, 0.0), item));
    assert!(!Scene::hit_test(Point::new(51.0, 0.0), item));
    assert!(Scene::hit_test(Point::new(50.0, 20.0), item), "edges are inclusive");

    scene.transform_item(id, 1.0, 90.0).unwrap();
    let item = scene.item(id).unwrap();
    assert!(Scene::hit_test(Point::new(0.0, 49.0), item));
    assert!(!Scene::hit_test(Point::new(0.0, 51.0), item));
    assert!(!Scene::hit_test(Point::new(30.0, 0.0), item));
}

#[test]
fn hit_test_after_scale_and_rotation() {
    let mut scene = Scene::new();
    let id = place(&mut scene, 100.0, 100.0, 40.0, 40.0);
    scene.transform_item(id, 2.0, 45.0).unwrap();

    // (10, 10) in the item's local frame, mapped to world space.
    let local = Point::new(10.0, 10.0);
    let world = Point::new(100.0, 100.0) + local.rotated(45.0);
    assert!(Scene::hit_test(world, scene.item(id).unwrap()));

    // Just past the scaled half-extent along the rotated x axis.
    let outside = Point::new(100.0, 100.0) + Point::new(41.0, 0.0).rotated(45.0);
    assert!(!Scene::hit_test(outside, scene.item(id).unwrap()));
}

#[test]
fn topmost_item_wins() {
    let mut scene = Scene::new();
    let bottom = place(&mut scene, 0.0, 0.0, 50.0, 50.0);
    let top = place(&mut scene, 10.0, 10.0, 50.0, 50.0);

    assert_eq!(scene.find_topmost_item_at(Point::new(5.0, 5.0)), Some(top));
    assert_eq!(scene.find_topmost_item_at(Point::new(-20.0, -20.0)), Some(bottom));
    assert_eq!(scene.find_topmost_item_at(Point::new(500.0, 500.0)), None);

    assert!(scene.reorder_to_front(bottom));
    assert_eq!(scene.find_topmost_item_at(Point::new(5.0, 5.0)), Some(bottom));
}

#[test]
fn placing_selects_and_deleting_clears_selection() {
    let mut scene = Scene::new();
    let first = place(&mut scene, 0.0, 0.0, 10.0, 10.0);
    assert_eq!(scene.selected(), Some(first));

    let second = place(&mut scene, 50.0, 0.0, 10.0, 10.0);
    assert_eq!(scene.selected(), Some(second));

    scene.delete_item(first);
    assert_eq!(scene.selected(), Some(second), "deleting another item keeps selection");

    scene.delete_item(second);
    assert_eq!(scene.selected(), None);
    assert!(scene.items().is_empty());
}

#[test]
fn absent_ids_are_no_ops() {
    let mut scene = Scene::new();
    let id = place(&mut scene, 0.0, 0.0, 10.0, 10.0);
    scene.delete_item(id);

    assert!(scene.delete_item(id).is_none());
    assert!(!scene.reorder_to_front(id));
    assert!(scene.transform_item(id, 2.0, 10.0).is_none());
    assert!(!scene.set_item_position(id, Point::new(1.0, 1.0)));
    scene.select(id);
    assert_eq!(scene.selected(), None);
}

#[test]
fn degenerate_scale_is_rejected() {
    let mut scene = Scene::new();
    let id = place(&mut scene, 0.0, 0.0, 10.0, 10.0);

    assert!(scene.transform_item(id, 0.0, 0.0).is_none());
    assert!(scene.transform_item(id, -1.0, 0.0).is_none());
    assert!(scene.transform_item(id, f64::NAN, 0.0).is_none());
    assert_eq!(scene.item(id).unwrap().transform(), ItemTransform::IDENTITY);
}

#[test]
fn erase_removes_strokes_touching_radius_only() {
    let mut scene = Scene::new();
    let touching = stroke_through(&mut scene, &[(100.0, 100.0), (110.0, 103.0), (200.0, 200.0)]);
    let far = stroke_through(&mut scene, &[(120.0, 100.0), (130.0, 100.0)]);
    let boundary = stroke_through(&mut scene, &[(90.0, 90.0), (105.0, 90.0)]);

    let erased = scene.erase_at(Point::new(105.0, 100.0), 10.0);

    let removed: Vec<StrokeId> = erased.strokes.iter().map(|s| s.stroke.id()).collect();
    assert_eq!(removed, vec![touching, boundary]);
    assert_eq!(erased.strokes[0].index, 0);
    assert_eq!(erased.strokes[1].index, 2);
    assert_eq!(scene.strokes().len(), 1);
    assert_eq!(scene.strokes()[0].id(), far);
    assert_eq!(scene.strokes()[0].points().len(), 2);
}

#[test]
fn erase_removes_items_by_center_and_clears_selection() {
    let mut scene = Scene::new();
    let near = place(&mut scene, 10.0, 0.0, 500.0, 500.0);
    let far = place(&mut scene, 100.0, 0.0, 10.0, 10.0);
    scene.select(near);

    let erased = scene.erase_at(Point::ZERO, 10.0);

    assert_eq!(erased.items.len(), 1);
    assert_eq!(erased.items[0].id(), near);
    assert_eq!(scene.selected(), None);
    assert!(scene.item(far).is_some());
}

#[test]
fn restoring_strokes_returns_them_to_their_depth() {
    let mut scene = Scene::new();
    let a = stroke_through(&mut scene, &[(0.0, 0.0)]);
    let b = stroke_through(&mut scene, &[(50.0, 0.0)]);
    let c = stroke_through(&mut scene, &[(100.0, 0.0)]);
    let d = stroke_through(&mut scene, &[(150.0, 0.0)]);

    let first = scene.erase_at(Point::new(50.0, 0.0), 1.0);
    let second = scene.erase_at(Point::new(150.0, 0.0), 1.0);
    assert_eq!(scene.strokes().len(), 2);

    // Undo order: latest erase first.
    for batch in [second, first] {
        for entry in batch.strokes {
            scene.restore_stroke(entry.stroke, Some(entry.index));
        }
    }

    let ids: Vec<StrokeId> = scene.strokes().iter().map(Stroke::id).collect();
    assert_eq!(ids, vec![a, b, c, d]);
}

#[test]
fn restored_item_is_pending_and_on_top() {
    let mut scene = Scene::new();
    let first = place(&mut scene, 0.0, 0.0, 10.0, 10.0);
    scene.set_item_image(first, ImageHandle::Failed("gone".into()));
    let _second = place(&mut scene, 5.0, 5.0, 10.0, 10.0);

    let snapshot = scene.delete_item(first).unwrap().snapshot();
    scene.restore_item(snapshot.clone());

    assert_eq!(scene.items().last().unwrap().snapshot(), snapshot);
    assert!(scene.items().last().unwrap().image().is_pending());
    assert_eq!(scene.pending_items().len(), 2);
}
