use super::*;
use canvas::camera::Point;
use canvas::doc::{BoxGeom, Geometry};

const IMAGE: &str = "img-1";

fn boxed(label: &str, x: f64, y: f64) -> Shape {
    Shape::new(label, Geometry::Box(BoxGeom::new(x, y, 0.2, 0.1)))
}

// =============================================================================
// create
// =============================================================================

#[test]
fn create_then_list() {
    let mut store = InMemoryStore::new();
    let a = store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    let b = store.create(IMAGE, boxed("dog", 0.5, 0.5)).unwrap();
    assert_eq!(store.list(IMAGE), vec![a, b]);
}

#[test]
fn images_are_partitioned() {
    let mut store = InMemoryStore::new();
    store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    assert!(store.list("img-2").is_empty());
}

#[test]
fn create_rejects_duplicate_id() {
    let mut store = InMemoryStore::new();
    let shape = boxed("car", 0.1, 0.1);
    store.create(IMAGE, shape.clone()).unwrap();
    let err = store.create(IMAGE, shape.clone()).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(id) if id == shape.id));
    assert_eq!(err.error_code(), "E_DUPLICATE_ID");
}

#[test]
fn create_rejects_out_of_range_box() {
    let mut store = InMemoryStore::new();
    let err = store.create(IMAGE, boxed("car", 0.9, 0.1)).unwrap_err();
    assert!(matches!(err, StoreError::InvalidGeometry(_)));
    assert!(store.list(IMAGE).is_empty());
}

#[test]
fn create_rejects_two_point_polygon() {
    let mut store = InMemoryStore::new();
    let points = vec![Point::new(0.1, 0.1), Point::new(0.2, 0.2)];
    let err = store.create(IMAGE, Shape::new("car", Geometry::Polygon { points })).unwrap_err();
    assert!(matches!(err, StoreError::InvalidGeometry(_)));
}

// =============================================================================
// update
// =============================================================================

#[test]
fn update_applies_partial_fields() {
    let mut store = InMemoryStore::new();
    let shape = store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    let fields = PartialShape { x: Some(0.3), ..Default::default() };
    let updated = store.update(IMAGE, shape.id, &fields).unwrap();
    let b = updated.geometry.as_box().unwrap();
    assert!((b.x - 0.3).abs() < 1e-12);
    assert!((b.y - 0.1).abs() < 1e-12);
    assert_eq!(store.list(IMAGE), vec![updated]);
}

#[test]
fn update_relabels() {
    let mut store = InMemoryStore::new();
    let shape = store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    let updated = store.update(IMAGE, shape.id, &PartialShape::label("dog")).unwrap();
    assert_eq!(updated.label_id, "dog");
}

#[test]
fn update_unknown_shape_is_not_found() {
    let mut store = InMemoryStore::new();
    let id = uuid::Uuid::new_v4();
    let err = store.update(IMAGE, id, &PartialShape::label("dog")).unwrap_err();
    assert_eq!(err.to_string(), format!("shape not found: {id}"));
}

#[test]
fn update_with_no_applicable_fields_is_rejected() {
    let mut store = InMemoryStore::new();
    let shape = store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    let fields = PartialShape { points: Some(vec![Point::new(0.0, 0.0)]), ..Default::default() };
    let err = store.update(IMAGE, shape.id, &fields).unwrap_err();
    assert!(matches!(err, StoreError::EmptyUpdate(_)));
}

#[test]
fn invalid_update_leaves_shape_untouched() {
    let mut store = InMemoryStore::new();
    let shape = store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    let fields = PartialShape { width: Some(2.0), ..Default::default() };
    let err = store.update(IMAGE, shape.id, &fields).unwrap_err();
    assert!(matches!(err, StoreError::InvalidGeometry(_)));
    assert_eq!(store.list(IMAGE), vec![shape]);
}

// =============================================================================
// delete / remove_label
// =============================================================================

#[test]
fn delete_removes_shape() {
    let mut store = InMemoryStore::new();
    let shape = store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    store.delete(IMAGE, shape.id).unwrap();
    assert!(store.list(IMAGE).is_empty());
    assert!(matches!(store.delete(IMAGE, shape.id), Err(StoreError::NotFound(_))));
}

#[test]
fn remove_label_cascades_only_that_label() {
    let mut store = InMemoryStore::new();
    let car_a = store.create(IMAGE, boxed("car", 0.1, 0.1)).unwrap();
    let dog = store.create(IMAGE, boxed("dog", 0.4, 0.4)).unwrap();
    let car_b = store.create(IMAGE, boxed("car", 0.6, 0.6)).unwrap();
    let removed = store.remove_label(IMAGE, "car");
    assert_eq!(removed, vec![car_a.id, car_b.id]);
    assert_eq!(store.list(IMAGE), vec![dog]);
}

#[test]
fn seed_bypasses_validation() {
    let mut store = InMemoryStore::new();
    let orphan = boxed("gone", 0.1, 0.1);
    store.seed(IMAGE, vec![orphan.clone()]);
    assert_eq!(store.list(IMAGE), vec![orphan]);
}
