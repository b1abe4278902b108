//! Annotation store: the persistence port the editor writes through.
//!
//! DESIGN
//! ======
//! The canvas engine never owns shapes. It emits create/update/delete
//! actions and the host forwards them to an [`AnnotationStore`], then feeds
//! the store's list back into the engine. Stores validate what they accept,
//! so a malformed action is rejected here rather than silently persisted.
//! Shapes are partitioned by image id.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use canvas::doc::{PartialShape, Shape, ShapeId};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("shape not found: {0}")]
    NotFound(ShapeId),
    #[error("shape already exists: {0}")]
    DuplicateId(ShapeId),
    #[error("invalid geometry for shape {0}")]
    InvalidGeometry(ShapeId),
    #[error("empty update for shape {0}")]
    EmptyUpdate(ShapeId),
}

impl StoreError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_SHAPE_NOT_FOUND",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::InvalidGeometry(_) => "E_INVALID_GEOMETRY",
            Self::EmptyUpdate(_) => "E_EMPTY_UPDATE",
        }
    }
}

/// Storage port for annotation shapes, keyed by image.
pub trait AnnotationStore {
    /// Persist a new shape and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is taken or `InvalidGeometry` if the
    /// shape is outside the unit square or degenerate.
    fn create(&mut self, image_id: &str, shape: Shape) -> Result<Shape, StoreError>;

    /// Apply a sparse update and return the resulting shape.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `EmptyUpdate` when no field applies, or
    /// `InvalidGeometry` when the result would be invalid. A rejected
    /// update leaves the stored shape untouched.
    fn update(&mut self, image_id: &str, id: ShapeId, fields: &PartialShape) -> Result<Shape, StoreError>;

    /// Remove a shape.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shape does not exist.
    fn delete(&mut self, image_id: &str, id: ShapeId) -> Result<(), StoreError>;

    /// All shapes for an image, in creation order.
    fn list(&self, image_id: &str) -> Vec<Shape>;

    /// Delete every shape tagged with `label_id` and return their ids.
    ///
    /// This is the cascade a host runs when a label is removed with
    /// "delete its shapes". Without it the shapes stay behind as orphans.
    fn remove_label(&mut self, image_id: &str, label_id: &str) -> Vec<ShapeId> {
        let doomed: Vec<ShapeId> = self
            .list(image_id)
            .into_iter()
            .filter(|s| s.label_id == label_id)
            .map(|s| s.id)
            .collect();
        doomed
            .into_iter()
            .filter(|id| self.delete(image_id, *id).is_ok())
            .collect()
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Process-local store backing the replay tooling and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    images: HashMap<String, Vec<Shape>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an image with existing shapes, bypassing validation.
    pub fn seed(&mut self, image_id: &str, shapes: Vec<Shape>) {
        self.images.insert(image_id.to_owned(), shapes);
    }

    fn shapes_mut(&mut self, image_id: &str) -> &mut Vec<Shape> {
        self.images.entry(image_id.to_owned()).or_default()
    }
}

impl AnnotationStore for InMemoryStore {
    fn create(&mut self, image_id: &str, shape: Shape) -> Result<Shape, StoreError> {
        if !shape.geometry.is_valid(0.0, 0.0) {
            return Err(StoreError::InvalidGeometry(shape.id));
        }
        let shapes = self.shapes_mut(image_id);
        if shapes.iter().any(|s| s.id == shape.id) {
            return Err(StoreError::DuplicateId(shape.id));
        }
        shapes.push(shape.clone());
        Ok(shape)
    }

    fn update(&mut self, image_id: &str, id: ShapeId, fields: &PartialShape) -> Result<Shape, StoreError> {
        let slot = self
            .shapes_mut(image_id)
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut next = slot.clone();
        if !next.apply_partial(fields) {
            return Err(StoreError::EmptyUpdate(id));
        }
        if !next.geometry.is_valid(0.0, 0.0) {
            return Err(StoreError::InvalidGeometry(id));
        }
        *slot = next.clone();
        Ok(next)
    }

    fn delete(&mut self, image_id: &str, id: ShapeId) -> Result<(), StoreError> {
        let shapes = self.shapes_mut(image_id);
        let before = shapes.len();
        shapes.retain(|s| s.id != id);
        if shapes.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn list(&self, image_id: &str) -> Vec<Shape> {
        self.images.get(image_id).cloned().unwrap_or_default()
    }
}
