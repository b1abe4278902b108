//! Editing session: one engine wired to one store for one image.
//!
//! DESIGN
//! ======
//! A session plays the host role around a [`EngineCore`]: raw input and host
//! commands go in, mutation actions are forwarded to the [`AnnotationStore`],
//! and the store's list is fed back so the engine always renders what was
//! persisted. Store rejections are logged and dropped; nothing is retried.
//! Every action the engine emits is appended to an in-order log.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Deserialize;
use tracing::{debug, info, warn};

use canvas::config::EngineConfig;
use canvas::doc::{Label, LabelId, ShapeId};
use canvas::engine::{Action, EngineCore};
use canvas::input::{InputEvent, Tool};
use canvas::render::{self, PaintOp};
use canvas::transform::ImageTransform;

use crate::store::AnnotationStore;

/// A host-side instruction, as opposed to raw user input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    SetTool { tool: Tool },
    SetActiveLabel { label_id: Option<LabelId> },
    SetLabels { labels: Vec<Label> },
    SetLocked { locked: bool },
    SetAnnotationsVisible { visible: bool },
    SetTransform { transform: ImageTransform },
    SetViewport { width: f64, height: f64, dpr: f64 },
    LoadImage { width: f64, height: f64 },
    ZoomIn,
    ZoomOut,
    ResetView,
    /// Drop a label. With `cascade`, its shapes are deleted from the store;
    /// otherwise they remain as orphans the engine skips.
    RemoveLabel {
        id: LabelId,
        #[serde(default)]
        cascade: bool,
    },
}

pub struct Session<S: AnnotationStore> {
    engine: EngineCore,
    store: S,
    image_id: String,
    log: Vec<Action>,
}

impl<S: AnnotationStore> Session<S> {
    /// Open a session on `image_id`, loading the store's current shapes.
    pub fn new(image_id: impl Into<String>, store: S, config: EngineConfig) -> Self {
        let image_id = image_id.into();
        let mut engine = EngineCore::with_config(config);
        let shapes = store.list(&image_id);
        info!(image_id = %image_id, shapes = shapes.len(), "session opened");
        let log = engine.set_shapes(shapes);
        Self { engine, store, image_id, log }
    }

    /// Feed one raw input event through the engine and persist its edits.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        let actions = self.engine.dispatch(event);
        self.settle(actions)
    }

    /// Apply a host command.
    pub fn command(&mut self, command: HostCommand) -> Vec<Action> {
        debug!(?command, "host command");
        let actions = match command {
            HostCommand::SetTool { tool } => self.engine.set_tool(tool),
            HostCommand::SetActiveLabel { label_id } => {
                self.engine.set_active_label(label_id);
                Vec::new()
            }
            HostCommand::SetLabels { labels } => self.engine.set_labels(labels),
            HostCommand::SetLocked { locked } => self.engine.set_locked(locked),
            HostCommand::SetAnnotationsVisible { visible } => self.engine.set_annotations_visible(visible),
            HostCommand::SetTransform { transform } => self.engine.set_transform(transform),
            HostCommand::SetViewport { width, height, dpr } => self.engine.set_viewport(width, height, dpr),
            HostCommand::LoadImage { width, height } => self.engine.on_image_loaded(width, height),
            HostCommand::ZoomIn => self.engine.zoom_in(),
            HostCommand::ZoomOut => self.engine.zoom_out(),
            HostCommand::ResetView => self.engine.reset_view(),
            HostCommand::RemoveLabel { id, cascade } => return self.remove_label(&id, cascade),
        };
        self.settle(actions)
    }

    fn remove_label(&mut self, id: &str, cascade: bool) -> Vec<Action> {
        let remaining: Vec<Label> = self.engine.labels.iter().filter(|l| l.id != id).cloned().collect();
        let mut actions = self.engine.set_labels(remaining);
        if self.engine.ui.active_label.as_deref() == Some(id) {
            self.engine.set_active_label(None);
        }
        if cascade {
            let removed = self.store.remove_label(&self.image_id, id);
            info!(label_id = %id, removed = removed.len(), "label removed with its shapes");
            actions.extend(removed.into_iter().map(|id| Action::ShapeDeleted { id }));
            actions.extend(self.engine.set_shapes(self.store.list(&self.image_id)));
        } else {
            info!(label_id = %id, "label removed; shapes left as orphans");
        }
        self.log.extend(actions.iter().cloned());
        actions
    }

    /// Forward mutations to the store, then reload the engine's shape list.
    fn settle(&mut self, mut actions: Vec<Action>) -> Vec<Action> {
        let mut mutated = false;
        for action in &actions {
            mutated |= self.persist(action);
        }
        if mutated {
            let reloaded = self.engine.set_shapes(self.store.list(&self.image_id));
            actions.extend(reloaded);
        }
        self.log.extend(actions.iter().cloned());
        actions
    }

    /// Returns `true` if the store accepted a mutation.
    fn persist(&mut self, action: &Action) -> bool {
        let (id, result) = match action {
            Action::ShapeCreated(shape) => (shape.id, self.store.create(&self.image_id, shape.clone()).map(drop)),
            Action::ShapeUpdated { id, fields } => (*id, self.store.update(&self.image_id, *id, fields).map(drop)),
            Action::ShapeDeleted { id } => (*id, self.store.delete(&self.image_id, *id)),
            _ => return false,
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(shape_id = %id, code = e.error_code(), error = %e, "store rejected mutation");
                false
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    /// Every action emitted so far, in order.
    #[must_use]
    pub fn log(&self) -> &[Action] {
        &self.log
    }

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.engine.selection()
    }

    /// Display list for the current frame.
    #[must_use]
    pub fn scene(&self) -> Vec<PaintOp> {
        render::scene(&self.engine)
    }
}
