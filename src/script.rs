//! Replay scripts: a JSON description of one editing session.
//!
//! A script names the image, seeds labels and shapes, and lists steps. Each
//! step is either a raw input event (`pointer_down`, `key_down`, ...) or a
//! host command (`set_tool`, `remove_label`, ...), distinguished by `type`.
//!
//! ```json
//! {
//!   "image": { "id": "img-1", "width": 500, "height": 500 },
//!   "labels": [{ "id": "car", "name": "Car", "color": "#FF0000", "hotkey": "1" }],
//!   "active_label": "car",
//!   "tool": "box",
//!   "steps": [
//!     { "type": "pointer_down", "x": 0, "y": 0 },
//!     { "type": "pointer_up", "x": 100, "y": 50 }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::Deserialize;
use tracing::info;

use canvas::config::EngineConfig;
use canvas::doc::{Label, LabelId, Shape};
use canvas::input::{InputEvent, Tool};

use crate::config::HostConfig;
use crate::session::{HostCommand, Session};
use crate::store::InMemoryStore;

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSpec {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_dpr")]
    pub dpr: f64,
}

fn default_dpr() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Input(InputEvent),
    Command(HostCommand),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub image: ImageSpec,
    /// Overrides the environment's viewport.
    #[serde(default)]
    pub viewport: Option<ViewportSpec>,
    /// Overrides the environment's engine config.
    #[serde(default)]
    pub config: Option<EngineConfig>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub active_label: Option<LabelId>,
    #[serde(default)]
    pub tool: Tool,
    /// Shapes already in the store when the session opens.
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed scripts.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Open a session seeded from the script's setup, with no steps applied.
    #[must_use]
    pub fn open(&self, host: &HostConfig) -> Session<InMemoryStore> {
        let mut store = InMemoryStore::new();
        store.seed(&self.image.id, self.shapes.clone());

        let engine_config = self.config.clone().unwrap_or_else(|| host.engine.clone());
        let viewport = self.viewport.unwrap_or(ViewportSpec {
            width: host.viewport_width,
            height: host.viewport_height,
            dpr: host.dpr,
        });

        let mut session = Session::new(self.image.id.clone(), store, engine_config);
        for cmd in [
            HostCommand::SetViewport { width: viewport.width, height: viewport.height, dpr: viewport.dpr },
            HostCommand::SetLabels { labels: self.labels.clone() },
            HostCommand::SetActiveLabel { label_id: self.active_label.clone() },
            HostCommand::SetTool { tool: self.tool },
            HostCommand::LoadImage { width: self.image.width, height: self.image.height },
        ] {
            session.command(cmd);
        }
        session
    }

    /// Open a session and apply every step in order.
    #[must_use]
    pub fn replay(&self, host: &HostConfig) -> Session<InMemoryStore> {
        let mut session = self.open(host);
        for step in &self.steps {
            match step.clone() {
                Step::Input(event) => session.handle(event),
                Step::Command(cmd) => session.command(cmd),
            };
        }
        info!(
            image_id = %self.image.id,
            steps = self.steps.len(),
            actions = session.log().len(),
            "script replayed"
        );
        session
    }
}
