//! The anatomical model viewer
//!
//! Owns one mounted model: the pending or finished scene load, the parts
//! found in it, their color state, and the hover label. The host drives it
//! with `poll_load` once per frame and forwards pointer input.

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use plenamente_assets::{AssetError, PendingLoad, SceneGraph, SceneLoader};
use plenamente_core::Color;
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::error::ConfigError;
use crate::hover::{HoverController, HoverInfo, HoverListener, PartState, Propagation};
use crate::labels::LabelTable;
use crate::material::MaterialStore;
use crate::partition::{collect_part_meshes, PartId, PartMesh, PartPattern};
use crate::picking::{pick, PointerEvent, PointerTracker, Ray};
use crate::projection::ScreenProjection;

/// Lifecycle of a viewer as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerStatus {
    /// Nothing mounted yet
    Empty,
    /// Scene is loading; the host shows its fallback
    Loading,
    /// Scene loaded and parts are interactive (possibly none)
    Ready,
    /// Scene failed to load; see [`ModelViewer::error`]
    Failed,
    /// Torn down; every further call is ignored
    Unmounted,
}

enum LoadState {
    Empty,
    Loading(PendingLoad),
    Ready,
    Failed(AssetError),
    Unmounted,
}

/// Interactive viewer for one anatomical model
pub struct ModelViewer {
    pattern: PartPattern,
    labels: LabelTable,
    state: LoadState,
    scene: Option<Arc<SceneGraph>>,
    parts: Vec<PartMesh>,
    materials: MaterialStore,
    hover: HoverController,
    tracker: PointerTracker,
}

impl ModelViewer {
    /// Create an unmounted viewer from configuration.
    pub fn new(config: &ViewerConfig) -> Result<Self, ConfigError> {
        let settings = config.hover_settings()?;
        Ok(Self {
            pattern: config.part_pattern(),
            labels: config.label_table(),
            state: LoadState::Empty,
            scene: None,
            parts: Vec::new(),
            materials: MaterialStore::new(settings.default_color),
            hover: HoverController::new(settings),
            tracker: PointerTracker::new(),
        })
    }

    /// Start loading the model at `path`. Replaces any load in progress.
    pub fn mount(&mut self, loader: &SceneLoader, path: impl Into<PathBuf>) {
        if self.is_unmounted() {
            debug!("Ignoring mount on an unmounted viewer");
            return;
        }
        let pending = loader.load(path);
        info!("Loading model '{}'", pending.path().display());
        self.state = LoadState::Loading(pending);
    }

    /// Start from a load handle obtained elsewhere.
    pub fn mount_pending(&mut self, pending: PendingLoad) {
        if self.is_unmounted() {
            return;
        }
        self.state = LoadState::Loading(pending);
    }

    /// Check the pending load without blocking. Call once per frame.
    pub fn poll_load(&mut self) -> ViewerStatus {
        let result = match &self.state {
            LoadState::Loading(pending) => pending.try_recv(),
            _ => None,
        };
        if let Some(result) = result {
            self.finish_load(result);
        }
        self.status()
    }

    /// Block until the pending load finishes. Only use during loading screens.
    pub fn wait_for_load(&mut self) -> ViewerStatus {
        if let LoadState::Loading(_) = self.state {
            if let LoadState::Loading(pending) = std::mem::replace(&mut self.state, LoadState::Empty) {
                let result = pending.wait();
                self.finish_load(result);
            }
        }
        self.status()
    }

    fn finish_load(&mut self, result: Result<Arc<SceneGraph>, AssetError>) {
        match result {
            Ok(scene) => {
                self.set_scene(scene);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!("Model failed to load: {}", e);
                self.state = LoadState::Failed(e);
            }
        }
    }

    /// Show `scene`. Parts are collected again only when `scene` is a
    /// different scene from the one already shown. Returns whether it was.
    pub fn set_scene(&mut self, scene: Arc<SceneGraph>) -> bool {
        if self.is_unmounted() {
            return false;
        }
        if self.state_is_empty_or_failed() {
            self.state = LoadState::Ready;
        }
        if self.scene.as_ref().is_some_and(|current| Arc::ptr_eq(current, &scene)) {
            return false;
        }

        self.hover.reset(&mut self.materials);
        self.tracker = PointerTracker::new();
        self.materials.clear();

        self.parts = collect_part_meshes(&scene, &self.pattern);
        self.scene = Some(scene);
        self.isolate_materials();
        true
    }

    /// Give every part its own color entry. Safe to call repeatedly.
    pub fn isolate_materials(&mut self) -> usize {
        self.materials.isolate(&self.parts)
    }

    fn state_is_empty_or_failed(&self) -> bool {
        matches!(self.state, LoadState::Empty | LoadState::Failed(_))
    }

    fn is_unmounted(&self) -> bool {
        matches!(self.state, LoadState::Unmounted)
    }

    pub fn status(&self) -> ViewerStatus {
        match self.state {
            LoadState::Empty => ViewerStatus::Empty,
            LoadState::Loading(_) => ViewerStatus::Loading,
            LoadState::Ready => ViewerStatus::Ready,
            LoadState::Failed(_) => ViewerStatus::Failed,
            LoadState::Unmounted => ViewerStatus::Unmounted,
        }
    }

    /// Load error, if the last load failed
    pub fn error(&self) -> Option<&AssetError> {
        match &self.state {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// The scene currently shown
    pub fn scene(&self) -> Option<&Arc<SceneGraph>> {
        self.scene.as_ref()
    }

    /// Interactive parts, in traversal order
    pub fn parts(&self) -> &[PartMesh] {
        &self.parts
    }

    pub fn part(&self, id: PartId) -> Option<&PartMesh> {
        self.parts.get(id.index()).filter(|part| part.id == id)
    }

    pub fn part_by_name(&self, name: &str) -> Option<&PartMesh> {
        self.parts.iter().find(|part| part.name == name)
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn materials(&self) -> &MaterialStore {
        &self.materials
    }

    /// Current color of a part
    pub fn color(&self, id: PartId) -> Option<Color> {
        self.materials.color(id)
    }

    pub fn hover_info(&self) -> Option<&HoverInfo> {
        self.hover.hover_info()
    }

    pub fn part_state(&self, id: PartId) -> PartState {
        self.hover.state(id)
    }

    /// Register the hover-changed callback.
    pub fn on_hover_change(&mut self, listener: HoverListener) {
        if self.is_unmounted() {
            return;
        }
        self.hover.set_listener(listener);
    }

    /// Pointer entered a part.
    pub fn pointer_enter(&mut self, id: PartId, projection: &ScreenProjection) -> Propagation {
        if self.is_unmounted() {
            debug!("Ignoring pointer enter after unmount");
            return Propagation::Continue;
        }
        let Some(part) = self.parts.get(id.index()).filter(|part| part.id == id) else {
            debug!("Pointer entered unknown part {:?}", id);
            return Propagation::Continue;
        };
        self.hover
            .pointer_enter(part, &mut self.materials, &self.labels, projection)
    }

    /// Pointer left a part.
    pub fn pointer_leave(&mut self, id: PartId) -> Propagation {
        if self.is_unmounted() {
            debug!("Ignoring pointer leave after unmount");
            return Propagation::Continue;
        }
        let Some(part) = self.parts.get(id.index()).filter(|part| part.id == id) else {
            debug!("Pointer left unknown part {:?}", id);
            return Propagation::Continue;
        };
        self.hover.pointer_leave(part, &mut self.materials)
    }

    /// Apply an enter or leave event.
    pub fn handle_event(&mut self, event: PointerEvent, projection: &ScreenProjection) -> Propagation {
        match event {
            PointerEvent::Enter(id) => self.pointer_enter(id, projection),
            PointerEvent::Leave(id) => self.pointer_leave(id),
        }
    }

    /// Pointer moved to `pixel`. Hit-tests the parts and applies the
    /// resulting leave/enter events. Returns the part under the pointer.
    pub fn pointer_moved(&mut self, pixel: Vec2, projection: &ScreenProjection) -> Option<PartId> {
        if self.is_unmounted() {
            return None;
        }
        let placement = self.hover.settings().placement;
        let hit = Ray::from_screen(pixel, projection)
            .and_then(|ray| pick(&ray, &self.parts, &placement))
            .map(|hit| hit.part);

        for event in self.tracker.pointer_moved(hit) {
            self.handle_event(event, projection);
        }
        hit
    }

    /// Pointer left the drawing surface.
    pub fn pointer_exited(&mut self) {
        if self.is_unmounted() {
            return;
        }
        if let Some(PointerEvent::Leave(id)) = self.tracker.pointer_left() {
            self.pointer_leave(id);
        }
    }

    /// Tear the viewer down. An in-flight load is abandoned, the hover
    /// listener is dropped without being called, and later events are ignored.
    pub fn unmount(&mut self) {
        if self.is_unmounted() {
            return;
        }
        if let LoadState::Loading(pending) = &self.state {
            debug!("Abandoning load of '{}'", pending.path().display());
        }
        self.state = LoadState::Unmounted;
        self.hover.reset(&mut self.materials);
        self.hover.detach();
        self.tracker = PointerTracker::new();
        info!("Viewer unmounted");
    }
}

impl Drop for ModelViewer {
    fn drop(&mut self) {
        self.unmount();
    }
}
