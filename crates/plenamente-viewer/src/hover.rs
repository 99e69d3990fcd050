//! Hover highlighting and label placement
//!
//! Each part is either `Idle` (default color, no label) or `Hovered`
//! (highlight color, label visible). At most one part is hovered at a time.
//! The label position is computed when the pointer enters a part and is not
//! refreshed while the camera moves.

use plenamente_core::{Color, Transform};
use tracing::{debug, trace};

use crate::labels::LabelTable;
use crate::material::MaterialStore;
use crate::partition::{AnchorMode, PartId, PartMesh};
use crate::projection::ScreenProjection;

/// Hover state of a single part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartState {
    Idle,
    Hovered,
}

/// Whether a pointer event should continue to geometry behind the part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// The hovered part and where its label goes, in viewport pixels
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    pub part: PartId,
    /// Text to display
    pub label: String,
    pub x: f32,
    pub y: f32,
}

/// Called whenever the hover info appears, moves to another part, or clears.
pub type HoverListener = Box<dyn FnMut(Option<&HoverInfo>) + Send>;

/// Colors and placement used by the hover controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverSettings {
    pub default_color: Color,
    pub highlight_color: Color,
    /// Transform applied to the whole model in the scene
    pub placement: Transform,
    pub anchor: AnchorMode,
}

/// Drives part colors and the hover info from pointer enter/leave events.
pub struct HoverController {
    settings: HoverSettings,
    hovered: Option<HoverInfo>,
    listener: Option<HoverListener>,
}

impl HoverController {
    pub fn new(settings: HoverSettings) -> Self {
        Self {
            settings,
            hovered: None,
            listener: None,
        }
    }

    pub fn settings(&self) -> &HoverSettings {
        &self.settings
    }

    /// Current hover info
    pub fn hover_info(&self) -> Option<&HoverInfo> {
        self.hovered.as_ref()
    }

    pub fn state(&self, part: PartId) -> PartState {
        match &self.hovered {
            Some(info) if info.part == part => PartState::Hovered,
            _ => PartState::Idle,
        }
    }

    /// Register the hover-changed callback, replacing any previous one.
    pub fn set_listener(&mut self, listener: HoverListener) {
        self.listener = Some(listener);
    }

    /// Pointer entered `part`: highlight it, place its label.
    pub fn pointer_enter(
        &mut self,
        part: &PartMesh,
        materials: &mut MaterialStore,
        labels: &LabelTable,
        projection: &ScreenProjection,
    ) -> Propagation {
        if let Some(previous) = self.hovered.as_ref().map(|info| info.part) {
            if previous != part.id {
                // Enter without a leave for the old part: keep one highlight.
                materials.set_color(previous, self.settings.default_color);
            }
        }

        if !materials.set_color(part.id, self.settings.highlight_color) {
            debug!("Part '{}' entered before its material was isolated", part.name);
        }

        let anchor = part.anchor(&self.settings.placement, self.settings.anchor);
        let pixel = projection.project(anchor);
        let label = labels.resolve(&part.name).to_string();
        trace!("Hover '{}' at ({:.1}, {:.1})", label, pixel.x, pixel.y);

        self.hovered = Some(HoverInfo {
            part: part.id,
            label,
            x: pixel.x,
            y: pixel.y,
        });
        self.notify();

        Propagation::Stop
    }

    /// Pointer left `part`: restore its color and clear the label if it was
    /// the hovered one.
    pub fn pointer_leave(&mut self, part: &PartMesh, materials: &mut MaterialStore) -> Propagation {
        materials.set_color(part.id, self.settings.default_color);

        if self.state(part.id) == PartState::Hovered {
            self.hovered = None;
            self.notify();
        }

        Propagation::Stop
    }

    /// Clear the hover without reporting it, restoring the hovered part's
    /// color. Used when the parts are replaced.
    pub fn reset(&mut self, materials: &mut MaterialStore) {
        if let Some(info) = self.hovered.take() {
            materials.set_color(info.part, self.settings.default_color);
        }
    }

    /// Drop the listener and hover state. No notification is sent.
    pub fn detach(&mut self) {
        self.listener = None;
        self.hovered = None;
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(self.hovered.as_ref());
        }
    }
}
