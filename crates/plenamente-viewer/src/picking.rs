//! Pointer hit-testing against part bounds
//!
//! Turns raw pointer positions into the per-part enter/leave events the
//! hover controller consumes.

use glam::{Vec2, Vec3};
use plenamente_core::Transform;

use crate::partition::{PartId, PartMesh};
use crate::projection::{pixels_to_ndc, ScreenProjection};

/// A world-space ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Ray from the camera through a pixel. `None` if the projection cannot
    /// be inverted.
    pub fn from_screen(pixel: Vec2, projection: &ScreenProjection) -> Option<Ray> {
        if projection.view_projection.determinant().abs() < f32::EPSILON {
            return None;
        }
        let inverse = projection.view_projection.inverse();
        let ndc = pixels_to_ndc(pixel, projection.viewport);

        // glam projections map depth to [0, 1].
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        Some(Ray {
            origin: near,
            direction,
        })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Nearest part hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub part: PartId,
    pub distance: f32,
}

/// Find the nearest part whose placed bounding box the ray hits. Parts
/// without bounds cannot be picked. Ties go to the earlier part.
pub fn pick(ray: &Ray, parts: &[PartMesh], placement: &Transform) -> Option<PickHit> {
    let mut nearest: Option<PickHit> = None;

    for part in parts {
        let Some(bounds) = part.world_bounds(placement) else {
            continue;
        };
        let Some(distance) = bounds.intersect_ray(ray.origin, ray.direction) else {
            continue;
        };
        if nearest.map_or(true, |hit| distance < hit.distance) {
            nearest = Some(PickHit {
                part: part.id,
                distance,
            });
        }
    }

    nearest
}

/// Pointer transition for a single part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(PartId),
    Leave(PartId),
}

/// Tracks which part is under the pointer and reports changes as events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    current: Option<PartId>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Part currently under the pointer
    pub fn current(&self) -> Option<PartId> {
        self.current
    }

    /// Pointer moved and is now over `hit`. Moving within the same part
    /// produces no events.
    pub fn pointer_moved(&mut self, hit: Option<PartId>) -> Vec<PointerEvent> {
        if hit == self.current {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.current {
            events.push(PointerEvent::Leave(previous));
        }
        if let Some(next) = hit {
            events.push(PointerEvent::Enter(next));
        }
        self.current = hit;
        events
    }

    /// Pointer left the drawing surface.
    pub fn pointer_left(&mut self) -> Option<PointerEvent> {
        self.current.take().map(PointerEvent::Leave)
    }
}
