//! World-to-screen conversion for label placement
//!
//! Pixel coordinates have their origin at the top-left of the viewport with
//! y growing downward, so NDC y is flipped on the way out.

use glam::{Mat4, Vec2, Vec3};
use plenamente_core::Viewport;

/// Camera view-projection plus the viewport it is drawn into. Passed to
/// every hover and picking call instead of being read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    pub view_projection: Mat4,
    pub viewport: Viewport,
}

impl ScreenProjection {
    pub fn new(view_projection: Mat4, viewport: Viewport) -> Self {
        Self {
            view_projection,
            viewport,
        }
    }

    /// Pixel position of a world-space point
    pub fn project(&self, world: Vec3) -> Vec2 {
        project_to_screen(world, &self.view_projection, self.viewport)
    }
}

/// Project a world point to normalized device coordinates.
/// Returns `None` when the point lies on the camera plane (`w` ≈ 0).
pub fn project_to_ndc(world: Vec3, view_projection: &Mat4) -> Option<Vec3> {
    let clip = *view_projection * world.extend(1.0);
    if clip.w.abs() < f32::EPSILON {
        return None;
    }
    Some(clip.truncate() / clip.w)
}

/// Convert NDC to pixels.
pub fn ndc_to_pixels(ndc: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        ((ndc.x + 1.0) / 2.0) * viewport.width,
        ((-ndc.y + 1.0) / 2.0) * viewport.height,
    )
}

/// Convert pixels back to NDC.
pub fn pixels_to_ndc(pixel: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        pixel.x / viewport.width * 2.0 - 1.0,
        1.0 - pixel.y / viewport.height * 2.0,
    )
}

/// Project a world point to pixel coordinates. A degenerate projection maps
/// to the viewport center.
pub fn project_to_screen(world: Vec3, view_projection: &Mat4, viewport: Viewport) -> Vec2 {
    match project_to_ndc(world, view_projection) {
        Some(ndc) => ndc_to_pixels(ndc.truncate(), viewport),
        None => viewport.center(),
    }
}
