//! Orbit camera with mouse rotate, scroll zoom and pan

use glam::{Mat4, Vec2, Vec3};
use plenamente_core::Viewport;

use crate::projection::ScreenProjection;

use super::CameraConfig;

/// Camera orbiting a target point at a clamped distance.
///
/// Yaw is measured in the XZ plane from +X toward +Z, pitch upward from that
/// plane, so yaw = pitch = 0 looks at the target from +X.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Configuration
    pub config: CameraConfig,
    /// Point the camera looks at
    pub target: Vec3,
    /// Horizontal angle in radians
    pub yaw: f32,
    /// Vertical angle in radians
    pub pitch: f32,
    /// Distance from the target
    distance: f32,
}

impl OrbitCamera {
    /// Create an orbit camera from the default config
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create an orbit camera placed at `config.position`, looking at `config.target`
    pub fn with_config(config: CameraConfig) -> Self {
        let position = Vec3::from(config.position);
        let target = Vec3::from(config.target);
        let mut camera = Self {
            config,
            target,
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
        };
        camera.look_from(position);
        camera
    }

    /// Move the camera to `position`, keeping the current target.
    pub fn look_from(&mut self, position: Vec3) {
        let offset = position - self.target;
        let distance = offset.length();
        if distance > f32::EPSILON {
            self.yaw = offset.z.atan2(offset.x);
            self.pitch = (offset.y / distance).asin();
        }
        self.set_pitch(self.pitch);
        self.set_distance(distance);
    }

    /// Get the camera's current world position
    pub fn position(&self) -> Vec3 {
        self.target + self.offset_direction() * self.distance
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Unit vector from the target toward the camera
    fn offset_direction(&self) -> Vec3 {
        let cos_pitch = self.pitch.cos();
        Vec3::new(
            self.yaw.cos() * cos_pitch,
            self.pitch.sin(),
            self.yaw.sin() * cos_pitch,
        )
    }

    /// Get the camera's forward direction
    pub fn forward(&self) -> Vec3 {
        -self.offset_direction()
    }

    /// Get the camera's right direction
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    /// Get the camera's up direction
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize_or_zero()
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Get the projection matrix for the given aspect ratio
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov.to_radians(),
            aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }

    /// Combined projection * view for a viewport
    pub fn view_projection(&self, viewport: Viewport) -> Mat4 {
        self.projection_matrix(viewport.aspect_ratio()) * self.view_matrix()
    }

    /// Camera state needed to place labels on screen
    pub fn screen_projection(&self, viewport: Viewport) -> ScreenProjection {
        ScreenProjection::new(self.view_projection(viewport), viewport)
    }

    /// Handle a rotate drag, in pixels
    pub fn rotate(&mut self, drag: Vec2) {
        if !self.config.enable_rotate {
            return;
        }
        self.yaw += drag.x * self.config.rotate_speed;
        self.set_pitch(self.pitch + drag.y * self.config.rotate_speed);
    }

    /// Handle scroll wheel zoom. Positive values move closer.
    pub fn zoom(&mut self, scroll_delta: f32) {
        if !self.config.enable_zoom {
            return;
        }
        self.set_distance(self.distance - scroll_delta * self.config.zoom_speed);
    }

    /// Handle a pan drag, in pixels. Moves the target in the view plane.
    pub fn pan(&mut self, drag: Vec2) {
        if !self.config.enable_pan {
            return;
        }
        let scale = self.config.pan_speed * self.distance;
        self.target += (self.right() * -drag.x + self.up() * drag.y) * scale;
    }

    /// Set the camera pitch directly
    pub fn set_pitch(&mut self, pitch: f32) {
        let pitch_min = self.config.pitch_min.to_radians();
        let pitch_max = self.config.pitch_max.to_radians();
        self.pitch = pitch.clamp(pitch_min, pitch_max);
    }

    /// Set the orbit distance directly
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.config.min_distance, self.config.max_distance);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
