//! Camera configuration

use serde::{Deserialize, Serialize};

/// Orbit camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial camera position
    pub position: [f32; 3],
    /// Point the camera orbits around
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Closest orbit distance
    pub min_distance: f32,
    /// Farthest orbit distance
    pub max_distance: f32,
    /// Radians of rotation per pixel of drag
    pub rotate_speed: f32,
    /// Distance change per scroll unit
    pub zoom_speed: f32,
    /// Pan distance per pixel, scaled by the orbit distance
    pub pan_speed: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [10.0, 0.0, 0.0],
            target: [0.0, 0.0, 0.0],
            fov: 25.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 3.0,
            max_distance: 20.0,
            rotate_speed: 0.005,
            zoom_speed: 1.0,
            pan_speed: 0.001,
            pitch_min: -89.0,
            pitch_max: 89.0,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
        }
    }
}
