//! Camera module
//!
//! Orbit camera circling the brain model, with rotate, zoom and pan.

mod config;
mod orbit;

pub use config::CameraConfig;
pub use orbit::OrbitCamera;
