//! Plenamente Core - Core types shared by the model viewer crates
//!
//! This crate provides the foundational types used throughout the viewer:
//! - Mathematical primitives (re-exported from glam)
//! - Transform used to place the model in the scene
//! - Color values and CSS-style color parsing
//! - Viewport dimensions for screen-space conversions

pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use types::{Color, ColorParseError, Transform, Viewport};
