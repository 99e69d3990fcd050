//! Plenamente Assets - Scene loading and caching
//!
//! Converts glTF 2.0 files (.gltf or .glb) into an owned, typed scene graph,
//! caches loaded scenes by path, and runs imports off the caller's thread.

mod error;
mod gltf_loader;
mod loader;
mod scene;
mod server;

pub use error::AssetError;
pub use gltf_loader::{build_scene, load_scene};
pub use loader::{PendingLoad, SceneLoader};
pub use scene::{Aabb, MeshData, NodeId, NodeKind, SceneGraph, SceneNode, SceneVisitor};
pub use server::SceneServer;
