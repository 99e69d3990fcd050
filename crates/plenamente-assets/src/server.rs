use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::AssetError;
use crate::gltf_loader;
use crate::scene::SceneGraph;

/// Scene cache. Loads each path once and hands out shared references, so two
/// requests for the same asset see the same `Arc`.
pub struct SceneServer {
    base_path: PathBuf,
    scenes: HashMap<PathBuf, Arc<SceneGraph>>,
}

impl SceneServer {
    /// Create a new SceneServer rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("SceneServer created with base path: {}", base_path.display());
        Self {
            base_path,
            scenes: HashMap::new(),
        }
    }

    /// Resolve a relative asset path against the base path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Load a glTF scene, or return the cached one for the same path.
    pub fn load(&mut self, path: &Path) -> Result<Arc<SceneGraph>, AssetError> {
        let full_path = self.resolve(path);

        if let Some(scene) = self.scenes.get(&full_path) {
            return Ok(Arc::clone(scene));
        }

        let scene = Arc::new(gltf_loader::load_scene(&full_path)?);
        info!("Loaded scene '{}'", full_path.display());
        self.scenes.insert(full_path, Arc::clone(&scene));

        Ok(scene)
    }

    /// Register an already-built scene under a path.
    pub fn insert(&mut self, path: &Path, scene: SceneGraph) -> Arc<SceneGraph> {
        let scene = Arc::new(scene);
        self.scenes.insert(self.resolve(path), Arc::clone(&scene));
        scene
    }

    /// Cache a scene that was imported without holding the server. If the
    /// same path was stored in the meantime, the earlier scene is kept and
    /// returned so every caller shares one `Arc`.
    pub fn insert_if_absent(&mut self, path: &Path, scene: SceneGraph) -> Arc<SceneGraph> {
        let full_path = self.resolve(path);
        let cached = self
            .scenes
            .entry(full_path)
            .or_insert_with(|| Arc::new(scene));
        Arc::clone(cached)
    }

    /// Get a cached scene without loading.
    pub fn get(&self, path: &Path) -> Option<Arc<SceneGraph>> {
        self.scenes.get(&self.resolve(path)).cloned()
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.scenes.contains_key(&self.resolve(path))
    }

    /// Drop a cached scene. The next `load` reads the file again.
    pub fn evict(&mut self, path: &Path) -> Option<Arc<SceneGraph>> {
        let full_path = self.resolve(path);
        self.scenes.remove(&full_path)
    }

    /// The base path this server resolves relative paths against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
