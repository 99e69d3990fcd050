use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::AssetError;
use crate::gltf_loader;
use crate::scene::SceneGraph;
use crate::server::SceneServer;

type LoadResult = Result<Arc<SceneGraph>, AssetError>;

/// A non-blocking handle to an in-flight scene load.
/// Call `try_recv()` each frame to check for the result without blocking.
///
/// Dropping the handle abandons the load: the background import still runs
/// to completion, but its result is discarded by the closed channel.
pub struct PendingLoad {
    path: PathBuf,
    receiver: mpsc::Receiver<LoadResult>,
}

impl PendingLoad {
    /// A load that has already finished with `result`.
    pub fn completed(path: impl Into<PathBuf>, result: LoadResult) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self {
            path: path.into(),
            receiver: rx,
        }
    }

    /// Path being loaded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking check for the result. Returns `None` while still loading.
    pub fn try_recv(&self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(AssetError::LoadAborted(self.path.clone())))
            }
        }
    }

    /// Blocking wait for the result. Only use during loading screens.
    pub fn wait(self) -> LoadResult {
        self.receiver
            .recv()
            .map_err(|_| AssetError::LoadAborted(self.path.clone()))?
    }
}

/// Loads scenes on a background tokio runtime, sharing one [`SceneServer`]
/// cache between all requests.
pub struct SceneLoader {
    runtime: tokio::runtime::Runtime,
    server: Arc<Mutex<SceneServer>>,
}

impl SceneLoader {
    /// Create a loader resolving relative paths against `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("scene-loader")
            .enable_all()
            .build()
            .map_err(AssetError::Runtime)?;

        Ok(Self {
            runtime,
            server: Arc::new(Mutex::new(SceneServer::new(base_path))),
        })
    }

    /// Start loading a scene. Cached scenes complete without touching disk.
    pub fn load(&self, path: impl Into<PathBuf>) -> PendingLoad {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let server = Arc::clone(&self.server);
        let task_path = path.clone();

        self.runtime.spawn_blocking(move || {
            let result = load_shared(&server, &task_path);
            if let Err(e) = &result {
                warn!("Scene load failed: {}", e);
            }
            if tx.send(result).is_err() {
                debug!("Scene '{}' finished after its viewer went away", task_path.display());
            }
        });

        PendingLoad { path, receiver: rx }
    }

    /// Shared scene cache
    pub fn server(&self) -> &Arc<Mutex<SceneServer>> {
        &self.server
    }
}

/// Load through the shared cache. The lock is only taken to look up and to
/// store; the import itself runs unlocked, so other loads and cache queries
/// never wait on a slow file.
fn load_shared(server: &Mutex<SceneServer>, path: &Path) -> LoadResult {
    let full_path = {
        let server = server.lock();
        if let Some(scene) = server.get(path) {
            return Ok(scene);
        }
        server.resolve(path)
    };

    let scene = gltf_loader::load_scene(&full_path)?;
    let scene = server.lock().insert_if_absent(&full_path, scene);
    info!("Loaded scene '{}'", full_path.display());
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gltf_loader::tests::SAMPLE;
    use crate::scene::{NodeId, SceneNode};

    fn empty_scene() -> SceneGraph {
        SceneGraph::new(SceneNode::group(NodeId(0), "Scene", Vec::new()))
    }

    #[test]
    fn test_pending_load_try_recv_none_then_result() {
        let (tx, rx) = mpsc::channel();
        let pending = PendingLoad {
            path: PathBuf::from("brain.glb"),
            receiver: rx,
        };

        assert!(pending.try_recv().is_none());

        tx.send(Ok(Arc::new(empty_scene()))).unwrap();

        let result = pending.try_recv();
        assert!(result.is_some());
        assert_eq!(result.unwrap().unwrap().root.name, "Scene");
    }

    #[test]
    fn test_pending_load_disconnected_is_aborted() {
        let (tx, rx) = mpsc::channel::<LoadResult>();
        let pending = PendingLoad {
            path: PathBuf::from("brain.glb"),
            receiver: rx,
        };
        drop(tx);

        assert!(matches!(
            pending.try_recv(),
            Some(Err(AssetError::LoadAborted(_)))
        ));
    }

    #[test]
    fn test_completed_load() {
        let pending = PendingLoad::completed("brain.glb", Ok(Arc::new(empty_scene())));
        assert_eq!(pending.path(), Path::new("brain.glb"));
        assert!(pending.wait().is_ok());
    }

    #[test]
    fn test_loader_reports_missing_file() {
        let loader = SceneLoader::new("/nonexistent").unwrap();
        let result = loader.load("brain_project.glb").wait();
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_loader_imports_from_disk_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("brain.gltf"), SAMPLE).unwrap();
        let loader = SceneLoader::new(dir.path()).unwrap();

        let first = loader.load("brain.gltf").wait().unwrap();
        assert_eq!(first.root.name, "Sketchfab_Scene");
        assert!(loader.server().lock().is_loaded(Path::new("brain.gltf")));

        let second = loader.load("brain.gltf").wait().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_import_does_not_hold_the_cache() {
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let fifo = dir.path().join("slow.gltf");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        let loader = SceneLoader::new(dir.path()).unwrap();
        // Opening the fifo blocks the import until something writes to it.
        let slow = loader.load("slow.gltf");
        std::thread::sleep(Duration::from_millis(100));
        assert!(slow.try_recv().is_none());

        assert!(loader.server().try_lock().is_some());

        let missing = loader.load("missing.glb");
        let deadline = Instant::now() + Duration::from_secs(5);
        let result = loop {
            if let Some(result) = missing.try_recv() {
                break result;
            }
            assert!(Instant::now() < deadline, "missing file waited on the slow import");
            std::thread::sleep(Duration::from_millis(10));
        };
        assert!(matches!(result, Err(AssetError::NotFound(_))));

        std::fs::write(&fifo, SAMPLE).unwrap();
        let scene = slow.wait().unwrap();
        assert_eq!(scene.root.name, "Sketchfab_Scene");
    }

    #[test]
    fn test_loader_uses_shared_cache() {
        let loader = SceneLoader::new("/assets").unwrap();
        let cached = loader
            .server()
            .lock()
            .insert(Path::new("brain.glb"), empty_scene());

        let loaded = loader.load("brain.glb").wait().unwrap();
        assert!(Arc::ptr_eq(&cached, &loaded));
    }
}
