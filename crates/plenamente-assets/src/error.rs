use std::path::PathBuf;

/// Errors that can occur while loading a scene asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load glTF file '{0}': {1}")]
    GltfLoadFailed(PathBuf, String),

    #[error("glTF file '{0}' contains no scene")]
    NoScene(PathBuf),

    #[error("loading '{0}' was abandoned before it completed")]
    LoadAborted(PathBuf),

    #[error("failed to start the background loader: {0}")]
    Runtime(#[source] std::io::Error),
}
