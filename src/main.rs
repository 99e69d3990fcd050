//! Plenamente - Anatomical brain model viewer
//!
//! Loads the brain model, lists its interactive parts and walks the pointer
//! over each of them, logging the label and where it would be drawn.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use plenamente_assets::SceneLoader;
use plenamente_viewer::{
    HoverInfo, ModelViewer, OrbitCamera, ViewerConfig, ViewerStatus, LEGEND_TITLE,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Plenamente viewer...");

    let config = ViewerConfig::load();
    let model_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.model_path.clone());

    let loader = SceneLoader::new(&config.asset_dir).context("Failed to start scene loader")?;
    let mut viewer = ModelViewer::new(&config).context("Invalid viewer config")?;
    viewer.on_hover_change(Box::new(|info: Option<&HoverInfo>| match info {
        Some(info) => info!("Label '{}' at ({:.0}, {:.0})", info.label, info.x, info.y),
        None => info!("Label hidden"),
    }));

    viewer.mount(&loader, &model_path);
    if viewer.wait_for_load() == ViewerStatus::Failed {
        if let Some(e) = viewer.error() {
            bail!("Failed to load '{}': {}", model_path.display(), e);
        }
    }

    if viewer.parts().is_empty() {
        warn!("No parts matching '{}' found", config.part_prefix);
    }
    for part in viewer.parts() {
        info!(
            "Part {:>2}: {} -> {}",
            part.id.index(),
            part.name,
            viewer.labels().resolve(&part.name)
        );
    }

    let camera = OrbitCamera::with_config(config.camera.clone());
    let projection = camera.screen_projection(config.viewport);
    let ids: Vec<_> = viewer.parts().iter().map(|part| part.id).collect();
    for id in ids {
        viewer.pointer_enter(id, &projection);
        viewer.pointer_leave(id);
    }

    info!("{}", LEGEND_TITLE);
    for entry in &config.legend {
        info!("  {}: {}", entry.name, entry.description);
    }

    viewer.unmount();
    Ok(())
}
