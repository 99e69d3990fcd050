//! Plenamente Viewer - Interactive anatomical model viewer
//!
//! Splits a loaded brain model into hoverable parts, gives each part its own
//! color, highlights the part under the pointer and places a text label over
//! it in viewport pixels.

pub mod camera;
pub mod config;
pub mod error;
pub mod hover;
pub mod labels;
pub mod legend;
pub mod material;
pub mod partition;
pub mod picking;
pub mod projection;
pub mod viewer;

pub use camera::{CameraConfig, OrbitCamera};
pub use config::{ColorConfig, PlacementConfig, ViewerConfig};
pub use error::ConfigError;
pub use hover::{HoverController, HoverInfo, HoverListener, HoverSettings, PartState, Propagation};
pub use labels::LabelTable;
pub use legend::{default_legend, LegendEntry, LEGEND_TITLE};
pub use material::{MaterialStore, PartMaterial};
pub use partition::{collect_part_meshes, AnchorMode, PartId, PartMesh, PartPattern, DEFAULT_PART_PREFIX};
pub use picking::{pick, PickHit, PointerEvent, PointerTracker, Ray};
pub use projection::{project_to_screen, ScreenProjection};
pub use viewer::{ModelViewer, ViewerStatus};
