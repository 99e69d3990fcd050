//! Partitioning of a loaded scene into hoverable anatomical parts
//!
//! A Part Group is any node named `<prefix><digits>` (`Brain_Part_04`). Every
//! mesh below a Part Group becomes a [`PartMesh`]; meshes anywhere else are
//! ignored.

use glam::{Mat4, Vec3};
use plenamente_assets::{Aabb, MeshData, NodeId, SceneGraph, SceneNode, SceneVisitor};
use plenamente_core::{Color, Transform};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default Part Group name prefix used by the brain model
pub const DEFAULT_PART_PREFIX: &str = "Brain_Part_";

/// Stable identity of a part: its position in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub u32);

impl PartId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which point of a part the hover label is anchored to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorMode {
    /// The mesh node's world-space origin
    #[default]
    Origin,
    /// The center of the mesh's bounding box, falling back to the origin
    BoundsCenter,
}

/// A renderable sub-mesh that takes part in hover interaction
#[derive(Debug, Clone, PartialEq)]
pub struct PartMesh {
    pub id: PartId,
    /// Scene node this part was built from
    pub node: NodeId,
    /// Internal mesh name, also the label lookup key
    pub name: String,
    /// Accumulated scene transform of the mesh node
    pub world: Mat4,
    /// Local-space bounds
    pub bounds: Option<Aabb>,
    /// Source material index in the asset
    pub material: Option<usize>,
    /// Base color of the source material
    pub base_color: Color,
}

impl PartMesh {
    /// World-space point the hover label is projected from, after placing
    /// the model with `placement`.
    pub fn anchor(&self, placement: &Transform, mode: AnchorMode) -> Vec3 {
        let local = match (mode, self.bounds) {
            (AnchorMode::BoundsCenter, Some(bounds)) => bounds.center(),
            _ => Vec3::ZERO,
        };
        (placement.matrix() * self.world).transform_point3(local)
    }

    /// World-space bounding box after placement
    pub fn world_bounds(&self, placement: &Transform) -> Option<Aabb> {
        let matrix = placement.matrix() * self.world;
        self.bounds.map(|bounds| bounds.transformed(&matrix))
    }
}

/// Name rule for Part Groups: a fixed prefix followed by one or more ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartPattern {
    prefix: String,
}

impl PartPattern {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `name` names a Part Group
    pub fn matches(&self, name: &str) -> bool {
        name.strip_prefix(&self.prefix)
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl Default for PartPattern {
    fn default() -> Self {
        Self::new(DEFAULT_PART_PREFIX)
    }
}

/// Collect every mesh below a Part Group, in depth-first pre-order.
///
/// A Part Group nested inside another one does not collect its meshes twice.
/// A scene without Part Groups yields an empty list.
pub fn collect_part_meshes(graph: &SceneGraph, pattern: &PartPattern) -> Vec<PartMesh> {
    let mut collector = PartCollector {
        pattern,
        active_group: None,
        groups_found: 0,
        parts: Vec::new(),
    };
    graph.walk(&mut collector);

    if collector.groups_found == 0 {
        warn!(
            "No part groups matching '{}<digits>' in scene '{}'",
            pattern.prefix(),
            graph.root.name
        );
    } else {
        info!(
            "Found {} part groups with {} meshes",
            collector.groups_found,
            collector.parts.len()
        );
    }

    collector.parts
}

struct PartCollector<'a> {
    pattern: &'a PartPattern,
    /// Outermost Part Group currently being traversed
    active_group: Option<NodeId>,
    groups_found: usize,
    parts: Vec<PartMesh>,
}

impl PartCollector<'_> {
    fn enter(&mut self, node: &SceneNode) {
        if self.active_group.is_none() && self.pattern.matches(&node.name) {
            debug!("Entering part group '{}'", node.name);
            self.active_group = Some(node.id);
            self.groups_found += 1;
        }
    }
}

impl SceneVisitor for PartCollector<'_> {
    fn visit_group(&mut self, node: &SceneNode, _world: &Mat4) {
        self.enter(node);
    }

    fn visit_mesh(&mut self, node: &SceneNode, mesh: &MeshData, world: &Mat4) {
        self.enter(node);
        if self.active_group.is_none() {
            return;
        }

        let id = PartId(self.parts.len() as u32);
        self.parts.push(PartMesh {
            id,
            node: node.id,
            name: node.name.clone(),
            world: *world,
            bounds: mesh.bounds,
            material: mesh.material,
            base_color: mesh.base_color,
        });
    }

    fn visit_other(&mut self, node: &SceneNode, _world: &Mat4) {
        self.enter(node);
    }

    fn leave(&mut self, node: &SceneNode) {
        if self.active_group == Some(node.id) {
            self.active_group = None;
        }
    }
}
