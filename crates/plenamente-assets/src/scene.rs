//! Owned scene graph produced by the glTF loader
//!
//! Nodes are a tree of [`SceneNode`]s whose [`NodeKind`] tells a visitor
//! whether a node only groups children, carries renderable geometry, or is
//! something the viewer ignores (cameras, lights).

use glam::{Mat4, Vec3};
use plenamente_core::Color;

/// Identifier of a node within one [`SceneGraph`], assigned in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Bounding box of this box after applying `matrix` to all eight corners
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let p = matrix.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }

        Aabb { min, max }
    }

    /// Ray/box intersection (slab test). Returns the distance along `direction`
    /// to the nearest non-negative hit.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let inv = direction.recip();
        let t1 = (self.min - origin) * inv;
        let t2 = (self.max - origin) * inv;

        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Renderable geometry carried by a mesh node
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Local-space bounds of the geometry, when the asset declares them
    pub bounds: Option<Aabb>,
    /// Index of the source material in the asset, `None` for the default material
    pub material: Option<usize>,
    /// Base color of the source material
    pub base_color: Color,
}

/// What a scene node represents
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Transform-only node that groups its children
    Group,
    /// Node with renderable geometry
    Mesh(MeshData),
    /// Cameras, lights and anything else without geometry
    Other,
}

/// A node in the loaded scene hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    /// Transform relative to the parent node
    pub local: Mat4,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create a group node with an identity transform
    pub fn group(id: NodeId, name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self {
            id,
            name: name.into(),
            local: Mat4::IDENTITY,
            kind: NodeKind::Group,
            children,
        }
    }

    /// Create a leaf mesh node with an identity transform
    pub fn mesh(id: NodeId, name: impl Into<String>, data: MeshData) -> Self {
        Self {
            id,
            name: name.into(),
            local: Mat4::IDENTITY,
            kind: NodeKind::Mesh(data),
            children: Vec::new(),
        }
    }

    /// Replace the local transform
    pub fn with_local(mut self, local: Mat4) -> Self {
        self.local = local;
        self
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }
}

/// Callbacks invoked by [`SceneGraph::walk`] in depth-first pre-order.
///
/// `world` is the accumulated transform of the node, parents included.
pub trait SceneVisitor {
    fn visit_group(&mut self, _node: &SceneNode, _world: &Mat4) {}

    fn visit_mesh(&mut self, _node: &SceneNode, _mesh: &MeshData, _world: &Mat4) {}

    fn visit_other(&mut self, _node: &SceneNode, _world: &Mat4) {}

    /// Called after every descendant of `node` has been visited.
    fn leave(&mut self, _node: &SceneNode) {}
}

/// A loaded scene: a single root node and everything below it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    pub root: SceneNode,
}

impl SceneGraph {
    pub fn new(root: SceneNode) -> Self {
        Self { root }
    }

    /// Visit every node, parents before children.
    pub fn walk<V: SceneVisitor>(&self, visitor: &mut V) {
        walk_node(&self.root, &Mat4::IDENTITY, visitor);
    }

    /// Find the first node with the given name, in traversal order.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        fn find_in<'a>(node: &'a SceneNode, name: &str) -> Option<&'a SceneNode> {
            if node.name == name {
                return Some(node);
            }
            node.children.iter().find_map(|child| find_in(child, name))
        }
        find_in(&self.root, name)
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        fn count(node: &SceneNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

fn walk_node<V: SceneVisitor>(node: &SceneNode, parent_world: &Mat4, visitor: &mut V) {
    let world = *parent_world * node.local;

    match &node.kind {
        NodeKind::Group => visitor.visit_group(node, &world),
        NodeKind::Mesh(mesh) => visitor.visit_mesh(node, mesh, &world),
        NodeKind::Other => visitor.visit_other(node, &world),
    }

    for child in &node.children {
        walk_node(child, &world, visitor);
    }

    visitor.leave(node);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_data() -> MeshData {
        MeshData {
            bounds: Some(Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))),
            material: Some(0),
            base_color: Color::WHITE,
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        mesh_positions: Vec<Vec3>,
    }

    impl SceneVisitor for Recorder {
        fn visit_group(&mut self, node: &SceneNode, _world: &Mat4) {
            self.events.push(format!("group:{}", node.name));
        }

        fn visit_mesh(&mut self, node: &SceneNode, _mesh: &MeshData, world: &Mat4) {
            self.events.push(format!("mesh:{}", node.name));
            self.mesh_positions.push(world.transform_point3(Vec3::ZERO));
        }

        fn visit_other(&mut self, node: &SceneNode, _world: &Mat4) {
            self.events.push(format!("other:{}", node.name));
        }

        fn leave(&mut self, node: &SceneNode) {
            self.events.push(format!("leave:{}", node.name));
        }
    }

    fn sample_graph() -> SceneGraph {
        let inner = SceneNode::mesh(NodeId(2), "inner", mesh_data())
            .with_local(Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)));
        let camera = SceneNode {
            id: NodeId(3),
            name: "camera".into(),
            local: Mat4::IDENTITY,
            kind: NodeKind::Other,
            children: Vec::new(),
        };
        let group = SceneNode::group(NodeId(1), "group", vec![inner, camera])
            .with_local(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        SceneGraph::new(SceneNode::group(NodeId(0), "root", vec![group]))
    }

    #[test]
    fn walk_visits_in_pre_order() {
        let mut recorder = Recorder::default();
        sample_graph().walk(&mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                "group:root",
                "group:group",
                "mesh:inner",
                "leave:inner",
                "other:camera",
                "leave:camera",
                "leave:group",
                "leave:root",
            ]
        );
    }

    #[test]
    fn walk_accumulates_world_transforms() {
        let mut recorder = Recorder::default();
        sample_graph().walk(&mut recorder);
        assert_eq!(recorder.mesh_positions, vec![Vec3::new(2.0, 1.0, 0.0)]);
    }

    #[test]
    fn find_and_count() {
        let graph = sample_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.find("inner").map(|n| n.id), Some(NodeId(2)));
        assert!(graph.find("missing").is_none());
    }

    #[test]
    fn aabb_transform_and_center() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let moved = aabb.transformed(&Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(5.0, 0.0, 0.0),
        ));
        assert_eq!(moved.min, Vec3::new(3.0, -2.0, -2.0));
        assert_eq!(moved.max, Vec3::new(7.0, 2.0, 2.0));
        assert_eq!(moved.center(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn aabb_ray_hits_and_misses() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let hit = aabb.intersect_ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert_eq!(hit, Some(4.0));

        let miss = aabb.intersect_ray(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert!(miss.is_none());

        let behind = aabb.intersect_ray(Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        assert!(behind.is_none());

        let inside = aabb.intersect_ray(Vec3::ZERO, Vec3::Y);
        assert_eq!(inside, Some(0.0));
    }
}
