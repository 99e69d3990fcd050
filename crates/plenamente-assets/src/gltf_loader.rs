use std::path::Path;

use glam::{Mat4, Vec3};
use plenamente_core::Color;
use tracing::debug;

use crate::error::AssetError;
use crate::scene::{Aabb, MeshData, NodeId, NodeKind, SceneGraph, SceneNode};

/// Load a glTF 2.0 file (.gltf or .glb) and convert its default scene.
pub fn load_scene(path: &Path) -> Result<SceneGraph, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    // Only the document is needed: bounds come from accessor min/max, so
    // buffers and images are never read or decoded.
    let gltf = gltf::Gltf::open(path)
        .map_err(|e| AssetError::GltfLoadFailed(path.to_path_buf(), e.to_string()))?;

    let graph =
        build_scene(&gltf.document).ok_or_else(|| AssetError::NoScene(path.to_path_buf()))?;

    debug!(
        "glTF '{}': {} nodes in scene '{}'",
        path.display(),
        graph.node_count(),
        graph.root.name
    );

    Ok(graph)
}

/// Convert the default scene of a parsed glTF document (or its first scene
/// when no default is set). Returns `None` if the document has no scenes.
pub fn build_scene(document: &gltf::Document) -> Option<SceneGraph> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())?;

    let mut builder = SceneBuilder { next_id: 0 };
    let root_id = builder.next_id();
    let children = scene.nodes().map(|node| builder.convert(&node)).collect();
    let name = scene.name().unwrap_or("Scene");

    Some(SceneGraph::new(SceneNode::group(root_id, name, children)))
}

struct SceneBuilder {
    next_id: u32,
}

impl SceneBuilder {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn convert(&mut self, node: &gltf::Node) -> SceneNode {
        let id = self.next_id();
        let name = node
            .name()
            .or_else(|| node.mesh().and_then(|mesh| mesh.name()))
            .unwrap_or("")
            .to_string();
        let local = Mat4::from_cols_array_2d(&node.transform().matrix());

        let mut children = Vec::new();
        let kind = if node.camera().is_some() {
            NodeKind::Other
        } else if let Some(mesh) = node.mesh() {
            let primitives: Vec<_> = mesh.primitives().collect();
            if let [primitive] = primitives.as_slice() {
                NodeKind::Mesh(mesh_data(primitive))
            } else {
                // One mesh child per primitive, named after the node.
                for primitive in &primitives {
                    let child_id = self.next_id();
                    children.push(SceneNode::mesh(
                        child_id,
                        format!("{}_{}", name, primitive.index()),
                        mesh_data(primitive),
                    ));
                }
                NodeKind::Group
            }
        } else {
            NodeKind::Group
        };

        for child in node.children() {
            children.push(self.convert(&child));
        }

        SceneNode {
            id,
            name,
            local,
            kind,
            children,
        }
    }
}

fn mesh_data(primitive: &gltf::Primitive) -> MeshData {
    let material = primitive.material();
    MeshData {
        bounds: position_bounds(primitive),
        material: material.index(),
        base_color: Color::from_array(material.pbr_metallic_roughness().base_color_factor()),
    }
}

/// Bounds from the POSITION accessor's declared min/max, if present.
fn position_bounds(primitive: &gltf::Primitive) -> Option<Aabb> {
    let accessor = primitive.get(&gltf::Semantic::Positions)?;
    let min = vec3_from_json(&accessor.min()?)?;
    let max = vec3_from_json(&accessor.max()?)?;
    Some(Aabb::new(min, max))
}

fn vec3_from_json(value: &gltf::json::Value) -> Option<Vec3> {
    let values = value.as_array()?;
    if values.len() < 3 {
        return None;
    }
    Some(Vec3::new(
        values[0].as_f64()? as f32,
        values[1].as_f64()? as f32,
        values[2].as_f64()? as f32,
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "name": "Sketchfab_Scene", "nodes": [0, 3, 4] } ],
        "nodes": [
            { "name": "Brain_Part_04", "children": [1, 2], "translation": [1.0, 0.0, 0.0] },
            { "name": "Brain_Part_04_Colour_Brain_Texture_0", "mesh": 0 },
            { "mesh": 1 },
            { "name": "Camera", "camera": 0 },
            { "name": "Loose_Mesh", "mesh": 0, "scale": [2.0, 2.0, 2.0] }
        ],
        "cameras": [
            { "type": "perspective", "perspective": { "yfov": 0.5, "znear": 0.1 } }
        ],
        "meshes": [
            { "name": "Single", "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] },
            { "name": "Multi", "primitives": [
                { "attributes": { "POSITION": 0 }, "material": 0 },
                { "attributes": { "POSITION": 0 } }
            ] }
        ],
        "materials": [
            { "name": "Colour_Brain_Texture",
              "pbrMetallicRoughness": { "baseColorFactor": [0.5, 0.25, 0.75, 1.0] } }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [-1.0, -2.0, -3.0], "max": [1.0, 2.0, 3.0] }
        ],
        "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
        "buffers": [ { "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA" } ]
    }"#;

    fn sample_graph() -> SceneGraph {
        let gltf = gltf::Gltf::from_slice(SAMPLE.as_bytes()).expect("sample glTF parses");
        build_scene(&gltf.document).expect("sample has a scene")
    }

    #[test]
    fn converts_root_and_top_level_nodes() {
        let graph = sample_graph();
        assert_eq!(graph.root.name, "Sketchfab_Scene");
        assert_eq!(graph.root.id, NodeId(0));
        let names: Vec<_> = graph.root.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Brain_Part_04", "Camera", "Loose_Mesh"]);
    }

    #[test]
    fn single_primitive_node_becomes_mesh() {
        let graph = sample_graph();
        let node = graph.find("Brain_Part_04_Colour_Brain_Texture_0").unwrap();
        let NodeKind::Mesh(mesh) = &node.kind else {
            panic!("expected a mesh node, got {:?}", node.kind);
        };
        assert_eq!(mesh.material, Some(0));
        assert_eq!(mesh.base_color, Color::rgba(0.5, 0.25, 0.75, 1.0));
        assert_eq!(
            mesh.bounds,
            Some(Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0)))
        );
    }

    #[test]
    fn multi_primitive_node_becomes_group_of_meshes() {
        let graph = sample_graph();
        // Unnamed node falls back to its mesh name.
        let group = graph.find("Multi").unwrap();
        assert_eq!(group.kind, NodeKind::Group);
        let names: Vec<_> = group.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Multi_0", "Multi_1"]);
        assert!(group.children.iter().all(SceneNode::is_mesh));

        let NodeKind::Mesh(default_material) = &group.children[1].kind else {
            panic!("expected a mesh node");
        };
        assert_eq!(default_material.material, None);
        assert_eq!(default_material.base_color, Color::WHITE);
    }

    #[test]
    fn camera_node_is_other() {
        let graph = sample_graph();
        assert_eq!(graph.find("Camera").unwrap().kind, NodeKind::Other);
    }

    #[test]
    fn node_transforms_are_preserved() {
        let graph = sample_graph();
        let part = graph.find("Brain_Part_04").unwrap();
        assert_eq!(part.local.col(3).truncate(), Vec3::new(1.0, 0.0, 0.0));
        let loose = graph.find("Loose_Mesh").unwrap();
        assert_eq!(loose.local.transform_vector3(Vec3::X), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn ids_are_assigned_in_pre_order() {
        let graph = sample_graph();
        let ids: Vec<_> = graph.root.children[0]
            .children
            .iter()
            .map(|n| n.id)
            .collect();
        // Brain_Part_04 = 1, its mesh child = 2, Multi = 3
        assert_eq!(graph.root.children[0].id, NodeId(1));
        assert_eq!(ids, vec![NodeId(2), NodeId(3)]);
        assert_eq!(graph.find("Multi_0").unwrap().id, NodeId(4));
    }

    #[test]
    fn conversion_is_deterministic() {
        assert_eq!(sample_graph(), sample_graph());
    }

    #[test]
    fn loads_gltf_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brain.gltf");
        std::fs::write(&path, SAMPLE).unwrap();

        let graph = load_scene(&path).unwrap();
        assert_eq!(graph, sample_graph());
    }

    #[test]
    fn malformed_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.gltf");
        std::fs::write(&path, "{ not gltf").unwrap();

        assert!(matches!(load_scene(&path), Err(AssetError::GltfLoadFailed(..))));
    }

    #[test]
    fn document_without_scenes_is_no_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gltf");
        std::fs::write(&path, r#"{ "asset": { "version": "2.0" } }"#).unwrap();

        assert!(matches!(load_scene(&path), Err(AssetError::NoScene(_))));
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = load_scene(Path::new("/nonexistent/brain_project.glb"));
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }
}
