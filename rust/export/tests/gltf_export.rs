// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end glTF export checks against the written JSON document

use brewall_export::{
    waypoint_metadata, Error, GltfExporter, MaterialAssigner, MaterialLibrary,
};
use brewall_geometry::{MeshData, MeshKind, Point3};

fn triangle_mesh(name: &str, offset: f64) -> MeshData {
    MeshData::new(
        vec![
            Point3::new(offset, 0.0, 0.0),
            Point3::new(offset + 1.0, 0.0, 0.0),
            Point3::new(offset, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
        vec![[0.5, 0.5, 0.5]; 3],
        name.to_string(),
        MeshKind::Line,
        None,
    )
}

fn export_and_parse(meshes: &[MeshData]) -> (serde_json::Value, brewall_export::ExportStats) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zone.gltf");
    let mut library = MaterialLibrary::new();
    let mut assigner = MaterialAssigner::new(&mut library);
    let stats = GltfExporter::default()
        .export_with_materials(meshes, &mut assigner, &path, "testzone")
        .unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    (serde_json::from_str(&text).unwrap(), stats)
}

#[test]
fn buffer_length_matches_vertex_and_index_bytes() {
    let meshes = vec![triangle_mesh("a", 0.0), triangle_mesh("b", 10.0)];
    let (doc, stats) = export_and_parse(&meshes);

    // 12 bytes per vertex, 6 per triangle, tightly packed
    let expected = 12 * stats.total_vertices + 6 * stats.total_triangles;
    assert_eq!(doc["buffers"][0]["byteLength"], expected as u64);
    let uri = doc["buffers"][0]["uri"].as_str().unwrap();
    assert!(uri.starts_with("data:application/octet-stream;base64,"));
}

#[test]
fn scene_graph_has_root_node_with_one_child_per_mesh() {
    let meshes = vec![
        triangle_mesh("a", 0.0),
        triangle_mesh("b", 10.0),
        triangle_mesh("c", 20.0),
    ];
    let (doc, stats) = export_and_parse(&meshes);

    assert_eq!(stats.mesh_count, 3);
    assert_eq!(doc["meshes"].as_array().unwrap().len(), 3);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(doc["scenes"].as_array().unwrap().len(), 1);

    let root = doc["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["name"] == "testzone_root")
        .unwrap();
    assert_eq!(root["children"].as_array().unwrap().len(), 3);
    // The scene references the root node only
    let scene_nodes = doc["scenes"][0]["nodes"].as_array().unwrap();
    assert_eq!(scene_nodes.len(), 1);
}

#[test]
fn accessors_carry_position_bounds() {
    let (doc, _) = export_and_parse(&[triangle_mesh("a", 5.0)]);

    let accessors = doc["accessors"].as_array().unwrap();
    let positions = accessors
        .iter()
        .find(|a| a["type"] == "VEC3")
        .unwrap();
    assert_eq!(positions["count"], 3);
    assert_eq!(positions["min"][0], 5.0);
    assert_eq!(positions["max"][0], 6.0);

    let indices = accessors.iter().find(|a| a["type"] == "SCALAR").unwrap();
    assert_eq!(indices["count"], 3);
    assert_eq!(indices["componentType"], 5123);
}

#[test]
fn primitive_references_assigned_material() {
    let (doc, stats) = export_and_parse(&[triangle_mesh("a", 0.0)]);

    assert_eq!(stats.material_count, 1);
    let material_index = doc["meshes"][0]["primitives"][0]["material"]
        .as_u64()
        .unwrap() as usize;
    let name = doc["materials"][material_index]["name"].as_str().unwrap();
    assert!(name.starts_with("line_"), "unexpected material {name}");
}

#[test]
fn oversized_mesh_fails_before_writing() {
    let n = u16::MAX as usize + 1;
    let vertices: Vec<_> = (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
    let mesh = MeshData::new(
        vertices,
        vec![[0, 1, 2]],
        vec![[1.0, 1.0, 1.0]; n],
        "huge".to_string(),
        MeshKind::Line,
        None,
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.gltf");
    let mut library = MaterialLibrary::new();
    let mut assigner = MaterialAssigner::new(&mut library);
    let err = GltfExporter::default()
        .export_with_materials(&[mesh], &mut assigner, &path, "testzone")
        .unwrap_err();
    assert!(matches!(err, Error::IndexOverflow { vertices, .. } if vertices == n));
    assert!(!path.exists());
}

#[test]
fn empty_mesh_list_exports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.gltf");
    let mut library = MaterialLibrary::new();
    let mut assigner = MaterialAssigner::new(&mut library);
    let stats = GltfExporter::default()
        .export_with_materials(&[], &mut assigner, &path, "testzone")
        .unwrap();
    assert_eq!(stats.mesh_count, 0);
    assert_eq!(stats.file_size, 0);
    assert!(!path.exists());
}

#[test]
fn mismatched_assignments_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zone.gltf");
    let err = GltfExporter::default()
        .export_meshes_to_gltf(
            &[triangle_mesh("a", 0.0), triangle_mesh("b", 1.0)],
            &[],
            &["only_one".to_string()],
            &path,
            "testzone",
            None,
        )
        .unwrap_err();
    assert!(matches!(err, Error::AssignmentMismatch { assignments: 1, meshes: 2 }));
}

#[test]
fn extras_are_embedded_in_asset() {
    let waypoints = vec![brewall_core::Waypoint {
        position: [1.0, 2.0, 3.0],
        zone_name: "testzone".to_string(),
        special_visual: true,
        description: Some("Waypoint".to_string()),
    }];
    let extras = waypoint_metadata(&waypoints);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zone.gltf");
    let mut library = MaterialLibrary::new();
    let mut assigner = MaterialAssigner::new(&mut library);
    GltfExporter::default()
        .export_with_materials_and_extras(
            &[triangle_mesh("a", 0.0)],
            &mut assigner,
            &path,
            "testzone",
            Some(extras),
        )
        .unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["asset"]["extras"]["waypoint_count"], 1);
    assert_eq!(doc["asset"]["extras"]["waypoints"][0]["zone_name"], "testzone");
    assert_eq!(doc["asset"]["version"], "2.0");
}
