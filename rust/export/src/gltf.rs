// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! glTF 2.0 serialization
//!
//! One `.gltf` file per zone: a JSON scene graph with a single embedded
//! base64 buffer. Every mesh contributes two tightly packed blocks to that
//! buffer, positions as 32-bit floats and triangle indices as 16-bit
//! unsigned integers, each with its own buffer view and accessor. The
//! declared buffer length is always `12·Σvertices + 6·Σtriangles`.
//!
//! Meshes with more than 65 535 vertices cannot be indexed in 16 bits and
//! fail the export up front rather than truncating.

use std::collections::BTreeMap;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use brewall_core::{Rgb, Waypoint};
use brewall_geometry::{calculate_bounding_box, BoundingBox, MeshData, MeshKind};
use gltf_json as json;
use json::validation::Checked::Valid;
use json::validation::USize64;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assign::MaterialAssigner;
use crate::error::{Error, Result};
use crate::material::{AlphaMode, Material};

/// Advisory statistics returned after a successful export
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportStats {
    pub total_vertices: usize,
    pub total_triangles: usize,
    pub mesh_count: usize,
    pub material_count: usize,
    pub file_size: u64,
    pub bounding_box: BoundingBox,
}

/// Serializes mesh sets and materials into glTF 2.0 files
#[derive(Debug, Clone)]
pub struct GltfExporter {
    generator: String,
    copyright: String,
}

impl Default for GltfExporter {
    fn default() -> Self {
        Self {
            generator: "EQDB Map Converter".to_string(),
            copyright: "EQDB Development Team".to_string(),
        }
    }
}

impl GltfExporter {
    pub fn new(generator: impl Into<String>, copyright: impl Into<String>) -> Self {
        Self {
            generator: generator.into(),
            copyright: copyright.into(),
        }
    }

    /// Assign a material to every mesh, then export.
    ///
    /// Assignment prefers the mesh's semantic layer; meshes without one
    /// fall back to a per-kind heuristic (waypoint material, standard label
    /// rule, or a color material from the mesh's mean color).
    pub fn export_with_materials(
        &self,
        meshes: &[MeshData],
        assigner: &mut MaterialAssigner<'_>,
        output_path: &Path,
        zone_name: &str,
    ) -> Result<ExportStats> {
        self.export_with_materials_and_extras(meshes, assigner, output_path, zone_name, None)
    }

    /// [`export_with_materials`](Self::export_with_materials) with a
    /// caller-supplied `asset.extras` payload
    pub fn export_with_materials_and_extras(
        &self,
        meshes: &[MeshData],
        assigner: &mut MaterialAssigner<'_>,
        output_path: &Path,
        zone_name: &str,
        extras: Option<serde_json::Value>,
    ) -> Result<ExportStats> {
        let mut materials: Vec<Material> = Vec::new();
        let mut assignments: Vec<String> = Vec::with_capacity(meshes.len());
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for mesh in meshes {
            let material = match mesh.layer {
                Some(layer) => assigner.assign_material_by_semantic_layer(layer.as_str()),
                None => match mesh.kind {
                    MeshKind::Waypoint => assigner.assign_material_to_waypoint("waypoint", true),
                    MeshKind::Label => assigner.assign_material_to_label(Rgb(255, 255, 255), 10),
                    MeshKind::Line => {
                        let mean = mesh.mean_color();
                        assigner.assign_material_to_line(
                            Rgb(
                                (mean[0] * 255.0) as u8,
                                (mean[1] * 255.0) as u8,
                                (mean[2] * 255.0) as u8,
                            ),
                            "default",
                            None,
                        )
                    }
                },
            };
            debug!(mesh = %mesh.name, material = %material.name, "assigned material");
            assignments.push(material.name.clone());
            if seen.insert(material.name.clone()) {
                materials.push(material);
            }
        }

        self.export_meshes_to_gltf(meshes, &materials, &assignments, output_path, zone_name, extras)
    }

    /// Core export. `assignments` maps each mesh to a material name from
    /// `materials`; pass an empty slice to export without material
    /// references. Extras, when given, are embedded into `asset.extras` in
    /// this same single pass; the written file is complete as-is.
    pub fn export_meshes_to_gltf(
        &self,
        meshes: &[MeshData],
        materials: &[Material],
        assignments: &[String],
        output_path: &Path,
        zone_name: &str,
        extras: Option<serde_json::Value>,
    ) -> Result<ExportStats> {
        if meshes.is_empty() {
            warn!(zone = zone_name, "no meshes to export");
            return Ok(ExportStats::default());
        }
        if !assignments.is_empty() && assignments.len() != meshes.len() {
            return Err(Error::AssignmentMismatch {
                assignments: assignments.len(),
                meshes: meshes.len(),
            });
        }
        // Fail before writing anything rather than truncating indices
        for mesh in meshes {
            if mesh.vertex_count() > u16::MAX as usize {
                return Err(Error::IndexOverflow {
                    name: mesh.name.clone(),
                    vertices: mesh.vertex_count(),
                });
            }
        }

        let mut root = json::Root {
            asset: json::Asset {
                version: "2.0".to_string(),
                generator: Some(self.generator.clone()),
                copyright: Some(self.copyright.clone()),
                ..Default::default()
            },
            ..Default::default()
        };
        if let Some(extras) = extras {
            root.asset.extras = Some(serde_json::value::to_raw_value(&extras)?);
        }

        let mut material_indices: FxHashMap<&str, json::Index<json::Material>> =
            FxHashMap::default();
        for material in materials {
            let index = root.push(to_gltf_material(material));
            material_indices.entry(material.name.as_str()).or_insert(index);
        }

        let root_node = root.push(json::Node {
            name: Some(format!("{zone_name}_root")),
            ..Default::default()
        });

        let mut buffer_data: Vec<u8> = Vec::new();
        let mut children = Vec::with_capacity(meshes.len());
        for (i, mesh) in meshes.iter().enumerate() {
            let (position_accessor, index_accessor) =
                write_mesh_blocks(&mut root, &mut buffer_data, mesh);

            let mut attributes = BTreeMap::new();
            attributes.insert(Valid(json::mesh::Semantic::Positions), position_accessor);

            let material = assignments
                .get(i)
                .and_then(|name| material_indices.get(name.as_str()))
                .copied();
            let primitive = json::mesh::Primitive {
                attributes,
                indices: Some(index_accessor),
                material,
                mode: Valid(json::mesh::Mode::Triangles),
                targets: None,
                extensions: Default::default(),
                extras: Default::default(),
            };

            let mesh_index = root.push(json::Mesh {
                name: Some(mesh.name.clone()),
                primitives: vec![primitive],
                weights: None,
                extensions: Default::default(),
                extras: Default::default(),
            });
            let node_index = root.push(json::Node {
                name: Some(mesh.name.clone()),
                mesh: Some(mesh_index),
                ..Default::default()
            });
            children.push(node_index);
        }
        root.nodes[root_node.value()].children = Some(children);

        root.push(json::Buffer {
            byte_length: USize64::from(buffer_data.len()),
            uri: Some(format!(
                "data:application/octet-stream;base64,{}",
                BASE64.encode(&buffer_data)
            )),
            name: None,
            extensions: Default::default(),
            extras: Default::default(),
        });

        let scene = root.push(json::Scene {
            name: None,
            nodes: vec![root_node],
            extensions: Default::default(),
            extras: Default::default(),
        });
        root.scene = Some(scene);

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let document = json::serialize::to_string(&root)?;
        std::fs::write(output_path, &document).map_err(|source| Error::Io {
            path: output_path.to_path_buf(),
            source,
        })?;

        let stats = ExportStats {
            total_vertices: meshes.iter().map(MeshData::vertex_count).sum(),
            total_triangles: meshes.iter().map(MeshData::triangle_count).sum(),
            mesh_count: meshes.len(),
            material_count: materials.len(),
            file_size: document.len() as u64,
            bounding_box: calculate_bounding_box(meshes),
        };
        info!(
            zone = zone_name,
            meshes = stats.mesh_count,
            vertices = stats.total_vertices,
            triangles = stats.total_triangles,
            file_size = stats.file_size,
            path = %output_path.display(),
            "exported glTF"
        );
        Ok(stats)
    }
}

/// Append one mesh's vertex and index blocks to the shared buffer and
/// register their views and accessors
fn write_mesh_blocks(
    root: &mut json::Root,
    buffer_data: &mut Vec<u8>,
    mesh: &MeshData,
) -> (json::Index<json::Accessor>, json::Index<json::Accessor>) {
    // Positions: tightly packed f32 x/y/z
    let vertex_offset = buffer_data.len();
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for vertex in &mesh.vertices {
        let p = [vertex.x as f32, vertex.y as f32, vertex.z as f32];
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
        for coord in p {
            buffer_data.extend_from_slice(&coord.to_le_bytes());
        }
    }
    let vertex_view = root.push(json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64::from(buffer_data.len() - vertex_offset),
        byte_offset: Some(USize64::from(vertex_offset)),
        byte_stride: None,
        target: Some(Valid(json::buffer::Target::ArrayBuffer)),
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    let position_accessor = root.push(json::Accessor {
        buffer_view: Some(vertex_view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(mesh.vertex_count()),
        component_type: Valid(json::accessor::GenericComponentType(
            json::accessor::ComponentType::F32,
        )),
        type_: Valid(json::accessor::Type::Vec3),
        min: Some(json::Value::from(min.to_vec())),
        max: Some(json::Value::from(max.to_vec())),
        normalized: false,
        sparse: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });

    // Indices: tightly packed u16 triples. Bounded by the overflow check
    // in the exporter.
    let index_offset = buffer_data.len();
    for face in &mesh.faces {
        for &index in face {
            buffer_data.extend_from_slice(&(index as u16).to_le_bytes());
        }
    }
    let index_view = root.push(json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64::from(buffer_data.len() - index_offset),
        byte_offset: Some(USize64::from(index_offset)),
        byte_stride: None,
        target: Some(Valid(json::buffer::Target::ElementArrayBuffer)),
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    let index_accessor = root.push(json::Accessor {
        buffer_view: Some(index_view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(mesh.triangle_count() * 3),
        component_type: Valid(json::accessor::GenericComponentType(
            json::accessor::ComponentType::U16,
        )),
        type_: Valid(json::accessor::Type::Scalar),
        min: None,
        max: None,
        normalized: false,
        sparse: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });

    (position_accessor, index_accessor)
}

fn to_gltf_material(material: &Material) -> json::Material {
    let alpha_mode = match material.alpha_mode {
        AlphaMode::Opaque => json::material::AlphaMode::Opaque,
        AlphaMode::Mask => json::material::AlphaMode::Mask,
        AlphaMode::Blend => json::material::AlphaMode::Blend,
    };
    json::Material {
        name: Some(material.name.clone()),
        alpha_mode: Valid(alpha_mode),
        alpha_cutoff: (material.alpha_mode != AlphaMode::Opaque)
            .then_some(json::material::AlphaCutoff(material.alpha_cutoff)),
        double_sided: material.double_sided,
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_factor: json::material::PbrBaseColorFactor(material.base_color),
            metallic_factor: json::material::StrengthFactor(material.metallic_factor),
            roughness_factor: json::material::StrengthFactor(material.roughness_factor),
            ..Default::default()
        },
        emissive_factor: json::material::EmissiveFactor(material.emissive_factor),
        ..Default::default()
    }
}

/// Waypoint metadata payload for `asset.extras`, consumed by the viewer's
/// waypoint overlay
pub fn waypoint_metadata(waypoints: &[Waypoint]) -> serde_json::Value {
    serde_json::json!({
        "waypoints": waypoints
            .iter()
            .map(|wp| {
                serde_json::json!({
                    "x": wp.position[0],
                    "y": wp.position[1],
                    "z": wp.position[2],
                    "zone_name": wp.zone_name,
                    "description": wp.description,
                    "special_visual": wp.special_visual,
                })
            })
            .collect::<Vec<_>>(),
        "waypoint_count": waypoints.len(),
    })
}
