// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh set optimization
//!
//! Meshes that share a kind and mean color render identically, so they are
//! merged into one mesh to cut draw calls. This is a visual-payload
//! reduction only: merged meshes drop their semantic layer, since a
//! combined mesh no longer represents a single classified element.

use rustc_hash::FxHashMap;
use tracing::info;

use crate::mesh::{MeshData, MeshKind};

/// Grouping key: mesh kind plus mean color rounded to 3 decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GroupKey {
    kind: MeshKind,
    color: [i32; 3],
}

impl GroupKey {
    fn for_mesh(mesh: &MeshData) -> Self {
        let mean = mesh.mean_color();
        Self {
            kind: mesh.kind,
            color: [
                (mean[0] * 1000.0).round() as i32,
                (mean[1] * 1000.0).round() as i32,
                (mean[2] * 1000.0).round() as i32,
            ],
        }
    }
}

/// Merge meshes that share a kind and mean color.
///
/// Singleton groups pass through untouched, which makes the operation
/// idempotent: a second run finds only singleton groups. Group order
/// follows first appearance in the input.
pub fn optimize_geometry(meshes: Vec<MeshData>) -> Vec<MeshData> {
    if meshes.is_empty() {
        return meshes;
    }
    let input_count = meshes.len();

    let mut order: Vec<GroupKey> = Vec::new();
    let mut groups: FxHashMap<GroupKey, Vec<MeshData>> = FxHashMap::default();
    for mesh in meshes {
        let key = GroupKey::for_mesh(&mesh);
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(mesh);
    }

    let mut optimized = Vec::with_capacity(order.len());
    for key in order {
        let group = groups.remove(&key).unwrap_or_default();
        if group.len() == 1 {
            optimized.extend(group);
        } else {
            optimized.push(combine_meshes(group, key.kind));
        }
    }

    info!(input = input_count, output = optimized.len(), "optimized mesh set");
    optimized
}

/// Concatenate a group into one mesh, offsetting face indices by the
/// running vertex count
fn combine_meshes(group: Vec<MeshData>, kind: MeshKind) -> MeshData {
    let total_vertices: usize = group.iter().map(MeshData::vertex_count).sum();
    let total_faces: usize = group.iter().map(MeshData::triangle_count).sum();
    let count = group.len();

    let mut vertices = Vec::with_capacity(total_vertices);
    let mut faces = Vec::with_capacity(total_faces);
    let mut colors = Vec::with_capacity(total_vertices);
    let mut offset = 0u32;
    for mesh in group {
        faces.extend(
            mesh.faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
        offset += mesh.vertices.len() as u32;
        vertices.extend(mesh.vertices);
        colors.extend(mesh.colors);
    }

    MeshData::new(
        vertices,
        faces,
        colors,
        format!("combined_{}_{}_meshes", kind.as_str(), count),
        kind,
        None,
    )
}
