// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use brewall_core::SemanticLayer;
use nalgebra::Point3;

use crate::error::{Error, Result};

/// What kind of map element a mesh came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Line,
    Label,
    Waypoint,
}

impl MeshKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeshKind::Line => "line",
            MeshKind::Label => "label",
            MeshKind::Waypoint => "waypoint",
        }
    }
}

/// Generated triangle mesh with per-vertex colors.
///
/// Invariants: every face index is a valid vertex index, and the color list
/// parallels the vertex list. Generators uphold both by construction;
/// [`MeshData::validate`] re-checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub vertices: Vec<Point3<f64>>,
    /// Triangle indices into `vertices`
    pub faces: Vec<[u32; 3]>,
    /// Per-vertex RGB colors, same length as `vertices`
    pub colors: Vec<[f32; 3]>,
    /// Node name in the exported scene graph
    pub name: String,
    pub kind: MeshKind,
    /// Brewall semantic layer, when one applies. Merged meshes drop this.
    pub layer: Option<SemanticLayer>,
}

impl MeshData {
    pub fn new(
        vertices: Vec<Point3<f64>>,
        faces: Vec<[u32; 3]>,
        colors: Vec<[f32; 3]>,
        name: String,
        kind: MeshKind,
        layer: Option<SemanticLayer>,
    ) -> Self {
        let mesh = Self {
            vertices,
            faces,
            colors,
            name,
            kind,
            layer,
        };
        debug_assert!(mesh.validate().is_ok());
        mesh
    }

    /// Check the structural invariants
    pub fn validate(&self) -> Result<()> {
        for face in &self.faces {
            for &index in face {
                if index as usize >= self.vertices.len() {
                    return Err(Error::FaceIndexOutOfBounds {
                        name: self.name.clone(),
                        index,
                        vertex_count: self.vertices.len(),
                    });
                }
            }
        }
        if self.colors.len() != self.vertices.len() {
            return Err(Error::ColorCountMismatch {
                name: self.name.clone(),
                color_count: self.colors.len(),
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Per-channel mean of the vertex colors
    pub fn mean_color(&self) -> [f32; 3] {
        if self.colors.is_empty() {
            return [0.0; 3];
        }
        let mut sum = [0.0f32; 3];
        for color in &self.colors {
            sum[0] += color[0];
            sum[1] += color[1];
            sum[2] += color[2];
        }
        let n = self.colors.len() as f32;
        [sum[0] / n, sum[1] / n, sum[2] / n]
    }
}

/// Axis-aligned bounds of a mesh set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

/// Per-axis min/max across all vertices of all meshes. Empty input yields
/// the degenerate all-zero box.
pub fn calculate_bounding_box(meshes: &[MeshData]) -> BoundingBox {
    let mut vertices = meshes.iter().flat_map(|m| m.vertices.iter());
    let Some(first) = vertices.next() else {
        return BoundingBox::default();
    };

    let mut min = [first.x, first.y, first.z];
    let mut max = min;
    for v in vertices {
        let p = [v.x, v.y, v.z];
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    BoundingBox { min, max }
}
