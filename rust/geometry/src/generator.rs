// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry generation for map elements

use brewall_core::{Label, LineSegment, MapData, Waypoint};
use nalgebra::{Point3, Vector3};
use tracing::{info, warn};

use crate::label::LabelKind;
use crate::mesh::{MeshData, MeshKind};

/// Face list for the closed box built around a line segment: bottom and top
/// quads at the segment endpoints plus four side quads.
const LINE_BOX_FACES: [[u32; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3],
    [4, 6, 5],
    [4, 7, 6],
    [0, 4, 1],
    [1, 4, 5],
    [1, 5, 2],
    [2, 5, 6],
    [2, 6, 3],
    [3, 6, 7],
    [3, 7, 0],
    [0, 7, 4],
];

/// Sides on the waypoint marker cylinder and cone
const MARKER_SEGMENTS: usize = 16;

/// Coordinate transform and sizing knobs for geometry generation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeometryConfig {
    /// Cross-section width of line segment boxes
    pub line_thickness: f64,
    /// Uniform scale applied after the offset
    pub scale_factor: f64,
    /// Offset added to every coordinate before scaling
    pub offset: [f64; 3],
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            line_thickness: 2.0,
            scale_factor: 1.0,
            offset: [0.0; 3],
        }
    }
}

/// Converts parsed map data into triangle meshes
#[derive(Debug, Clone, Default)]
pub struct GeometryGenerator {
    config: GeometryConfig,
}

impl GeometryGenerator {
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// `t(v) = (v + offset) * scale`
    #[inline]
    fn transform(&self, p: [f64; 3]) -> Point3<f64> {
        Point3::new(
            (p[0] + self.config.offset[0]) * self.config.scale_factor,
            (p[1] + self.config.offset[1]) * self.config.scale_factor,
            (p[2] + self.config.offset[2]) * self.config.scale_factor,
        )
    }

    /// Build a thin closed box along a line segment.
    ///
    /// Returns `None` for segments whose endpoints coincide after the
    /// coordinate transform; those carry no renderable geometry.
    pub fn generate_line_mesh(&self, segment: &LineSegment) -> Option<MeshData> {
        let start = self.transform(segment.start);
        let end = self.transform(segment.end);

        let direction = end - start;
        let length = direction.norm();
        if length == 0.0 {
            warn!(start = ?segment.start, end = ?segment.end, "zero-length line segment");
            return None;
        }
        let direction = direction / length;

        // Cross-section axes. The naive horizontal perpendicular degenerates
        // for vertical segments; fall back to a vector in the YZ plane.
        let mut perp1 = Vector3::new(-direction.y, direction.x, 0.0);
        if perp1.norm() == 0.0 {
            perp1 = Vector3::new(0.0, -direction.z, direction.y);
        }
        let perp1 = perp1.normalize();
        let perp2 = direction.cross(&perp1).normalize();

        let h = self.config.line_thickness / 2.0;
        let vertices = vec![
            start - perp1 * h - perp2 * h,
            start + perp1 * h - perp2 * h,
            start + perp1 * h + perp2 * h,
            start - perp1 * h + perp2 * h,
            end - perp1 * h - perp2 * h,
            end + perp1 * h - perp2 * h,
            end + perp1 * h + perp2 * h,
            end - perp1 * h + perp2 * h,
        ];

        let color = segment.color.normalized();
        Some(MeshData::new(
            vertices,
            LINE_BOX_FACES.to_vec(),
            vec![color; 8],
            format!(
                "line_{}_{}_{}_{}",
                segment.start[0], segment.start[1], segment.end[0], segment.end[1]
            ),
            MeshKind::Line,
            segment.layer,
        ))
    }

    /// Build a billboard quad for a text label.
    ///
    /// The quad is sized from the classified label kind and the text length
    /// so longer names stay legible in the viewer.
    pub fn generate_label_mesh(&self, label: &Label) -> Option<MeshData> {
        let position = self.transform(label.position);
        let kind = LabelKind::classify(&label.text);

        let base = label.size as f64 * kind.size_multiplier(label.size);
        let width = base * (label.text.len() as f64 * 0.6 + 1.0);
        let height = base * 1.2;

        let offset = position.coords;
        let vertices = vec![
            Point3::new(-width / 2.0, -height / 2.0, 0.0) + offset,
            Point3::new(width / 2.0, -height / 2.0, 0.0) + offset,
            Point3::new(width / 2.0, height / 2.0, 0.0) + offset,
            Point3::new(-width / 2.0, height / 2.0, 0.0) + offset,
        ];

        let color = kind.display_color(label.color);
        Some(MeshData::new(
            vertices,
            vec![[0, 1, 2], [0, 2, 3]],
            vec![color; 4],
            format!(
                "label_{}_{}_{}_{}",
                kind.as_str(),
                label.text,
                position.x,
                position.y
            ),
            MeshKind::Label,
            Some(kind.semantic_layer()),
        ))
    }

    /// Build the waypoint marker: a 16-sided cylinder capped by a 16-sided
    /// cone, 64 vertices total.
    pub fn generate_waypoint_mesh(&self, waypoint: &Waypoint) -> Option<MeshData> {
        let center = self.transform(waypoint.position).coords;

        let radius = 25.0;
        let height = 50.0;
        let cone_radius = 15.0;
        let cone_height = 30.0;
        let n = MARKER_SEGMENTS;

        let mut vertices = Vec::with_capacity(4 * n);
        // Cylinder rings, bottom/top interleaved
        for i in 0..n {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            let (sin, cos) = angle.sin_cos();
            vertices.push(Point3::new(radius * cos, radius * sin, -height / 2.0) + center);
            vertices.push(Point3::new(radius * cos, radius * sin, height / 2.0) + center);
        }
        // Cone base ring and tip, interleaved
        for i in 0..n {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            let (sin, cos) = angle.sin_cos();
            vertices.push(Point3::new(cone_radius * cos, cone_radius * sin, height / 2.0) + center);
            vertices.push(Point3::new(0.0, 0.0, height / 2.0 + cone_height) + center);
        }

        let mut faces = Vec::with_capacity(6 * n - 4);
        // Cylinder sides
        for i in 0..n as u32 {
            let next = (i + 1) % n as u32;
            faces.push([i * 2, next * 2, next * 2 + 1]);
            faces.push([i * 2, next * 2 + 1, i * 2 + 1]);
        }
        // Cylinder caps, fanned from the first ring pair
        for i in 1..(n as u32 - 1) {
            faces.push([0, i * 2, (i + 1) * 2]);
            faces.push([1, (i + 1) * 2 + 1, i * 2 + 1]);
        }
        // Cone sides
        let base = 2 * n as u32;
        for i in 0..n as u32 {
            let next = (i + 1) % n as u32;
            faces.push([base + i * 2, base + next * 2, base + next * 2 + 1]);
            faces.push([base + i * 2, base + next * 2 + 1, base + i * 2 + 1]);
        }

        let color = if waypoint.special_visual {
            [1.0, 0.0, 0.0]
        } else {
            [0.8, 0.2, 0.2]
        };
        let vertex_count = vertices.len();
        Some(MeshData::new(
            vertices,
            faces,
            vec![color; vertex_count],
            format!("waypoint_{}_{}_{}", waypoint.zone_name, center.x, center.y),
            MeshKind::Waypoint,
            Some(brewall_core::SemanticLayer::Waypoints),
        ))
    }

    /// Generate meshes for every element of a zone: primary line segments,
    /// secondary overlay segments, labels, then waypoints. Degenerate
    /// elements are dropped; relative order is otherwise preserved.
    pub fn generate_all_geometry(&self, map: &MapData) -> Vec<MeshData> {
        info!(
            zone = %map.zone_name,
            line_segments = map.line_segments.len(),
            secondary_segments = map.secondary_segments.len(),
            labels = map.labels.len(),
            waypoints = map.waypoints.len(),
            "generating geometry"
        );

        let mut meshes = Vec::new();
        for segment in map.line_segments.iter().chain(&map.secondary_segments) {
            if let Some(mesh) = self.generate_line_mesh(segment) {
                meshes.push(mesh);
            }
        }
        for label in &map.labels {
            if let Some(mesh) = self.generate_label_mesh(label) {
                meshes.push(mesh);
            }
        }
        for waypoint in &map.waypoints {
            if let Some(mesh) = self.generate_waypoint_mesh(waypoint) {
                meshes.push(mesh);
            }
        }

        info!(meshes = meshes.len(), zone = %map.zone_name, "generated geometry");
        meshes
    }
}
