// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Brewall Geometry
//!
//! Converts parsed Brewall map data into 3D triangle meshes:
//!
//! - line segments become thin closed boxes (8 vertices, 12 triangles)
//! - text labels become billboard quads, sized and colored by a keyword
//!   classification of the label text
//! - zone waypoints become a distinctive cylinder-plus-cone marker
//!
//! [`optimize_geometry`] then merges meshes that share a kind and mean
//! color, cutting draw calls for the downstream viewer without changing the
//! visual payload.

pub mod error;
pub mod generator;
pub mod label;
pub mod mesh;
pub mod optimize;

// Re-export nalgebra types used in the public API
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use generator::{GeometryConfig, GeometryGenerator};
pub use label::LabelKind;
pub use mesh::{calculate_bounding_box, BoundingBox, MeshData, MeshKind};
pub use optimize::optimize_geometry;
