// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Brewall Export
//!
//! Materials and glTF 2.0 serialization for converted zone geometry.
//!
//! [`MaterialLibrary`] holds the PBR material catalogue for one conversion
//! run: a fixed set of predefined materials, one material per Brewall
//! semantic layer, and lazily synthesized color materials. The library is
//! not a process-wide singleton: construct one per run, and concurrent
//! zone conversions stay independent.
//!
//! [`GltfExporter`] serializes a mesh set plus its assigned materials into
//! a single `.gltf` file: one JSON scene graph, one embedded base64 binary
//! buffer, one node per mesh under a zone root node.

pub mod assign;
pub mod error;
pub mod gltf;
pub mod material;
pub mod optimize;

pub use assign::MaterialAssigner;
pub use error::{Error, Result};
pub use gltf::{waypoint_metadata, ExportStats, GltfExporter};
pub use material::{AlphaMode, Material, MaterialLibrary, MaterialType};
pub use optimize::MaterialOptimizer;
