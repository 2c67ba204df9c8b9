// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting to glTF
#[derive(Error, Debug)]
pub enum Error {
    /// Mesh indices are written as 16-bit integers; a mesh this large
    /// cannot be represented and the export fails before writing anything.
    #[error("mesh {name:?} has {vertices} vertices; indices must fit in 16 bits")]
    IndexOverflow { name: String, vertices: usize },

    #[error("{assignments} material assignments for {meshes} meshes")]
    AssignmentMismatch { assignments: usize, meshes: usize },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glTF serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("geometry error: {0}")]
    Geometry(#[from] brewall_geometry::Error),
}
