// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during mesh construction
#[derive(Error, Debug)]
pub enum Error {
    #[error("face index {index} out of bounds for {vertex_count} vertices in mesh {name:?}")]
    FaceIndexOutOfBounds {
        name: String,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh {name:?} has {color_count} colors for {vertex_count} vertices")]
    ColorCountMismatch {
        name: String,
        color_count: usize,
        vertex_count: usize,
    },

    #[error("core parser error: {0}")]
    Core(#[from] brewall_core::Error),
}
