// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for map parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading and parsing Brewall map files
#[derive(Error, Debug)]
pub enum Error {
    /// A map file exists but could not be read. Missing optional files are
    /// not errors; they parse to empty collections.
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single record did not match the expected field layout. Recoverable:
    /// file-level parsing logs and skips the offending line.
    #[error("malformed {kind} record: {line:?}")]
    MalformedRecord { kind: &'static str, line: String },
}
