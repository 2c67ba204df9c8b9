// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Pipeline errors, wrapping the stage that failed
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] brewall_core::Error),

    #[error(transparent)]
    Geometry(#[from] brewall_geometry::Error),

    #[error(transparent)]
    Export(#[from] brewall_export::Error),

    #[error("failed to read config file {path}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
