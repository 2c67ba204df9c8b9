// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Brewall Core
//!
//! Parser and data model for the Brewall zone map format, the plain-text
//! 2D vector format used by EverQuest-emulator mapping tools.
//!
//! A zone is described by up to three files:
//!
//! - `<zone>.txt`: primary geometry, `L` records (line segments)
//! - `<zone>_1.txt`: labels, `P` records
//! - `<zone>_2.txt`: optional secondary/overlay geometry, `L` records
//!
//! Records are whitespace/comma tolerant:
//!
//! ```text
//! L 1186.0, -188.1, 3.1, 1186.0, -172.1, 3.1, 255, 0, 200
//! P -610.7, -448.1, 3.5, 0, 0, 0, 3, Plane_of_Knowledge
//! ```
//!
//! Primary line segments are classified into a semantic layer (wall, door,
//! water, ...) by exact RGB lookup against the Brewall color standards; see
//! [`SemanticLayer`]. Waypoint positions come from the surrounding
//! application through the [`WaypointSource`] trait.
//!
//! ## Quick start
//!
//! ```rust
//! use brewall_core::parse_map_text;
//!
//! let segments = parse_map_text("L 0, 0, 0, 10, 0, 0, 255, 0, 200");
//! assert_eq!(segments.len(), 1);
//! ```
//!
//! Whole zones go through [`MapParser`]:
//!
//! ```rust,no_run
//! use brewall_core::{MapParser, NoWaypoints};
//!
//! # fn main() -> brewall_core::Result<()> {
//! let parser = MapParser::new("maps/brewall");
//! let map = parser.parse_zone("qeynos", &NoWaypoints)?;
//! assert_eq!(map.zone_name, "qeynos");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod layer;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use layer::{SemanticLayer, LINE_LAYER_COLORS};
pub use parser::{
    parse_label_record, parse_label_text, parse_line_record, parse_map_text, MapParser,
};
pub use types::{
    Label, LineSegment, MapData, NoWaypoints, Rgb, Waypoint, WaypointSource, ZoneWaypoint,
};
