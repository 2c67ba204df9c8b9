// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map element data model

use crate::layer::SemanticLayer;

/// 8-bit RGB color triple as stored in Brewall records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Normalize to 0.0..=1.0 floats for rendering
    #[inline]
    pub fn normalized(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }

    /// Per-channel mean, 0..=255
    #[inline]
    pub fn intensity(&self) -> f32 {
        (self.0 as f32 + self.1 as f32 + self.2 as f32) / 3.0
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }
}

/// One `L` record: a colored line segment between two map points.
///
/// `layer` is populated for primary geometry by exact color lookup; secondary
/// (overlay) segments are left unclassified.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub color: Rgb,
    pub layer: Option<SemanticLayer>,
}

/// One `P` record: a positioned text label
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: [f64; 3],
    pub color: Rgb,
    pub size: i32,
    pub text: String,
}

/// Zone entry waypoint, sourced from the application database rather than
/// the map files themselves
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub position: [f64; 3],
    pub zone_name: String,
    pub special_visual: bool,
    pub description: Option<String>,
}

/// Everything parsed for one zone. Built once by
/// [`MapParser::parse_zone`](crate::MapParser::parse_zone) and immutable
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    pub zone_name: String,
    pub line_segments: Vec<LineSegment>,
    pub labels: Vec<Label>,
    pub secondary_segments: Vec<LineSegment>,
    pub waypoints: Vec<Waypoint>,
}

impl MapData {
    pub fn new(zone_name: impl Into<String>) -> Self {
        Self {
            zone_name: zone_name.into(),
            ..Default::default()
        }
    }

    /// Total number of parsed elements across all collections
    pub fn element_count(&self) -> usize {
        self.line_segments.len()
            + self.labels.len()
            + self.secondary_segments.len()
            + self.waypoints.len()
    }
}

/// Waypoint coordinates for a zone, as stored by the application's
/// persistence layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneWaypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub heading: f64,
}

/// External zone-waypoint lookup. The surrounding application owns the
/// backing store; the pipeline only asks for the optional record.
pub trait WaypointSource {
    fn zone_waypoint(&self, zone_name: &str) -> Option<ZoneWaypoint>;
}

/// A [`WaypointSource`] with no data, for zones converted without database
/// access
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWaypoints;

impl WaypointSource for NoWaypoints {
    fn zone_waypoint(&self, _zone_name: &str) -> Option<ZoneWaypoint> {
        None
    }
}
