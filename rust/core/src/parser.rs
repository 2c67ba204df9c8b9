// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brewall record parsers using nom
//!
//! Record-level parsers operate on plain `&str` so they can be tested
//! without touching the filesystem; [`MapParser`] layers the per-file
//! failure policy on top (missing optional files parse to empty
//! collections, malformed records are logged and skipped).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map_res, opt, recognize},
    multi::count,
    sequence::{pair, preceded, tuple},
    IResult,
};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::layer::{SemanticLayer, LINE_LAYER_COLORS};
use crate::types::{Label, LineSegment, MapData, Rgb, Waypoint, WaypointSource};

/// Field separator: any run of whitespace and/or commas
fn field_sep(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == ',' || c.is_ascii_whitespace())(input)
}

/// Coordinate field: signed decimal with optional fraction and exponent
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        fast_float::parse::<f64, &str>,
    )(input)
}

/// Color channel field: 0..=255
fn color_component(input: &str) -> IResult<&str, u8> {
    map_res(digit1, |s: &str| s.parse::<u8>())(input)
}

/// Label size field
fn size_field(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

/// Parse one `L` record: `L x1, y1, z1, x2, y2, z2, r, g, b`.
///
/// The segment is returned unclassified; layer lookup is a separate concern
/// (secondary geometry is never classified). Trailing fields are ignored.
pub fn parse_line_record(line: &str) -> Result<LineSegment> {
    fn fields(input: &str) -> IResult<&str, (Vec<f64>, Vec<u8>)> {
        let (input, _) = char('L')(input)?;
        let (input, coords) = count(preceded(field_sep, number), 6)(input)?;
        let (input, rgb) = count(preceded(field_sep, color_component), 3)(input)?;
        Ok((input, (coords, rgb)))
    }

    let (_, (c, rgb)) = fields(line).map_err(|_| Error::MalformedRecord {
        kind: "L",
        line: line.trim_end().to_string(),
    })?;
    Ok(LineSegment {
        start: [c[0], c[1], c[2]],
        end: [c[3], c[4], c[5]],
        color: Rgb(rgb[0], rgb[1], rgb[2]),
        layer: None,
    })
}

/// Parse one `P` record: `P x, y, z, r, g, b, size, word1_word2 ...`.
///
/// Trailing tokens are joined with single spaces and underscores become
/// spaces, matching how Brewall files encode multi-word labels.
pub fn parse_label_record(line: &str) -> Result<Label> {
    fn fields(input: &str) -> IResult<&str, (Vec<f64>, Vec<u8>, i32)> {
        let (input, _) = char('P')(input)?;
        let (input, pos) = count(preceded(field_sep, number), 3)(input)?;
        let (input, rgb) = count(preceded(field_sep, color_component), 3)(input)?;
        let (input, size) = preceded(field_sep, size_field)(input)?;
        Ok((input, (pos, rgb, size)))
    }

    let (rest, (pos, rgb, size)) = fields(line).map_err(|_| Error::MalformedRecord {
        kind: "P",
        line: line.trim_end().to_string(),
    })?;
    let text = rest
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('_', " ");
    Ok(Label {
        position: [pos[0], pos[1], pos[2]],
        color: Rgb(rgb[0], rgb[1], rgb[2]),
        size,
        text,
    })
}

/// Parse every `L` record in a file body, skipping malformed lines
pub fn parse_map_text(content: &str) -> Vec<LineSegment> {
    let mut segments = Vec::new();
    for line in content.lines() {
        if !line.starts_with('L') {
            continue;
        }
        match parse_line_record(line) {
            Ok(segment) => segments.push(segment),
            Err(err) => warn!(%err, "skipping line segment record"),
        }
    }
    segments
}

/// Parse every `P` record in a file body, skipping malformed lines
pub fn parse_label_text(content: &str) -> Vec<Label> {
    let mut labels = Vec::new();
    for line in content.lines() {
        if !line.starts_with('P') {
            continue;
        }
        match parse_label_record(line) {
            Ok(label) => labels.push(label),
            Err(err) => warn!(%err, "skipping label record"),
        }
    }
    labels
}

/// Reads the Brewall files for a zone out of a maps directory
#[derive(Debug, Clone)]
pub struct MapParser {
    maps_dir: PathBuf,
    layer_colors: FxHashMap<Rgb, SemanticLayer>,
}

impl MapParser {
    pub fn new(maps_dir: impl Into<PathBuf>) -> Self {
        Self {
            maps_dir: maps_dir.into(),
            layer_colors: LINE_LAYER_COLORS.iter().copied().collect(),
        }
    }

    /// Parse all Brewall files for a zone, including its waypoint.
    ///
    /// Missing optional inputs never fail; only an unreadable existing file
    /// surfaces as an error.
    pub fn parse_zone(&self, zone_name: &str, waypoints: &dyn WaypointSource) -> Result<MapData> {
        info!(zone = zone_name, "parsing zone");
        let mut map = MapData::new(zone_name);
        map.line_segments = self.parse_line_segments(zone_name)?;
        map.labels = self.parse_labels(zone_name)?;
        map.secondary_segments = self.parse_secondary_segments(zone_name)?;
        map.waypoints = self.parse_waypoints(zone_name, waypoints);
        Ok(map)
    }

    /// Primary geometry from `<zone>.txt`, classified by line color
    pub fn parse_line_segments(&self, zone_name: &str) -> Result<Vec<LineSegment>> {
        let path = self.maps_dir.join(format!("{zone_name}.txt"));
        let Some(content) = read_optional(&path)? else {
            warn!(path = %path.display(), "main map file not found");
            return Ok(Vec::new());
        };
        let mut segments = parse_map_text(&content);
        for segment in &mut segments {
            segment.layer = self.layer_colors.get(&segment.color).copied();
        }
        info!(count = segments.len(), path = %path.display(), "parsed line segments");
        Ok(segments)
    }

    /// Labels from `<zone>_1.txt`
    pub fn parse_labels(&self, zone_name: &str) -> Result<Vec<Label>> {
        let path = self.maps_dir.join(format!("{zone_name}_1.txt"));
        let Some(content) = read_optional(&path)? else {
            warn!(path = %path.display(), "label file not found");
            return Ok(Vec::new());
        };
        let labels = parse_label_text(&content);
        info!(count = labels.len(), path = %path.display(), "parsed labels");
        Ok(labels)
    }

    /// Secondary/overlay geometry from `<zone>_2.txt`. Most zones have none,
    /// so a missing file is expected; segments are left unclassified.
    pub fn parse_secondary_segments(&self, zone_name: &str) -> Result<Vec<LineSegment>> {
        let path = self.maps_dir.join(format!("{zone_name}_2.txt"));
        let Some(content) = read_optional(&path)? else {
            debug!(zone = zone_name, "no secondary geometry file");
            return Ok(Vec::new());
        };
        let segments = parse_map_text(&content);
        info!(count = segments.len(), path = %path.display(), "parsed secondary segments");
        Ok(segments)
    }

    /// Zone waypoint from the external lookup; 0 or 1 records
    pub fn parse_waypoints(&self, zone_name: &str, source: &dyn WaypointSource) -> Vec<Waypoint> {
        match source.zone_waypoint(zone_name) {
            Some(wp) => {
                info!(zone = zone_name, x = wp.x, y = wp.y, z = wp.z, "zone waypoint found");
                vec![Waypoint {
                    position: [wp.x, wp.y, wp.z],
                    zone_name: zone_name.to_string(),
                    special_visual: true,
                    description: Some("Waypoint".to_string()),
                }]
            }
            None => {
                debug!(zone = zone_name, "no waypoint data");
                Vec::new()
            }
        }
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::Io {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NoWaypoints, ZoneWaypoint};

    #[test]
    fn line_record_round_trips() {
        let seg = parse_line_record("L 1186.0, -188.1, 3.1, 1186.0, -172.1, 3.1, 255, 0, 200")
            .unwrap();
        assert_eq!(seg.start, [1186.0, -188.1, 3.1]);
        assert_eq!(seg.end, [1186.0, -172.1, 3.1]);
        assert_eq!(seg.color, Rgb(255, 0, 200));
        assert_eq!(seg.layer, None);
    }

    #[test]
    fn line_record_tolerates_separator_styles() {
        let spaced = parse_line_record("L 1 2 3 4 5 6 7 8 9").unwrap();
        let commas = parse_line_record("L 1,2,3,4,5,6,7,8,9").unwrap();
        let mixed = parse_line_record("L 1 ,2,  3,4 5,6, 7, 8 , 9").unwrap();
        assert_eq!(spaced, commas);
        assert_eq!(spaced, mixed);
    }

    #[test]
    fn malformed_line_record_is_an_error() {
        assert!(parse_line_record("L 1, 2, 3").is_err());
        assert!(parse_line_record("L a, b, c, d, e, f, 1, 2, 3").is_err());
        assert!(parse_line_record("").is_err());
    }

    #[test]
    fn label_record_joins_and_unscores_text() {
        let label =
            parse_label_record("P -610.7, -448.1, 3.5, 0, 0, 0, 3, Plane_of_Knowledge").unwrap();
        assert_eq!(label.position, [-610.7, -448.1, 3.5]);
        assert_eq!(label.size, 3);
        assert_eq!(label.text, "Plane of Knowledge");

        let multi = parse_label_record("P 0, 0, 0, 10, 20, 30, 5, North_Gate to_Qeynos").unwrap();
        assert_eq!(multi.text, "North Gate to Qeynos");
    }

    #[test]
    fn label_record_allows_empty_text() {
        let label = parse_label_record("P 0, 0, 0, 1, 2, 3, 4,").unwrap();
        assert_eq!(label.text, "");
    }

    #[test]
    fn map_text_skips_malformed_lines_only() {
        let content = "L 0, 0, 0, 1, 1, 1, 255, 255, 0\n\
                       L bogus record\n\
                       P 0, 0, 0, 1, 2, 3, 4, ignored\n\
                       L 2, 2, 2, 3, 3, 3, 0, 0, 255\n";
        let segments = parse_map_text(content);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].color, Rgb(0, 0, 255));
    }

    #[test]
    fn parse_zone_classifies_primary_but_not_secondary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("qeynos.txt"),
            "L 0, 0, 0, 10, 0, 0, 255, 0, 200\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("qeynos_2.txt"),
            "L 0, 0, 0, 10, 0, 0, 255, 0, 200\n",
        )
        .unwrap();

        let parser = MapParser::new(dir.path());
        let map = parser.parse_zone("qeynos", &NoWaypoints).unwrap();
        assert_eq!(map.line_segments[0].layer, Some(SemanticLayer::Wall));
        assert_eq!(map.secondary_segments[0].layer, None);
    }

    #[test]
    fn missing_files_parse_to_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let parser = MapParser::new(dir.path());
        let map = parser.parse_zone("nowhere", &NoWaypoints).unwrap();
        assert!(map.line_segments.is_empty());
        assert!(map.labels.is_empty());
        assert!(map.secondary_segments.is_empty());
        assert!(map.waypoints.is_empty());
    }

    #[test]
    fn waypoint_lookup_produces_at_most_one_record() {
        struct Fixed;
        impl WaypointSource for Fixed {
            fn zone_waypoint(&self, _zone: &str) -> Option<ZoneWaypoint> {
                Some(ZoneWaypoint {
                    x: 5.0,
                    y: 0.0,
                    z: 1.0,
                    heading: 0.0,
                })
            }
        }

        let parser = MapParser::new("does/not/matter");
        let waypoints = parser.parse_waypoints("qeynos", &Fixed);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].position, [5.0, 0.0, 1.0]);
        assert!(waypoints[0].special_visual);
    }
}
