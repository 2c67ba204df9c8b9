// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full pipeline run against a small synthetic zone on disk

use std::path::Path;

use brewall_core::{NoWaypoints, WaypointSource, ZoneWaypoint};
use brewall_processing::{ConverterConfig, ZoneConverter};

struct FixedWaypoint;

impl WaypointSource for FixedWaypoint {
    fn zone_waypoint(&self, zone_name: &str) -> Option<ZoneWaypoint> {
        (zone_name == "qeynos").then(|| ZoneWaypoint {
            x: 5.0,
            y: 0.0,
            z: 1.0,
            heading: 0.0,
        })
    }
}

fn write_zone_files(maps_dir: &Path) {
    // One wall-colored segment and one standard label
    std::fs::write(
        maps_dir.join("qeynos.txt"),
        "L 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 255, 0, 200\n",
    )
    .unwrap();
    std::fs::write(
        maps_dir.join("qeynos_1.txt"),
        "P 5.0, 0.0, 0.0, 255, 255, 255, 10, Zone_Entrance\n",
    )
    .unwrap();
}

fn converter(root: &Path) -> ZoneConverter {
    ZoneConverter::new(ConverterConfig {
        maps_dir: root.join("maps"),
        output_dir: root.join("output"),
        ..Default::default()
    })
}

#[test]
fn qeynos_round_trip_produces_three_meshes() {
    let dir = tempfile::tempdir().unwrap();
    let maps_dir = dir.path().join("maps");
    std::fs::create_dir_all(&maps_dir).unwrap();
    write_zone_files(&maps_dir);

    let converter = converter(dir.path());
    let stats = converter.convert_zone("qeynos", &FixedWaypoint).unwrap();

    assert_eq!(stats.line_segments, 1);
    assert_eq!(stats.labels, 1);
    assert_eq!(stats.waypoints, 1);
    assert_eq!(stats.meshes_before_optimization, 3);
    // Three distinct mesh kinds never merge
    assert_eq!(stats.export.mesh_count, 3);

    let doc: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(converter.output_path("qeynos")).unwrap(),
    )
    .unwrap();
    assert_eq!(doc["meshes"].as_array().unwrap().len(), 3);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(doc["scenes"].as_array().unwrap().len(), 1);

    // The line mesh keeps its wall layer through to material assignment
    let materials = doc["materials"].as_array().unwrap();
    let line_mesh = doc["meshes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"].as_str().unwrap().starts_with("line_"))
        .unwrap();
    let material_index = line_mesh["primitives"][0]["material"].as_u64().unwrap() as usize;
    assert_eq!(materials[material_index]["name"], "layer_wall");

    // Waypoint metadata rides along in asset.extras
    assert_eq!(doc["asset"]["extras"]["waypoint_count"], 1);
    assert_eq!(doc["asset"]["extras"]["waypoints"][0]["zone_name"], "qeynos");
}

#[test]
fn zone_without_waypoint_has_no_extras() {
    let dir = tempfile::tempdir().unwrap();
    let maps_dir = dir.path().join("maps");
    std::fs::create_dir_all(&maps_dir).unwrap();
    write_zone_files(&maps_dir);

    let converter = converter(dir.path());
    let stats = converter.convert_zone("qeynos", &NoWaypoints).unwrap();
    assert_eq!(stats.waypoints, 0);
    assert_eq!(stats.export.mesh_count, 2);

    let doc: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(converter.output_path("qeynos")).unwrap(),
    )
    .unwrap();
    assert!(doc["asset"].get("extras").is_none());
}

#[test]
fn empty_zone_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("maps")).unwrap();

    let converter = converter(dir.path());
    let stats = converter.convert_zone("nowhere", &NoWaypoints).unwrap();
    assert_eq!(stats.export.mesh_count, 0);
    assert_eq!(stats.export.file_size, 0);
    assert!(!converter.output_path("nowhere").exists());
}

#[test]
fn secondary_geometry_joins_the_export() {
    let dir = tempfile::tempdir().unwrap();
    let maps_dir = dir.path().join("maps");
    std::fs::create_dir_all(&maps_dir).unwrap();
    write_zone_files(&maps_dir);
    // Unclassified secondary geometry with an off-table color
    std::fs::write(
        maps_dir.join("qeynos_2.txt"),
        "L 0.0, 5.0, 0.0, 10.0, 5.0, 0.0, 7, 7, 7\n",
    )
    .unwrap();

    let converter = converter(dir.path());
    let stats = converter.convert_zone("qeynos", &NoWaypoints).unwrap();
    assert_eq!(stats.secondary_segments, 1);
    assert_eq!(stats.meshes_before_optimization, 3);
}

#[test]
fn convert_zones_reports_per_zone_results() {
    let dir = tempfile::tempdir().unwrap();
    let maps_dir = dir.path().join("maps");
    std::fs::create_dir_all(&maps_dir).unwrap();
    write_zone_files(&maps_dir);

    let converter = converter(dir.path());
    let results = converter.convert_zones(
        &["qeynos".to_string(), "nowhere".to_string()],
        &NoWaypoints,
    );
    assert_eq!(results.len(), 2);
    let qeynos = results[0].1.as_ref().unwrap();
    assert_eq!(qeynos.export.mesh_count, 2);
    let nowhere = results[1].1.as_ref().unwrap();
    assert_eq!(nowhere.export.mesh_count, 0);
}
