// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone conversion pipeline
//!
//! Glues the parser, geometry generator and glTF exporter into a single
//! `convert_zone` call. Each [`ZoneConverter`] owns all of its state,
//! including its material library, so independent converters can run on
//! separate threads without sharing anything.

use std::path::{Path, PathBuf};

use brewall_core::{MapParser, WaypointSource};
use brewall_export::{
    waypoint_metadata, ExportStats, GltfExporter, MaterialAssigner, MaterialLibrary,
};
use brewall_geometry::{optimize_geometry, GeometryConfig, GeometryGenerator};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

mod error;

pub use error::{Error, Result};

/// Pipeline configuration, deserializable from JSON config files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Directory holding the Brewall `<zone>.txt` family of files
    pub maps_dir: PathBuf,
    /// Directory the `<zone>.gltf` files are written into
    pub output_dir: PathBuf,
    pub geometry: GeometryConfig,
    /// Skip mesh merging when false, useful for debugging individual meshes
    pub optimize_meshes: bool,
    /// Embed waypoint positions into `asset.extras` for the viewer overlay
    pub embed_waypoint_metadata: bool,
    pub generator: String,
    pub copyright: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("maps"),
            output_dir: PathBuf::from("output"),
            geometry: GeometryConfig::default(),
            optimize_meshes: true,
            embed_waypoint_metadata: true,
            generator: "EQDB Map Converter".to_string(),
            copyright: "EQDB Development Team".to_string(),
        }
    }
}

/// Per-zone conversion report
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZoneStats {
    pub zone_name: String,
    pub line_segments: usize,
    pub secondary_segments: usize,
    pub labels: usize,
    pub waypoints: usize,
    pub meshes_before_optimization: usize,
    #[serde(flatten)]
    pub export: ExportStats,
}

/// One-zone-at-a-time converter. Every run starts from a fresh
/// [`MaterialLibrary`], so color materials synthesized for one zone never
/// leak into the next.
#[derive(Debug, Clone)]
pub struct ZoneConverter {
    config: ConverterConfig,
    parser: MapParser,
    generator: GeometryGenerator,
    exporter: GltfExporter,
}

impl ZoneConverter {
    pub fn new(config: ConverterConfig) -> Self {
        let parser = MapParser::new(&config.maps_dir);
        let generator = GeometryGenerator::new(config.geometry.clone());
        let exporter = GltfExporter::new(config.generator.clone(), config.copyright.clone());
        Self {
            config,
            parser,
            generator,
            exporter,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Output path for a zone, `<output_dir>/<zone>.gltf`
    pub fn output_path(&self, zone_name: &str) -> PathBuf {
        self.config.output_dir.join(format!("{zone_name}.gltf"))
    }

    /// Run the full pipeline for one zone: parse the map files, generate
    /// and optionally merge meshes, assign materials and write the glTF
    /// file. Missing map files parse to empty collections; a zone that
    /// parses to nothing writes no file and returns zeroed export stats.
    pub fn convert_zone(
        &self,
        zone_name: &str,
        waypoints: &dyn WaypointSource,
    ) -> Result<ZoneStats> {
        let span = info_span!("convert_zone", zone = zone_name);
        let _guard = span.enter();

        let map = self.parser.parse_zone(zone_name, waypoints)?;
        let meshes = self.generator.generate_all_geometry(&map);
        let mesh_count = meshes.len();
        let meshes = if self.config.optimize_meshes {
            optimize_geometry(meshes)
        } else {
            meshes
        };

        let extras = if self.config.embed_waypoint_metadata && !map.waypoints.is_empty() {
            Some(waypoint_metadata(&map.waypoints))
        } else {
            None
        };

        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        let export = self.exporter.export_with_materials_and_extras(
            &meshes,
            &mut assigner,
            &self.output_path(zone_name),
            zone_name,
            extras,
        )?;

        let stats = ZoneStats {
            zone_name: zone_name.to_string(),
            line_segments: map.line_segments.len(),
            secondary_segments: map.secondary_segments.len(),
            labels: map.labels.len(),
            waypoints: map.waypoints.len(),
            meshes_before_optimization: mesh_count,
            export,
        };
        info!(
            zone = zone_name,
            elements = map.element_count(),
            meshes = stats.export.mesh_count,
            "zone converted"
        );
        Ok(stats)
    }

    /// Convert several zones in sequence, skipping zones that fail and
    /// reporting stats for the rest
    pub fn convert_zones(
        &self,
        zone_names: &[String],
        waypoints: &dyn WaypointSource,
    ) -> Vec<(String, Result<ZoneStats>)> {
        zone_names
            .iter()
            .map(|zone| (zone.clone(), self.convert_zone(zone, waypoints)))
            .collect()
    }
}

/// Load a [`ConverterConfig`] from a JSON file
pub fn load_config(path: &Path) -> Result<ConverterConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
