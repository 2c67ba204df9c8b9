// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material assignment heuristics
//!
//! Assignment never fails: every path bottoms out at the default line
//! material, so a mesh always leaves with something renderable.

use brewall_core::Rgb;

use crate::material::{default_line_material, Material, MaterialLibrary, MaterialType};

/// Fallback mappings from viewer-facing layer names to catalogue entries.
/// Entries whose target material does not exist fall through to the
/// default, matching the historical behavior of the converter.
const LAYER_SYNONYMS: &[(&str, &str)] = &[
    ("walls", "wall"),
    ("doors", "door"),
    ("water", "water_deep"),
    ("teleporters", "teleporter"),
    ("spawns", "spawn"),
    ("npcs", "npc"),
    ("items", "item"),
    ("corpses", "corpse"),
    ("waypoints", "waypoint_general"),
    ("labels", "label_standard"),
    ("air", "air"),
    ("terrain", "terrain_ground"),
    ("ui", "ui_compass"),
];

/// Assigns materials to meshes based on semantic layer, color, or kind.
///
/// Borrows the library mutably because color-based assignment synthesizes
/// new catalogue entries.
pub struct MaterialAssigner<'a> {
    library: &'a mut MaterialLibrary,
}

impl<'a> MaterialAssigner<'a> {
    pub fn new(library: &'a mut MaterialLibrary) -> Self {
        Self { library }
    }

    fn named_or_default(&self, name: &str) -> Material {
        self.library
            .get_material(name)
            .cloned()
            .unwrap_or_else(default_line_material)
    }

    /// Resolve a material for a semantic-layer key: exact `layer_<key>`
    /// lookup, then `labels_*` → `label_*`, then the synonym table, then
    /// the default line material. Never fails.
    pub fn assign_material_by_semantic_layer(&mut self, semantic_layer: &str) -> Material {
        if let Some(material) = self.library.get_material_by_layer(semantic_layer) {
            return material.clone();
        }

        if let Some(label_kind) = semantic_layer.strip_prefix("labels_") {
            if let Some(material) = self.library.get_material(&format!("label_{label_kind}")) {
                return material.clone();
            }
        }

        if let Some((_, target)) = LAYER_SYNONYMS
            .iter()
            .find(|(key, _)| *key == semantic_layer)
        {
            if let Some(material) = self.library.get_material(target) {
                return material.clone();
            }
        }

        self.named_or_default("line_default")
    }

    /// Material for a line segment: layer lookup first, then the
    /// type-specific heuristics, then a synthesized color material.
    pub fn assign_material_to_line(
        &mut self,
        color: Rgb,
        segment_type: &str,
        layer: Option<&str>,
    ) -> Material {
        if let Some(layer) = layer {
            if let Some(material) = self.library.get_material_by_layer(layer) {
                return material.clone();
            }
        }

        match segment_type {
            // Water depth from color intensity
            "water" if color.intensity() > 128.0 => self.named_or_default("water_shallow"),
            "water" => self.named_or_default("water_deep"),
            "air" => self.named_or_default("air"),
            "ui" => self.named_or_default("ui_compass"),
            // Reddish terrain reads as rock, everything else as ground
            "terrain" if color.0 > color.1 && color.0 > color.2 => {
                self.named_or_default("terrain_rock")
            }
            "terrain" => self.named_or_default("terrain_ground"),
            _ => self
                .library
                .create_color_material(color, MaterialType::Line, 1.0)
                .clone(),
        }
    }

    /// Material for a label: oversized labels are "important", the rest get
    /// a color material
    pub fn assign_material_to_label(&mut self, color: Rgb, size: i32) -> Material {
        if size > 15 {
            return self.named_or_default("label_important");
        }
        self.library
            .create_color_material(color, MaterialType::Label, 1.0)
            .clone()
    }

    /// Material for a waypoint marker by waypoint type
    pub fn assign_material_to_waypoint(
        &mut self,
        waypoint_type: &str,
        special_visual: bool,
    ) -> Material {
        if !special_visual {
            return self.named_or_default("waypoint_general");
        }
        match waypoint_type {
            "wizard" => self.named_or_default("waypoint_wizard"),
            "druid" => self.named_or_default("waypoint_druid"),
            _ => self.named_or_default("waypoint_general"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_key_resolves_to_layer_material() {
        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        assert_eq!(
            assigner.assign_material_by_semantic_layer("wall").name,
            "layer_wall"
        );
    }

    #[test]
    fn label_layers_resolve_to_label_materials() {
        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        assert_eq!(
            assigner.assign_material_by_semantic_layer("labels_npc").name,
            "label_npc"
        );
        assert_eq!(
            assigner
                .assign_material_by_semantic_layer("labels_general")
                .name,
            "label_standard"
        );
    }

    #[test]
    fn synonyms_and_unknowns_never_fail() {
        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        assert_eq!(
            assigner.assign_material_by_semantic_layer("waypoints").name,
            "waypoint_general"
        );
        assert_eq!(
            assigner.assign_material_by_semantic_layer("water").name,
            "layer_water"
        );
        // Completely unknown keys fall back to the default line material
        assert_eq!(
            assigner
                .assign_material_by_semantic_layer("no_such_layer")
                .name,
            "line_default"
        );
    }

    #[test]
    fn water_lines_split_on_intensity() {
        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        assert_eq!(
            assigner
                .assign_material_to_line(Rgb(200, 200, 200), "water", None)
                .name,
            "water_shallow"
        );
        assert_eq!(
            assigner
                .assign_material_to_line(Rgb(10, 30, 80), "water", None)
                .name,
            "water_deep"
        );
    }

    #[test]
    fn default_lines_get_color_materials() {
        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        let material = assigner.assign_material_to_line(Rgb(12, 34, 56), "default", None);
        assert_eq!(material.name, "line_12_34_56_100");
        // And the library now owns it
        assert!(library.get_material("line_12_34_56_100").is_some());
    }

    #[test]
    fn big_labels_are_important() {
        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        assert_eq!(
            assigner.assign_material_to_label(Rgb(1, 2, 3), 16).name,
            "label_important"
        );
        assert_eq!(
            assigner.assign_material_to_label(Rgb(1, 2, 3), 10).name,
            "label_1_2_3_100"
        );
    }

    #[test]
    fn waypoint_types_map_to_class_materials() {
        let mut library = MaterialLibrary::new();
        let mut assigner = MaterialAssigner::new(&mut library);
        assert_eq!(
            assigner.assign_material_to_waypoint("wizard", true).name,
            "waypoint_wizard"
        );
        assert_eq!(
            assigner.assign_material_to_waypoint("druid", true).name,
            "waypoint_druid"
        );
        assert_eq!(
            assigner.assign_material_to_waypoint("wizard", false).name,
            "waypoint_general"
        );
    }
}
