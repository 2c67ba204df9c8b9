// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PBR material definitions and the per-run material catalogue

use brewall_core::{Rgb, LINE_LAYER_COLORS};
use rustc_hash::FxHashMap;

/// What kind of map element a material is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Line,
    Label,
    Waypoint,
    Water,
    Air,
    Terrain,
    Ui,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Line => "line",
            MaterialType::Label => "label",
            MaterialType::Waypoint => "waypoint",
            MaterialType::Water => "water",
            MaterialType::Air => "air",
            MaterialType::Terrain => "terrain",
            MaterialType::Ui => "ui",
        }
    }
}

/// glTF alpha rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

/// PBR material definition, following glTF's `pbrMetallicRoughness`
/// appearance model
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Unique key within a [`MaterialLibrary`]
    pub name: String,
    pub material_type: MaterialType,
    /// RGBA base color factor
    pub base_color: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    pub emissive_factor: [f32; 3],
}

impl Material {
    pub fn new(name: impl Into<String>, material_type: MaterialType, base_color: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            material_type,
            base_color,
            metallic_factor: 0.0,
            roughness_factor: 0.8,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: true,
            emissive_factor: [0.0; 3],
        }
    }

    pub fn roughness(mut self, roughness_factor: f32) -> Self {
        self.roughness_factor = roughness_factor;
        self
    }

    pub fn emissive(mut self, emissive_factor: [f32; 3]) -> Self {
        self.emissive_factor = emissive_factor;
        self
    }

    pub fn alpha(mut self, alpha_mode: AlphaMode) -> Self {
        self.alpha_mode = alpha_mode;
        self
    }
}

/// The default material for unclassified line geometry
pub(crate) fn default_line_material() -> Material {
    Material::new("line_default", MaterialType::Line, [0.8, 0.8, 0.8, 1.0])
}

/// Catalogue of materials for one conversion run.
///
/// Owns every material it hands out, including the lazily synthesized color
/// materials from [`create_color_material`](MaterialLibrary::create_color_material).
/// Not a singleton: each run constructs its own library, so concurrent runs
/// never share mutable state.
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    materials: FxHashMap<String, Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        let mut library = Self {
            materials: FxHashMap::default(),
        };
        library.insert_default_materials();
        library.insert_layer_materials();
        library
    }

    fn insert(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    fn insert_default_materials(&mut self) {
        use MaterialType::*;

        self.insert(default_line_material());

        self.insert(
            Material::new("label_standard", Label, [1.0, 1.0, 1.0, 1.0])
                .roughness(0.5)
                .emissive([0.1, 0.1, 0.1]),
        );
        self.insert(
            Material::new("label_important", Label, [1.0, 1.0, 0.0, 1.0])
                .roughness(0.3)
                .emissive([0.2, 0.2, 0.0]),
        );
        self.insert(
            Material::new("label_waypoint", Label, [1.0, 0.0, 0.0, 1.0])
                .roughness(0.2)
                .emissive([0.3, 0.0, 0.0]),
        );
        self.insert(
            Material::new("label_zone", Label, [0.0, 0.5, 1.0, 1.0])
                .roughness(0.3)
                .emissive([0.0, 0.1, 0.2]),
        );
        self.insert(
            Material::new("label_npc", Label, [0.0, 1.0, 0.0, 1.0])
                .roughness(0.4)
                .emissive([0.0, 0.2, 0.0]),
        );
        self.insert(
            Material::new("label_item", Label, [1.0, 1.0, 0.0, 1.0])
                .roughness(0.5)
                .emissive([0.2, 0.2, 0.0]),
        );

        self.insert(
            Material::new("waypoint_general", Waypoint, [1.0, 0.0, 0.0, 1.0])
                .roughness(0.2)
                .emissive([0.3, 0.0, 0.0]),
        );
        self.insert(
            Material::new("waypoint_wizard", Waypoint, [0.5, 0.0, 1.0, 1.0])
                .roughness(0.2)
                .emissive([0.2, 0.0, 0.3]),
        );
        self.insert(
            Material::new("waypoint_druid", Waypoint, [0.0, 0.8, 0.0, 1.0])
                .roughness(0.2)
                .emissive([0.0, 0.2, 0.0]),
        );

        self.insert(
            Material::new("water_shallow", Water, [0.4, 0.6, 1.0, 0.7])
                .roughness(0.1)
                .alpha(AlphaMode::Blend),
        );
        self.insert(
            Material::new("water_deep", Water, [0.1, 0.3, 0.8, 0.9])
                .roughness(0.05)
                .alpha(AlphaMode::Blend),
        );

        self.insert(
            Material::new("air", Air, [0.8, 0.9, 1.0, 0.3])
                .roughness(0.9)
                .alpha(AlphaMode::Blend),
        );

        self.insert(Material::new("terrain_ground", Terrain, [0.6, 0.4, 0.2, 1.0]).roughness(0.9));
        self.insert(Material::new("terrain_rock", Terrain, [0.5, 0.5, 0.5, 1.0]).roughness(0.8));

        self.insert(
            Material::new("ui_compass", Ui, [1.0, 1.0, 1.0, 0.8])
                .roughness(0.5)
                .alpha(AlphaMode::Blend),
        );
    }

    /// One line material per Brewall semantic layer, named `layer_<key>`
    fn insert_layer_materials(&mut self) {
        for (rgb, layer) in LINE_LAYER_COLORS {
            let [r, g, b] = rgb.normalized();
            self.insert(Material::new(
                format!("layer_{}", layer.as_str()),
                MaterialType::Line,
                [r, g, b, 1.0],
            ));
        }
    }

    pub fn get_material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Material for a Brewall semantic layer key
    pub fn get_material_by_layer(&self, layer: &str) -> Option<&Material> {
        self.materials.get(&format!("layer_{layer}"))
    }

    pub fn get_materials_by_type(&self, material_type: MaterialType) -> Vec<&Material> {
        self.materials
            .values()
            .filter(|m| m.material_type == material_type)
            .collect()
    }

    pub fn all_materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Synthesize (or fetch the cached) material for a raw RGB color.
    ///
    /// The generated name encodes color, type and alpha, so repeat requests
    /// with identical inputs resolve to the same stored entry.
    pub fn create_color_material(
        &mut self,
        color: Rgb,
        material_type: MaterialType,
        alpha: f32,
    ) -> &Material {
        let Rgb(r, g, b) = color;
        let name = format!(
            "{}_{}_{}_{}_{}",
            material_type.as_str(),
            r,
            g,
            b,
            (alpha * 100.0) as i32
        );
        self.materials.entry(name.clone()).or_insert_with(|| {
            let [rf, gf, bf] = color.normalized();
            Material::new(name, material_type, [rf, gf, bf, alpha])
        })
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_has_defaults_and_one_material_per_layer() {
        let library = MaterialLibrary::new();
        assert!(library.len() >= 16 + LINE_LAYER_COLORS.len());
        assert!(library.get_material("line_default").is_some());
        assert!(library.get_material("waypoint_wizard").is_some());
        assert!(library.get_material_by_layer("wall").is_some());
        assert!(library.get_material_by_layer("deep_water").is_some());
        assert!(library.get_material_by_layer("nonsense").is_none());
    }

    #[test]
    fn layer_material_color_matches_the_table() {
        let library = MaterialLibrary::new();
        let wall = library.get_material_by_layer("wall").unwrap();
        assert_eq!(wall.base_color[0], 1.0);
        assert_eq!(wall.base_color[1], 0.0);
        assert_eq!(wall.material_type, MaterialType::Line);
    }

    #[test]
    fn color_materials_are_cached_by_generated_name() {
        let mut library = MaterialLibrary::new();
        let before = library.len();

        let name = library
            .create_color_material(Rgb(10, 20, 30), MaterialType::Line, 1.0)
            .name
            .clone();
        assert_eq!(name, "line_10_20_30_100");
        assert_eq!(library.len(), before + 1);

        // Identical request resolves to the same entry
        let again = library
            .create_color_material(Rgb(10, 20, 30), MaterialType::Line, 1.0)
            .name
            .clone();
        assert_eq!(name, again);
        assert_eq!(library.len(), before + 1);

        // Different alpha is a different material
        library.create_color_material(Rgb(10, 20, 30), MaterialType::Line, 0.5);
        assert_eq!(library.len(), before + 2);
    }

    #[test]
    fn materials_by_type_filters() {
        let library = MaterialLibrary::new();
        let water = library.get_materials_by_type(MaterialType::Water);
        assert_eq!(water.len(), 2);
        assert!(water.iter().all(|m| m.material_type == MaterialType::Water));
    }
}
