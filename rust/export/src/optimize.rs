// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material deduplication
//!
//! Two passes with different granularity: [`optimize_materials`]
//! (MaterialOptimizer::optimize_materials) collapses materials whose
//! rendering properties round to the same values, while
//! [`merge_similar_colors`](MaterialOptimizer::merge_similar_colors)
//! clusters by a color tolerance. The tolerance merge is first-match-wins
//! against earlier group representatives and therefore order-dependent:
//! reordering the input changes which representative survives.

use rustc_hash::FxHashMap;

use crate::material::{Material, MaterialType};

/// Dedups material lists before export
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialOptimizer;

/// Grouping key for property-level deduplication
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PropertyKey {
    material_type: MaterialType,
    // RGBA rounded to 2 decimals
    color: [i32; 4],
    roughness_bits: u32,
    alpha_mode: crate::material::AlphaMode,
}

impl PropertyKey {
    fn for_material(material: &Material) -> Self {
        Self {
            material_type: material.material_type,
            color: [
                (material.base_color[0] * 100.0).round() as i32,
                (material.base_color[1] * 100.0).round() as i32,
                (material.base_color[2] * 100.0).round() as i32,
                (material.base_color[3] * 100.0).round() as i32,
            ],
            roughness_bits: material.roughness_factor.to_bits(),
            alpha_mode: material.alpha_mode,
        }
    }
}

impl MaterialOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Collapse materials that share type, rounded RGBA, roughness, and
    /// alpha mode, keeping the first of each group as representative.
    pub fn optimize_materials(&self, materials: &[Material]) -> Vec<Material> {
        if materials.is_empty() {
            return Vec::new();
        }

        let mut order: Vec<PropertyKey> = Vec::new();
        let mut groups: FxHashMap<PropertyKey, Vec<&Material>> = FxHashMap::default();
        for material in materials {
            let key = PropertyKey::for_material(material);
            groups
                .entry(key.clone())
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(material);
        }

        order
            .into_iter()
            .filter_map(|key| groups.remove(&key))
            .map(|group| {
                let mut representative = group[0].clone();
                if group.len() > 1 {
                    representative.name = format!(
                        "combined_{}_{}",
                        representative.material_type.as_str(),
                        group.len()
                    );
                }
                representative
            })
            .collect()
    }

    /// Merge materials whose RGB channels all sit within `tolerance` of an
    /// earlier group representative (alpha is ignored). First match wins.
    pub fn merge_similar_colors(&self, materials: &[Material], tolerance: f32) -> Vec<Material> {
        if materials.is_empty() {
            return Vec::new();
        }

        // Partition by type first, preserving first-appearance order
        let mut type_order: Vec<MaterialType> = Vec::new();
        let mut by_type: FxHashMap<MaterialType, Vec<&Material>> = FxHashMap::default();
        for material in materials {
            by_type
                .entry(material.material_type)
                .or_insert_with(|| {
                    type_order.push(material.material_type);
                    Vec::new()
                })
                .push(material);
        }

        let mut merged = Vec::new();
        for material_type in type_order {
            let Some(group) = by_type.remove(&material_type) else {
                continue;
            };

            let mut representatives: Vec<Material> = Vec::new();
            let mut counts: Vec<usize> = Vec::new();
            for material in group {
                match representatives
                    .iter()
                    .position(|rep| colors_are_similar(&rep.base_color, &material.base_color, tolerance))
                {
                    Some(index) => counts[index] += 1,
                    None => {
                        representatives.push(material.clone());
                        counts.push(1);
                    }
                }
            }

            for (mut representative, count) in representatives.into_iter().zip(counts) {
                if count > 1 {
                    representative.name =
                        format!("merged_{}_{}", material_type.as_str(), count);
                }
                merged.push(representative);
            }
        }
        merged
    }
}

/// Per-channel RGB comparison; alpha never participates
fn colors_are_similar(a: &[f32; 4], b: &[f32; 4], tolerance: f32) -> bool {
    (0..3).all(|i| (a[i] - b[i]).abs() <= tolerance)
}
