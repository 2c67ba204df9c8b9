// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label text classification
//!
//! Brewall label files carry no type information, so the visual treatment
//! (color, size) is derived from keyword and format heuristics over the
//! label text.

use brewall_core::{Rgb, SemanticLayer};

const WAYPOINT_KEYWORDS: &[&str] = &["waypoint", "bind", "safe spot"];
const ZONE_KEYWORDS: &[&str] = &["zone", "plane", "temple", "tower", "keep", "fortress"];
const NPC_KEYWORDS: &[&str] = &["lord", "king", "queen", "guard", "merchant", "trainer", "npc"];

/// Visual category of a map label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Waypoint,
    Zone,
    Npc,
    Item,
    General,
}

impl LabelKind {
    /// Classify label text. Checks run in priority order: waypoint
    /// indicators, zone-name patterns (all-caps or landmark keywords), NPC
    /// titles, quoted item names, then general.
    pub fn classify(text: &str) -> LabelKind {
        let lower = text.trim().to_lowercase();

        if WAYPOINT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return LabelKind::Waypoint;
        }

        let is_all_caps = text.chars().any(|c| c.is_uppercase())
            && !text.chars().any(|c| c.is_lowercase());
        if is_all_caps || ZONE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return LabelKind::Zone;
        }

        if NPC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return LabelKind::Npc;
        }

        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            return LabelKind::Item;
        }

        LabelKind::General
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKind::Waypoint => "waypoint",
            LabelKind::Zone => "zone",
            LabelKind::Npc => "npc",
            LabelKind::Item => "item",
            LabelKind::General => "general",
        }
    }

    pub fn semantic_layer(&self) -> SemanticLayer {
        match self {
            LabelKind::Waypoint => SemanticLayer::LabelsWaypoint,
            LabelKind::Zone => SemanticLayer::LabelsZone,
            LabelKind::Npc => SemanticLayer::LabelsNpc,
            LabelKind::Item => SemanticLayer::LabelsItem,
            LabelKind::General => SemanticLayer::LabelsGeneral,
        }
    }

    /// Size multiplier for the billboard quad. Waypoints and zone names are
    /// oversized so they read at map scale; the raw Brewall
    /// size nudges the result at its extremes.
    pub fn size_multiplier(&self, raw_size: i32) -> f64 {
        let base = match self {
            LabelKind::Waypoint => 15.0,
            LabelKind::Zone => 12.0,
            LabelKind::Npc => 8.0,
            LabelKind::Item => 6.0,
            LabelKind::General => 10.0,
        };
        if raw_size <= 5 {
            base * 0.8
        } else if raw_size >= 15 {
            base * 1.2
        } else {
            base
        }
    }

    /// Display color for the billboard. General labels keep the color
    /// stored in the map file; every other kind gets a fixed color.
    pub fn display_color(&self, stored: Rgb) -> [f32; 3] {
        match self {
            LabelKind::Waypoint => [1.0, 0.0, 0.0],
            LabelKind::Zone => [0.0, 0.5, 1.0],
            LabelKind::Npc => [0.0, 1.0, 0.0],
            LabelKind::Item => [1.0, 1.0, 0.0],
            LabelKind::General => stored.normalized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoint_keywords_win_over_everything() {
        assert_eq!(LabelKind::classify("Bind Point"), LabelKind::Waypoint);
        assert_eq!(LabelKind::classify("WAYPOINT"), LabelKind::Waypoint);
        assert_eq!(LabelKind::classify("safe spot here"), LabelKind::Waypoint);
    }

    #[test]
    fn all_caps_or_landmark_keywords_are_zones() {
        assert_eq!(LabelKind::classify("NORTH QEYNOS"), LabelKind::Zone);
        assert_eq!(LabelKind::classify("Plane of Knowledge"), LabelKind::Zone);
        assert_eq!(LabelKind::classify("Temple of Life"), LabelKind::Zone);
    }

    #[test]
    fn npc_titles_classify_as_npc() {
        assert_eq!(LabelKind::classify("Lord Nagafen"), LabelKind::Npc);
        assert_eq!(LabelKind::classify("spell merchant"), LabelKind::Npc);
    }

    #[test]
    fn quoted_text_is_an_item() {
        assert_eq!(LabelKind::classify("\"Rusty Sword\""), LabelKind::Item);
    }

    #[test]
    fn everything_else_is_general() {
        assert_eq!(LabelKind::classify("to the docks"), LabelKind::General);
        assert_eq!(LabelKind::classify(""), LabelKind::General);
    }

    #[test]
    fn size_multiplier_adjusts_at_extremes() {
        assert_eq!(LabelKind::General.size_multiplier(10), 10.0);
        assert_eq!(LabelKind::General.size_multiplier(5), 8.0);
        assert_eq!(LabelKind::General.size_multiplier(15), 12.0);
        assert_eq!(LabelKind::Waypoint.size_multiplier(10), 15.0);
    }

    #[test]
    fn general_labels_keep_stored_color() {
        assert_eq!(
            LabelKind::General.display_color(Rgb(255, 0, 0)),
            [1.0, 0.0, 0.0]
        );
        assert_eq!(
            LabelKind::Zone.display_color(Rgb(255, 0, 0)),
            [0.0, 0.5, 1.0]
        );
    }
}
