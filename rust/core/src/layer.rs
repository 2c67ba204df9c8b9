// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brewall semantic layers
//!
//! The Brewall mapping standards assign meaning to line colors: magenta is a
//! wall, yellow a door, blue water, and so on. Classification is an exact
//! RGB lookup; near-miss colors (e.g. from tooling artifacts) stay
//! unclassified, there is no tolerance matching.

use crate::types::Rgb;

/// Semantic classification tag for generated meshes.
///
/// Covers the Brewall line layers plus the layers synthesized by geometry
/// generation for labels and waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticLayer {
    Wall,
    Door,
    Water,
    Lava,
    ZoneLine,
    SafePoint,
    Lift,
    Bridge,
    Platform,
    Ladder,
    Invisible,
    Ground,
    Void,
    Ramp,
    Stairs,
    Portal,
    Elevator,
    Teleport,
    Light,
    Path,
    Fire,
    Forest,
    Magic,
    Trap,
    Grass,
    Swamp,
    Danger,
    Cave,
    Ruins,
    DeepWater,
    Special,
    // Layers assigned by geometry generation, not by line color
    LabelsWaypoint,
    LabelsZone,
    LabelsNpc,
    LabelsItem,
    LabelsGeneral,
    Waypoints,
}

/// Brewall mapping standards: line RGB color to semantic layer
pub const LINE_LAYER_COLORS: &[(Rgb, SemanticLayer)] = &[
    (Rgb(255, 0, 200), SemanticLayer::Wall),      // Magenta
    (Rgb(255, 255, 0), SemanticLayer::Door),      // Yellow
    (Rgb(0, 0, 255), SemanticLayer::Water),       // Blue
    (Rgb(255, 0, 0), SemanticLayer::Lava),        // Red
    (Rgb(0, 255, 0), SemanticLayer::ZoneLine),    // Green
    (Rgb(0, 255, 255), SemanticLayer::SafePoint), // Cyan
    (Rgb(255, 128, 0), SemanticLayer::Lift),      // Orange
    (Rgb(128, 64, 0), SemanticLayer::Bridge),     // Brown
    (Rgb(255, 128, 255), SemanticLayer::Platform), // Pink
    (Rgb(128, 255, 255), SemanticLayer::Ladder),  // Light Cyan
    (Rgb(255, 255, 255), SemanticLayer::Invisible), // White
    (Rgb(128, 128, 128), SemanticLayer::Ground),  // Gray
    (Rgb(0, 0, 0), SemanticLayer::Void),          // Black
    (Rgb(255, 128, 128), SemanticLayer::Ramp),    // Light Red
    (Rgb(128, 255, 128), SemanticLayer::Stairs),  // Light Green
    (Rgb(128, 128, 255), SemanticLayer::Portal),  // Light Blue
    (Rgb(255, 128, 64), SemanticLayer::Elevator), // Orange-Brown
    (Rgb(255, 64, 255), SemanticLayer::Teleport), // Purple-Pink
    (Rgb(255, 255, 128), SemanticLayer::Light),   // Light Yellow
    (Rgb(0, 128, 255), SemanticLayer::Path),      // Sky Blue
    (Rgb(255, 64, 0), SemanticLayer::Fire),       // Orange-Red
    (Rgb(0, 128, 0), SemanticLayer::Forest),      // Dark Green
    (Rgb(128, 0, 255), SemanticLayer::Magic),     // Violet
    (Rgb(255, 0, 128), SemanticLayer::Trap),      // Pink-Red
    (Rgb(128, 255, 0), SemanticLayer::Grass),     // Light Green-Yellow
    (Rgb(0, 255, 128), SemanticLayer::Swamp),     // Green-Cyan
    (Rgb(128, 0, 0), SemanticLayer::Danger),      // Dark Red
    (Rgb(0, 128, 128), SemanticLayer::Cave),      // Teal
    (Rgb(128, 128, 0), SemanticLayer::Ruins),     // Olive
    (Rgb(0, 0, 128), SemanticLayer::DeepWater),   // Navy
    (Rgb(128, 0, 128), SemanticLayer::Special),   // Purple
];

impl SemanticLayer {
    /// Exact color lookup against the Brewall standards table
    pub fn from_color(color: Rgb) -> Option<SemanticLayer> {
        LINE_LAYER_COLORS
            .iter()
            .find(|(rgb, _)| *rgb == color)
            .map(|(_, layer)| *layer)
    }

    /// The snake_case layer key used for material names and viewer layer
    /// toggles
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticLayer::Wall => "wall",
            SemanticLayer::Door => "door",
            SemanticLayer::Water => "water",
            SemanticLayer::Lava => "lava",
            SemanticLayer::ZoneLine => "zone_line",
            SemanticLayer::SafePoint => "safe_point",
            SemanticLayer::Lift => "lift",
            SemanticLayer::Bridge => "bridge",
            SemanticLayer::Platform => "platform",
            SemanticLayer::Ladder => "ladder",
            SemanticLayer::Invisible => "invisible",
            SemanticLayer::Ground => "ground",
            SemanticLayer::Void => "void",
            SemanticLayer::Ramp => "ramp",
            SemanticLayer::Stairs => "stairs",
            SemanticLayer::Portal => "portal",
            SemanticLayer::Elevator => "elevator",
            SemanticLayer::Teleport => "teleport",
            SemanticLayer::Light => "light",
            SemanticLayer::Path => "path",
            SemanticLayer::Fire => "fire",
            SemanticLayer::Forest => "forest",
            SemanticLayer::Magic => "magic",
            SemanticLayer::Trap => "trap",
            SemanticLayer::Grass => "grass",
            SemanticLayer::Swamp => "swamp",
            SemanticLayer::Danger => "danger",
            SemanticLayer::Cave => "cave",
            SemanticLayer::Ruins => "ruins",
            SemanticLayer::DeepWater => "deep_water",
            SemanticLayer::Special => "special",
            SemanticLayer::LabelsWaypoint => "labels_waypoint",
            SemanticLayer::LabelsZone => "labels_zone",
            SemanticLayer::LabelsNpc => "labels_npc",
            SemanticLayer::LabelsItem => "labels_item",
            SemanticLayer::LabelsGeneral => "labels_general",
            SemanticLayer::Waypoints => "waypoints",
        }
    }

    /// Human-friendly name for viewer legends
    pub fn display_name(&self) -> &'static str {
        match self {
            SemanticLayer::Wall => "Wall",
            SemanticLayer::Door => "Door",
            SemanticLayer::Water => "Water",
            SemanticLayer::Lava => "Lava",
            SemanticLayer::ZoneLine => "Zone Line",
            SemanticLayer::SafePoint => "Safe Point",
            SemanticLayer::Lift => "Lift/Elevator",
            SemanticLayer::Bridge => "Bridge",
            SemanticLayer::Platform => "Platform",
            SemanticLayer::Ladder => "Ladder",
            SemanticLayer::Invisible => "Invisible Wall",
            SemanticLayer::Ground => "Ground",
            SemanticLayer::Void => "Void",
            SemanticLayer::Ramp => "Ramp",
            SemanticLayer::Stairs => "Stairs",
            SemanticLayer::Portal => "Portal",
            SemanticLayer::Elevator => "Elevator",
            SemanticLayer::Teleport => "Teleport",
            SemanticLayer::Light => "Light Source",
            SemanticLayer::Path => "Path",
            SemanticLayer::Fire => "Fire",
            SemanticLayer::Forest => "Forest",
            SemanticLayer::Magic => "Magic",
            SemanticLayer::Trap => "Trap",
            SemanticLayer::Grass => "Grass",
            SemanticLayer::Swamp => "Swamp",
            SemanticLayer::Danger => "Danger",
            SemanticLayer::Cave => "Cave",
            SemanticLayer::Ruins => "Ruins",
            SemanticLayer::DeepWater => "Deep Water",
            SemanticLayer::Special => "Special",
            SemanticLayer::LabelsWaypoint => "Waypoint Labels",
            SemanticLayer::LabelsZone => "Zone Labels",
            SemanticLayer::LabelsNpc => "NPC Labels",
            SemanticLayer::LabelsItem => "Item Labels",
            SemanticLayer::LabelsGeneral => "Labels",
            SemanticLayer::Waypoints => "Waypoints",
        }
    }
}

impl std::fmt::Display for SemanticLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
