//! The world map shown between the menu and the opening cutscene.
//!
//! Coordinates are in the 1280×720 layout space of the window. Locations
//! unlock in order: reading one codex unlocks the next location, and once
//! every codex has been read the begin-journey button becomes clickable.

use glam::Vec2;

use crate::geometry::Rect;
use crate::level::LevelId;
use crate::palette::{self, Color};

pub const LOCATION_RADIUS: f32 = 44.0;
pub const BEGIN_BUTTON: Rect = Rect { x: 390.0, y: 570.0, w: 500.0, h: 60.0 };
pub const CODEX_PANEL: Rect = Rect { x: 190.0, y: 35.0, w: 900.0, h: 650.0 };
pub const CODEX_CLOSE_BUTTON: Rect = Rect { x: 520.0, y: 595.0, w: 240.0, h: 50.0 };

/// Lore shown in a location's codex panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codex {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

const FOREST_CODEX: Codex = Codex {
    title: "Spirit Forest: Guarding the Power Within",
    lines: &[
        "Since ancient times the Lightkeepers have kept the light inside themselves.",
        "Not everyone may reach that power.",
        "Only a proper ritual can open it.",
        "",
        "In this forest ELION learns to keep what matters safe,",
        "and to let the world touch it only through trusted paths.",
    ],
};

const MOUNTAIN_CODEX: Codex = Codex {
    title: "Crimson Mountain: A Legacy of Strength",
    lines: &[
        "The shadow creatures spring from a single source,",
        "yet each has grown into its own shape.",
        "",
        "On the burning mountain ELION meets them:",
        "wolves that dash, and a guardian that casts from afar.",
        "Each carries the same nature and acts in its own way.",
    ],
};

const CASTLE_CODEX: Codex = Codex {
    title: "Lightkeeper Castle: One Call, Many Forms",
    lines: &[
        "One command can bring different deeds",
        "depending on who receives it.",
        "",
        "In the final castle ELION sets three Spirit Gems on the altar",
        "and wakes the spirit tree that holds the last light.",
    ],
};

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub pos: Vec2,
    pub color: Color,
    pub level: LevelId,
    pub codex: Codex,
    unlocked: bool,
    codex_read: bool,
    hovered: bool,
}

impl Location {
    fn new(name: &'static str, pos: Vec2, color: Color, level: LevelId, codex: Codex) -> Self {
        Self { name, pos, color, level, codex, unlocked: false, codex_read: false, hovered: false }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= LOCATION_RADIUS
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_read(&self) -> bool {
        self.codex_read
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

/// Result of a click on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapClick {
    Nothing,
    /// A codex panel opened for the location at this index.
    OpenCodex(usize),
    BeginJourney,
}

#[derive(Debug, Clone)]
pub struct WorldMap {
    locations: Vec<Location>,
    open: Option<usize>,
    pulse: f32,
}

impl WorldMap {
    pub fn new() -> Self {
        let mut locations = vec![
            Location::new("Spirit Forest", Vec2::new(200.0, 300.0), palette::SPIRIT_FOREST, LevelId::Forest, FOREST_CODEX),
            Location::new("Crimson Mountain", Vec2::new(600.0, 300.0), palette::CRIMSON_MOUNTAIN, LevelId::Mountain, MOUNTAIN_CODEX),
            Location::new("Lightkeeper Castle", Vec2::new(1000.0, 300.0), palette::LIGHTKEEPER_CASTLE, LevelId::Castle, CASTLE_CODEX),
        ];
        locations[0].unlocked = true;
        Self { locations, open: None, pulse: 0.0 }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn update(&mut self, dt: f32) {
        self.pulse += dt;
    }

    /// Radius scale for the breathing location markers.
    pub fn pulse(&self) -> f32 {
        ((self.pulse * 2.0).sin() + 1.0) * 0.1 + 0.9
    }

    /// Refresh hover state from the pointer position.
    pub fn hover(&mut self, point: Vec2) {
        for loc in &mut self.locations {
            loc.hovered = loc.contains(point);
        }
    }

    pub fn click(&mut self, point: Vec2) -> MapClick {
        if let Some(index) = self.locations.iter().position(|l| l.unlocked && l.contains(point)) {
            self.open = Some(index);
            return MapClick::OpenCodex(index);
        }
        if self.all_read() && BEGIN_BUTTON.contains(point) {
            return MapClick::BeginJourney;
        }
        MapClick::Nothing
    }

    pub fn open_codex(&self) -> Option<&Location> {
        self.open.map(|i| &self.locations[i])
    }

    /// Close the open codex, mark it read and unlock the next location.
    /// Returns `false` if no codex was open.
    pub fn close_codex(&mut self) -> bool {
        let Some(index) = self.open.take() else { return false };
        self.locations[index].codex_read = true;
        if let Some(next) = self.locations.get_mut(index + 1) {
            next.unlocked = true;
        }
        true
    }

    pub fn all_read(&self) -> bool {
        self.locations.iter().all(|l| l.codex_read)
    }
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new()
    }
}
