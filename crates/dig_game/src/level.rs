//! Level content and the world that owns it for a play session.
//!
//! A level file describes the collision layer, the hero's spawn point and
//! size, and optional physics tuning. [`World`] owns the resulting grid and
//! hero outright and is handed to the frame driver; there is no global entity
//! registry.

use glam::Vec2;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use dig_core::input::InputState;

use crate::body::{FrameReport, KinematicBody, PhysicsConfig};
use crate::intent::{map_intents, Intents};
use crate::tiles::{TileCell, TileGrid};

/// Hero sprite is 66x92 px; at 16 px per tile and half scale that is this many tiles.
const DEFAULT_HERO_WIDTH: f32 = 66.0 / 16.0 / 2.0;
const DEFAULT_HERO_HEIGHT: f32 = 92.0 / 16.0 / 2.0;

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    pub width: i32,
    pub height: i32,
    pub solids: Vec<TileCell>,
    #[serde(default)]
    pub spawn: SpawnPoint,
    #[serde(default)]
    pub hero: HeroSize,
    #[serde(default)]
    pub physics: PhysicsConfig,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self { x: 20.0, y: 20.0 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct HeroSize {
    pub width: f32,
    pub height: f32,
}

impl Default for HeroSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_HERO_WIDTH,
            height: DEFAULT_HERO_HEIGHT,
        }
    }
}

pub struct World {
    pub level_id: String,
    pub grid: TileGrid,
    pub hero: KinematicBody,
    pub physics: PhysicsConfig,
}

impl World {
    pub fn from_file(file: LevelFile) -> Self {
        let grid = TileGrid::with_solids(file.width, file.height, file.solids);
        let hero = KinematicBody::new(
            Vec2::new(file.spawn.x, file.spawn.y),
            file.hero.width,
            file.hero.height,
        );
        Self {
            level_id: file.level_id,
            grid,
            hero,
            physics: file.physics,
        }
    }

    /// One frame from a live input snapshot.
    pub fn step(&mut self, input: &InputState, dt: f32) -> FrameReport {
        let intents = map_intents(input, self.hero.grounded);
        self.step_intents(intents, dt)
    }

    /// One frame from already-mapped intents (replays). Jump is still gated on
    /// the hero being grounded.
    pub fn step_intents(&mut self, intents: Intents, dt: f32) -> FrameReport {
        let report = self
            .hero
            .update(intents, dt, &mut self.grid, &self.physics);
        if report.jumped {
            log::debug!(
                "Jump from ({:.2}, {:.2})",
                self.hero.position.x,
                self.hero.position.y
            );
        }
        if let Some(tile) = report.resolution.landed_on {
            log::trace!("Resting on tile ({}, {})", tile.x, tile.y);
        }
        report
    }
}

pub fn load_level_from_path(path: &Path) -> Result<World, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let file: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    validate_level_file(&file)?;
    log::info!(
        "Loaded level '{}' ({}x{}, {} solid tiles) from {}",
        file.level_id,
        file.width,
        file.height,
        file.solids.len(),
        path.display()
    );
    Ok(World::from_file(file))
}

fn validate_level_file(file: &LevelFile) -> Result<(), String> {
    if file.version != "0.1" {
        return Err(format!(
            "Level validation failed: unsupported version '{}'",
            file.version
        ));
    }
    if file.width <= 0 || file.height <= 0 {
        return Err("Level validation failed: width and height must be > 0".to_string());
    }
    if !(file.hero.width > 0.0 && file.hero.height > 0.0) {
        return Err("Level validation failed: hero width and height must be > 0".to_string());
    }
    if !(file.spawn.x.is_finite() && file.spawn.y.is_finite()) {
        return Err("Level validation failed: spawn must be finite".to_string());
    }
    file.physics.validate()?;

    let mut seen = HashSet::new();
    for cell in &file.solids {
        if cell.x < 0 || cell.x >= file.width || cell.y < 0 || cell.y >= file.height {
            return Err(format!(
                "Level validation failed: solid cell out of bounds ({}, {})",
                cell.x, cell.y
            ));
        }
        if !seen.insert(*cell) {
            return Err(format!(
                "Level validation failed: duplicate solid cell ({}, {})",
                cell.x, cell.y
            ));
        }
    }
    Ok(())
}
