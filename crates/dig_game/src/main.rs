//! Dig -- headless frame driver for the hero physics core.
//!
//! Per frame the driver asks its clock for Δt and steps the [`World`]:
//!
//!   1. input snapshot (or recorded intents) -> intents, jump gated on ground
//!   2. kinematic update: impulses, acceleration, gravity, clamp
//!   3. axis-separated tile collision, breaking tiles hit from below
//!   4. ground probe and motion state settle
//!
//! Rendering is out of scope; the driver logs what a renderer would sample.
//!
//! Usage: `dig_game [level.json] [replay.json]`. With a replay the recorded
//! intents run at the replay's fixed Δt. Without one the hero idles for a
//! couple of seconds of wall-clock frames.

mod animation;
mod body;
mod intent;
mod level;
mod motion;
mod replay;
mod resolver;
mod tiles;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use dig_core::input::InputState;
use dig_core::time::{Clock, FixedClock, FrameClock};

use animation::MotionAnimations;
use level::{load_level_from_path, World};
use replay::{load_replay_from_path, ReplaySequence};

const DEFAULT_LEVEL_PATH: &str = "assets/levels/level1.json";
const ANIMATION_PATH: &str = "assets/animations/hero.json";
const IDLE_RUN_SECS: f32 = 2.0;
const IDLE_FRAME_SLEEP: Duration = Duration::from_millis(16);

struct RunStats {
    frames: u64,
    skipped: u64,
    jumps: u64,
    wall_hits: u64,
    tiles_destroyed: u64,
}

impl RunStats {
    fn new() -> Self {
        Self {
            frames: 0,
            skipped: 0,
            jumps: 0,
            wall_hits: 0,
            tiles_destroyed: 0,
        }
    }

    fn record(&mut self, report: &body::FrameReport) {
        self.frames += 1;
        if report.skipped {
            self.skipped += 1;
        }
        if report.jumped {
            self.jumps += 1;
        }
        if report.resolution.blocked_x {
            self.wall_hits += 1;
        }
        if let Some(tile) = report.resolution.destroyed {
            self.tiles_destroyed += 1;
            log::info!("Broke tile ({}, {})", tile.x, tile.y);
        }
    }
}

fn run_replay(world: &mut World, replay: &ReplaySequence) -> RunStats {
    let mut clock = FixedClock::new(replay.fixed_dt);
    let mut stats = RunStats::new();
    for intents in replay.expanded_intents() {
        let report = world.step_intents(intents, clock.delta());
        stats.record(&report);
    }
    stats
}

fn run_idle(world: &mut World) -> RunStats {
    let input = InputState::new();
    let mut clock = FrameClock::new();
    let mut stats = RunStats::new();
    while clock.total_time < f64::from(IDLE_RUN_SECS) {
        let report = world.step(&input, clock.delta());
        stats.record(&report);
        thread::sleep(IDLE_FRAME_SLEEP);
    }
    log::debug!("Idle run averaged {:.1} fps", clock.smoothed_fps);
    stats
}

fn load_animations(path: &Path) -> Option<MotionAnimations> {
    if !path.exists() {
        log::warn!("Animation file '{}' not found.", path.display());
        return None;
    }
    match MotionAnimations::load(path) {
        Ok(anims) => Some(anims),
        Err(err) => {
            log::error!("Failed to load animations '{}': {}", path.display(), err);
            None
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let level_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_LEVEL_PATH.to_string()));
    let replay_path = args.next().map(PathBuf::from);

    let mut world = match load_level_from_path(&level_path) {
        Ok(world) => world,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Hero spawned at ({:.2}, {:.2}), size {:.3}x{:.3}",
        world.hero.position.x,
        world.hero.position.y,
        world.hero.width(),
        world.hero.height()
    );
    let animations = load_animations(Path::new(ANIMATION_PATH));

    let stats = match replay_path {
        Some(path) => match load_replay_from_path(&path) {
            Ok(replay) => {
                log::info!(
                    "Running replay '{}' ({:.2}s at dt {:.4})",
                    path.display(),
                    replay.duration_secs(),
                    replay.fixed_dt
                );
                run_replay(&mut world, &replay)
            }
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No replay given, idling for {IDLE_RUN_SECS}s");
            run_idle(&mut world)
        }
    };

    let hero = &world.hero;
    log::info!(
        "Level '{}': {} frames ({} skipped), {} jumps, {} wall hits, {} tiles broken, {} solid tiles left",
        world.level_id,
        stats.frames,
        stats.skipped,
        stats.jumps,
        stats.wall_hits,
        stats.tiles_destroyed,
        world.grid.solid_count()
    );
    log::info!(
        "Hero at ({:.3}, {:.3}) vel ({:.3}, {:.3}) {} {} facing {}",
        hero.position.x,
        hero.position.y,
        hero.velocity.x,
        hero.velocity.y,
        if hero.grounded { "grounded" } else { "airborne" },
        hero.state(),
        if hero.faces_right { "right" } else { "left" }
    );
    if let Some(anims) = &animations {
        log::info!(
            "Sprite '{}' from animation '{}'",
            anims.sprite_for(hero),
            anims.animation_id
        );
    }
}
