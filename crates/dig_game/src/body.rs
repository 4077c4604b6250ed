//! The controllable hero: kinematic state plus the per-frame physics step.
//!
//! Velocity is always a per-second rate. Each frame the step derives a
//! separate per-frame `displacement = velocity * dt`, hands that to the
//! collision resolver, applies the resolved displacement to the position and
//! converts it back into a rate with `1 / dt`. Gravity is added once per frame
//! without dt scaling, which is what gives the jump arc its feel.

use glam::Vec2;
use serde::Deserialize;

use crate::intent::Intents;
use crate::motion::{self, MotionEvent, MotionState};
use crate::resolver::{self, Resolution};
use crate::tiles::{TileCell, TileSource};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn tile(cell: TileCell) -> Self {
        Self {
            x: cell.left(),
            y: cell.bottom(),
            width: TileCell::SIZE,
            height: TileCell::SIZE,
        }
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Tuning values for the hero, in world units (tiles) and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub max_velocity: f32,
    pub jump_velocity: f32,
    /// Horizontal velocity multiplier applied once per frame.
    pub damping: f32,
    pub accel: f32,
    /// Added to vertical velocity once per frame, not scaled by dt.
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_velocity: 10.0,
            jump_velocity: 25.0,
            damping: 0.975,
            accel: 15.0,
            gravity: -1.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("max_velocity", self.max_velocity),
            ("jump_velocity", self.jump_velocity),
            ("damping", self.damping),
            ("accel", self.accel),
            ("gravity", self.gravity),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("Physics validation failed: {name} must be finite"));
        }
        if !(self.max_velocity > 0.0) {
            return Err("Physics validation failed: max_velocity must be > 0".to_string());
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err("Physics validation failed: damping must be in (0, 1]".to_string());
        }
        if !(self.accel >= 0.0 && self.jump_velocity >= 0.0) {
            return Err(
                "Physics validation failed: accel and jump_velocity must be >= 0".to_string(),
            );
        }
        if self.gravity > 0.0 {
            return Err("Physics validation failed: gravity must be <= 0".to_string());
        }
        Ok(())
    }
}

/// What happened during one call to [`KinematicBody::update`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameReport {
    /// The frame had a zero delta and nothing changed.
    pub skipped: bool,
    pub jumped: bool,
    pub resolution: Resolution,
}

#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    width: f32,
    height: f32,
    pub faces_right: bool,
    pub grounded: bool,
    pub(crate) state: MotionState,
    pub state_time: f32,
}

impl KinematicBody {
    /// # Panics
    ///
    /// If `width` or `height` is not strictly positive.
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "body size must be positive, got {width}x{height}"
        );
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
            faces_right: true,
            grounded: false,
            state: MotionState::default(),
            state_time: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.position.x,
            y: self.position.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn accelerate_x(&mut self, delta_v: f32) {
        self.velocity.x += delta_v;
    }

    pub fn apply_gravity(&mut self, gravity: f32) {
        self.velocity.y += gravity;
    }

    pub fn clamp_speed(&mut self, max_velocity: f32) {
        if self.velocity.x.abs() > max_velocity {
            self.velocity.x = self.velocity.x.signum() * max_velocity;
        }
    }

    pub fn damp(&mut self, damping: f32) {
        self.velocity.x *= damping;
    }

    /// Advance one frame: apply intents, integrate, resolve against `grid`.
    ///
    /// `dt` must be finite and non-negative. A zero `dt` skips the frame.
    pub fn update<T: TileSource>(
        &mut self,
        intents: Intents,
        dt: f32,
        grid: &mut T,
        config: &PhysicsConfig,
    ) -> FrameReport {
        debug_assert!(
            dt.is_finite() && dt >= 0.0,
            "frame delta must be finite and non-negative, got {dt}"
        );
        if dt == 0.0 {
            return FrameReport {
                skipped: true,
                ..FrameReport::default()
            };
        }
        self.state_time += dt;

        let jumped = intents.jump && self.grounded;
        if jumped {
            self.velocity.y += config.jump_velocity;
            self.grounded = false;
            motion::apply(self, MotionEvent::Jumped);
        }

        if intents.move_left {
            self.accelerate_x(-config.accel * dt);
            if self.grounded {
                motion::apply(self, MotionEvent::Walked);
            }
            self.faces_right = false;
        }

        if intents.move_right {
            self.accelerate_x(config.accel * dt);
            if self.grounded {
                motion::apply(self, MotionEvent::Walked);
            }
            self.faces_right = true;
        }

        log::trace!("velocity.x = {}", self.velocity.x);

        self.apply_gravity(config.gravity);
        self.clamp_speed(config.max_velocity);

        let displacement = self.velocity * dt;
        let resolution = resolver::resolve(self.aabb(), displacement, grid);
        if let Some(y) = resolution.snap_y {
            self.position.y = y;
        }
        self.position += resolution.displacement;
        self.velocity = resolution.displacement * (1.0 / dt);
        self.damp(config.damping);

        self.grounded = resolver::probe_ground(self.aabb(), grid);
        motion::apply(
            self,
            MotionEvent::Settled {
                grounded: self.grounded,
                moving: intents.moving(),
            },
        );

        FrameReport {
            skipped: false,
            jumped,
            resolution,
        }
    }
}
