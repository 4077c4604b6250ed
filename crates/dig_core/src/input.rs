//! Raw input snapshot: held keys plus touch pointers.
//!
//! Everything here is **level-triggered**. `is_held(key)` is true every frame
//! the key is physically down, and `touched_in(start, end)` is true every frame
//! a pointer rests inside a horizontal screen band. Movement and jumping both
//! read held state; jump gating against air-jumps happens in the game's intent
//! mapper, not here.
//!
//! Touch positions are stored as fractions of the screen width in `[0, 1]` so
//! the bands stay resolution independent.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    Q,
    A,
    D,
}

/// Identifier of one touch point (finger index on touch screens).
pub type PointerId = u8;

#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<Key>,
    touches: HashMap<PointerId, f32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Any of `keys` currently held.
    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|key| self.is_held(*key))
    }

    /// Press or move a pointer. `x_fraction` is clamped into `[0, 1]`.
    pub fn touch_down(&mut self, pointer: PointerId, x_fraction: f32) {
        self.touches.insert(pointer, x_fraction.clamp(0.0, 1.0));
    }

    pub fn touch_up(&mut self, pointer: PointerId) {
        self.touches.remove(&pointer);
    }

    pub fn is_touched(&self, pointer: PointerId) -> bool {
        self.touches.contains_key(&pointer)
    }

    pub fn touch_x(&self, pointer: PointerId) -> Option<f32> {
        self.touches.get(&pointer).copied()
    }

    /// True if any touching pointer lies within `[start, end]` (inclusive).
    pub fn touched_in(&self, start: f32, end: f32) -> bool {
        self.touches.values().any(|&x| x >= start && x <= end)
    }

    /// Release every key and pointer, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.touches.clear();
    }
}
