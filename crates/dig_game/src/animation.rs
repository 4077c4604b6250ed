//! Hero animation set: one clip per motion state, resolved once at load.
//!
//! Clips are looked up by name (`stand`, `walk`, `jump`) only while building
//! the set. Per-frame sampling is a `match` on [`MotionState`], so the render
//! path never touches a string map.

use std::path::Path;

use dig_core::animation::{load_animation_file, AnimationClip, AnimationFile};

use crate::body::KinematicBody;
use crate::motion::MotionState;

pub const STAND_CLIP: &str = "stand";
pub const WALK_CLIP: &str = "walk";
pub const JUMP_CLIP: &str = "jump";

#[derive(Debug, Clone)]
pub struct MotionAnimations {
    pub animation_id: String,
    standing: AnimationClip,
    walking: AnimationClip,
    jumping: AnimationClip,
}

impl MotionAnimations {
    /// Build the set from a loaded file. `stand` is required; a missing `walk`
    /// or `jump` clip is logged and falls back to `stand`.
    pub fn from_file(mut file: AnimationFile) -> Result<Self, String> {
        let standing = file.animations.remove(STAND_CLIP).ok_or_else(|| {
            format!(
                "Animation '{}' has no '{}' clip",
                file.animation_id, STAND_CLIP
            )
        })?;

        let mut take_or_stand = |name: &str| {
            file.animations.remove(name).unwrap_or_else(|| {
                log::warn!(
                    "Animation '{}' has no '{}' clip, using '{}'",
                    file.animation_id,
                    name,
                    STAND_CLIP
                );
                standing.clone()
            })
        };
        let walking = take_or_stand(WALK_CLIP);
        let jumping = take_or_stand(JUMP_CLIP);

        Ok(Self {
            animation_id: file.animation_id,
            standing,
            walking,
            jumping,
        })
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let file = load_animation_file(path)?;
        Self::from_file(file)
    }

    pub fn clip(&self, state: MotionState) -> &AnimationClip {
        match state {
            MotionState::Standing => &self.standing,
            MotionState::Walking => &self.walking,
            MotionState::Jumping => &self.jumping,
        }
    }

    /// Sprite id the renderer should draw for `body` this frame.
    pub fn sprite_for(&self, body: &KinematicBody) -> &str {
        self.clip(body.state()).key_frame(body.state_time)
    }
}
