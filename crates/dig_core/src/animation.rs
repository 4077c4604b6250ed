//! Frame-based sprite animation clips, sampled by elapsed state time.
//!
//! A clip is a sequence of sprite frames with per-frame durations. Sampling is
//! stateless: the caller keeps the time spent in the current state and asks
//! the clip which frame is showing at that time. All timing uses integer
//! microseconds (`u64`) so sampling is exact and platform independent.
//!
//! The JSON format stores `duration_ms` for human readability; on load this
//! is converted to `duration_us`. A zero duration is allowed and means "hold
//! this frame", which is how single-frame poses are authored.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A single frame in an animation clip.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    pub sprite_id: String,
    pub duration_us: u64,
}

/// A sequence of frames that can loop or play once.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub frames: Vec<AnimationFrame>,
    pub looping: bool,
}

impl AnimationClip {
    /// A one-frame clip that holds `sprite_id` forever.
    pub fn still(sprite_id: &str) -> Self {
        Self {
            frames: vec![AnimationFrame {
                sprite_id: sprite_id.to_string(),
                duration_us: 0,
            }],
            looping: false,
        }
    }

    /// Total duration of one full cycle in microseconds.
    pub fn total_duration_us(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_us).sum()
    }

    /// Index of the frame showing after `elapsed_us`.
    ///
    /// Looping clips wrap; one-shot clips stop on their last frame. A clip
    /// whose total duration is zero always shows its first frame.
    pub fn frame_index_at(&self, elapsed_us: u64) -> usize {
        let total = self.total_duration_us();
        if self.frames.is_empty() || total == 0 {
            return 0;
        }

        let mut remaining = if self.looping {
            elapsed_us % total
        } else if elapsed_us >= total {
            return self.frames.len() - 1;
        } else {
            elapsed_us
        };

        for (index, frame) in self.frames.iter().enumerate() {
            if remaining < frame.duration_us {
                return index;
            }
            remaining -= frame.duration_us;
        }
        self.frames.len() - 1
    }

    /// Sprite id showing `state_time` seconds into the clip.
    pub fn key_frame(&self, state_time: f32) -> &str {
        let elapsed_us = (state_time.max(0.0) as f64 * 1_000_000.0) as u64;
        self.frames
            .get(self.frame_index_at(elapsed_us))
            .map(|frame| frame.sprite_id.as_str())
            .unwrap_or("")
    }
}

/// Top-level animation definition file.
#[derive(Debug, Clone)]
pub struct AnimationFile {
    pub version: String,
    pub animation_id: String,
    pub animations: HashMap<String, AnimationClip>,
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct AnimationFileJson {
    version: String,
    animation_id: String,
    animations: HashMap<String, AnimationClipJson>,
}

#[derive(Debug, Deserialize)]
struct AnimationClipJson {
    frames: Vec<AnimationFrameJson>,
    #[serde(default)]
    looping: bool,
}

#[derive(Debug, Deserialize)]
struct AnimationFrameJson {
    sprite_id: String,
    #[serde(default)]
    duration_ms: u64,
}

/// Load an animation definition file from disk.
pub fn load_animation_file(path: &Path) -> Result<AnimationFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read animation file {}: {e}", path.display()))?;
    parse_animation_file(&raw)
        .map_err(|e| format!("Animation file {}: {e}", path.display()))
}

/// Parse and validate animation JSON already in memory.
pub fn parse_animation_file(raw: &str) -> Result<AnimationFile, String> {
    let json: AnimationFileJson =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse animation JSON: {e}"))?;
    validate_animation_json(&json)?;

    let animations = json
        .animations
        .into_iter()
        .map(|(name, clip_json)| {
            let frames = clip_json
                .frames
                .into_iter()
                .map(|f| AnimationFrame {
                    sprite_id: f.sprite_id,
                    duration_us: f.duration_ms * 1000,
                })
                .collect();
            (
                name,
                AnimationClip {
                    frames,
                    looping: clip_json.looping,
                },
            )
        })
        .collect();

    Ok(AnimationFile {
        version: json.version,
        animation_id: json.animation_id,
        animations,
    })
}

fn validate_animation_json(json: &AnimationFileJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "Animation validation failed: unsupported version '{}'",
            json.version
        ));
    }
    if json.animation_id.is_empty() {
        return Err("Animation validation failed: animation_id is empty".to_string());
    }
    for (name, clip) in &json.animations {
        if clip.frames.is_empty() {
            return Err(format!(
                "Animation validation failed: clip '{}' has no frames",
                name
            ));
        }
        for (i, frame) in clip.frames.iter().enumerate() {
            if frame.sprite_id.is_empty() {
                return Err(format!(
                    "Animation validation failed: clip '{}' frame {} has empty sprite_id",
                    name, i
                ));
            }
        }
        if clip.looping && clip.frames.len() > 1 && clip.frames.iter().all(|f| f.duration_ms == 0)
        {
            return Err(format!(
                "Animation validation failed: looping clip '{}' has zero total duration",
                name
            ));
        }
    }
    Ok(())
}
