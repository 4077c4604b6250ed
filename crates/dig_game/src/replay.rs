use crate::intent::Intents;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Upper bound on expanded frames: one hour at 60 fps.
pub const MAX_REPLAY_FRAMES: u64 = 60 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplayFrame {
    fn intents(&self) -> Intents {
        Intents {
            move_left: self.left,
            move_right: self.right,
            jump: self.jump,
        }
    }
}

impl ReplaySequence {
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat.max(1))).sum()
    }

    pub fn expanded_intents(&self) -> Vec<Intents> {
        let mut out = Vec::with_capacity(self.frame_count().min(MAX_REPLAY_FRAMES) as usize);
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(frame.intents());
            }
        }
        out
    }

    pub fn duration_secs(&self) -> f32 {
        self.fixed_dt * self.frame_count() as f32
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if !(replay.fixed_dt > 0.0) || !replay.fixed_dt.is_finite() {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    let total = replay
        .frames
        .iter()
        .try_fold(0u64, |acc, f| acc.checked_add(u64::from(f.repeat.max(1))))
        .filter(|total| *total <= MAX_REPLAY_FRAMES);
    if total.is_none() {
        return Err(format!(
            "Replay validation failed: more than {MAX_REPLAY_FRAMES} frames after repeats"
        ));
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{HeroSize, LevelFile, SpawnPoint, World};
    use crate::body::PhysicsConfig;
    use crate::tiles::{TileCell, TileSource};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "dig_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    /// Floor on row 0 with a row of breakable blocks overhead.
    fn sample_level() -> LevelFile {
        let mut solids: Vec<TileCell> = (0..40).map(|x| TileCell::new(x, 0)).collect();
        solids.extend((8..14).map(|x| TileCell::new(x, 5)));
        LevelFile {
            version: "0.1".to_string(),
            level_id: "replay".to_string(),
            width: 40,
            height: 20,
            solids,
            spawn: SpawnPoint { x: 2.0, y: 3.0 },
            hero: HeroSize::default(),
            physics: PhysicsConfig::default(),
        }
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "right": true, "repeat": 3 },
                { "jump": true }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_intents();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].move_right && !expanded[0].jump);
        assert!(expanded[3].jump);
        assert!((replay.duration_secs() - 4.0 * 0.016666667).abs() < 1e-5);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_zero_dt() {
        let path = temp_file_path("zero_dt");
        fs::write(&path, r#"{ "fixed_dt": 0.0, "frames": [{}] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("zero dt should fail");
        assert!(err.contains("fixed_dt"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_oversized_repeats() {
        let path = temp_file_path("oversized");
        fs::write(
            &path,
            r#"{ "frames": [{ "repeat": 4294967295 }, { "repeat": 2 }] }"#,
        )
        .expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("huge replay should fail");
        assert!(err.contains("frames after repeats"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_at_frame_cap_is_accepted() {
        let replay = ReplaySequence {
            fixed_dt: 1.0 / 60.0,
            frames: vec![ReplayFrame {
                left: false,
                right: true,
                jump: false,
                repeat: MAX_REPLAY_FRAMES as u32,
            }],
        };
        validate_replay(&replay).expect("replay at the cap should pass");
        assert_eq!(replay.frame_count(), MAX_REPLAY_FRAMES);
        assert!((replay.duration_secs() - 3600.0).abs() < 0.1);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "right": true, "repeat": 60 },
                { "right": true, "jump": true },
                { "right": true, "repeat": 120 },
                { "left": true, "repeat": 45 },
                { "left": true, "right": true, "repeat": 10 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let intents = replay.expanded_intents();

        let mut run_a = World::from_file(sample_level());
        let mut run_b = World::from_file(sample_level());
        for frame in &intents {
            run_a.step_intents(*frame, replay.fixed_dt);
        }
        for frame in &intents {
            run_b.step_intents(*frame, replay.fixed_dt);
        }

        assert_eq!(run_a.hero.position, run_b.hero.position);
        assert_eq!(run_a.hero.velocity, run_b.hero.velocity);
        assert_eq!(run_a.hero.grounded, run_b.hero.grounded);
        assert_eq!(run_a.hero.state(), run_b.hero.state());
        assert_eq!(run_a.grid.solid_count(), run_b.grid.solid_count());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn jumping_under_blocks_breaks_exactly_one_per_hit() {
        let mut world = World::from_file(sample_level());
        let dt = 1.0 / 60.0;
        let before = world.grid.solid_count();

        // Settle on the floor, then place the hero under block (9, 5).
        for _ in 0..60 {
            world.step_intents(Intents::NONE, dt);
        }
        assert!(world.hero.grounded);
        assert_eq!(world.hero.position.y, 1.0);
        world.hero.position.x = 9.0;

        let jump = Intents {
            jump: true,
            ..Intents::NONE
        };
        let mut destroyed = Vec::new();
        for frame in 0..240 {
            let intents = if frame == 0 { jump } else { Intents::NONE };
            if let Some(tile) = world.step_intents(intents, dt).resolution.destroyed {
                destroyed.push(tile);
            }
        }

        assert_eq!(destroyed.len(), 1);
        assert!(!world.grid.is_solid(destroyed[0].x, destroyed[0].y));
        assert_eq!(world.grid.solid_count(), before - 1);
        assert!(world.hero.grounded);
    }
}
