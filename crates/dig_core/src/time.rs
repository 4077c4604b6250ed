//! Frame clocks. A clock hands the simulation exactly one Δt per frame.
//!
//! `FrameClock` measures wall time between calls and caps long frames so a
//! stall (debugger, window drag) does not launch the character through the
//! level. `FixedClock` returns a constant step and is what replays and tests
//! use to get bit-identical runs.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub trait Clock {
    /// Seconds elapsed since the previous call. Never negative.
    fn delta(&mut self) -> f32;
}

pub struct FrameClock {
    pub max_dt: f32,
    pub frame_count: u64,
    pub total_time: f64,
    last_instant: Option<Instant>,

    dt_samples: [f32; FPS_SAMPLE_COUNT],
    dt_sample_index: usize,
    pub smoothed_fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            max_dt: 0.25,
            frame_count: 0,
            total_time: 0.0,
            last_instant: None,
            dt_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            dt_sample_index: 0,
            smoothed_fps: 60.0,
        }
    }

    fn record(&mut self, dt: f32) {
        self.frame_count += 1;
        self.total_time += f64::from(dt);

        self.dt_samples[self.dt_sample_index] = dt;
        self.dt_sample_index = (self.dt_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt = self.dt_samples.iter().sum::<f32>() / FPS_SAMPLE_COUNT as f32;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

impl Clock for FrameClock {
    /// The first call has nothing to measure against and returns 0, which the
    /// physics step treats as a skipped frame.
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let mut dt = match self.last_instant {
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_instant = Some(now);

        // Spiral-of-death cap
        if dt > self.max_dt {
            log::warn!(
                "Frame took {:.1}ms, capping delta to {}ms",
                dt * 1000.0,
                self.max_dt * 1000.0
            );
            dt = self.max_dt;
        }

        self.record(dt);
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.step
    }
}
