// Fixed-rate update driver and the game clock
//
// The window delivers frames at whatever rate it likes; characters are
// ticked at a steady 60 Hz. The clock keeps running while paused, so
// cooldowns measured against it expire during a pause too.

use std::time::{Duration, Instant};

use crate::core::Timestamp;

/// Seconds per fixed update
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const STEP: Duration = Duration::from_micros(16_667);

/// Cap on updates owed by one frame. Anything beyond is dropped.
const MAX_STEPS_PER_FRAME: u32 = 5;

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    frames: u64,
    steps: u64,
}

/// Turns wall-clock frames into a count of fixed updates
pub struct GameLoop {
    origin: Instant,
    last_frame: Instant,
    /// Time owed to the simulation but not yet stepped
    backlog: Duration,
    paused: bool,
    counters: Counters,
}

impl GameLoop {
    /// Start the clock at zero
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            last_frame: origin,
            backlog: Duration::ZERO,
            paused: false,
            counters: Counters::default(),
        }
    }

    /// Mark the start of a frame and return how many fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let frame_start = Instant::now();
        let frame_time = frame_start - self.last_frame;
        self.last_frame = frame_start;
        self.counters.frames += 1;

        if self.paused {
            return 0;
        }

        self.backlog += frame_time;
        let owed = self.backlog.as_nanos() / STEP.as_nanos();
        let steps = owed.min(MAX_STEPS_PER_FRAME as u128) as u32;
        if owed > steps as u128 {
            self.backlog = Duration::ZERO;
        } else {
            self.backlog -= STEP * steps;
        }

        self.counters.steps += steps as u64;
        steps
    }

    /// Current time on the game clock
    pub fn now(&self) -> Timestamp {
        Timestamp::from_duration(self.origin.elapsed())
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.counters.frames
    }

    pub fn update_count(&self) -> u64 {
        self.counters.steps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop handing out updates. The clock keeps running.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Paused at {:?}", self.now().since_origin());
        }
    }

    /// Hand out updates again, forgetting time owed from before the pause
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.backlog = Duration::ZERO;
            log::info!("Resumed at {:?}", self.now().since_origin());
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
