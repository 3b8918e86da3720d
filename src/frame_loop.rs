//! Display-synchronized tick driver
//!
//! Converts wall-clock frame timestamps into whole simulation ticks. The
//! simulation itself never reads a clock.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, TickInput, tick};

/// Longest frame gap honoured before the rest is dropped
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-rate tick driver fed by display frame timestamps
///
/// Targets 60 ticks per second of display time, not exactly one tick per
/// frame: a frame may run 0, 1 or 2 ticks as the accumulator drifts, and at
/// most `MAX_SUBSTEPS` after a stall.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    accumulator: f32,
    last_time: Option<f64>,
    registered: bool,
    ticks_run: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_time: None,
            registered: true,
            ticks_run: 0,
        }
    }

    /// Feed one display frame at `now_secs`; returns the ticks run
    ///
    /// The first frame only primes the clock. One-shot input (`jump`) is
    /// consumed by the first tick of the frame.
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, now_secs: f64) -> u32 {
        if !self.registered {
            return 0;
        }

        let dt = match self.last_time {
            Some(last) => ((now_secs - last).max(0.0) as f32).min(MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(now_secs);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.jump = false;
        }

        // Don't carry a backlog into the next frame
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.ticks_run += u64::from(substeps);
        substeps
    }

    /// Stop ticking; further frames are ignored
    pub fn teardown(&mut self) {
        if self.registered {
            log::info!("Frame loop stopped after {} ticks", self.ticks_run);
        }
        self.registered = false;
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RunPhase, SimConfig};

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn test_first_frame_primes_clock() {
        let mut state = GameState::new(1, SimConfig::default());
        let mut frames = FrameLoop::new();
        let mut input = TickInput::default();
        assert_eq!(frames.advance(&mut state, &mut input, 10.0), 0);
    }

    #[test]
    fn test_one_tick_per_frame() {
        let mut state = GameState::new(1, SimConfig::default());
        let mut frames = FrameLoop::new();
        let mut input = TickInput {
            jump: true,
            ..Default::default()
        };
        frames.advance(&mut state, &mut input, 0.0);
        let mut total = 0;
        for i in 1..=60 {
            // Slightly over a frame to stay clear of float rounding
            total += frames.advance(&mut state, &mut input, i as f64 * (FRAME + 1e-6));
        }
        assert!((59..=60).contains(&total));
        assert_eq!(state.phase, RunPhase::Playing);
        assert!(!input.jump);
    }

    #[test]
    fn test_ticks_follow_display_time() {
        let mut state = GameState::new(1, SimConfig::default());
        let mut frames = FrameLoop::new();
        let mut input = TickInput::default();
        frames.advance(&mut state, &mut input, 0.0);
        // Half a tick of display time runs nothing
        assert_eq!(frames.advance(&mut state, &mut input, 0.5 * FRAME), 0);
        // A long frame catches up with two ticks
        assert_eq!(frames.advance(&mut state, &mut input, 2.5 * FRAME), 2);
        assert_eq!(frames.ticks_run(), 2);
    }

    #[test]
    fn test_long_stall_capped() {
        let mut state = GameState::new(1, SimConfig::default());
        let mut frames = FrameLoop::new();
        let mut input = TickInput::default();
        frames.advance(&mut state, &mut input, 0.0);
        assert_eq!(frames.advance(&mut state, &mut input, 5.0), MAX_SUBSTEPS);
        // Backlog dropped: a normal frame runs at most two ticks
        assert!(frames.advance(&mut state, &mut input, 5.0 + FRAME) <= 2);
    }

    #[test]
    fn test_jump_consumed_once() {
        let mut state = GameState::new(1, SimConfig::default());
        let mut frames = FrameLoop::new();
        let mut input = TickInput {
            jump: true,
            ..Default::default()
        };
        frames.advance(&mut state, &mut input, 0.0);
        assert!(input.jump);
        frames.advance(&mut state, &mut input, 0.05);
        assert!(!input.jump);
    }

    #[test]
    fn test_teardown_stops_ticking() {
        let mut state = GameState::new(1, SimConfig::default());
        let mut frames = FrameLoop::new();
        let mut input = TickInput {
            jump: true,
            ..Default::default()
        };
        frames.advance(&mut state, &mut input, 0.0);
        frames.teardown();
        assert!(!frames.is_registered());
        assert_eq!(frames.advance(&mut state, &mut input, 1.0), 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(frames.ticks_run(), 0);
    }
}
