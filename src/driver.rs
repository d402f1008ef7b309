//! Frame loop control
//!
//! The host calls [`LoopDriver::frame`] from its animation-frame callback with
//! the frame timestamp. Updating and drawing are gated separately: a paused or
//! finished run keeps drawing its last state without advancing.

use crate::sim::{GameState, InputSampler, tick};

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStep {
    /// Seconds simulated this frame (None = no update ran)
    pub dt: Option<f32>,
    /// Countdown reported by the tick, if it got that far
    pub remaining: Option<f32>,
    /// Host should draw this frame
    pub draw: bool,
}

#[derive(Debug, Clone)]
pub struct LoopDriver {
    /// Simulation updates allowed
    running: bool,
    /// Drawing allowed (independent of `running`)
    drawing: bool,
    /// Timestamp (ms) of the previous frame; None until the first frame
    last_time: Option<f64>,
    max_frame_dt: Option<f32>,
    frames: u64,
}

impl LoopDriver {
    pub fn new(max_frame_dt: Option<f32>) -> Self {
        Self {
            running: false,
            drawing: false,
            last_time: None,
            max_frame_dt,
            frames: 0,
        }
    }

    /// Begin updating and drawing. The next frame only captures a baseline.
    pub fn start(&mut self) {
        self.running = true;
        self.drawing = true;
        self.last_time = None;
        log::info!("Loop started");
    }

    /// Stop everything; takes effect before the next frame
    pub fn stop(&mut self) {
        self.running = false;
        self.drawing = false;
        self.last_time = None;
        log::info!("Loop stopped after {} frames", self.frames);
    }

    /// Suspend updates but keep drawing (e.g. while an overlay is shown)
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("Loop paused");
        }
    }

    /// Resume updates without replaying the paused interval
    pub fn resume(&mut self) {
        if !self.running {
            self.running = true;
            self.drawing = true;
            self.last_time = None;
            log::debug!("Loop resumed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Host should keep requesting frames
    pub fn is_active(&self) -> bool {
        self.running || self.drawing
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handle one animation frame at `now_ms`
    pub fn frame(
        &mut self,
        now_ms: f64,
        state: &mut GameState,
        input: &mut InputSampler,
    ) -> FrameStep {
        if !self.is_active() {
            return FrameStep::default();
        }
        self.frames += 1;

        let Some(last) = self.last_time.replace(now_ms) else {
            // First callback: baseline only
            return FrameStep {
                draw: self.drawing,
                ..Default::default()
            };
        };

        if !self.running {
            return FrameStep {
                draw: self.drawing,
                ..Default::default()
            };
        }

        let mut dt = (((now_ms - last) / 1000.0) as f32).max(0.0);
        if let Some(max) = self.max_frame_dt {
            dt = dt.min(max);
        }

        let remaining = tick(state, input, dt);
        if state.is_over() {
            // Terminal: stop updating, keep showing the final state
            self.running = false;
        }

        FrameStep {
            dt: Some(dt),
            remaining,
            draw: self.drawing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Outcome;
    use crate::tuning::Tuning;

    fn setup() -> (LoopDriver, GameState, InputSampler) {
        (
            LoopDriver::new(None),
            GameState::new(Tuning::default(), 7),
            InputSampler::new(),
        )
    }

    #[test]
    fn test_idle_driver_does_nothing() {
        let (mut driver, mut state, mut input) = setup();
        let step = driver.frame(16.0, &mut state, &mut input);
        assert_eq!(step, FrameStep::default());
        assert_eq!(state.time_elapsed(), 0.0);
    }

    #[test]
    fn test_first_frame_only_captures_baseline() {
        let (mut driver, mut state, mut input) = setup();
        driver.start();
        let step = driver.frame(5_000.0, &mut state, &mut input);
        assert_eq!(step.dt, None);
        assert!(step.draw);
        assert_eq!(state.time_elapsed(), 0.0);
        assert!(state.hazards.entities().is_empty());

        let step = driver.frame(5_250.0, &mut state, &mut input);
        assert_eq!(step.dt, Some(0.25));
        assert_eq!(step.remaining, Some(39.75));
    }

    #[test]
    fn test_pause_keeps_drawing_and_resume_skips_gap() {
        let (mut driver, mut state, mut input) = setup();
        driver.start();
        driver.frame(0.0, &mut state, &mut input);
        driver.frame(500.0, &mut state, &mut input);

        driver.pause();
        let step = driver.frame(10_000.0, &mut state, &mut input);
        assert_eq!(step.dt, None);
        assert!(step.draw);
        assert!((state.time_elapsed() - 0.5).abs() < 1e-6);

        driver.resume();
        assert_eq!(driver.frame(60_000.0, &mut state, &mut input).dt, None);
        assert_eq!(driver.frame(60_100.0, &mut state, &mut input).dt, Some(0.1));
        assert!((state.time_elapsed() - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_stop_is_immediate() {
        let (mut driver, mut state, mut input) = setup();
        driver.start();
        driver.frame(0.0, &mut state, &mut input);
        driver.stop();
        assert!(!driver.is_active());
        let step = driver.frame(100.0, &mut state, &mut input);
        assert!(!step.draw);
        assert_eq!(state.time_elapsed(), 0.0);
    }

    #[test]
    fn test_frame_dt_clamp() {
        let mut driver = LoopDriver::new(Some(0.1));
        let mut state = GameState::new(Tuning::default(), 7);
        let mut input = InputSampler::new();
        driver.start();
        driver.frame(0.0, &mut state, &mut input);
        assert_eq!(driver.frame(3_000.0, &mut state, &mut input).dt, Some(0.1));
    }

    #[test]
    fn test_terminal_tick_stops_updates_but_not_drawing() {
        let (mut driver, mut state, mut input) = setup();
        state.player.health = 0.0;
        driver.start();
        driver.frame(0.0, &mut state, &mut input);
        driver.frame(16.0, &mut state, &mut input);
        assert_eq!(state.outcome(), Some(Outcome::Defeated));
        assert!(!driver.is_running());

        let step = driver.frame(32.0, &mut state, &mut input);
        assert!(step.draw);
        assert_eq!(step.dt, None);
    }
}
