// Run/terminate state machine for the main loop plus FPS bookkeeping.

use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    CloseRequested,
    EscapePressed,
    ToggleDebug,
}

/// One-way: once terminated the loop never resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Terminated,
}

pub struct Session {
    state: RunState,
    debug_overlay: bool,
}

impl Session {
    pub fn new(debug_overlay: bool) -> Self {
        Self { state: RunState::Running, debug_overlay }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Apply the events drained from the window this frame.
    pub fn handle(&mut self, events: impl IntoIterator<Item = OverlayEvent>) -> RunState {
        for event in events {
            match event {
                OverlayEvent::CloseRequested | OverlayEvent::EscapePressed => {
                    if self.state == RunState::Running {
                        info!(?event, "shutting down");
                    }
                    self.state = RunState::Terminated;
                }
                OverlayEvent::ToggleDebug => {
                    self.debug_overlay = !self.debug_overlay;
                    debug!(enabled = self.debug_overlay, "debug overlay");
                }
            }
        }
        self.state
    }
}

/// Counts frames and reports the rate once per second.
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self { window_start: now, frames: 0 }
    }

    /// Returns the measured rate when a full second has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_terminates_on_next_poll() {
        let mut session = Session::new(false);
        assert_eq!(session.handle(std::iter::empty()), RunState::Running);
        assert_eq!(session.handle([OverlayEvent::EscapePressed]), RunState::Terminated);
        assert_eq!(session.state(), RunState::Terminated);
    }

    #[test]
    fn close_terminates() {
        let mut session = Session::new(false);
        assert_eq!(session.handle([OverlayEvent::CloseRequested]), RunState::Terminated);
    }

    #[test]
    fn termination_is_one_way() {
        let mut session = Session::new(false);
        session.handle([OverlayEvent::EscapePressed]);
        assert_eq!(session.handle([OverlayEvent::ToggleDebug]), RunState::Terminated);
        assert_eq!(session.handle(std::iter::empty()), RunState::Terminated);
        assert_eq!(session.state(), RunState::Terminated);
    }

    #[test]
    fn toggle_flips_debug_overlay() {
        let mut session = Session::new(false);
        session.handle([OverlayEvent::ToggleDebug]);
        assert!(session.debug_overlay());
        session.handle([OverlayEvent::ToggleDebug, OverlayEvent::ToggleDebug]);
        assert!(session.debug_overlay());
        assert_eq!(session.state(), RunState::Running);
    }

    #[test]
    fn fps_reported_once_per_second() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);
        for i in 1..60 {
            assert_eq!(fps.tick(start + Duration::from_millis(i * 16)), None);
        }
        let rate = fps.tick(start + Duration::from_secs(1)).unwrap();
        assert!((rate - 60.0).abs() < 0.01, "rate = {rate}");
        assert_eq!(fps.tick(start + Duration::from_millis(1016)), None);
    }
}
