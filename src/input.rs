//! Global input capture.
//!
//! A single platform hook (`rdev::listen`) runs on its own thread and feeds two
//! listeners: one for pointer motion, one for key press/release. Each listener
//! publishes into a lock-guarded slot and the render loop reads one
//! [`InputSnapshot`] per frame, so the latest value always wins.
//!
//! The hook call cannot be interrupted from outside. Shutdown raises a flag
//! that makes both listeners drop every further event; the thread itself is
//! left detached and goes away with the process.

use crate::types::{DisplaySize, Point};
use parking_lot::Mutex;
use rdev::{EventType, Key};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

/// State written by the hook thread and read by the render loop.
pub struct InputState {
    pointer: Mutex<Point>,
    keys: Mutex<HashSet<String>>,
    shutdown: AtomicBool,
}

/// What the render loop sees for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    pub pointer: Point,
    pub keys_held: usize,
}

impl InputState {
    pub fn new(initial_pointer: Point) -> Self {
        Self {
            pointer: Mutex::new(initial_pointer),
            keys: Mutex::new(HashSet::new()),
            shutdown: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: *self.pointer.lock(),
            keys_held: self.keys.lock().len(),
        }
    }

    /// Stop accepting events. Idempotent.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }
}

/// Publishes raw pointer positions (display space).
pub struct PointerListener {
    state: Arc<InputState>,
}

impl PointerListener {
    pub fn new(state: Arc<InputState>) -> Self {
        Self { state }
    }

    pub fn on_move(&self, x: f64, y: f64) {
        if self.state.is_shut_down() {
            return;
        }
        *self.state.pointer.lock() = Point::new(x as f32, y as f32);
    }
}

/// Tracks which keys are currently held.
pub struct KeyboardListener {
    state: Arc<InputState>,
}

impl KeyboardListener {
    pub fn new(state: Arc<InputState>) -> Self {
        Self { state }
    }

    pub fn on_press(&self, key: Key) {
        if self.state.is_shut_down() {
            return;
        }
        // auto-repeat presses land on the same entry
        self.state.keys.lock().insert(key_id(key));
    }

    pub fn on_release(&self, key: Key) {
        if self.state.is_shut_down() {
            return;
        }
        self.state.keys.lock().remove(&key_id(key));
    }
}

fn key_id(key: Key) -> String {
    format!("{key:?}")
}

/// Route one hook event to the listener that cares about it.
pub fn dispatch(event: &EventType, pointer: &PointerListener, keyboard: &KeyboardListener) {
    match *event {
        EventType::MouseMove { x, y } => pointer.on_move(x, y),
        EventType::KeyPress(key) => keyboard.on_press(key),
        EventType::KeyRelease(key) => keyboard.on_release(key),
        _ => {}
    }
}

/// Start the global hook thread. Failure to start is not fatal for the overlay.
pub fn spawn_hook(state: Arc<InputState>) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("input-hook".to_string())
        .spawn(move || {
            let pointer = PointerListener::new(Arc::clone(&state));
            let keyboard = KeyboardListener::new(state);
            info!("global input hook started");
            if let Err(e) = rdev::listen(move |event| dispatch(&event.event_type, &pointer, &keyboard)) {
                error!("global input hook stopped: {e:?}");
            }
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("could not start the input hook thread: {e}");
            None
        }
    }
}

/// Resolution used to normalize raw pointer coordinates.
pub fn query_display_size(fallback: DisplaySize) -> DisplaySize {
    match rdev::display_size() {
        Ok((width, height)) if width > 0 && height > 0 => DisplaySize { width: width as f32, height: height as f32 },
        Ok((width, height)) => {
            warn!("display reported {width}x{height}, using {}x{}", fallback.width, fallback.height);
            fallback
        }
        Err(e) => {
            warn!("display size unavailable ({e:?}), using {}x{}", fallback.width, fallback.height);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listeners() -> (Arc<InputState>, PointerListener, KeyboardListener) {
        let state = Arc::new(InputState::new(Point::new(400.0, 300.0)));
        let pointer = PointerListener::new(Arc::clone(&state));
        let keyboard = KeyboardListener::new(Arc::clone(&state));
        (state, pointer, keyboard)
    }

    #[test]
    fn initial_snapshot() {
        let (state, _, _) = listeners();
        assert_eq!(state.snapshot(), InputSnapshot { pointer: Point::new(400.0, 300.0), keys_held: 0 });
    }

    #[test]
    fn latest_pointer_wins() {
        let (state, pointer, keyboard) = listeners();
        dispatch(&EventType::MouseMove { x: 10.0, y: 20.0 }, &pointer, &keyboard);
        dispatch(&EventType::MouseMove { x: 1919.0, y: 5.0 }, &pointer, &keyboard);
        assert_eq!(state.snapshot().pointer, Point::new(1919.0, 5.0));
    }

    #[test]
    fn key_set_follows_press_and_release() {
        let (state, pointer, keyboard) = listeners();
        dispatch(&EventType::KeyPress(Key::KeyA), &pointer, &keyboard);
        dispatch(&EventType::KeyPress(Key::KeyA), &pointer, &keyboard);
        dispatch(&EventType::KeyPress(Key::Space), &pointer, &keyboard);
        assert_eq!(state.snapshot().keys_held, 2);

        dispatch(&EventType::KeyRelease(Key::KeyA), &pointer, &keyboard);
        assert_eq!(state.snapshot().keys_held, 1);
        dispatch(&EventType::KeyRelease(Key::Space), &pointer, &keyboard);
        assert_eq!(state.snapshot().keys_held, 0);

        // releasing something never pressed is harmless
        dispatch(&EventType::KeyRelease(Key::ShiftLeft), &pointer, &keyboard);
        assert_eq!(state.snapshot().keys_held, 0);
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let (state, pointer, keyboard) = listeners();
        dispatch(&EventType::Wheel { delta_x: 0, delta_y: 1 }, &pointer, &keyboard);
        assert_eq!(state.snapshot(), InputSnapshot { pointer: Point::new(400.0, 300.0), keys_held: 0 });
    }

    #[test]
    fn shutdown_stops_publishing() {
        let (state, pointer, keyboard) = listeners();
        dispatch(&EventType::KeyPress(Key::KeyB), &pointer, &keyboard);
        state.shutdown();
        state.shutdown();
        assert!(state.is_shut_down());

        dispatch(&EventType::MouseMove { x: 1.0, y: 1.0 }, &pointer, &keyboard);
        dispatch(&EventType::KeyPress(Key::KeyC), &pointer, &keyboard);
        dispatch(&EventType::KeyRelease(Key::KeyB), &pointer, &keyboard);
        assert_eq!(state.snapshot(), InputSnapshot { pointer: Point::new(400.0, 300.0), keys_held: 1 });
    }

    #[test]
    fn listeners_publish_across_threads() {
        let (state, pointer, keyboard) = listeners();
        let writer = thread::spawn(move || {
            for i in 0..100 {
                pointer.on_move(i as f64, i as f64);
            }
            keyboard.on_press(Key::Return);
        });
        writer.join().unwrap();
        assert_eq!(state.snapshot(), InputSnapshot { pointer: Point::new(99.0, 99.0), keys_held: 1 });
    }
}
