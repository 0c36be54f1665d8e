//! Blocking global-hotkey listener.
//!
//! Polls the keyboard state and reports edge-triggered key presses. The
//! listener blocks the calling thread between triggers, so each analysis
//! pass runs to completion before the next press is observed.

use crate::error::{PipelineError, Result};
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::thread;
use std::time::Duration;

/// What a key press asks the main loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Capture the screen and run one analysis pass.
    Capture,
    /// Shut down the listener loop.
    Exit,
}

/// Map a configured key name to a `Keycode`.
///
/// Covers the keys that make sense as global triggers; anything else is a
/// configuration error.
pub fn parse_keycode(name: &str) -> Result<Keycode> {
    let keycode = match name.to_lowercase().as_str() {
        "f1" => Keycode::F1,
        "f2" => Keycode::F2,
        "f3" => Keycode::F3,
        "f4" => Keycode::F4,
        "f5" => Keycode::F5,
        "f6" => Keycode::F6,
        "f7" => Keycode::F7,
        "f8" => Keycode::F8,
        "f9" => Keycode::F9,
        "f10" => Keycode::F10,
        "f11" => Keycode::F11,
        "f12" => Keycode::F12,
        "esc" | "escape" => Keycode::Escape,
        other => {
            return Err(PipelineError::InvalidConfig(format!(
                "unsupported hotkey: {}",
                other
            )))
        }
    };
    Ok(keycode)
}

pub struct HotkeyListener {
    device_state: DeviceState,
    capture_key: Keycode,
    exit_key: Keycode,
    poll_interval: Duration,
    /// Keys seen down on the previous poll, for edge detection.
    previously_down: Vec<Keycode>,
}

impl HotkeyListener {
    pub fn new(capture_key: Keycode, exit_key: Keycode, poll_interval: Duration) -> Self {
        Self {
            device_state: DeviceState::new(),
            capture_key,
            exit_key,
            poll_interval,
            previously_down: Vec::new(),
        }
    }

    /// Block until the capture or exit hotkey transitions to pressed.
    ///
    /// Keys held down across polls fire once; a fresh press is required
    /// for the next trigger.
    pub fn wait(&mut self) -> Trigger {
        loop {
            let down = self.device_state.get_keys();

            let newly_pressed =
                |key: &Keycode| down.contains(key) && !self.previously_down.contains(key);

            let trigger = if newly_pressed(&self.exit_key) {
                Some(Trigger::Exit)
            } else if newly_pressed(&self.capture_key) {
                Some(Trigger::Capture)
            } else {
                None
            };

            self.previously_down = down;

            if let Some(trigger) = trigger {
                return trigger;
            }

            thread::sleep(self.poll_interval);
        }
    }
}
