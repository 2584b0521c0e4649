use std::collections::HashSet;

use crate::model::{FrameInput, InputEvent, Key};

// Accumulates DOM input between animation frames and hands it over as one snapshot.
#[derive(Default, Debug, Clone)]
pub struct InputCollector {
    keys: HashSet<Key>,
    events: Vec<InputEvent>,
    mouse_pos: Option<(f64, f64)>,
    primary_down: bool,
}

impl InputCollector {
    pub fn key_down(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.keys.insert(key);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.keys.remove(&key);
        }
    }

    /// Focus loss: keyup events will never arrive for keys held now.
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.primary_down = false;
    }

    pub fn set_mouse(&mut self, pos: (f64, f64)) {
        self.mouse_pos = Some(pos);
    }

    pub fn set_primary(&mut self, down: bool) {
        self.primary_down = down;
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain queued events; held keys, mouse position and button state carry over.
    pub fn snapshot(&mut self, ticks: u32) -> FrameInput {
        FrameInput {
            keys_pressed: self.keys.clone(),
            events: std::mem::take(&mut self.events),
            mouse_pos: self.mouse_pos,
            primary_down: self.primary_down,
            ticks,
        }
    }
}
