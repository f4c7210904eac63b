//! Player input state
//!
//! Key events arrive from the host between ticks. They update two things:
//! - the per-player `Controller` flags read by paddles
//! - the `KeyState` set read by the title screen

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Physical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Space,
    Enter,
    /// Printable key, stored lowercase
    Char(char),
}

impl Key {
    /// Printable key, case-insensitive
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

/// A single press or release reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Source of key events, polled once per frame by the host loop
pub trait InputSource {
    fn poll(&mut self) -> Vec<KeyEvent>;
}

/// Index of a controller in the application's `Controllers` arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerId(pub usize);

/// Controls for a single player
///
/// Bindings are configuration; the two flags are live state written only by
/// key dispatch and read only by the paddle bound to this controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub up_key: Key,
    pub down_key: Key,
    #[serde(skip)]
    pub player_up: bool,
    #[serde(skip)]
    pub player_down: bool,
}

impl Controller {
    pub fn new(up_key: Key, down_key: Key) -> Self {
        Self {
            up_key,
            down_key,
            player_up: false,
            player_down: false,
        }
    }

    /// Apply a key press. Returns true if the key is bound to this controller.
    pub fn press(&mut self, key: Key) -> bool {
        if key == self.up_key {
            self.player_up = true;
        } else if key == self.down_key {
            self.player_down = true;
        } else {
            return false;
        }
        true
    }

    /// Apply a key release. Returns true if the key is bound to this controller.
    pub fn release(&mut self, key: Key) -> bool {
        if key == self.up_key {
            self.player_up = false;
        } else if key == self.down_key {
            self.player_down = false;
        } else {
            return false;
        }
        true
    }

    /// Drop both flags, as if both keys were released
    pub fn clear(&mut self) {
        self.player_up = false;
        self.player_down = false;
    }
}

/// Arena of controllers owned by the application
#[derive(Debug, Clone, Default)]
pub struct Controllers {
    controllers: Vec<Controller>,
}

impl Controllers {
    pub fn new(controllers: Vec<Controller>) -> Self {
        Self { controllers }
    }

    pub fn get(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.get(id.0)
    }

    pub fn get_mut(&mut self, id: ControllerId) -> Option<&mut Controller> {
        self.controllers.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Ids of all controllers, in player order
    pub fn ids(&self) -> impl Iterator<Item = ControllerId> + '_ {
        (0..self.controllers.len()).map(ControllerId)
    }

    /// Dispatch a press to every controller. Returns true if any was bound to it.
    pub fn press(&mut self, key: Key) -> bool {
        let mut handled = false;
        for controller in &mut self.controllers {
            handled |= controller.press(key);
        }
        handled
    }

    /// Dispatch a release to every controller. Returns true if any was bound to it.
    pub fn release(&mut self, key: Key) -> bool {
        let mut handled = false;
        for controller in &mut self.controllers {
            handled |= controller.release(key);
        }
        handled
    }

    /// Release every held direction on every controller
    pub fn clear(&mut self) {
        self.controllers.iter_mut().for_each(Controller::clear);
    }
}

/// Set of keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => {
                self.pressed.insert(key);
            }
            KeyEvent::Released(key) => {
                self.pressed.remove(&key);
            }
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// True if any tracked key is currently held
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

/// Input source replaying a fixed script of events, keyed by poll count
///
/// Used by the headless runner and tests in place of a real window.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, KeyEvent)>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<(u64, KeyEvent)>) -> Self {
        events.sort_by_key(|(frame, _)| *frame);
        Self {
            script: events.into(),
            frame: 0,
        }
    }

    /// True once every scripted event has been delivered
    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        while let Some(&(frame, event)) = self.script.front() {
            if frame > self.frame {
                break;
            }
            events.push(event);
            self.script.pop_front();
        }
        self.frame += 1;
        events
    }
}
