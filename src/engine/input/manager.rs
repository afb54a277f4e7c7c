// Input manager - turns window events into game actions

use std::collections::HashSet;

use log::trace;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::action::{Action, InputSource};
use super::config::InputConfigManager;

/// Which player an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Player(usize),
    Global,
}

/// A bound action changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub target: InputTarget,
    pub action: Action,
    pub pressed: bool,
}

/// Translates raw keyboard/mouse events through the bindings and tracks
/// which keys are physically held
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfigManager,
    held_keys: HashSet<KeyCode>,
    held_buttons: HashSet<MouseButton>,
}

impl InputManager {
    pub fn new(max_players: usize) -> Self {
        Self {
            config: InputConfigManager::new(max_players),
            held_keys: HashSet::new(),
            held_buttons: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Vec<InputEvent> {
        // Only physical key codes are bindable
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return Vec::new();
        };
        let pressed = event.state == ElementState::Pressed;
        self.process_key(key_code, pressed, event.repeat)
    }

    /// Process a key press or release
    ///
    /// Key repeats and presses of already-held keys produce no events.
    pub fn process_key(&mut self, key_code: KeyCode, pressed: bool, repeat: bool) -> Vec<InputEvent> {
        let changed = if pressed {
            self.held_keys.insert(key_code)
        } else {
            self.held_keys.remove(&key_code)
        };
        if repeat || !changed {
            return Vec::new();
        }
        self.resolve(InputSource::key(key_code), pressed)
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_event(&mut self, state: ElementState, button: MouseButton) -> Vec<InputEvent> {
        let pressed = state == ElementState::Pressed;
        let changed = if pressed {
            self.held_buttons.insert(button)
        } else {
            self.held_buttons.remove(&button)
        };
        if !changed {
            return Vec::new();
        }
        self.resolve(InputSource::mouse(button), pressed)
    }

    fn resolve(&self, source: InputSource, pressed: bool) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = (0..self.config.num_players())
            .filter_map(|player_id| {
                self.config
                    .get_player_action(player_id, source)
                    .map(|action| InputEvent {
                        target: InputTarget::Player(player_id),
                        action,
                        pressed,
                    })
            })
            .collect();

        if events.is_empty() {
            if let Some(action) = self.config.get_global_action(source) {
                events.push(InputEvent {
                    target: InputTarget::Global,
                    action,
                    pressed,
                });
            }
        }

        for event in &events {
            trace!("{:?} -> {:?}", source, event);
        }
        events
    }

    /// Check if a key is physically held
    pub fn is_key_down(&self, key_code: KeyCode) -> bool {
        self.held_keys.contains(&key_code)
    }

    /// All keys currently held
    pub fn held_keys(&self) -> &HashSet<KeyCode> {
        &self.held_keys
    }

    /// Forget all held keys and buttons (e.g. when the window loses focus)
    pub fn reset_all(&mut self) {
        self.held_keys.clear();
        self.held_buttons.clear();
    }

    pub fn config_mut(&mut self) -> &mut InputConfigManager {
        &mut self.config
    }
}
