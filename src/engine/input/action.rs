// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (top-down, four directions)
    MoveNorth,
    MoveEast,
    MoveSouth,
    MoveWest,

    // Combat
    Attack,
    Ability,

    // Meta actions
    Pause,
    Menu,
}

impl Action {
    /// Check if this action is handled by a character rather than the game shell
    pub fn is_character_action(&self) -> bool {
        !matches!(self, Self::Pause | Self::Menu)
    }
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings for Player 1
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD)
        (InputSource::key(KeyCode::KeyW), Action::MoveNorth),
        (InputSource::key(KeyCode::KeyD), Action::MoveEast),
        (InputSource::key(KeyCode::KeyS), Action::MoveSouth),
        (InputSource::key(KeyCode::KeyA), Action::MoveWest),
        // Combat (mouse buttons, with keyboard fallbacks)
        (InputSource::mouse(MouseButton::Left), Action::Attack),
        (InputSource::mouse(MouseButton::Right), Action::Ability),
        (InputSource::key(KeyCode::KeyJ), Action::Attack),
        (InputSource::key(KeyCode::KeyK), Action::Ability),
    ]
}

/// Global bindings (not player-specific)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}
