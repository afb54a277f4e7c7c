// Input handling system
//
// Translates keyboard and mouse events into game actions for each player,
// with remappable bindings and raw held-key tracking.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Input configuration and remapping system
// - `manager`: Turns window events into `InputEvent`s
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, InputTarget};
//
// let mut input_manager = InputManager::new(2);
//
// // In your event loop, process keyboard events
// for event in input_manager.process_keyboard_event(&key_event) {
//     if let InputTarget::Player(index) = event.target {
//         // Route event.action / event.pressed to that player's character
//     }
// }
// ```

pub mod action;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::{InputEvent, InputManager, InputTarget};

// Re-export for remapping and tests
#[allow(unused_imports)]
pub use action::InputSource;
#[allow(unused_imports)]
pub use config::{InputConfig, InputConfigManager};
