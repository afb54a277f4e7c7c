// Character system
//
// This module contains everything related to arena fighters:
// - Directional input tracking and facing
// - Attack and ability timers
// - The per-character state machine
// - Behavior hooks plugged into each state
// - Animation tables and the flipbook player used by the host

pub mod actor;
pub mod animation;
pub mod character;
pub mod combat;
pub mod direction;
pub mod hooks;
pub mod movement;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types
pub use actor::ActorFace;
pub use animation::{directional_clip_name, AnimationPlayer, AnimationTables};
pub use character::{Character, CharacterId};
pub use direction::Direction;
pub use hooks::{HookTuning, StandardHooks};
pub use state::{CharacterState, CharacterStateMachine};
pub use stats::CharacterStats;

// Re-export for custom fighters and clip sets
#[allow(unused_imports)]
pub use animation::AnimationClip;
#[allow(unused_imports)]
pub use direction::DirectionMap;
#[allow(unused_imports)]
pub use hooks::{BehaviorHooks, DefaultHooks};
