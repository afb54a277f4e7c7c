// Host capabilities a character drives

use winit::keyboard::KeyCode;

use super::character::CharacterId;
use super::direction::Direction;
use crate::core::Timestamp;

/// The side effects a character can request from its host
///
/// The character never owns bodies, colliders, or sprites. It holds handles
/// of the associated types and asks the host to act on them.
pub trait ActorFace {
    /// Handle to a collision region used as an attack hitbox
    type Hitbox: Copy;
    /// Handle to a flipbook animation
    type Animation: Clone;

    /// Move at `speed` along `direction`. A speed of zero stops the actor.
    fn set_velocity(&mut self, speed: f32, direction: Direction);

    /// Enable or disable collision on a hitbox
    fn set_hitbox_collision(&mut self, hitbox: Self::Hitbox, enabled: bool);

    /// Start playing a flipbook, looping or once
    fn play_animation(&mut self, animation: &Self::Animation, looping: bool);

    /// Deal `amount` damage to another character
    fn apply_damage(&mut self, target: CharacterId, amount: f32);

    /// Current time on the host's monotonic clock
    fn now(&self) -> Timestamp;

    /// Raw key state of the first local player
    fn first_player_key_down(&self, key: KeyCode) -> bool;
}
