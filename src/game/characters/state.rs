// Character state machine

use log::debug;

use super::actor::ActorFace;
use super::character::Character;
use super::direction::Direction;
use super::hooks::BehaviorHooks;
use crate::core::Timestamp;
use crate::engine::input::Action;

/// Represents the current state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving under player input
    Walking,
    /// Swinging the basic attack
    Attacking,
    /// Running the special ability
    Ability,
}

impl CharacterState {
    /// Check if facing follows movement input in this state
    pub fn tracks_facing(&self) -> bool {
        matches!(self, Self::Idle | Self::Walking)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Attacking => "attacking",
            Self::Ability => "ability",
        }
    }
}

/// Drives one character through Idle, Walking, Attacking, and Ability
///
/// Input callbacks only record timestamps and flags. State changes happen
/// exclusively inside [`CharacterStateMachine::tick`], so each frame samples
/// input first and evolves state second.
pub struct CharacterStateMachine<A: ActorFace, H: BehaviorHooks<A>> {
    character: Character<A>,
    hooks: H,
    current_state: CharacterState,
    previous_state: CharacterState,
    entered_at: Timestamp,
}

impl<A: ActorFace, H: BehaviorHooks<A>> CharacterStateMachine<A, H> {
    pub fn new(character: Character<A>, hooks: H) -> Self {
        let entered_at = character.now();
        Self {
            character,
            hooks,
            current_state: CharacterState::Idle,
            previous_state: CharacterState::Idle,
            entered_at,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    pub fn character(&self) -> &Character<A> {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character<A> {
        &mut self.character
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    fn transition(&mut self, new_state: CharacterState, now: Timestamp) {
        if self.current_state != new_state {
            debug!(
                "{}: {} -> {} after {}ms",
                self.character.name(),
                self.current_state.name(),
                new_state.name(),
                now.millis_since(self.entered_at)
            );
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.entered_at = now;
        }
    }

    /// Evaluate one frame
    ///
    /// `now` comes from the host's monotonic clock. Frame deltas play no part
    /// in any decision.
    pub fn tick(&mut self, now: Timestamp) {
        if self.current_state.tracks_facing() {
            self.character.update_facing();
        }
        let next = match self.current_state {
            CharacterState::Idle => self.tick_idle(),
            CharacterState::Walking => self.tick_walking(),
            CharacterState::Attacking => self.tick_attacking(now),
            CharacterState::Ability => self.tick_ability(now),
        };
        if let Some(next) = next {
            self.transition(next, now);
        }
    }

    fn tick_idle(&mut self) -> Option<CharacterState> {
        let c = &mut self.character;
        self.hooks.idle_state(c);
        c.play_idle_animation();

        if c.is_moving() {
            Some(CharacterState::Walking)
        } else if c.is_attacking() {
            Some(CharacterState::Attacking)
        } else if c.is_ability_active() {
            Some(CharacterState::Ability)
        } else {
            None
        }
    }

    fn tick_walking(&mut self) -> Option<CharacterState> {
        let c = &mut self.character;
        self.hooks.walking_state(c);
        c.play_walking_animation();

        if c.is_attacking() {
            Some(CharacterState::Attacking)
        } else if c.is_ability_active() {
            Some(CharacterState::Ability)
        } else if !c.is_moving() {
            c.stop();
            Some(CharacterState::Idle)
        } else {
            None
        }
    }

    fn tick_attacking(&mut self, now: Timestamp) -> Option<CharacterState> {
        let c = &mut self.character;
        if !c.is_attacking() {
            return Some(Self::settled_state(c));
        }

        if !c.attack_started() {
            let timer = c.attack_timer();
            let key_down = timer.key_down();
            if let Some(elapsed_ms) = timer.elapsed_ms(now) {
                self.hooks.attack_state(c, elapsed_ms, key_down);
            }
        }
        None
    }

    fn tick_ability(&mut self, now: Timestamp) -> Option<CharacterState> {
        let c = &mut self.character;
        if !c.is_ability_active() {
            self.hooks.ability_end(c);
            return Some(Self::settled_state(c));
        }

        let timer = c.ability_timer();
        let key_down = timer.key_down();
        if let Some(elapsed_ms) = timer.elapsed_ms(now) {
            self.hooks.ability_state(c, elapsed_ms, key_down);
        }
        None
    }

    /// Where a finished attack or ability hands control back to
    fn settled_state(c: &Character<A>) -> CharacterState {
        if c.is_moving() {
            CharacterState::Walking
        } else {
            CharacterState::Idle
        }
    }

    // --- Input bridge ----------------------------------------------------

    pub fn update_movement_input(&mut self, direction: Direction, pressed: bool) {
        self.character.update_movement_input(direction, pressed);
    }

    pub fn update_attack_input(&mut self, active: bool) {
        self.character.update_attack_input(active);
    }

    /// Ability key callback
    ///
    /// An accepted press runs `ability_start` first; the ability is marked
    /// active and its cooldown stamped only after the hook returns.
    pub fn update_ability_input(&mut self, active: bool) {
        if self.character.update_ability_input(active) {
            debug!("{}: ability activated", self.character.name());
            self.hooks.ability_start(&mut self.character);
            self.character.activate_ability();
        }
    }

    /// Route a bound input action to its callback
    pub fn handle_action(&mut self, action: Action, pressed: bool) {
        match action {
            Action::MoveNorth => self.update_movement_input(Direction::North, pressed),
            Action::MoveEast => self.update_movement_input(Direction::East, pressed),
            Action::MoveSouth => self.update_movement_input(Direction::South, pressed),
            Action::MoveWest => self.update_movement_input(Direction::West, pressed),
            Action::Attack => self.update_attack_input(pressed),
            Action::Ability => self.update_ability_input(pressed),
            Action::Pause | Action::Menu => {}
        }
    }

    /// Resynchronize input from raw key state
    pub fn reset_input(&mut self) {
        self.character.reset_input();
    }

    /// The host finished a one-shot animation for this character
    pub fn on_animation_finished(&mut self) {
        self.hooks.animation_finished(&mut self.character);
    }

    /// Clear combat state and resynchronize input after a respawn
    ///
    /// The current state is left alone; the next tick settles it.
    pub fn respawn(&mut self) {
        if self.character.is_attacking() {
            self.character.finish_attack();
        }
        self.character.finish_ability();
        self.character.reset_cooldown();
        self.character.reset_input();
    }
}
