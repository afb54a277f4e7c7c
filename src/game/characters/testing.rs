// Test doubles for the character system

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::keyboard::KeyCode;

use super::actor::ActorFace;
use super::character::{Character, CharacterId};
use super::direction::Direction;
use super::hooks::BehaviorHooks;
use crate::core::Timestamp;

/// Actor that records every request and lets tests set the clock
#[derive(Debug, Default)]
pub struct MockActor {
    pub now: Timestamp,
    pub velocity: Vec2,
    pub hitboxes: HashMap<u32, bool>,
    pub hitbox_calls: Vec<(u32, bool)>,
    pub animations: Vec<(String, bool)>,
    pub damage: Vec<(CharacterId, f32)>,
    pub keys_down: HashSet<KeyCode>,
}

impl MockActor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&mut self, millis: u64) {
        self.now = Timestamp::from_millis(millis);
    }

    pub fn hitbox_enabled(&self, hitbox: u32) -> Option<bool> {
        self.hitboxes.get(&hitbox).copied()
    }
}

impl ActorFace for MockActor {
    type Hitbox = u32;
    type Animation = String;

    fn set_velocity(&mut self, speed: f32, direction: Direction) {
        self.velocity = direction.velocity(speed);
    }

    fn set_hitbox_collision(&mut self, hitbox: u32, enabled: bool) {
        self.hitboxes.insert(hitbox, enabled);
        self.hitbox_calls.push((hitbox, enabled));
    }

    fn play_animation(&mut self, animation: &String, looping: bool) {
        self.animations.push((animation.clone(), looping));
    }

    fn apply_damage(&mut self, target: CharacterId, amount: f32) {
        self.damage.push((target, amount));
    }

    fn now(&self) -> Timestamp {
        self.now
    }

    fn first_player_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }
}

/// A hook invocation seen by [`RecordingHooks`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall {
    Idle,
    Walking,
    Attack { elapsed_ms: u64, key_down: bool },
    AbilityStart,
    Ability { elapsed_ms: u64, key_down: bool },
    AbilityEnd,
    AnimationFinished,
}

/// Hooks that only record calls and keep every attack/ability running
/// until a test ends it explicitly
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub calls: Vec<HookCall>,
}

impl RecordingHooks {
    pub fn count(&self, call: &HookCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl BehaviorHooks<MockActor> for RecordingHooks {
    fn idle_state(&mut self, _character: &mut Character<MockActor>) {
        self.calls.push(HookCall::Idle);
    }

    fn walking_state(&mut self, character: &mut Character<MockActor>) {
        self.calls.push(HookCall::Walking);
        character.move_character();
    }

    fn attack_state(&mut self, _character: &mut Character<MockActor>, elapsed_ms: u64, key_down: bool) {
        self.calls.push(HookCall::Attack {
            elapsed_ms,
            key_down,
        });
    }

    fn ability_start(&mut self, _character: &mut Character<MockActor>) {
        self.calls.push(HookCall::AbilityStart);
    }

    fn ability_state(&mut self, _character: &mut Character<MockActor>, elapsed_ms: u64, key_down: bool) {
        self.calls.push(HookCall::Ability {
            elapsed_ms,
            key_down,
        });
    }

    fn ability_end(&mut self, _character: &mut Character<MockActor>) {
        self.calls.push(HookCall::AbilityEnd);
    }

    fn animation_finished(&mut self, _character: &mut Character<MockActor>) {
        self.calls.push(HookCall::AnimationFinished);
    }
}
