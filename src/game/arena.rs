// Arena host: owns the fighters' bodies, hitboxes, health, and flipbooks

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use log::{debug, info};
use winit::keyboard::KeyCode;

use super::characters::{
    directional_clip_name, ActorFace, AnimationPlayer, AnimationTables, Character, CharacterId,
    CharacterState, CharacterStateMachine, CharacterStats, Direction, HookTuning, StandardHooks,
};
use crate::core::Timestamp;
use crate::engine::input::{InputEvent, InputTarget};
use crate::engine::physics::{ColliderHandle, HitboxWorld, PhysicsError, RigidBodyHandle};

/// Arena errors
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("Unknown character: {0}")]
    UnknownCharacter(CharacterId),

    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),
}

/// A side effect a character requested during a callback or tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorCommand {
    SetVelocity(Vec2),
    SetHitbox(ColliderHandle, bool),
    Damage { target: CharacterId, amount: f32 },
}

/// The arena's side of one character
///
/// Physics and health changes are queued and applied by the arena after the
/// character returns control. Animation plays immediately on the character's
/// own flipbook.
pub struct ArenaActor {
    clock: Timestamp,
    held_keys: HashSet<KeyCode>,
    commands: Vec<ActorCommand>,
    animator: AnimationPlayer,
}

impl ArenaActor {
    pub fn new(animator: AnimationPlayer) -> Self {
        Self {
            clock: Timestamp::ZERO,
            held_keys: HashSet::new(),
            commands: Vec::new(),
            animator,
        }
    }

    fn sync(&mut self, now: Timestamp, held_keys: &HashSet<KeyCode>) {
        self.clock = now;
        self.held_keys.clone_from(held_keys);
    }

    fn take_commands(&mut self) -> Vec<ActorCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl ActorFace for ArenaActor {
    type Hitbox = ColliderHandle;
    type Animation = String;

    fn set_velocity(&mut self, speed: f32, direction: Direction) {
        self.commands
            .push(ActorCommand::SetVelocity(direction.velocity(speed)));
    }

    fn set_hitbox_collision(&mut self, hitbox: ColliderHandle, enabled: bool) {
        self.commands.push(ActorCommand::SetHitbox(hitbox, enabled));
    }

    fn play_animation(&mut self, animation: &String, looping: bool) {
        self.animator.play(animation, looping);
    }

    fn apply_damage(&mut self, target: CharacterId, amount: f32) {
        self.commands.push(ActorCommand::Damage { target, amount });
    }

    fn now(&self) -> Timestamp {
        self.clock
    }

    fn first_player_key_down(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }
}

/// A fighter as the arena runs it
pub type Fighter = CharacterStateMachine<ArenaActor, StandardHooks>;

struct FighterSlot {
    machine: Fighter,
    body: RigidBodyHandle,
    hitboxes: Vec<ColliderHandle>,
    /// Local player driving this fighter, `None` for a dummy
    player: Option<usize>,
    health: f32,
    spawn_point: Vec2,
    /// Targets already hit by the current swing
    struck: HashSet<CharacterId>,
}

/// Runs every fighter against one shared hitbox world
pub struct Arena {
    world: HitboxWorld,
    fighters: Vec<FighterSlot>,
    index: HashMap<CharacterId, usize>,
    next_id: CharacterId,
    stats: CharacterStats,
    tuning: HookTuning,
    clock: Timestamp,
    held_keys: HashSet<KeyCode>,
}

impl Arena {
    pub fn new(stats: CharacterStats, tuning: HookTuning) -> Self {
        Self {
            world: HitboxWorld::new(),
            fighters: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
            stats,
            tuning,
            clock: Timestamp::ZERO,
            held_keys: HashSet::new(),
        }
    }

    /// Spawn a fighter at `(x, y)` with a body, four directional hitboxes,
    /// and the standard directional clips
    pub fn spawn_character(
        &mut self,
        name: &str,
        player: Option<usize>,
        x: f32,
        y: f32,
    ) -> Result<CharacterId, ArenaError> {
        let id = self.next_id;
        self.next_id += 1;

        let body = self.world.spawn_body(x, y);
        let mut actor = ArenaActor::new(AnimationPlayer::with_directional_clips());
        actor.sync(self.clock, &self.held_keys);

        let mut character = Character::new(id, name, self.stats.clone(), actor);
        let mut hitboxes = Vec::with_capacity(Direction::ALL.len());
        for direction in Direction::ALL {
            let hitbox = self.world.attach_hitbox(body, direction.unit())?;
            character.set_hitbox(direction, hitbox);
            hitboxes.push(hitbox);
        }
        character.set_animations(AnimationTables::from_fn(|prefix, direction| {
            Some(directional_clip_name(prefix, direction))
        }));

        let machine = CharacterStateMachine::new(character, StandardHooks::new(self.tuning.clone()));
        self.index.insert(id, self.fighters.len());
        self.fighters.push(FighterSlot {
            machine,
            body,
            hitboxes,
            player,
            health: self.stats.max_health,
            spawn_point: Vec2::new(x, y),
            struck: HashSet::new(),
        });
        let slot = self.fighters.len() - 1;
        self.flush_commands(slot)?;

        info!("Spawned {} (id {}) at ({}, {})", name, id, x, y);
        Ok(id)
    }

    /// Raw key state mirrored to every fighter for input resynchronization
    pub fn sync_held_keys(&mut self, held_keys: &HashSet<KeyCode>) {
        self.held_keys.clone_from(held_keys);
    }

    /// Route a player action to the fighter bound to that player
    ///
    /// Only records input; nothing changes state until the next `tick`.
    pub fn handle_input(&mut self, event: InputEvent, now: Timestamp) {
        let InputTarget::Player(player) = event.target else {
            return;
        };
        if !event.action.is_character_action() {
            return;
        }
        self.clock = now;
        let held_keys = &self.held_keys;
        for slot in self.fighters.iter_mut().filter(|s| s.player == Some(player)) {
            slot.machine.character_mut().actor_mut().sync(now, held_keys);
            slot.machine.handle_action(event.action, event.pressed);
        }
    }

    /// Run one fixed update at `now`, advancing flipbooks and bodies by `dt`
    /// seconds
    pub fn tick(&mut self, now: Timestamp, dt: f32) -> Result<(), ArenaError> {
        self.clock = now;

        for slot in 0..self.fighters.len() {
            let held_keys = &self.held_keys;
            let fighter = &mut self.fighters[slot];
            fighter.machine.character_mut().actor_mut().sync(now, held_keys);
            fighter.machine.tick(now);
            self.flush_commands(slot)?;
        }

        self.resolve_hits()?;

        for slot in 0..self.fighters.len() {
            let fighter = &mut self.fighters[slot];
            if fighter.machine.character_mut().actor_mut().animator.update(dt) {
                fighter.machine.on_animation_finished();
                self.flush_commands(slot)?;
            }
        }

        self.world.advance(dt);
        self.respawn_fallen()
    }

    /// Let every started swing damage each fighter its hitbox touches, once
    fn resolve_hits(&mut self) -> Result<(), ArenaError> {
        let mut hits = Vec::new();
        for (slot, fighter) in self.fighters.iter_mut().enumerate() {
            if !fighter.machine.character().attack_started() {
                fighter.struck.clear();
                continue;
            }
            for &hitbox in &fighter.hitboxes {
                for body in self.world.hitbox_overlaps(hitbox) {
                    hits.push((slot, body));
                }
            }
        }

        for (slot, body) in hits {
            let Some(target) = self.character_for_body(body) else {
                continue;
            };
            let fighter = &mut self.fighters[slot];
            if fighter.struck.insert(target) {
                debug!("{} hit character {}", fighter.machine.character().name(), target);
                fighter.machine.character_mut().attack(target, 0);
                self.flush_commands(slot)?;
            }
        }
        Ok(())
    }

    fn character_for_body(&self, body: RigidBodyHandle) -> Option<CharacterId> {
        self.fighters
            .iter()
            .find(|f| f.body == body)
            .map(|f| f.machine.character().id())
    }

    /// Apply everything a fighter queued since the last flush
    fn flush_commands(&mut self, slot: usize) -> Result<(), ArenaError> {
        let (body, commands) = {
            let fighter = &mut self.fighters[slot];
            (fighter.body, fighter.machine.character_mut().actor_mut().take_commands())
        };
        for command in commands {
            match command {
                ActorCommand::SetVelocity(velocity) => self.world.set_velocity(body, velocity)?,
                ActorCommand::SetHitbox(hitbox, enabled) => {
                    self.world.set_hitbox_enabled(hitbox, enabled)?
                }
                ActorCommand::Damage { target, amount } => self.apply_damage(target, amount)?,
            }
        }
        Ok(())
    }

    /// Take `amount` off a fighter's health
    pub fn apply_damage(&mut self, target: CharacterId, amount: f32) -> Result<(), ArenaError> {
        let slot = *self
            .index
            .get(&target)
            .ok_or(ArenaError::UnknownCharacter(target))?;
        let fighter = &mut self.fighters[slot];
        fighter.health -= amount;
        debug!(
            "{} took {} damage, {} left",
            fighter.machine.character().name(),
            amount,
            fighter.health
        );
        Ok(())
    }

    fn respawn_fallen(&mut self) -> Result<(), ArenaError> {
        for slot in 0..self.fighters.len() {
            if self.fighters[slot].health > 0.0 {
                continue;
            }
            let held_keys = &self.held_keys;
            let max_health = self.stats.max_health;
            let fighter = &mut self.fighters[slot];
            info!("{} was defeated, respawning", fighter.machine.character().name());

            fighter.health = max_health;
            fighter.struck.clear();
            fighter.machine.character_mut().actor_mut().sync(self.clock, held_keys);
            fighter.machine.respawn();
            let (body, spawn) = (fighter.body, fighter.spawn_point);
            self.flush_commands(slot)?;
            self.world.set_position(body, spawn.x, spawn.y)?;
        }
        Ok(())
    }

    fn slot(&self, id: CharacterId) -> Option<&FighterSlot> {
        self.index.get(&id).map(|&slot| &self.fighters[slot])
    }

    pub fn health(&self, id: CharacterId) -> Option<f32> {
        self.slot(id).map(|f| f.health)
    }

    pub fn state(&self, id: CharacterId) -> Option<CharacterState> {
        self.slot(id).map(|f| f.machine.state())
    }

    pub fn velocity(&self, id: CharacterId) -> Option<Vec2> {
        self.slot(id).and_then(|f| self.world.velocity(f.body))
    }

    pub fn position(&self, id: CharacterId) -> Option<Vec2> {
        self.slot(id).and_then(|f| self.world.position(f.body))
    }

    pub fn fighter_count(&self) -> usize {
        self.fighters.len()
    }

    /// Drop all held input for every fighter (e.g. when the window loses focus)
    pub fn release_all_input(&mut self) {
        self.held_keys.clear();
        let (clock, held_keys) = (self.clock, &self.held_keys);
        for fighter in &mut self.fighters {
            fighter.machine.character_mut().actor_mut().sync(clock, held_keys);
            fighter.machine.reset_input();
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(CharacterStats::standard(), HookTuning::default())
    }
}
