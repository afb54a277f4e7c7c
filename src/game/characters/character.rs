// Character data and the operations behavior hooks can call

use log::{trace, warn};
use winit::keyboard::KeyCode;

use super::actor::ActorFace;
use super::animation::AnimationTables;
use super::combat::{AbilityTimer, AttackTimer};
use super::direction::{Direction, DirectionMap};
use super::movement::MovementInput;
use super::stats::CharacterStats;
use crate::core::Timestamp;

/// Unique identifier for a character
pub type CharacterId = u32;

/// Collision regions keyed by the direction they cover
pub type HitboxRegistry<H> = DirectionMap<Option<H>>;

/// Keys re-read when input is resynchronized, paired with their direction
const RESYNC_KEYS: [(Direction, KeyCode); 4] = [
    (Direction::North, KeyCode::KeyW),
    (Direction::West, KeyCode::KeyA),
    (Direction::South, KeyCode::KeyS),
    (Direction::East, KeyCode::KeyD),
];

/// Everything a single fighter owns, plus the host it drives
///
/// The state machine sits on top of this; behavior hooks receive a mutable
/// reference to it so they can begin/finish attacks, move, or deal damage.
pub struct Character<A: ActorFace> {
    id: CharacterId,
    name: String,
    stats: CharacterStats,

    movement: MovementInput,
    moving: bool,
    /// Direction the character last moved toward
    move_direction: Direction,
    /// Direction used for idle animation and the active hitbox
    facing: Direction,

    attack: AttackTimer,
    ability: AbilityTimer,

    hitboxes: HitboxRegistry<A::Hitbox>,
    animations: AnimationTables<A::Animation>,

    actor: A,
}

impl<A: ActorFace> Character<A> {
    pub fn new(id: CharacterId, name: &str, stats: CharacterStats, actor: A) -> Self {
        let ability = AbilityTimer::new(stats.ability_cooldown);
        Self {
            id,
            name: name.to_string(),
            stats,
            movement: MovementInput::new(),
            moving: false,
            move_direction: Direction::South,
            facing: Direction::South,
            attack: AttackTimer::default(),
            ability,
            hitboxes: DirectionMap::from_fn(|_| None),
            animations: AnimationTables::default(),
            actor,
        }
    }

    // --- Setup -----------------------------------------------------------

    /// Register the hitbox for `direction`. The hitbox starts disabled.
    pub fn set_hitbox(&mut self, direction: Direction, hitbox: A::Hitbox) {
        self.actor.set_hitbox_collision(hitbox, false);
        self.hitboxes[direction] = Some(hitbox);
    }

    pub fn set_animations(&mut self, animations: AnimationTables<A::Animation>) {
        self.animations = animations;
    }

    pub fn animations_mut(&mut self) -> &mut AnimationTables<A::Animation> {
        &mut self.animations
    }

    // --- Input tracking --------------------------------------------------

    /// Stamp a movement key press or release
    pub fn update_movement_input(&mut self, direction: Direction, pressed: bool) {
        let now = self.actor.now();
        self.movement.update(direction, pressed, now);
        self.moving = self.movement.is_moving();
        trace!(
            "{}: {} {}",
            self.name,
            direction.name(),
            if pressed { "pressed" } else { "released" }
        );
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Face the most recently pressed held direction. Keeps the old facing
    /// when nothing is held.
    pub fn update_facing(&mut self) {
        if !self.moving {
            return;
        }
        if let Some(direction) = self.movement.most_recent() {
            self.move_direction = direction;
            self.facing = direction;
        }
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn move_direction(&self) -> Direction {
        self.move_direction
    }

    /// Re-read movement keys from the host and release attack/ability input
    ///
    /// Bypasses the normal callbacks, so it is meant for one-off
    /// resynchronization such as a respawn.
    pub fn reset_input(&mut self) {
        for (direction, key) in RESYNC_KEYS {
            let down = self.actor.first_player_key_down(key);
            self.update_movement_input(direction, down);
        }
        self.update_attack_input(false);
        // A release never activates the ability
        self.update_ability_input(false);
    }

    // --- Movement --------------------------------------------------------

    /// Walk in the current move direction at the character's move speed
    pub fn move_character(&mut self) {
        self.actor.set_velocity(self.stats.move_speed, self.move_direction);
    }

    pub fn set_velocity(&mut self, speed: f32, direction: Direction) {
        self.actor.set_velocity(speed, direction);
    }

    pub fn stop(&mut self) {
        self.actor.set_velocity(0.0, self.facing);
    }

    // --- Attack ----------------------------------------------------------

    /// Attack key callback. A rising edge starts an attack.
    pub fn update_attack_input(&mut self, active: bool) {
        let now = self.actor.now();
        if self.attack.update_input(active, now) {
            trace!("{}: attack pressed facing {}", self.name, self.facing.name());
        }
    }

    /// Switch on the facing hitbox; hits are possible until `finish_attack`
    pub fn begin_attack(&mut self, direction: Direction) {
        if direction != self.facing {
            trace!(
                "{}: begin_attack toward {} uses facing {}",
                self.name,
                direction.name(),
                self.facing.name()
            );
        }
        self.set_facing_hitbox(true);
        self.attack.mark_started();
    }

    /// End the attack and switch off the facing hitbox
    pub fn finish_attack(&mut self) {
        self.attack.finish();
        self.set_facing_hitbox(false);
    }

    fn set_facing_hitbox(&mut self, enabled: bool) {
        match self.hitboxes[self.facing] {
            Some(hitbox) => self.actor.set_hitbox_collision(hitbox, enabled),
            None => warn!("{}: no hitbox registered for {}", self.name, self.facing.name()),
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_active()
    }

    pub fn attack_started(&self) -> bool {
        self.attack.is_started()
    }

    pub fn attack_timer(&self) -> &AttackTimer {
        &self.attack
    }

    /// Damage `target` by the base damage times `2^damage_modifier`.
    /// Attacking yourself does nothing.
    pub fn attack(&mut self, target: CharacterId, damage_modifier: i32) {
        if target == self.id {
            return;
        }
        let amount = self.stats.scaled_damage(damage_modifier);
        self.actor.apply_damage(target, amount);
    }

    // --- Ability ---------------------------------------------------------

    /// Ability key callback. Returns true when the press may activate the
    /// ability; nothing is committed yet.
    ///
    /// The state machine fires the `ability_start` hook and then calls
    /// `activate_ability`.
    pub(super) fn update_ability_input(&mut self, active: bool) -> bool {
        let now = self.actor.now();
        self.ability.can_activate(active, now)
    }

    /// Mark the ability active and start its cooldown
    pub(super) fn activate_ability(&mut self) {
        let now = self.actor.now();
        self.ability.activate(now);
    }

    pub fn reset_cooldown(&mut self) {
        self.ability.reset_cooldown();
    }

    pub fn finish_ability(&mut self) {
        self.ability.finish();
    }

    pub fn is_ability_active(&self) -> bool {
        self.ability.is_active()
    }

    pub fn ability_timer(&self) -> &AbilityTimer {
        &self.ability
    }

    // --- Animation -------------------------------------------------------

    /// Play the idle clip for the current facing, if one is registered
    pub fn play_idle_animation(&mut self) {
        if let Some(clip) = &self.animations.idle[self.facing] {
            self.actor.play_animation(clip, true);
        }
    }

    /// Play the walking clip for the current facing, if one is registered
    pub fn play_walking_animation(&mut self) {
        if let Some(clip) = &self.animations.walking[self.facing] {
            self.actor.play_animation(clip, true);
        }
    }

    /// Play the attack clip for the current facing once
    pub fn play_attack_animation(&mut self) {
        if let Some(clip) = &self.animations.attack[self.facing] {
            self.actor.play_animation(clip, false);
        }
    }

    /// Play the ability clip for the current facing once
    pub fn play_ability_animation(&mut self) {
        if let Some(clip) = &self.animations.ability[self.facing] {
            self.actor.play_animation(clip, false);
        }
    }

    // --- Accessors -------------------------------------------------------

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn now(&self) -> Timestamp {
        self.actor.now()
    }

    pub fn actor(&self) -> &A {
        &self.actor
    }

    pub fn actor_mut(&mut self) -> &mut A {
        &mut self.actor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::testing::MockActor;
    use approx::assert_relative_eq;
    use glam::Vec2;

    fn character() -> Character<MockActor> {
        let mut c = Character::new(1, "hero", CharacterStats::standard(), MockActor::new());
        for (i, direction) in Direction::ALL.into_iter().enumerate() {
            c.set_hitbox(direction, i as u32);
        }
        c
    }

    fn press(c: &mut Character<MockActor>, ms: u64, direction: Direction, pressed: bool) {
        c.actor_mut().set_now(ms);
        c.update_movement_input(direction, pressed);
    }

    #[test]
    fn test_registered_hitboxes_start_disabled() {
        let c = character();
        for i in 0..4 {
            assert_eq!(c.actor().hitbox_enabled(i), Some(false));
        }
    }

    #[test]
    fn test_moving_flag_follows_input() {
        let mut c = character();
        assert!(!c.is_moving());
        press(&mut c, 10, Direction::East, true);
        assert!(c.is_moving());
        press(&mut c, 20, Direction::East, false);
        assert!(!c.is_moving());
    }

    #[test]
    fn test_facing_follows_last_press() {
        let mut c = character();
        press(&mut c, 10, Direction::North, true);
        press(&mut c, 20, Direction::West, true);
        c.update_facing();
        assert_eq!(c.facing(), Direction::West);
        assert_eq!(c.move_direction(), Direction::West);
    }

    #[test]
    fn test_facing_tie_uses_declaration_order() {
        let mut c = character();
        press(&mut c, 10, Direction::South, true);
        press(&mut c, 10, Direction::East, true);
        c.update_facing();
        assert_eq!(c.facing(), Direction::East);
    }

    #[test]
    fn test_facing_kept_when_not_moving() {
        let mut c = character();
        press(&mut c, 10, Direction::West, true);
        c.update_facing();
        press(&mut c, 20, Direction::West, false);
        c.update_facing();
        assert_eq!(c.facing(), Direction::West);
    }

    #[test]
    fn test_attack_self_does_nothing() {
        let mut c = character();
        for modifier in -2..=3 {
            c.attack(1, modifier);
        }
        assert!(c.actor().damage.is_empty());
    }

    #[test]
    fn test_attack_damage_scales_by_powers_of_two() {
        let mut c = character();
        for modifier in 0..=3 {
            c.attack(2, modifier);
        }
        let amounts: Vec<f32> = c.actor().damage.iter().map(|(_, amount)| *amount).collect();
        assert_eq!(amounts.len(), 4);
        for (amount, expected) in amounts.iter().zip([10.0, 20.0, 40.0, 80.0]) {
            assert_relative_eq!(*amount, expected);
        }
        assert!(c.actor().damage.iter().all(|(target, _)| *target == 2));
    }

    #[test]
    fn test_begin_and_finish_attack_toggle_facing_hitbox() {
        let mut c = character();
        press(&mut c, 10, Direction::East, true);
        c.update_facing();
        c.update_attack_input(true);

        c.begin_attack(Direction::East);
        assert!(c.attack_started());
        assert_eq!(c.actor().hitbox_enabled(1), Some(true));

        c.finish_attack();
        assert!(!c.is_attacking());
        assert!(!c.attack_started());
        assert_eq!(c.actor().hitbox_enabled(1), Some(false));
    }

    #[test]
    fn test_finish_attack_without_begin_disables_hitbox() {
        let mut c = character();
        c.actor_mut().hitbox_calls.clear();
        c.finish_attack();
        c.finish_attack();
        // South is the initial facing, registered as hitbox 2
        assert_eq!(c.actor().hitbox_calls, vec![(2, false), (2, false)]);
    }

    #[test]
    fn test_missing_hitbox_is_ignored() {
        let mut c = Character::new(1, "bare", CharacterStats::standard(), MockActor::new());
        c.update_attack_input(true);
        c.begin_attack(Direction::South);
        c.finish_attack();
        assert!(c.actor().hitbox_calls.is_empty());
    }

    #[test]
    fn test_move_character_uses_move_speed() {
        let mut c = character();
        press(&mut c, 10, Direction::North, true);
        c.update_facing();
        c.move_character();
        assert_eq!(c.actor().velocity, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_reset_input_reads_held_keys() {
        let mut c = character();
        c.actor_mut().set_now(50);
        c.actor_mut().keys_down.insert(KeyCode::KeyD);
        c.update_attack_input(true);
        c.reset_input();

        assert!(c.is_moving());
        c.update_facing();
        assert_eq!(c.facing(), Direction::East);
        assert!(!c.attack_timer().key_down());
    }

    #[test]
    fn test_missing_animation_is_skipped() {
        let mut c = character();
        c.play_idle_animation();
        c.play_walking_animation();
        assert!(c.actor().animations.is_empty());

        c.animations_mut().idle[Direction::South] = Some("idle_south".to_string());
        c.play_idle_animation();
        assert_eq!(c.actor().animations, vec![("idle_south".to_string(), true)]);
    }
}
