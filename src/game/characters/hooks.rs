// Pluggable per-state behavior

use log::debug;

use super::actor::ActorFace;
use super::character::Character;

/// Game-design behavior the state machine calls into
///
/// The machine owns timing and transitions; hooks decide what a state
/// actually does. Every method has a usable default so a fighter only
/// overrides what makes it different.
pub trait BehaviorHooks<A: ActorFace> {
    /// Runs every tick while idle
    fn idle_state(&mut self, _character: &mut Character<A>) {}

    /// Runs every tick while walking
    fn walking_state(&mut self, character: &mut Character<A>) {
        character.move_character();
    }

    /// Runs every tick of an attack until the hitbox is switched on.
    /// Responsible for calling `begin_attack`.
    fn attack_state(&mut self, character: &mut Character<A>, _elapsed_ms: u64, _key_down: bool) {
        let facing = character.facing();
        character.begin_attack(facing);
    }

    /// Runs once when the ability activates
    fn ability_start(&mut self, _character: &mut Character<A>) {}

    /// Runs every tick while the ability is active.
    /// Responsible for eventually calling `finish_ability`.
    fn ability_state(&mut self, character: &mut Character<A>, _elapsed_ms: u64, _key_down: bool) {
        character.finish_ability();
    }

    /// Runs once when leaving the ability state
    fn ability_end(&mut self, _character: &mut Character<A>) {}

    /// The host finished playing a one-shot animation
    fn animation_finished(&mut self, character: &mut Character<A>) {
        if character.attack_started() {
            character.finish_attack();
        }
    }
}

/// Hooks that keep every default
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl<A: ActorFace> BehaviorHooks<A> for DefaultHooks {}

/// Timing for [`StandardHooks`]
#[derive(Debug, Clone)]
pub struct HookTuning {
    /// How long the attack key may be held before the swing fires
    pub attack_windup_ms: u64,
    /// Dash speed while the ability runs (units/second)
    pub dash_speed: f32,
    /// How long the dash lasts
    pub dash_duration_ms: u64,
}

impl Default for HookTuning {
    fn default() -> Self {
        Self {
            attack_windup_ms: 80,
            dash_speed: 30.0,
            dash_duration_ms: 150,
        }
    }
}

/// Sword-and-dash fighter
///
/// The swing fires when the key is released or after the wind-up, and ends
/// when its one-shot clip finishes. The ability is a short dash toward the
/// facing direction.
#[derive(Debug, Clone, Default)]
pub struct StandardHooks {
    tuning: HookTuning,
}

impl StandardHooks {
    pub fn new(tuning: HookTuning) -> Self {
        Self { tuning }
    }
}

impl<A: ActorFace> BehaviorHooks<A> for StandardHooks {
    fn attack_state(&mut self, character: &mut Character<A>, elapsed_ms: u64, key_down: bool) {
        if key_down && elapsed_ms < self.tuning.attack_windup_ms {
            return;
        }
        character.play_attack_animation();
        let facing = character.facing();
        character.begin_attack(facing);
    }

    fn ability_start(&mut self, character: &mut Character<A>) {
        debug!("{}: dash toward {}", character.name(), character.facing().name());
        character.play_ability_animation();
    }

    fn ability_state(&mut self, character: &mut Character<A>, elapsed_ms: u64, _key_down: bool) {
        if elapsed_ms < self.tuning.dash_duration_ms {
            let facing = character.facing();
            character.set_velocity(self.tuning.dash_speed, facing);
        } else {
            character.finish_ability();
        }
    }

    fn ability_end(&mut self, character: &mut Character<A>) {
        character.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::direction::Direction;
    use crate::game::characters::stats::CharacterStats;
    use crate::game::characters::testing::MockActor;
    use glam::Vec2;

    fn character() -> Character<MockActor> {
        let mut c = Character::new(1, "hero", CharacterStats::standard(), MockActor::new());
        c.set_hitbox(Direction::South, 2);
        c.animations_mut().attack[Direction::South] = Some("attack_south".to_string());
        c.animations_mut().ability[Direction::South] = Some("ability_south".to_string());
        c
    }

    #[test]
    fn test_default_walking_moves() {
        let mut c = character();
        DefaultHooks.walking_state(&mut c);
        assert_eq!(c.actor().velocity, Vec2::new(0.0, -10.0));
    }

    #[test]
    fn test_default_attack_begins_immediately() {
        let mut c = character();
        c.update_attack_input(true);
        DefaultHooks.attack_state(&mut c, 0, true);
        assert!(c.attack_started());
    }

    #[test]
    fn test_standard_attack_waits_for_windup() {
        let mut hooks = StandardHooks::default();
        let mut c = character();
        c.update_attack_input(true);

        hooks.attack_state(&mut c, 10, true);
        assert!(!c.attack_started());

        hooks.attack_state(&mut c, 80, true);
        assert!(c.attack_started());
        assert_eq!(c.actor().animations, vec![("attack_south".to_string(), false)]);
    }

    #[test]
    fn test_standard_attack_fires_on_release() {
        let mut hooks = StandardHooks::default();
        let mut c = character();
        c.update_attack_input(true);
        hooks.attack_state(&mut c, 5, false);
        assert!(c.attack_started());
    }

    #[test]
    fn test_animation_finished_ends_started_attack() {
        let mut hooks = StandardHooks::default();
        let mut c = character();
        c.update_attack_input(true);
        hooks.attack_state(&mut c, 100, true);

        hooks.animation_finished(&mut c);
        assert!(!c.is_attacking());
        assert_eq!(c.actor().hitbox_enabled(2), Some(false));
    }

    #[test]
    fn test_animation_finished_ignores_unstarted_attack() {
        let mut hooks = StandardHooks::default();
        let mut c = character();
        c.update_attack_input(true);
        hooks.animation_finished(&mut c);
        assert!(c.is_attacking());
    }

    #[test]
    fn test_dash_then_finish() {
        let mut hooks = StandardHooks::default();
        let mut c = character();
        assert!(c.update_ability_input(true));
        c.activate_ability();

        hooks.ability_start(&mut c);
        hooks.ability_state(&mut c, 50, true);
        assert_eq!(c.actor().velocity, Vec2::new(0.0, -30.0));
        assert!(c.is_ability_active());

        hooks.ability_state(&mut c, 150, true);
        assert!(!c.is_ability_active());

        hooks.ability_end(&mut c);
        assert_eq!(c.actor().velocity, Vec2::ZERO);
    }
}
