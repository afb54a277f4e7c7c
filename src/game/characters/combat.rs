// Attack and ability timers

use std::time::Duration;

use crate::core::Timestamp;

/// Bookkeeping for the basic attack
#[derive(Debug, Clone, Default)]
pub struct AttackTimer {
    /// An attack is in progress (set on the key's rising edge)
    active: bool,
    /// The hitbox has been switched on for this attack
    started: bool,
    /// Raw state of the attack key
    key_down: bool,
    /// When the attack key went down, only meaningful while `active`
    down_time: Option<Timestamp>,
}

impl AttackTimer {
    /// Record the attack key. Returns true on a rising edge.
    pub fn update_input(&mut self, key_down: bool, now: Timestamp) -> bool {
        self.key_down = key_down;
        if !self.active && key_down {
            self.active = true;
            self.down_time = Some(now);
            return true;
        }
        false
    }

    pub fn mark_started(&mut self) {
        self.started = true;
    }

    /// End the attack and clear its timer
    pub fn finish(&mut self) {
        self.active = false;
        self.started = false;
        self.down_time = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn key_down(&self) -> bool {
        self.key_down
    }

    /// Milliseconds since the key went down, `None` when no attack is active
    pub fn elapsed_ms(&self, now: Timestamp) -> Option<u64> {
        if !self.active {
            return None;
        }
        self.down_time.map(|down| now.millis_since(down))
    }
}

/// Bookkeeping for the special ability and its cooldown
#[derive(Debug, Clone)]
pub struct AbilityTimer {
    cooldown: Duration,
    active: bool,
    key_down: bool,
    down_time: Option<Timestamp>,
    /// Cooldown runs from activation, not from release
    cooldown_start: Option<Timestamp>,
}

impl AbilityTimer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            active: false,
            key_down: false,
            down_time: None,
            cooldown_start: None,
        }
    }

    /// Check if `now` falls inside the cooldown window of the last activation
    pub fn in_cooldown(&self, now: Timestamp) -> bool {
        self.cooldown_start
            .is_some_and(|start| now.saturating_since(start) < self.cooldown)
    }

    /// Record the ability key. Returns true when a press may activate.
    ///
    /// Presses during the cooldown window or while the ability is already
    /// running are refused. Nothing is committed until [`Self::activate`].
    pub fn can_activate(&mut self, key_down: bool, now: Timestamp) -> bool {
        self.key_down = key_down;
        key_down && !self.active && !self.in_cooldown(now)
    }

    /// Start the ability and its cooldown at `now`
    pub fn activate(&mut self, now: Timestamp) {
        self.active = true;
        self.down_time = Some(now);
        self.cooldown_start = Some(now);
    }

    pub fn reset_cooldown(&mut self) {
        self.cooldown_start = None;
    }

    pub fn finish(&mut self) {
        self.active = false;
        self.down_time = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn key_down(&self) -> bool {
        self.key_down
    }

    /// Time left before the ability can fire again
    pub fn cooldown_remaining(&self, now: Timestamp) -> Duration {
        self.cooldown_start
            .map(|start| self.cooldown.saturating_sub(now.saturating_since(start)))
            .unwrap_or(Duration::ZERO)
    }

    /// Milliseconds since activation, `None` when the ability is not running
    pub fn elapsed_ms(&self, now: Timestamp) -> Option<u64> {
        if !self.active {
            return None;
        }
        self.down_time.map(|down| now.millis_since(down))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    /// Press or release the ability key, activating when allowed
    fn key(ability: &mut AbilityTimer, down: bool, ms: u64) -> bool {
        let ready = ability.can_activate(down, at(ms));
        if ready {
            ability.activate(at(ms));
        }
        ready
    }

    #[test]
    fn test_attack_rising_edge() {
        let mut attack = AttackTimer::default();
        assert!(attack.update_input(true, at(100)));
        assert!(attack.is_active());
        assert_eq!(attack.elapsed_ms(at(160)), Some(60));
    }

    #[test]
    fn test_attack_held_key_is_not_a_new_edge() {
        let mut attack = AttackTimer::default();
        attack.update_input(true, at(100));
        assert!(!attack.update_input(true, at(200)));
        // Down time keeps the first press
        assert_eq!(attack.elapsed_ms(at(250)), Some(150));
    }

    #[test]
    fn test_attack_release_keeps_attack_running() {
        let mut attack = AttackTimer::default();
        attack.update_input(true, at(0));
        attack.update_input(false, at(10));
        assert!(attack.is_active());
        assert!(!attack.key_down());
    }

    #[test]
    fn test_attack_finish_clears_everything() {
        let mut attack = AttackTimer::default();
        attack.update_input(true, at(0));
        attack.mark_started();
        attack.finish();
        assert!(!attack.is_active());
        assert!(!attack.is_started());
        assert_eq!(attack.elapsed_ms(at(50)), None);
    }

    #[test]
    fn test_ability_activates_and_blocks_while_active() {
        let mut ability = AbilityTimer::new(Duration::from_millis(1_000));
        assert!(key(&mut ability, true, 0));
        key(&mut ability, false, 10);
        assert!(!key(&mut ability, true, 5_000));
        assert!(ability.is_active());
    }

    #[test]
    fn test_ability_cooldown_window() {
        let mut ability = AbilityTimer::new(Duration::from_millis(1_000));
        assert!(key(&mut ability, true, 0));
        ability.finish();

        assert!(ability.in_cooldown(at(999)));
        assert!(!key(&mut ability, true, 999));
        assert!(!ability.is_active());

        assert!(!ability.in_cooldown(at(1_000)));
        assert!(key(&mut ability, true, 1_000));
    }

    #[test]
    fn test_ability_cooldown_remaining() {
        let mut ability = AbilityTimer::new(Duration::from_millis(1_000));
        assert_eq!(ability.cooldown_remaining(at(0)), Duration::ZERO);
        key(&mut ability, true, 100);
        assert_eq!(ability.cooldown_remaining(at(400)), Duration::from_millis(700));
        assert_eq!(ability.cooldown_remaining(at(5_000)), Duration::ZERO);
    }

    #[test]
    fn test_ability_reset_cooldown() {
        let mut ability = AbilityTimer::new(Duration::from_millis(1_000));
        key(&mut ability, true, 0);
        ability.finish();
        ability.reset_cooldown();
        assert!(key(&mut ability, true, 1));
    }

    #[test]
    fn test_ability_check_commits_nothing() {
        let mut ability = AbilityTimer::new(Duration::from_millis(1_000));
        assert!(ability.can_activate(true, at(0)));
        assert!(ability.key_down());
        assert!(!ability.is_active());
        assert!(!ability.in_cooldown(at(0)));
        assert_eq!(ability.elapsed_ms(at(10)), None);
    }

    #[test]
    fn test_ability_release_without_press_is_noop() {
        let mut ability = AbilityTimer::new(Duration::from_millis(1_000));
        assert!(!key(&mut ability, false, 0));
        assert!(!ability.is_active());
        assert!(!ability.in_cooldown(at(0)));
    }
}
