// Character stats - ALL FIGHTERS SHARE THE SAME STATS
// Differentiation comes from behavior hooks, not base stats

use std::time::Duration;

/// Fixed character stats - same for every fighter in the arena
#[derive(Debug, Clone)]
pub struct CharacterStats {
    // Movement
    /// Walking speed (units/second)
    pub move_speed: f32,

    // Combat
    /// Damage dealt by an unmodified attack
    pub attack_damage: f32,
    /// Minimum time between two ability activations
    pub ability_cooldown: Duration,
    /// Health points at spawn
    pub max_health: f32,
}

/// The one stat block used by all fighters
pub const BASE_STATS: CharacterStats = CharacterStats {
    move_speed: 10.0,

    attack_damage: 10.0,
    ability_cooldown: Duration::from_millis(2_000),
    max_health: 100.0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard character stats (same for all fighters)
    pub fn standard() -> Self {
        BASE_STATS
    }

    /// Damage for an attack scaled by `damage_modifier` powers of two
    pub fn scaled_damage(&self, damage_modifier: i32) -> f32 {
        self.attack_damage * 2f32.powi(damage_modifier)
    }
}
