// Directional input tracking

use super::direction::{Direction, DirectionMap};
use crate::core::{InputTime, Timestamp};

/// When each movement key was last pressed
///
/// The table is the single source of truth for both the moving flag and the
/// facing direction.
#[derive(Debug, Clone, Default)]
pub struct MovementInput {
    pressed_at: DirectionMap<InputTime>,
}

impl MovementInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press (stamped with `now`) or a release
    pub fn update(&mut self, direction: Direction, pressed: bool, now: Timestamp) {
        self.pressed_at[direction] = InputTime::from_key(pressed, now);
    }

    /// Press time for a single direction
    pub fn pressed_at(&self, direction: Direction) -> InputTime {
        self.pressed_at[direction]
    }

    /// Check if any movement key is held
    pub fn is_moving(&self) -> bool {
        self.pressed_at.iter().any(|(_, time)| time.is_held())
    }

    /// The direction whose key went down most recently
    ///
    /// Ties go to the first direction in [`Direction::ALL`] order. Returns
    /// `None` when nothing is held.
    pub fn most_recent(&self) -> Option<Direction> {
        let mut pairs = self.pressed_at.iter();
        let (mut best, mut best_time) = pairs.next().map(|(d, t)| (d, *t))?;
        for (direction, time) in pairs {
            if *time > best_time {
                best = direction;
                best_time = *time;
            }
        }
        best_time.is_held().then_some(best)
    }

    /// Release every direction
    pub fn clear(&mut self) {
        self.pressed_at = DirectionMap::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn test_starts_released() {
        let input = MovementInput::new();
        assert!(!input.is_moving());
        assert_eq!(input.most_recent(), None);
        for direction in Direction::ALL {
            assert_eq!(input.pressed_at(direction), InputTime::Released);
        }
    }

    #[test]
    fn test_moving_iff_any_subset_held() {
        for mask in 0u8..16 {
            let mut input = MovementInput::new();
            for (bit, direction) in Direction::ALL.into_iter().enumerate() {
                input.update(direction, mask & (1 << bit) != 0, at(1 + bit as u64));
            }
            assert_eq!(input.is_moving(), mask != 0, "mask {mask:#06b}");
        }
    }

    #[test]
    fn test_release_stops_moving() {
        let mut input = MovementInput::new();
        input.update(Direction::East, true, at(5));
        assert!(input.is_moving());
        input.update(Direction::East, false, at(6));
        assert!(!input.is_moving());
    }

    #[test]
    fn test_most_recent_wins() {
        let mut input = MovementInput::new();
        input.update(Direction::North, true, at(10));
        input.update(Direction::West, true, at(20));
        input.update(Direction::East, true, at(15));
        assert_eq!(input.most_recent(), Some(Direction::West));
    }

    #[test]
    fn test_tie_goes_to_declaration_order() {
        let mut input = MovementInput::new();
        input.update(Direction::West, true, at(10));
        input.update(Direction::East, true, at(10));
        assert_eq!(input.most_recent(), Some(Direction::East));

        input.update(Direction::North, true, at(10));
        assert_eq!(input.most_recent(), Some(Direction::North));
    }

    #[test]
    fn test_releasing_latest_falls_back() {
        let mut input = MovementInput::new();
        input.update(Direction::South, true, at(1));
        input.update(Direction::East, true, at(2));
        input.update(Direction::East, false, at(3));
        assert_eq!(input.most_recent(), Some(Direction::South));
    }

    #[test]
    fn test_clear() {
        let mut input = MovementInput::new();
        input.update(Direction::South, true, at(1));
        input.clear();
        assert!(!input.is_moving());
    }
}
