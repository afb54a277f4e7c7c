// Monotonic time primitives

use std::time::Duration;

/// A point on the game's monotonic clock, measured from the clock origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The clock origin
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Create a timestamp from a duration since the clock origin
    pub fn from_duration(since_origin: Duration) -> Self {
        Self(since_origin)
    }

    /// Create a timestamp from milliseconds since the clock origin
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Time since the clock origin
    pub fn since_origin(&self) -> Duration {
        self.0
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    /// Whole milliseconds elapsed since `earlier`
    pub fn millis_since(&self, earlier: Timestamp) -> u64 {
        self.saturating_since(earlier).as_millis() as u64
    }
}

/// The last time a key went down, or the release sentinel
///
/// `Released` is declared first so the derived ordering places it below
/// every real timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum InputTime {
    #[default]
    Released,
    At(Timestamp),
}

impl InputTime {
    /// Stamp `now` when pressed, otherwise the release sentinel
    pub fn from_key(pressed: bool, now: Timestamp) -> Self {
        if pressed {
            Self::At(now)
        } else {
            Self::Released
        }
    }

    pub fn is_held(&self) -> bool {
        *self > Self::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_released_below_every_timestamp() {
        assert!(InputTime::Released < InputTime::At(Timestamp::ZERO));
        assert!(InputTime::Released < InputTime::At(Timestamp::from_millis(u64::MAX / 2)));
    }

    #[test]
    fn test_later_press_orders_higher() {
        let early = InputTime::At(Timestamp::from_millis(10));
        let late = InputTime::At(Timestamp::from_millis(11));
        assert!(late > early);
    }

    #[test]
    fn test_is_held() {
        assert!(!InputTime::Released.is_held());
        assert!(InputTime::At(Timestamp::ZERO).is_held());
        assert!(!InputTime::from_key(false, Timestamp::from_millis(5)).is_held());
    }

    #[test]
    fn test_millis_since_saturates() {
        let a = Timestamp::from_millis(100);
        let b = Timestamp::from_millis(250);
        assert_eq!(b.millis_since(a), 150);
        assert_eq!(a.millis_since(b), 0);
    }
}
