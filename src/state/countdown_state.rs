//! Countdown state structure and duration decomposition

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days between process start and the launch target
pub const LAUNCH_OFFSET_DAYS: i64 = 50;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until launch, broken down into calendar units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingTime {
    /// All fields zero
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Value shown before the first tick lands
    pub fn initial() -> Self {
        Self {
            days: LAUNCH_OFFSET_DAYS as u64,
            ..Self::ZERO
        }
    }

    /// Decompose a millisecond duration. Negative input decomposes to zero.
    ///
    /// Each unit is taken from the remainder of the next larger one, so
    /// only the sub-second part is lost.
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: (ms / MS_PER_DAY) as u64,
            hours: ((ms % MS_PER_DAY) / MS_PER_HOUR) as u64,
            minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
            seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
        }
    }

    /// Recombine into whole milliseconds
    pub fn total_millis(&self) -> u64 {
        self.days * MS_PER_DAY as u64
            + self.hours * MS_PER_HOUR as u64
            + self.minutes * MS_PER_MINUTE as u64
            + self.seconds * MS_PER_SECOND as u64
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Fields zero-padded to two digits, largest unit first
    pub fn padded(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|v| format!("{:02}", v))
    }
}

impl Default for RemainingTime {
    fn default() -> Self {
        Self::initial()
    }
}

/// Snapshot published by the countdown clock on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub target: DateTime<Utc>,
    pub remaining: RemainingTime,
    /// Set once the target has been reached; no updates follow
    pub launched: bool,
}

impl CountdownState {
    /// Countdown towards `target`, showing the pre-tick initial value
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            remaining: RemainingTime::initial(),
            launched: false,
        }
    }

    /// Countdown whose target is the launch offset past `now`
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self::new(launch_target(now))
    }

    /// Recompute the remainder for `now`.
    ///
    /// Returns `false` once launched. A launched state is clamped to zero
    /// and never changes again.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.launched {
            return false;
        }

        let remaining_ms = (self.target - now).num_milliseconds();
        if remaining_ms > 0 {
            self.remaining = RemainingTime::from_millis(remaining_ms);
            true
        } else {
            self.remaining = RemainingTime::ZERO;
            self.launched = true;
            false
        }
    }
}

/// Launch instant for a clock started at `now`
pub fn launch_target(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(LAUNCH_OFFSET_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn decomposition_loses_only_sub_second_part() {
        let samples: [i64; 9] = [
            0,
            1,
            999,
            1_000,
            59_999,
            3_600_000,
            86_399_999,
            86_400_000 * 50 + 1_234,
            7_654_321_987,
        ];

        for d in samples {
            let recombined = RemainingTime::from_millis(d).total_millis() as i64;
            assert!(recombined <= d, "{} recombined to {}", d, recombined);
            assert!(recombined > d - 1_000, "{} recombined to {}", d, recombined);
        }
    }

    #[test]
    fn units_stay_below_their_modulus() {
        let t = RemainingTime::from_millis(86_400_000 * 3 - 1);
        assert_eq!(
            t,
            RemainingTime {
                days: 2,
                hours: 23,
                minutes: 59,
                seconds: 59
            }
        );
    }

    #[test]
    fn negative_duration_is_zero() {
        assert_eq!(RemainingTime::from_millis(-5_000), RemainingTime::ZERO);
    }

    #[test]
    fn fifty_days_then_one_second_later() {
        let now = reference_now();
        let mut state = CountdownState::starting_at(now);

        assert!(state.tick(now));
        assert_eq!(
            state.remaining,
            RemainingTime {
                days: 50,
                hours: 0,
                minutes: 0,
                seconds: 0
            }
        );

        assert!(state.tick(now + Duration::seconds(1)));
        assert_eq!(
            state.remaining,
            RemainingTime {
                days: 49,
                hours: 23,
                minutes: 59,
                seconds: 59
            }
        );
    }

    #[test]
    fn reaching_target_clamps_and_launches() {
        let now = reference_now();
        let mut state = CountdownState::new(now + Duration::milliseconds(1_500));

        assert!(state.tick(now));
        assert_eq!(state.remaining.seconds, 1);

        assert!(!state.tick(now + Duration::seconds(2)));
        assert!(state.launched);
        assert!(state.remaining.is_zero());

        // Time going backwards does not revive a launched countdown
        assert!(!state.tick(now));
        assert!(state.remaining.is_zero());
    }

    #[test]
    fn padding_is_two_digits_minimum() {
        let t = RemainingTime {
            days: 123,
            hours: 5,
            minutes: 0,
            seconds: 42,
        };
        assert_eq!(t.padded(), ["123", "05", "00", "42"]);
    }
}
