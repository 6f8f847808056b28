use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::Clock;

pub const SECONDS_MS: u64 = 1000;
pub const MINUTES_MS: u64 = SECONDS_MS * 60;
pub const HOURS_MS: u64 = MINUTES_MS * 60;
pub const DAYS_MS: u64 = HOURS_MS * 24;
/// A month is a fixed 30 days. Changing this ratio would change the values
/// displayed for already-shared timer links.
pub const MONTHS_MS: u64 = DAYS_MS * 30;

/// Display units, declared finest first so the derived ordering ranks
/// `Seconds` lowest and `Months` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
}

impl Unit {
    /// All units, coarsest first. This is both the cascade order and the
    /// display order.
    pub const DESCENDING: [Unit; 5] = [
        Unit::Months,
        Unit::Days,
        Unit::Hours,
        Unit::Minutes,
        Unit::Seconds,
    ];

    pub fn size_ms(self) -> u64 {
        match self {
            Unit::Seconds => SECONDS_MS,
            Unit::Minutes => MINUTES_MS,
            Unit::Hours => HOURS_MS,
            Unit::Days => DAYS_MS,
            Unit::Months => MONTHS_MS,
        }
    }

    /// Key of this unit's label in the message tables.
    pub fn label_key(self) -> &'static str {
        match self {
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::Days => "days",
            Unit::Months => "months",
        }
    }
}

/// The decomposed distance between "now" and the target instant.
///
/// Every field is a non-negative remainder in the cascade
/// months → days → hours → minutes → seconds; the direction of the distance
/// only shows up in `finished`, never in the magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingDuration {
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// True iff the target instant is at or before "now".
    pub finished: bool,
    /// Most significant unit with a nonzero value; `Seconds` when all values
    /// are zero, since seconds are always shown.
    pub highest: Unit,
}

impl RemainingDuration {
    pub fn value(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Seconds => self.seconds,
            Unit::Minutes => self.minutes,
            Unit::Hours => self.hours,
            Unit::Days => self.days,
            Unit::Months => self.months,
        }
    }
}

/// Decompose the time between `now` and `target`.
///
/// An elapsed time of exactly zero counts as finished. Sub-second precision
/// is floored away, never rounded up.
pub fn time_remaining_at(target: DateTime<Utc>, now: DateTime<Utc>) -> RemainingDuration {
    let elapsed = target.timestamp_millis() - now.timestamp_millis();
    let finished = elapsed <= 0;
    let mut remaining = elapsed.unsigned_abs();
    let mut highest = None;

    let months = remaining / MONTHS_MS;
    remaining %= MONTHS_MS;
    if months > 0 && highest.is_none() {
        highest = Some(Unit::Months);
    }

    let days = remaining / DAYS_MS;
    remaining %= DAYS_MS;
    if days > 0 && highest.is_none() {
        highest = Some(Unit::Days);
    }

    let hours = remaining / HOURS_MS;
    remaining %= HOURS_MS;
    if hours > 0 && highest.is_none() {
        highest = Some(Unit::Hours);
    }

    let minutes = remaining / MINUTES_MS;
    remaining %= MINUTES_MS;
    if minutes > 0 && highest.is_none() {
        highest = Some(Unit::Minutes);
    }

    let seconds = remaining / SECONDS_MS;

    RemainingDuration {
        months,
        days,
        hours,
        minutes,
        seconds,
        finished,
        highest: highest.unwrap_or(Unit::Seconds),
    }
}

/// [`time_remaining_at`] with "now" read from the given clock.
pub fn time_remaining<C: Clock>(target: DateTime<Utc>, clock: &C) -> RemainingDuration {
    time_remaining_at(target, clock.now())
}
