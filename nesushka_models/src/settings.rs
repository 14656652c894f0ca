use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use thiserror::Error;

use crate::user::UserId;

/// Time of day a reminder fires, local to the user. Minute granularity:
/// seconds and below are zeroed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized = inner
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .expect("Will never fail.");
        Self(normalized)
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }

    pub fn into_time(self) -> NaiveTime {
        self.0
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(20, 0, 0).expect("Will never fail."))
    }
}

impl FromStr for ReminderTime {
    type Err = ParseReminderTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|_| ParseReminderTimeError(s.to_string()))?;
        Ok(Self::new(time))
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

#[derive(Debug, Error)]
#[error("invalid reminder time {0:?}, expected HH:MM")]
pub struct ParseReminderTimeError(pub String);

/// Signed offset from UTC, stored as whole minutes. Parsed from a
/// "±HH:MM" string once, when the user sets it; everything downstream
/// works with the validated integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset(i32);

/// Largest offset in use anywhere on the planet.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

impl UtcOffset {
    pub fn from_minutes(minutes: i32) -> Result<Self, ParseUtcOffsetError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ParseUtcOffsetError(format!("{minutes} minutes")));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }

    /// Wall-clock time at this offset for the given UTC instant.
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.naive_utc() + TimeDelta::minutes(self.0 as i64)
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self(180) // +03:00
    }
}

impl FromStr for UtcOffset {
    type Err = ParseUtcOffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseUtcOffsetError(s.to_string());

        let (sign, rest) = match s.split_at_checked(1) {
            Some(("+", rest)) => (1, rest),
            Some(("-", rest)) => (-1, rest),
            _ => return Err(err()),
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(err)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(err());
        }
        let hours: i32 = hours.parse().map_err(|_| err())?;
        let minutes: i32 = minutes.parse().map_err(|_| err())?;
        if minutes >= 60 {
            return Err(err());
        }

        Self::from_minutes(sign * (hours * 60 + minutes)).map_err(|_| err())
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

#[derive(Debug, Error)]
#[error("invalid UTC offset {0:?}, expected ±HH:MM")]
pub struct ParseUtcOffsetError(pub String);

/// Per-user reminder configuration. One row per user, created lazily
/// with defaults on first mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSettings {
    pub user_id: UserId,
    pub enabled: bool,
    pub remind_at: ReminderTime,
    pub utc_offset: UtcOffset,
}

impl ReminderSettings {
    pub fn defaults_for(user_id: UserId) -> Self {
        Self {
            user_id,
            enabled: false,
            remind_at: ReminderTime::default(),
            utc_offset: UtcOffset::default(),
        }
    }
}
