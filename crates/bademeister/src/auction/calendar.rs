use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::Serialize;

/// A fixed weekday and wall-clock time that repeats every week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyMoment {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl WeeklyMoment {
    pub fn new(weekday: Weekday, hour: u32, minute: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self { weekday, time })
    }

    fn in_week_of(&self, now: NaiveDateTime) -> NaiveDateTime {
        let offset = i64::from(self.weekday.num_days_from_monday())
            - i64::from(now.weekday().num_days_from_monday());
        (now.date() + Duration::days(offset)).and_time(self.time)
    }

    /// First occurrence strictly after `now`.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let candidate = self.in_week_of(now);
        if candidate > now {
            candidate
        } else {
            candidate + Duration::weeks(1)
        }
    }

    /// Latest occurrence at or before `now`.
    pub fn last_at_or_before(&self, now: NaiveDateTime) -> NaiveDateTime {
        let candidate = self.in_week_of(now);
        if candidate <= now {
            candidate
        } else {
            candidate - Duration::weeks(1)
        }
    }
}

/// Rejected `weekday HH:MM` text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected '<weekday> <HH:MM>', e.g. 'thu 23:00', got '{0}'")]
pub struct InvalidWeeklyMoment(pub String);

/// Parses `thu 23:00`, `Friday 15:00`, and similar.
impl FromStr for WeeklyMoment {
    type Err = InvalidWeeklyMoment;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidWeeklyMoment(raw.to_string());
        let mut parts = raw.split_whitespace();
        let (Some(day), Some(clock), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let weekday = day.parse::<Weekday>().map_err(|_| invalid())?;
        let time = NaiveTime::parse_from_str(clock, "%H:%M").map_err(|_| invalid())?;
        Self::new(weekday, time.hour(), time.minute()).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionPhase {
    /// Bids are accepted until the weekly deadline.
    Open,
    /// Between the deadline and the weekly reset.
    Closed,
}

/// Weekly rhythm of the auction. By default bidding closes Thursday 23:00
/// and everything resets Friday 15:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionCalendar {
    pub deadline: WeeklyMoment,
    pub reset: WeeklyMoment,
}

impl Default for AuctionCalendar {
    fn default() -> Self {
        Self {
            deadline: WeeklyMoment {
                weekday: Weekday::Thu,
                time: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
            },
            reset: WeeklyMoment {
                weekday: Weekday::Fri,
                time: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default(),
            },
        }
    }
}

impl AuctionCalendar {
    pub fn phase(&self, now: NaiveDateTime) -> AuctionPhase {
        if self.deadline.last_at_or_before(now) > self.reset.last_at_or_before(now) {
            AuctionPhase::Closed
        } else {
            AuctionPhase::Open
        }
    }

    pub fn next_deadline(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.deadline.next_after(now)
    }

    pub fn next_reset(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.reset.next_after(now)
    }

    pub fn status(&self, now: NaiveDateTime) -> ScheduleStatus {
        let phase = self.phase(now);
        let next_deadline = self.next_deadline(now);
        let next_reset = self.next_reset(now);
        let until = match phase {
            AuctionPhase::Open => next_deadline,
            AuctionPhase::Closed => next_reset,
        };

        ScheduleStatus {
            phase,
            next_deadline,
            next_reset,
            countdown: Countdown::between(now, until).to_string(),
        }
    }
}

/// Snapshot of where the week stands, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleStatus {
    pub phase: AuctionPhase,
    pub next_deadline: NaiveDateTime,
    pub next_reset: NaiveDateTime,
    /// Time left until the phase changes.
    pub countdown: String,
}

/// Remaining time, rendered as `1d 02:03:04` (days omitted when zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown(Duration);

impl Countdown {
    pub fn between(now: NaiveDateTime, target: NaiveDateTime) -> Self {
        Self((target - now).max(Duration::zero()))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.num_seconds();
        let days = total / 86_400;
        let hours = (total % 86_400) / 3_600;
        let minutes = (total % 3_600) / 60;
        let seconds = total % 60;

        if days > 0 {
            write!(f, "{days}d ")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}
