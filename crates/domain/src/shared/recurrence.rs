use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Timelike};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// How the next occurrence of a `Reminder` is computed from the moment it fired.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Recurrence {
    /// Same hour and minute, one day later
    Daily,
    /// Exactly seven days later
    Weekly,
    /// A fixed number of hours later
    #[serde(rename_all = "camelCase")]
    Custom { interval_hours: i64 },
    /// At a fixed wall clock time every day
    #[serde(rename_all = "camelCase")]
    Specific { time_of_day: TimeOfDay },
}

impl Recurrence {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Custom { .. } => "custom",
            Self::Specific { .. } => "specific",
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Self::Custom { interval_hours } => *interval_hours > 0,
            _ => true,
        }
    }

    /// Computes the next occurrence after `now`.
    ///
    /// Never fails: input that cannot be scheduled (a non positive interval,
    /// a wall clock time that does not exist on that date or an overflow)
    /// falls back to `now` + 24 hours.
    pub fn next_occurrence<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let fallback = now.clone() + Duration::hours(24);

        match self {
            Self::Daily => {
                let time = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0);
                time.and_then(|time| {
                    let date = fallback.date_naive();
                    now.timezone()
                        .from_local_datetime(&date.and_time(time))
                        .earliest()
                })
                .unwrap_or(fallback)
            }
            Self::Weekly => now.clone() + Duration::days(7),
            Self::Custom { interval_hours } if *interval_hours > 0 => {
                Duration::try_hours(*interval_hours)
                    .and_then(|interval| now.clone().checked_add_signed(interval))
                    .unwrap_or(fallback)
            }
            Self::Custom { .. } => fallback,
            Self::Specific { time_of_day } => {
                let today = now
                    .timezone()
                    .from_local_datetime(&now.date_naive().and_time(time_of_day.as_naive_time()))
                    .earliest();
                match today {
                    Some(next) if next <= *now => next + Duration::hours(24),
                    Some(next) => next,
                    None => fallback,
                }
            }
        }
    }

    /// Computes the next occurrence in millis on the server's local clock
    pub fn next_timestamp_millis(&self, now_ts: i64) -> i64 {
        match Local.timestamp_millis_opt(now_ts).single() {
            Some(now) => self.next_occurrence(&now).timestamp_millis(),
            None => now_ts + 1000 * 60 * 60 * 24,
        }
    }
}

/// A wall clock time formatted as `HH:MM`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidTimeOfDayError> {
        if hour > 23 || minute > 59 {
            return Err(InvalidTimeOfDayError::OutOfRange(hour, minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    fn as_naive_time(&self) -> NaiveTime {
        // Range is checked on construction
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimeOfDayError {
    #[error("Malformed time of day: {0}, expected HH:MM")]
    Malformed(String),
    #[error("Time of day out of range: {0:02}:{1:02}")]
    OutOfRange(u32, u32),
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidTimeOfDayError::Malformed(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(malformed)?;
        // Hour may be a single digit like "9:05", minute must be two digits
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(malformed());
        }
        if !hour.chars().chain(minute.chars()).all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        let hour = hour.parse::<u32>().map_err(|_| malformed())?;
        let minute = minute.parse::<u32>().map_err(|_| malformed())?;

        Self::new(hour, minute)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeOfDayVisitor;

        impl<'de> Visitor<'de> for TimeOfDayVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A time of day formatted as HH:MM")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeOfDay, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<TimeOfDay>()
                    .map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(TimeOfDayVisitor)
    }
}
