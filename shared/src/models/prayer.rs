//! Prayer schedule models and time-of-day calculations

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The six daily prayer entries, in chronological order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrayerName {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub fn label(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

/// One day's prayer schedule
///
/// Times are wall-clock `HH:MM` strings in 24-hour local time, assumed to
/// be monotonically increasing in the order fajr through isha. The struct
/// is immutable once fetched for a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrayerSchedule {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    /// Human-readable date the schedule applies to
    pub date: String,
}

impl PrayerSchedule {
    /// Approximate schedule used when the upstream provider is unreachable
    pub fn fallback(date: String) -> Self {
        Self {
            fajr: "05:30".to_string(),
            sunrise: "06:45".to_string(),
            dhuhr: "12:30".to_string(),
            asr: "15:45".to_string(),
            maghrib: "18:30".to_string(),
            isha: "19:45".to_string(),
            date,
        }
    }

    /// All entries paired with their raw time strings, in schedule order
    pub fn entries(&self) -> [(PrayerName, &str); 6] {
        [
            (PrayerName::Fajr, self.fajr.as_str()),
            (PrayerName::Sunrise, self.sunrise.as_str()),
            (PrayerName::Dhuhr, self.dhuhr.as_str()),
            (PrayerName::Asr, self.asr.as_str()),
            (PrayerName::Maghrib, self.maghrib.as_str()),
            (PrayerName::Isha, self.isha.as_str()),
        ]
    }

    /// Parse the time of one entry, `None` if the stored string is malformed
    pub fn time_of(&self, prayer: PrayerName) -> Option<NaiveTime> {
        let raw = match prayer {
            PrayerName::Fajr => &self.fajr,
            PrayerName::Sunrise => &self.sunrise,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
        };
        parse_time_of_day(raw)
    }

    pub fn maghrib_time(&self) -> Option<NaiveTime> {
        self.time_of(PrayerName::Maghrib)
    }

    /// First prayer strictly later than `now`, `None` once isha has passed
    /// (or if every entry is malformed)
    pub fn next_prayer(&self, now: NaiveTime) -> Option<(PrayerName, NaiveTime)> {
        self.entries()
            .iter()
            .filter_map(|(name, raw)| parse_time_of_day(raw).map(|t| (*name, t)))
            .find(|(_, t)| *t > now)
    }
}

/// Parse an `HH:MM` 24-hour time-of-day string
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Whole minutes from `now` until `target` interpreted on `now`'s calendar
/// date, floored. Negative means the target has already passed today;
/// callers treat negative as "passed, no alert". Both values are assumed
/// to share one local frame, no timezone conversion is applied.
pub fn minutes_until(target: NaiveTime, now: NaiveDateTime) -> i64 {
    let target_instant = now.date().and_time(target);
    (target_instant - now).num_milliseconds().div_euclid(60_000)
}

/// Remaining time split for display, built from a `minutes_until` result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRemaining {
    pub hours: i64,
    pub minutes: i64,
    pub total_minutes: i64,
}

impl TimeRemaining {
    /// `None` when the target has already passed
    pub fn from_total_minutes(total_minutes: i64) -> Option<Self> {
        if total_minutes < 0 {
            return None;
        }
        Some(Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
            total_minutes,
        })
    }
}
