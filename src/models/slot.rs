//! Slot labels and the daily slot grid

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    constants::{TIME_FORMAT, slots},
    utils::validation::is_slot_label,
};

/// Start time of a slot, written as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Parse a strict `HH:MM` label
    pub fn parse(label: &str) -> Option<Self> {
        if !is_slot_label(label) {
            return None;
        }
        NaiveTime::parse_from_str(label, TIME_FORMAT).ok().map(Self)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn start(&self) -> NaiveTime {
        self.0
    }

    pub fn length() -> Duration {
        Duration::minutes(slots::LENGTH_MINUTES)
    }

    /// All slot starts of a day, from the first hour to the last hour inclusive
    pub fn grid() -> Vec<SlotTime> {
        let first = slots::FIRST_HOUR * 60;
        let last = slots::LAST_HOUR * 60;

        (first..=last)
            .step_by(slots::LENGTH_MINUTES as usize)
            .filter_map(|minutes| Self::from_hm(minutes / 60, minutes % 60))
            .collect()
    }

    pub fn is_on_grid(&self) -> bool {
        let minutes = self.0.hour() * 60 + self.0.minute();
        let first = slots::FIRST_HOUR * 60;
        let last = slots::LAST_HOUR * 60;

        self.0.second() == 0
            && (first..=last).contains(&minutes)
            && (minutes - first) % slots::LENGTH_MINUTES as u32 == 0
    }

    /// Whether this slot on `date` is already over at `now`
    pub fn has_ended(&self, date: NaiveDate, now: NaiveDateTime) -> bool {
        date.and_time(self.0) + Self::length() <= now
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map(Self)
            .map_err(|_| serde::de::Error::custom(format!("invalid slot time: {raw}")))
    }
}
