//! Time utilities

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local wall-clock time
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Server local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Parse `YYYY-MM-DD HH:MM`
    pub fn at(datetime: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M")
            .ok()
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
