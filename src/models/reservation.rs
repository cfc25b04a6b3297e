//! Reservation model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::{Role, SlotTime};

/// Stable reservation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Map an old `field_date_time_user` key onto a deterministic id
    pub fn from_legacy_key(key: &str) -> Self {
        let normalized: String = key.chars().filter(|c| !c.is_whitespace()).collect();
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, normalized.as_bytes()))
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ReservationId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Uuid::parse_str(s)
            .map(Self)
            .unwrap_or_else(|_| Self::from_legacy_key(s)))
    }
}

impl<'de> Deserialize<'de> for ReservationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(id) = raw.parse::<ReservationId>();
        Ok(id)
    }
}

/// Unique key of a bookable slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub field: String,
    pub date: NaiveDate,
    pub time: SlotTime,
}

/// Booking record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub field: String,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub user: String,
    /// Role of the account that made the booking
    #[serde(default)]
    pub role: Role,
}

impl Reservation {
    pub fn new(field: String, date: NaiveDate, time: SlotTime, user: String, role: Role) -> Self {
        Self {
            id: ReservationId::new(),
            field,
            date,
            time,
            user,
            role,
        }
    }

    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            field: self.field.clone(),
            date: self.date,
            time: self.time,
        }
    }

    /// Past, non-admin bookings move to the archive
    pub fn is_archivable(&self, today: NaiveDate) -> bool {
        self.date < today && !self.role.is_admin()
    }

    /// Upcoming bookings count against the per-user cap
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}
