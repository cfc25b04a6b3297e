//! Reservation repository
//!
//! All changes to the active list go through here so the slot index stays
//! in step with it.

use chrono::NaiveDate;

use crate::{
    db::Database,
    error::{AppError, AppResult},
    models::{Reservation, ReservationId, SlotKey},
};

/// Repository for active and archived reservations
pub struct ReservationRepository;

impl ReservationRepository {
    /// Active reservations on a date, in booking order
    pub fn list_for_date(db: &Database, date: NaiveDate) -> Vec<Reservation> {
        db.reservations
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect()
    }

    /// Find an active reservation by id
    pub fn find_by_id<'a>(db: &'a Database, id: &ReservationId) -> Option<&'a Reservation> {
        db.reservations.iter().find(|r| &r.id == id)
    }

    /// Find the active reservation holding a slot
    pub fn find_by_slot<'a>(db: &'a Database, key: &SlotKey) -> Option<&'a Reservation> {
        let id = db.slot_index.get(key)?;
        Self::find_by_id(db, id)
    }

    /// Insert a reservation; fails if its slot is already held
    pub fn insert(db: &mut Database, reservation: Reservation) -> AppResult<()> {
        let key = reservation.slot_key();
        if db.slot_index.contains_key(&key) {
            return Err(AppError::SlotAlreadyBooked);
        }

        db.slot_index.insert(key, reservation.id);
        db.reservations.push(reservation);
        Ok(())
    }

    /// Remove an active reservation by id. If an older document left a
    /// second booking on the same slot, the index moves over to it.
    pub fn remove(db: &mut Database, id: &ReservationId) -> AppResult<Reservation> {
        let index = db
            .reservations
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Reservation {id} not found")))?;

        let removed = db.reservations.remove(index);
        let key = removed.slot_key();
        if db.slot_index.get(&key) == Some(&removed.id) {
            match db.reservations.iter().find(|r| r.slot_key() == key) {
                Some(other) => {
                    db.slot_index.insert(key, other.id);
                }
                None => {
                    db.slot_index.remove(&key);
                }
            }
        }
        Ok(removed)
    }

    /// Active reservations held by a user
    pub fn count_for_user(db: &Database, username: &str) -> usize {
        db.reservations.iter().filter(|r| r.user == username).count()
    }

    /// Active reservations held by a user for today or later
    pub fn count_upcoming_for_user(db: &Database, username: &str, today: NaiveDate) -> usize {
        db.reservations
            .iter()
            .filter(|r| r.user == username && r.is_upcoming(today))
            .count()
    }

    /// Move past, non-admin reservations to the archive; returns how many moved
    pub fn archive_past(db: &mut Database, today: NaiveDate) -> usize {
        let (moved, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut db.reservations)
            .into_iter()
            .partition(|r| r.is_archivable(today));

        let count = moved.len();
        db.reservations = kept;
        db.rebuild_slot_index();
        db.past_reservations.extend(moved);
        count
    }

    /// Archived reservations, optionally restricted to one date
    pub fn list_archive(db: &Database, date: Option<NaiveDate>) -> Vec<Reservation> {
        db.past_reservations
            .iter()
            .filter(|r| date.is_none_or(|d| r.date == d))
            .cloned()
            .collect()
    }
}
