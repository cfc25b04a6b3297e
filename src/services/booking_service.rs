//! Booking service
//!
//! Creation and cancellation of reservations together with the credit
//! movements they cause. Each operation validates and writes inside a
//! single store transaction.

use chrono::NaiveDate;

use crate::{
    constants::CREDITS_PER_BOOKING,
    db::{
        Database, Store,
        repositories::{ReservationRepository, UserRepository},
    },
    error::{AppError, AppResult},
    models::{CreditChange, Reservation, ReservationId, SlotKey, SlotTime, User},
    utils::{Clock, parse_date},
};

/// A booking request as received from a client
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub field: String,
    pub date: String,
    pub time: String,
}

/// Result of a successful booking
#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub reservation: Reservation,
    pub credits: u32,
}

/// Result of a successful cancellation
#[derive(Debug, Clone)]
pub struct Cancellation {
    pub reservation: Reservation,
    pub refunded: bool,
    /// Balance of the acting user afterwards
    pub credits: u32,
}

/// Booking service for business logic
pub struct BookingService;

impl BookingService {
    /// Active reservations on a date
    pub async fn list_for_date(store: &Store, date: NaiveDate) -> Vec<Reservation> {
        store
            .read(|db| ReservationRepository::list_for_date(db, date))
            .await
    }

    /// Book a slot for `actor`
    pub async fn create(
        store: &Store,
        clock: &dyn Clock,
        actor: &str,
        request: BookingRequest,
    ) -> AppResult<BookingReceipt> {
        let now = clock.now();

        let receipt = store
            .transaction(|db| {
                let user = active_user(db, actor)?.clone();

                if !db.admin.fields.iter().any(|f| f.id == request.field) {
                    return Err(AppError::NotFound(format!(
                        "Field '{}' not found",
                        request.field
                    )));
                }

                let date = parse_date(&request.date)
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
                let time = SlotTime::parse(request.time.trim())
                    .filter(SlotTime::is_on_grid)
                    .ok_or_else(|| {
                        AppError::InvalidInput(format!("'{}' is not a bookable slot", request.time))
                    })?;

                if date < now.date() || time.has_ended(date, now) {
                    return Err(AppError::SlotInPast(format!("{date} {time}")));
                }

                let key = SlotKey {
                    field: request.field.clone(),
                    date,
                    time,
                };
                if ReservationRepository::find_by_slot(db, &key).is_some() {
                    return Err(AppError::SlotAlreadyBooked);
                }

                if !user.is_admin() {
                    let limit = db.admin.config.max_bookings_per_user;
                    let upcoming =
                        ReservationRepository::count_upcoming_for_user(db, actor, now.date());
                    if upcoming >= limit as usize {
                        return Err(AppError::BookingLimitReached { limit });
                    }

                    if i64::from(user.credits) < CREDITS_PER_BOOKING {
                        return Err(AppError::InsufficientCredits);
                    }
                }

                let reservation =
                    Reservation::new(request.field.clone(), date, time, actor.to_string(), user.role);
                ReservationRepository::insert(db, reservation.clone())?;

                let user = UserRepository::get_mut(db, actor)?;
                let credits = if user.is_admin() {
                    user.credits
                } else {
                    user.apply_credits(CreditChange::Delta(-CREDITS_PER_BOOKING))
                };

                Ok(BookingReceipt {
                    reservation,
                    credits,
                })
            })
            .await?;

        tracing::info!(
            id = %receipt.reservation.id,
            field = %receipt.reservation.field,
            date = %receipt.reservation.date,
            time = %receipt.reservation.time,
            user = actor,
            credits = receipt.credits,
            "Reservation created"
        );

        Ok(receipt)
    }

    /// Cancel a reservation.
    ///
    /// Non-admins may only cancel their own bookings. A same-day
    /// cancellation forfeits the credit and needs `confirm_forfeit`; a
    /// cancellation for a later day refunds it.
    pub async fn cancel(
        store: &Store,
        clock: &dyn Clock,
        actor: &str,
        id: &ReservationId,
        confirm_forfeit: bool,
    ) -> AppResult<Cancellation> {
        let today = clock.today();

        let cancellation = store
            .transaction(|db| {
                let user = active_user(db, actor)?.clone();

                let reservation = ReservationRepository::find_by_id(db, id)
                    .ok_or_else(|| AppError::NotFound(format!("Reservation {id} not found")))?;

                if !user.is_admin() {
                    if reservation.user != actor {
                        return Err(AppError::Forbidden(
                            "You can only cancel your own reservations".to_string(),
                        ));
                    }
                    if reservation.date == today && !confirm_forfeit {
                        return Err(AppError::ConfirmationRequired(
                            "Cancelling on the day of the booking forfeits the credit".to_string(),
                        ));
                    }
                }

                let reservation = ReservationRepository::remove(db, id)?;

                let refunded = !user.is_admin() && reservation.date > today;
                let user = UserRepository::get_mut(db, actor)?;
                let credits = if refunded {
                    user.apply_credits(CreditChange::Delta(CREDITS_PER_BOOKING))
                } else {
                    user.credits
                };

                Ok(Cancellation {
                    reservation,
                    refunded,
                    credits,
                })
            })
            .await?;

        tracing::info!(
            id = %cancellation.reservation.id,
            owner = %cancellation.reservation.user,
            by = actor,
            refunded = cancellation.refunded,
            "Reservation cancelled"
        );

        Ok(cancellation)
    }

    /// Archive past reservations not owned by admins
    pub async fn reset_past(store: &Store, today: NaiveDate) -> AppResult<usize> {
        let moved = store
            .transaction(|db| Ok(ReservationRepository::archive_past(db, today)))
            .await?;

        tracing::info!(moved, %today, "Past reservations archived");
        Ok(moved)
    }

    /// Archived reservations, optionally for one date
    pub async fn list_archive(store: &Store, date: Option<NaiveDate>) -> Vec<Reservation> {
        store
            .read(|db| ReservationRepository::list_archive(db, date))
            .await
    }
}

fn active_user<'a>(db: &'a Database, username: &str) -> AppResult<&'a User> {
    let user = UserRepository::find(db, username).ok_or(AppError::Unauthorized)?;
    if user.disabled {
        return Err(AppError::UserDisabled);
    }
    Ok(user)
}
