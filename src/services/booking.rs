use chrono::{Duration, NaiveDate, NaiveTime};
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Reservation, ReservationStatus};

/// Every appointment occupies exactly one half-hour slot. End times are
/// derived from this constant, not from the service's configured duration:
/// the grid stays uniform and a long service never spans two bookings.
pub const FIXED_SLOT_MINUTES: i64 = 30;

/// Check-and-insert for a new reservation. The caller holds the connection
/// mutex, which serializes this sequence; the partial unique index on
/// (date, start_time) backs it at the storage layer, so a constraint failure
/// is reported as a taken slot rather than a server error.
pub fn create_reservation(
    conn: &Connection,
    service_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    user_name: &str,
    user_phone: &str,
) -> Result<Reservation, AppError> {
    if queries::get_service(conn, service_id)?.is_none() {
        return Err(AppError::NotFound(format!("service {service_id}")));
    }

    if queries::slot_taken(conn, &date, &start_time)? {
        return Err(AppError::SlotTaken);
    }

    let end_time = start_time + Duration::minutes(FIXED_SLOT_MINUTES);

    let new = queries::NewReservation {
        service_id,
        date,
        start_time,
        end_time,
        user_name: user_name.to_string(),
        user_phone: user_phone.to_string(),
        status: ReservationStatus::Confirmed,
    };

    let id = match queries::insert_reservation(conn, &new) {
        Ok(id) => id,
        Err(e) => {
            if is_unique_violation(&e) {
                return Err(AppError::SlotTaken);
            }
            return Err(AppError::Internal(e));
        }
    };

    queries::get_reservation(conn, id)?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("reservation {id} vanished after insert")))
}

fn is_unique_violation(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Move a reservation to a staff-selected status. Only the target value is
/// validated; there is deliberately no legality check against the current
/// state, matching how the shop staff actually use the list (e.g. undoing a
/// mistaken cancel).
pub fn transition_status(
    conn: &Connection,
    id: i64,
    target: &str,
) -> Result<Reservation, AppError> {
    let status = ReservationStatus::parse_transition_target(target)
        .ok_or_else(|| AppError::Validation(format!("invalid status: {target:?}")))?;

    let updated = match queries::update_reservation_status(conn, id, status) {
        Ok(updated) => updated,
        Err(e) => {
            // Un-cancelling into a slot that has since been rebooked trips
            // the unique index.
            if is_unique_violation(&e) {
                return Err(AppError::SlotTaken);
            }
            return Err(AppError::Internal(e));
        }
    };
    if !updated {
        return Err(AppError::NotFound(format!("reservation {id}")));
    }

    queries::get_reservation(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("reservation {id}")))
}
