use chrono::{Datelike, Months, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct FinanceStats {
    pub month: u32,
    pub year: i32,
    pub completed_count: i64,
    pub revenue_cents: i64,
    pub commission_cents: i64,
    pub bookings: Vec<FinanceLine>,
}

#[derive(Debug, Serialize)]
pub struct FinanceLine {
    pub date: String,
    pub service_name: String,
    pub price_cents: i64,
    pub commission_cents: i64,
}

/// Sum completed reservations for one calendar month. Revenue is the sum of
/// the booked services' prices; commission is a flat per-booking rate and
/// does not depend on the prices.
pub fn monthly_stats(
    conn: &Connection,
    month: u32,
    year: i32,
    commission_cents: i64,
) -> Result<FinanceStats, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("invalid month/year: {month}/{year}")))?;
    let last = (first + Months::new(1)).pred_opt().unwrap_or(first);

    let completed = queries::completed_in_range(conn, &first, &last)?;

    let revenue_cents: i64 = completed.iter().map(|b| b.price_cents).sum();
    let completed_count = completed.len() as i64;

    let bookings = completed
        .into_iter()
        .map(|b| FinanceLine {
            date: b.date.format("%Y-%m-%d").to_string(),
            service_name: b.service_name,
            price_cents: b.price_cents,
            commission_cents,
        })
        .collect();

    Ok(FinanceStats {
        month: first.month(),
        year: first.year(),
        completed_count,
        revenue_cents,
        commission_cents: completed_count * commission_cents,
        bookings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::ReservationStatus;
    use chrono::NaiveTime;

    fn setup_db() -> Connection {
        let conn = db::init_db(":memory:").unwrap();
        queries::create_service(&conn, "Haircut", 30, 2500, None, None).unwrap();
        queries::create_service(&conn, "Shave", 30, 1500, None, None).unwrap();
        conn
    }

    fn book(conn: &Connection, service_id: i64, date: &str, start: &str, status: ReservationStatus) {
        let start_time = NaiveTime::parse_from_str(start, "%H:%M").unwrap();
        let new = queries::NewReservation {
            service_id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time,
            end_time: start_time + chrono::Duration::minutes(30),
            user_name: "Alice".to_string(),
            user_phone: "+15551110000".to_string(),
            status,
        };
        queries::insert_reservation(conn, &new).unwrap();
    }

    #[test]
    fn test_commission_is_count_times_rate() {
        let conn = setup_db();
        book(&conn, 1, "2025-06-02", "10:00", ReservationStatus::Completed);
        book(&conn, 2, "2025-06-10", "11:00", ReservationStatus::Completed);
        book(&conn, 1, "2025-06-20", "12:00", ReservationStatus::Completed);

        let stats = monthly_stats(&conn, 6, 2025, 200).unwrap();
        assert_eq!(stats.completed_count, 3);
        // Independent of the mixed prices below.
        assert_eq!(stats.commission_cents, 600);
        assert_eq!(stats.revenue_cents, 2500 + 1500 + 2500);
    }

    #[test]
    fn test_only_completed_counts() {
        let conn = setup_db();
        book(&conn, 1, "2025-06-02", "10:00", ReservationStatus::Completed);
        book(&conn, 1, "2025-06-02", "11:00", ReservationStatus::Confirmed);
        book(&conn, 1, "2025-06-02", "12:00", ReservationStatus::Cancelled);

        let stats = monthly_stats(&conn, 6, 2025, 200).unwrap();
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.revenue_cents, 2500);
    }

    #[test]
    fn test_month_boundaries() {
        let conn = setup_db();
        book(&conn, 1, "2025-05-31", "10:00", ReservationStatus::Completed);
        book(&conn, 1, "2025-06-01", "10:00", ReservationStatus::Completed);
        book(&conn, 1, "2025-06-30", "10:00", ReservationStatus::Completed);
        book(&conn, 1, "2025-07-01", "10:00", ReservationStatus::Completed);

        let stats = monthly_stats(&conn, 6, 2025, 200).unwrap();
        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.bookings[0].date, "2025-06-01");
        assert_eq!(stats.bookings[1].date, "2025-06-30");
    }

    #[test]
    fn test_invalid_month_rejected() {
        let conn = setup_db();
        let err = monthly_stats(&conn, 13, 2025, 200).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_empty_month() {
        let conn = setup_db();
        let stats = monthly_stats(&conn, 2, 2025, 200).unwrap();
        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.revenue_cents, 0);
        assert_eq!(stats.commission_cents, 0);
        assert!(stats.bookings.is_empty());
    }
}
