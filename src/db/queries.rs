use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Barber, Reservation, ReservationStatus, Service, SiteConfig};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M";
const STAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Services ──

pub fn list_services(conn: &Connection) -> anyhow::Result<Vec<Service>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, duration_minutes, price_cents, description, image_url
         FROM services ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], parse_service_row)?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

pub fn get_service(conn: &Connection, id: i64) -> anyhow::Result<Option<Service>> {
    let result = conn.query_row(
        "SELECT id, name, duration_minutes, price_cents, description, image_url
         FROM services WHERE id = ?1",
        params![id],
        parse_service_row,
    );

    match result {
        Ok(service) => Ok(Some(service)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn create_service(
    conn: &Connection,
    name: &str,
    duration_minutes: i32,
    price_cents: i64,
    description: Option<&str>,
    image_url: Option<&str>,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO services (name, duration_minutes, price_cents, description, image_url)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, duration_minutes, price_cents, description, image_url],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_service(conn: &Connection, service: &Service) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE services SET name = ?1, duration_minutes = ?2, price_cents = ?3,
            description = ?4, image_url = ?5 WHERE id = ?6",
        params![
            service.name,
            service.duration_minutes,
            service.price_cents,
            service.description,
            service.image_url,
            service.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_service(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM services WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_service_row(row: &rusqlite::Row) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(0)?,
        name: row.get(1)?,
        duration_minutes: row.get(2)?,
        price_cents: row.get(3)?,
        description: row.get(4)?,
        image_url: row.get(5)?,
    })
}

// ── Barbers ──

pub fn list_barbers(conn: &Connection) -> anyhow::Result<Vec<Barber>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, specialty, bio, image_url FROM barbers ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], parse_barber_row)?;

    let mut barbers = vec![];
    for row in rows {
        barbers.push(row?);
    }
    Ok(barbers)
}

pub fn get_barber(conn: &Connection, id: i64) -> anyhow::Result<Option<Barber>> {
    let result = conn.query_row(
        "SELECT id, name, specialty, bio, image_url FROM barbers WHERE id = ?1",
        params![id],
        parse_barber_row,
    );

    match result {
        Ok(barber) => Ok(Some(barber)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn create_barber(
    conn: &Connection,
    name: &str,
    specialty: &str,
    bio: Option<&str>,
    image_url: Option<&str>,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO barbers (name, specialty, bio, image_url) VALUES (?1, ?2, ?3, ?4)",
        params![name, specialty, bio, image_url],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_barber(conn: &Connection, barber: &Barber) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE barbers SET name = ?1, specialty = ?2, bio = ?3, image_url = ?4 WHERE id = ?5",
        params![
            barber.name,
            barber.specialty,
            barber.bio,
            barber.image_url,
            barber.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_barber(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM barbers WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_barber_row(row: &rusqlite::Row) -> rusqlite::Result<Barber> {
    Ok(Barber {
        id: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
        bio: row.get(3)?,
        image_url: row.get(4)?,
    })
}

// ── Reservations ──

pub struct NewReservation {
    pub service_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub user_name: String,
    pub user_phone: String,
    pub status: ReservationStatus,
}

pub fn insert_reservation(conn: &Connection, new: &NewReservation) -> anyhow::Result<i64> {
    let now = Utc::now().naive_utc().format(STAMP_FMT).to_string();
    conn.execute(
        "INSERT INTO reservations
            (service_id, date, start_time, end_time, user_name, user_phone, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        params![
            new.service_id,
            new.date.format(DATE_FMT).to_string(),
            new.start_time.format(TIME_FMT).to_string(),
            new.end_time.format(TIME_FMT).to_string(),
            new.user_name,
            new.user_phone,
            new.status.as_str(),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// True when a non-cancelled reservation already starts exactly at this slot.
pub fn slot_taken(conn: &Connection, date: &NaiveDate, start: &NaiveTime) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM reservations
         WHERE date = ?1 AND start_time = ?2 AND status != 'cancelled'",
        params![
            date.format(DATE_FMT).to_string(),
            start.format(TIME_FMT).to_string()
        ],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn booked_start_times(conn: &Connection, date: &NaiveDate) -> anyhow::Result<Vec<NaiveTime>> {
    let mut stmt = conn.prepare(
        "SELECT start_time FROM reservations
         WHERE date = ?1 AND status != 'cancelled' ORDER BY start_time ASC",
    )?;

    let rows = stmt.query_map(params![date.format(DATE_FMT).to_string()], |row| {
        row.get::<_, String>(0)
    })?;

    let mut times = vec![];
    for row in rows {
        let raw = row?;
        times.push(
            NaiveTime::parse_from_str(&raw, TIME_FMT)
                .map_err(|e| anyhow::anyhow!("bad start_time {raw:?} in reservations: {e}"))?,
        );
    }
    Ok(times)
}

pub fn get_reservation(conn: &Connection, id: i64) -> anyhow::Result<Option<Reservation>> {
    let result = conn.query_row(
        "SELECT id, service_id, date, start_time, end_time, user_name, user_phone, status, created_at, updated_at
         FROM reservations WHERE id = ?1",
        params![id],
        |row| Ok(parse_reservation_row(row)),
    );

    match result {
        Ok(reservation) => Ok(Some(reservation?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All reservations newest-first, joined with the booked service's name for
/// the staff list.
pub fn list_reservations(conn: &Connection) -> anyhow::Result<Vec<(Reservation, String)>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.service_id, r.date, r.start_time, r.end_time, r.user_name, r.user_phone,
                r.status, r.created_at, r.updated_at, s.name
         FROM reservations r
         INNER JOIN services s ON s.id = r.service_id
         ORDER BY r.date DESC, r.start_time DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let name: String = row.get(10)?;
        Ok((parse_reservation_row(row), name))
    })?;

    let mut reservations = vec![];
    for row in rows {
        let (reservation, name) = row?;
        reservations.push((reservation?, name));
    }
    Ok(reservations)
}

pub fn update_reservation_status(
    conn: &Connection,
    id: i64,
    status: ReservationStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now().naive_utc().format(STAMP_FMT).to_string();
    let count = conn.execute(
        "UPDATE reservations SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

fn parse_reservation_row(row: &rusqlite::Row) -> anyhow::Result<Reservation> {
    let date_str: String = row.get(2)?;
    let start_str: String = row.get(3)?;
    let end_str: String = row.get(4)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(8)?;
    let updated_at_str: String = row.get(9)?;

    Ok(Reservation {
        id: row.get(0)?,
        service_id: row.get(1)?,
        date: NaiveDate::parse_from_str(&date_str, DATE_FMT)
            .map_err(|e| anyhow::anyhow!("bad date {date_str:?}: {e}"))?,
        start_time: NaiveTime::parse_from_str(&start_str, TIME_FMT)
            .map_err(|e| anyhow::anyhow!("bad start_time {start_str:?}: {e}"))?,
        end_time: NaiveTime::parse_from_str(&end_str, TIME_FMT)
            .map_err(|e| anyhow::anyhow!("bad end_time {end_str:?}: {e}"))?,
        user_name: row.get(5)?,
        user_phone: row.get(6)?,
        status: ReservationStatus::parse(&status_str),
        created_at: NaiveDateTime::parse_from_str(&created_at_str, STAMP_FMT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
        updated_at: NaiveDateTime::parse_from_str(&updated_at_str, STAMP_FMT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
    })
}

// ── Finance ──

pub struct CompletedBooking {
    pub date: NaiveDate,
    pub service_name: String,
    pub price_cents: i64,
}

/// Completed reservations whose date falls in [first, last], joined with the
/// service price, oldest first.
pub fn completed_in_range(
    conn: &Connection,
    first: &NaiveDate,
    last: &NaiveDate,
) -> anyhow::Result<Vec<CompletedBooking>> {
    let mut stmt = conn.prepare(
        "SELECT r.date, s.name, s.price_cents
         FROM reservations r
         INNER JOIN services s ON s.id = r.service_id
         WHERE r.status = 'completed' AND r.date >= ?1 AND r.date <= ?2
         ORDER BY r.date ASC, r.start_time ASC",
    )?;

    let rows = stmt.query_map(
        params![
            first.format(DATE_FMT).to_string(),
            last.format(DATE_FMT).to_string()
        ],
        |row| {
            let date_str: String = row.get(0)?;
            let service_name: String = row.get(1)?;
            let price_cents: i64 = row.get(2)?;
            Ok((date_str, service_name, price_cents))
        },
    )?;

    let mut bookings = vec![];
    for row in rows {
        let (date_str, service_name, price_cents) = row?;
        bookings.push(CompletedBooking {
            date: NaiveDate::parse_from_str(&date_str, DATE_FMT)
                .map_err(|e| anyhow::anyhow!("bad date {date_str:?}: {e}"))?,
            service_name,
            price_cents,
        });
    }
    Ok(bookings)
}

// ── Site config ──

pub fn get_site_config(conn: &Connection) -> anyhow::Result<Option<SiteConfig>> {
    let result = conn.query_row(
        "SELECT shop_name, tagline, about_text, logo_url FROM site_config WHERE id = 1",
        [],
        |row| {
            Ok(SiteConfig {
                shop_name: row.get(0)?,
                tagline: row.get(1)?,
                about_text: row.get(2)?,
                logo_url: row.get(3)?,
            })
        },
    );

    match result {
        Ok(config) => Ok(Some(config)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Create the single config row if it does not exist yet. Called once at
/// startup; a row that is already present is left untouched.
pub fn ensure_site_config(conn: &Connection, default: &SiteConfig) -> anyhow::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO site_config (id, shop_name, tagline, about_text, logo_url)
         VALUES (1, ?1, ?2, ?3, ?4)",
        params![
            default.shop_name,
            default.tagline,
            default.about_text,
            default.logo_url
        ],
    )?;
    Ok(())
}

pub fn update_site_config(conn: &Connection, config: &SiteConfig) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE site_config SET shop_name = ?1, tagline = ?2, about_text = ?3,
            logo_url = ?4, updated_at = datetime('now') WHERE id = 1",
        params![
            config.shop_name,
            config.tagline,
            config.about_text,
            config.logo_url
        ],
    )?;
    Ok(())
}
