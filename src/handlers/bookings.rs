use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{self, Role};
use crate::db::queries;
use crate::errors::AppError;
use crate::services::availability;
use crate::services::booking;
use crate::services::mail::BookingNotice;
use crate::state::AppState;

// GET /api/bookings/available?date=YYYY-MM-DD
#[derive(Deserialize)]
pub struct AvailableQuery {
    pub date: Option<String>,
}

pub async fn get_available(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let raw = query
        .date
        .ok_or_else(|| AppError::Validation("date is required".to_string()))?;
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date: {raw:?}")))?;

    let slots = {
        let db = state.db.lock().unwrap();
        availability::available_slots(&db, &date, state.config.open_hour, state.config.close_hour)?
    };

    Ok(Json(
        slots.iter().map(|t| t.format("%H:%M").to_string()).collect(),
    ))
}

// POST /api/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub service_id: Option<i64>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: i64,
    pub service_id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub user_name: String,
    pub user_phone: String,
    pub status: String,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    let value = required(value, field)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let service_id = required(body.service_id, "service_id")?;
    let date_raw = required_text(body.date, "date")?;
    let start_raw = required_text(body.start_time, "start_time")?;
    let user_name = required_text(body.user_name, "user_name")?;
    let user_phone = required_text(body.user_phone, "user_phone")?;

    let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date: {date_raw:?}")))?;
    let start_time = NaiveTime::parse_from_str(&start_raw, "%H:%M")
        .map_err(|_| AppError::Validation(format!("invalid start_time: {start_raw:?}")))?;

    let (reservation, service_name) = {
        let db = state.db.lock().unwrap();
        let reservation =
            booking::create_reservation(&db, service_id, date, start_time, &user_name, &user_phone)?;
        let service_name = queries::get_service(&db, service_id)?
            .map(|s| s.name)
            .unwrap_or_default();
        (reservation, service_name)
    };

    // Notify the shop; a mail failure never fails the booking.
    if !state.config.notify_email.is_empty() {
        let notice = BookingNotice {
            user_name: reservation.user_name.clone(),
            user_phone: reservation.user_phone.clone(),
            service_name,
            date: reservation.date.format("%Y-%m-%d").to_string(),
            start_time: reservation.start_time.format("%H:%M").to_string(),
        };
        if let Err(e) = state
            .mailer
            .send_booking_notice(&state.config.notify_email, &notice)
            .await
        {
            tracing::error!(error = %e, "failed to send booking notice");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            id: reservation.id,
            service_id: reservation.service_id,
            date: reservation.date.format("%Y-%m-%d").to_string(),
            start_time: reservation.start_time.format("%H:%M").to_string(),
            end_time: reservation.end_time.format("%H:%M").to_string(),
            user_name: reservation.user_name,
            user_phone: reservation.user_phone,
            status: reservation.status.as_str().to_string(),
        }),
    ))
}

// GET /api/bookings  (staff)
#[derive(Serialize)]
pub struct StaffBookingResponse {
    pub id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub user_name: String,
    pub user_phone: String,
    pub status: String,
    /// Presentation-only: "in_progress" while the clock is inside a
    /// confirmed reservation's window, otherwise equal to `status`.
    pub display_status: String,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<StaffBookingResponse>>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    let rows = {
        let db = state.db.lock().unwrap();
        queries::list_reservations(&db)?
    };

    let now = Utc::now().naive_utc();
    let response = rows
        .into_iter()
        .map(|(r, service_name)| StaffBookingResponse {
            id: r.id,
            service_id: r.service_id,
            service_name,
            date: r.date.format("%Y-%m-%d").to_string(),
            start_time: r.start_time.format("%H:%M").to_string(),
            end_time: r.end_time.format("%H:%M").to_string(),
            user_name: r.user_name.clone(),
            user_phone: r.user_phone.clone(),
            display_status: r.display_status(&now).to_string(),
            status: r.status.as_str().to_string(),
        })
        .collect();

    Ok(Json(response))
}

// PATCH /api/bookings/:id  (staff)
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    let target = required_text(body.status, "status")?;

    let reservation = {
        let db = state.db.lock().unwrap();
        booking::transition_status(&db, id, &target)?
    };

    Ok(Json(BookingResponse {
        id: reservation.id,
        service_id: reservation.service_id,
        date: reservation.date.format("%Y-%m-%d").to_string(),
        start_time: reservation.start_time.format("%H:%M").to_string(),
        end_time: reservation.end_time.format("%H:%M").to_string(),
        user_name: reservation.user_name,
        user_phone: reservation.user_phone,
        status: reservation.status.as_str().to_string(),
    }))
}
