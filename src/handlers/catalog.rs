use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::auth::{self, Role};
use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Barber, Service};
use crate::state::AppState;

// ── Services ──

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(Json(queries::list_services(&db)?))
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    if body.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if body.duration_minutes <= 0 {
        return Err(AppError::Validation(
            "duration_minutes must be positive".to_string(),
        ));
    }
    if body.price_cents < 0 {
        return Err(AppError::Validation(
            "price_cents must not be negative".to_string(),
        ));
    }

    let db = state.db.lock().unwrap();
    let id = queries::create_service(
        &db,
        &body.name,
        body.duration_minutes,
        body.price_cents,
        body.description.as_deref(),
        body.image_url.as_deref(),
    )?;
    let service = queries::get_service(&db, id)?
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    Ok((StatusCode::CREATED, Json(service)))
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    let db = state.db.lock().unwrap();
    let mut service =
        queries::get_service(&db, id)?.ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    if let Some(name) = body.name {
        service.name = name;
    }
    if let Some(duration) = body.duration_minutes {
        service.duration_minutes = duration;
    }
    if let Some(price) = body.price_cents {
        service.price_cents = price;
    }
    if let Some(description) = body.description {
        service.description = Some(description);
    }
    if let Some(image_url) = body.image_url {
        service.image_url = Some(image_url);
    }

    queries::update_service(&db, &service)?;
    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    let db = state.db.lock().unwrap();
    if !queries::delete_service(&db, id)? {
        return Err(AppError::NotFound(format!("service {id}")));
    }
    Ok(Json(serde_json::json!({"ok": true})))
}

// ── Barbers ──

pub async fn list_barbers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Barber>>, AppError> {
    let db = state.db.lock().unwrap();
    Ok(Json(queries::list_barbers(&db)?))
}

#[derive(Deserialize)]
pub struct CreateBarberRequest {
    pub name: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

pub async fn create_barber(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBarberRequest>,
) -> Result<(StatusCode, Json<Barber>), AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    if body.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let db = state.db.lock().unwrap();
    let id = queries::create_barber(
        &db,
        &body.name,
        body.specialty.as_deref().unwrap_or(""),
        body.bio.as_deref(),
        body.image_url.as_deref(),
    )?;
    let barber =
        queries::get_barber(&db, id)?.ok_or_else(|| AppError::NotFound(format!("barber {id}")))?;

    Ok((StatusCode::CREATED, Json(barber)))
}

#[derive(Deserialize)]
pub struct UpdateBarberRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

pub async fn update_barber(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBarberRequest>,
) -> Result<Json<Barber>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    let db = state.db.lock().unwrap();
    let mut barber =
        queries::get_barber(&db, id)?.ok_or_else(|| AppError::NotFound(format!("barber {id}")))?;

    if let Some(name) = body.name {
        barber.name = name;
    }
    if let Some(specialty) = body.specialty {
        barber.specialty = specialty;
    }
    if let Some(bio) = body.bio {
        barber.bio = Some(bio);
    }
    if let Some(image_url) = body.image_url {
        barber.image_url = Some(image_url);
    }

    queries::update_barber(&db, &barber)?;
    Ok(Json(barber))
}

pub async fn delete_barber(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    let db = state.db.lock().unwrap();
    if !queries::delete_barber(&db, id)? {
        return Err(AppError::NotFound(format!("barber {id}")));
    }
    Ok(Json(serde_json::json!({"ok": true})))
}
