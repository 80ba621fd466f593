use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::auth::{self, Role};
use crate::db::queries;
use crate::errors::AppError;
use crate::models::SiteConfig;
use crate::state::AppState;

// GET /api/site
pub async fn get_site(State(state): State<Arc<AppState>>) -> Result<Json<SiteConfig>, AppError> {
    let db = state.db.lock().unwrap();
    // The row is created at startup; treat a missing one as a server fault.
    let config = queries::get_site_config(&db)?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("site_config row missing")))?;
    Ok(Json(config))
}

// PUT /api/site  (staff)
#[derive(Deserialize)]
pub struct UpdateSiteRequest {
    pub shop_name: Option<String>,
    pub tagline: Option<String>,
    pub about_text: Option<String>,
    pub logo_url: Option<String>,
}

pub async fn update_site(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpdateSiteRequest>,
) -> Result<Json<SiteConfig>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    let db = state.db.lock().unwrap();
    let mut config = queries::get_site_config(&db)?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("site_config row missing")))?;

    if let Some(shop_name) = body.shop_name {
        if shop_name.trim().is_empty() {
            return Err(AppError::Validation("shop_name must not be empty".to_string()));
        }
        config.shop_name = shop_name;
    }
    if let Some(tagline) = body.tagline {
        config.tagline = tagline;
    }
    if let Some(about_text) = body.about_text {
        config.about_text = about_text;
    }
    if let Some(logo_url) = body.logo_url {
        config.logo_url = Some(logo_url);
    }

    queries::update_site_config(&db, &config)?;
    Ok(Json(config))
}
