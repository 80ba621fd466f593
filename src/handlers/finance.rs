use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::auth::{self, Role};
use crate::errors::AppError;
use crate::services::finance::{self, FinanceStats};
use crate::state::AppState;

// GET /api/finance/stats?month&year
#[derive(Deserialize)]
pub struct StatsQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<StatsQuery>,
) -> Result<Json<FinanceStats>, AppError> {
    auth::require(&headers, &state.config, Role::Developer)?;

    let month = query
        .month
        .ok_or_else(|| AppError::Validation("month is required".to_string()))?;
    let year = query
        .year
        .ok_or_else(|| AppError::Validation("year is required".to_string()))?;

    let db = state.db.lock().unwrap();
    let stats = finance::monthly_stats(&db, month, year, state.config.commission_cents)?;
    Ok(Json(stats))
}
