use serde::{Deserialize, Serialize};

/// A bookable service from the shop catalog. Prices are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
