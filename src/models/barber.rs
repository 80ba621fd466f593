use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barber {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}
