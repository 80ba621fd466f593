use serde::{Deserialize, Serialize};

/// Site branding shown by the public client. Exactly one row exists; it is
/// created at startup and only ever updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub shop_name: String,
    pub tagline: String,
    pub about_text: String,
    pub logo_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            shop_name: "Barberdesk".to_string(),
            tagline: String::new(),
            about_text: String::new(),
            logo_url: None,
        }
    }
}
