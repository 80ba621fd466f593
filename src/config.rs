use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub developer_token: String,
    /// First bookable hour of the day.
    pub open_hour: u32,
    /// Slots stop before this hour; the closing mark itself is not bookable.
    pub close_hour: u32,
    /// Flat commission charged per completed booking, in cents.
    pub commission_cents: i64,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    /// Where new-booking notices are sent. Empty disables dispatch.
    pub notify_email: String,
    pub image_host_url: String,
    pub image_host_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "barberdesk.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            developer_token: env::var("DEVELOPER_TOKEN")
                .unwrap_or_else(|_| "changeme-dev".to_string()),
            open_hour: env::var("OPEN_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            close_hour: env::var("CLOSE_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(19),
            commission_cents: env::var("COMMISSION_CENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            mail_api_key: env::var("MAIL_API_KEY").unwrap_or_default(),
            mail_from: env::var("MAIL_FROM").unwrap_or_default(),
            notify_email: env::var("NOTIFY_EMAIL").unwrap_or_default(),
            image_host_url: env::var("IMAGE_HOST_URL")
                .unwrap_or_else(|_| "https://api.imgbb.com/1/upload".to_string()),
            image_host_key: env::var("IMAGE_HOST_KEY").unwrap_or_default(),
        }
    }
}
