pub mod resend;

use async_trait::async_trait;

/// Structured fields for a new-booking notice.
#[derive(Debug, Clone)]
pub struct BookingNotice {
    pub user_name: String,
    pub user_phone: String,
    pub service_name: String,
    pub date: String,
    pub start_time: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_booking_notice(&self, to: &str, notice: &BookingNotice) -> anyhow::Result<()>;
}
