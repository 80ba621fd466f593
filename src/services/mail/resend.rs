use anyhow::Context;
use async_trait::async_trait;

use super::{BookingNotice, Mailer};

pub struct ResendMailer {
    api_url: String,
    api_key: String,
    from: String,
    client: reqwest::Client,
}

impl ResendMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            api_url,
            api_key,
            from,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_booking_notice(&self, to: &str, notice: &BookingNotice) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "from": self.from,
            "to": [to],
            "subject": format!("New booking: {} on {} at {}", notice.service_name, notice.date, notice.start_time),
            "text": format!(
                "{} ({}) booked {} on {} at {}.",
                notice.user_name, notice.user_phone, notice.service_name, notice.date, notice.start_time
            ),
        });

        self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to reach mail API")?
            .error_for_status()
            .context("mail API returned error")?;

        Ok(())
    }
}
