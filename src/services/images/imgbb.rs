use anyhow::Context;
use async_trait::async_trait;

use super::ImageHost;

pub struct ImgbbHost {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ImgbbHost {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            api_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageHost for ImgbbHost {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> anyhow::Result<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);

        let response: serde_json::Value = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .context("failed to reach image host")?
            .error_for_status()
            .context("image host returned error")?
            .json()
            .await
            .context("image host returned invalid JSON")?;

        response["data"]["url"]
            .as_str()
            .map(|s| s.to_string())
            .context("image host response missing data.url")
    }
}
