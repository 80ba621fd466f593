pub mod imgbb;

use async_trait::async_trait;

/// External asset host: takes raw image bytes, returns a public URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> anyhow::Result<String>;
}
