use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use barberdesk::config::AppConfig;
use barberdesk::db;
use barberdesk::models::SiteConfig;
use barberdesk::services::images::imgbb::ImgbbHost;
use barberdesk::services::mail::resend::ResendMailer;
use barberdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    db::queries::ensure_site_config(&conn, &SiteConfig::default())?;

    if config.mail_api_key.is_empty() {
        tracing::warn!("MAIL_API_KEY not set, booking notices will fail to send");
    }

    let mailer = ResendMailer::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_from.clone(),
    );
    let images = ImgbbHost::new(config.image_host_url.clone(), config.image_host_key.clone());

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        mailer: Box::new(mailer),
        images: Box::new(images),
    });

    let app = barberdesk::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
