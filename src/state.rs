use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::images::ImageHost;
use crate::services::mail::Mailer;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub mailer: Box<dyn Mailer>,
    pub images: Box<dyn ImageHost>,
}
