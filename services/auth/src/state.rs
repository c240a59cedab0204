use std::sync::Arc;

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOtpRepository, DbProfileRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub otp_ttl: Duration,
}

impl AppState {
    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: Arc::clone(&self.db),
        }
    }
}
