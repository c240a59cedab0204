use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rentwise_domain::id::{OtpId, UserId};

/// One issued email OTP (`email_otps` row).
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: OtpId,
    pub user_id: UserId,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Usable only while `now` is strictly before `expires_at`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Role tag read from `profiles.kind_of_user`, unnormalized.
#[derive(Debug, Clone)]
pub struct ProfileRole {
    pub user_id: UserId,
    pub kind_of_user: Option<String>,
}

/// Outbox event for async delivery (the OTP email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Outbox kind consumed by the mailer.
pub const EMAIL_OTP_CREATED: &str = "email_otp_created";
