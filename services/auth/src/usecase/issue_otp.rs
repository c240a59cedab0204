use anyhow::Context as _;
use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use rentwise_domain::id::{OtpId, UserId};
use rentwise_domain::otp::OTP_LEN;

use crate::domain::repository::{OtpRepository, ProfileRepository};
use crate::domain::types::{EMAIL_OTP_CREATED, OtpRecord, OutboxEvent};
use crate::error::AuthServiceError;

/// Upper bound (exclusive) of a six-digit code.
const CODE_SPACE: u32 = 1_000_000;

/// Uniform over `000000..=999999`; leading zeros are kept.
fn generate_code() -> String {
    format!("{:0width$}", rand::rng().random_range(0..CODE_SPACE), width = OTP_LEN)
}

/// Minimal shape check: one `@` with something on both sides.
/// Deliverability is the mailer's problem.
pub fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

pub struct IssueOtpInput {
    pub user_id: UserId,
    pub email: String,
    pub now: DateTime<Utc>,
}

#[derive(Debug)]
pub struct IssueOtpOutput {
    pub otp_id: OtpId,
    pub expires_at: DateTime<Utc>,
}

pub struct IssueOtpUseCase<O, P>
where
    O: OtpRepository,
    P: ProfileRepository,
{
    pub otps: O,
    pub profiles: P,
    pub ttl: Duration,
}

impl<O, P> IssueOtpUseCase<O, P>
where
    O: OtpRepository,
    P: ProfileRepository,
{
    pub async fn execute(&self, input: IssueOtpInput) -> Result<IssueOtpOutput, AuthServiceError> {
        let email = input.email.trim();
        if !is_plausible_email(email) {
            return Err(AuthServiceError::InvalidEmail);
        }
        let expires_at = input
            .now
            .checked_add_signed(self.ttl)
            .context("otp expiry out of range")?;

        if self.profiles.find_role(input.user_id).await?.is_none() {
            warn!(user_id = %input.user_id, "otp requested for unknown profile");
            return Err(AuthServiceError::ProfileNotFound);
        }

        let record = OtpRecord {
            id: OtpId::new_v4(),
            user_id: input.user_id,
            code: generate_code(),
            expires_at,
            created_at: input.now,
        };

        let event = OutboxEvent {
            id: Uuid::new_v4(),
            kind: EMAIL_OTP_CREATED.to_owned(),
            payload: json!({
                "user_id": record.user_id,
                "email": email,
                "code": record.code,
                "expires_at": record.expires_at,
            }),
            idempotency_key: format!("{EMAIL_OTP_CREATED}:{}", record.id),
        };

        // Prior codes for this user are dropped in the same transaction.
        self.otps.replace_for_user(&record, &event).await?;

        info!(user_id = %record.user_id, otp_id = %record.id, "email otp issued");
        Ok(IssueOtpOutput {
            otp_id: record.id,
            expires_at: record.expires_at,
        })
    }
}
