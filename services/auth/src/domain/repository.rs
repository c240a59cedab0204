#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use rentwise_domain::id::{OtpId, UserId};

use crate::domain::types::{OtpRecord, OutboxEvent, ProfileRole};
use crate::error::AuthServiceError;

/// Store of issued email OTPs.
pub trait OtpRepository: Send + Sync {
    /// Find a usable code for the user: exact `code` match and `expires_at > now`.
    /// When several match, the most recently created one is returned.
    async fn find_valid(
        &self,
        user_id: UserId,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, AuthServiceError>;

    /// Delete the record only if it still exists and `expires_at > now`.
    ///
    /// Returns `true` for exactly one caller per record; any concurrent or later
    /// caller gets `false`.
    async fn consume(&self, id: OtpId, now: DateTime<Utc>) -> Result<bool, AuthServiceError>;

    /// Delete every record of `record.user_id`, then insert `record` and `event`,
    /// all in one transaction.
    async fn replace_for_user(
        &self,
        record: &OtpRecord,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError>;
}

/// Read-only view of account profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_role(&self, user_id: UserId) -> Result<Option<ProfileRole>, AuthServiceError>;
}
