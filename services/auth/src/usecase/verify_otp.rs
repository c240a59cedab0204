use chrono::{DateTime, Utc};
use tracing::{info, warn};

use rentwise_domain::id::UserId;
use rentwise_domain::otp::OtpCode;
use rentwise_domain::role::{Destination, KindOfUser};

use crate::domain::repository::{OtpRepository, ProfileRepository};
use crate::error::AuthServiceError;

pub struct VerifyOtpInput {
    pub user_id: UserId,
    pub code: String,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOtpOutput {
    pub user_id: UserId,
    pub kind: KindOfUser,
    pub destination: Destination,
}

pub struct VerifyOtpUseCase<O, P>
where
    O: OtpRepository,
    P: ProfileRepository,
{
    pub otps: O,
    pub profiles: P,
}

impl<O, P> VerifyOtpUseCase<O, P>
where
    O: OtpRepository,
    P: ProfileRepository,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, AuthServiceError> {
        // 1. Reject malformed codes before touching the store
        let code = OtpCode::parse(&input.code).map_err(|_| AuthServiceError::InvalidFormat)?;

        // 2. Find a usable record. Wrong, expired and never-issued all look the same.
        let record = self
            .otps
            .find_valid(input.user_id, code.as_str(), input.now)
            .await?
            .ok_or(AuthServiceError::InvalidOrExpiredCode)?;

        // 3. Consume. Losing a race to a concurrent attempt is indistinguishable from a bad code.
        if !self.otps.consume(record.id, input.now).await? {
            return Err(AuthServiceError::InvalidOrExpiredCode);
        }

        // 4. Role lookup. The code is already gone if this fails.
        let profile = self.profiles.find_role(input.user_id).await?;
        let Some(tag) = profile
            .and_then(|p| p.kind_of_user)
            .filter(|tag| !tag.is_empty())
        else {
            warn!(user_id = %input.user_id, "otp consumed but profile role missing");
            return Err(AuthServiceError::ProfileNotFound);
        };

        // 5. Route
        let Some(kind) = KindOfUser::from_tag(&tag) else {
            warn!(user_id = %input.user_id, kind_of_user = %tag, "unrecognized user type");
            return Err(AuthServiceError::UnauthorizedRole);
        };
        let destination = kind.destination();

        info!(user_id = %input.user_id, ?destination, "email otp verified");
        Ok(VerifyOtpOutput {
            user_id: input.user_id,
            kind,
            destination,
        })
    }
}
