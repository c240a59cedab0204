use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentwise_domain::id::{OtpId, UserId};
use rentwise_domain::role::{Destination, KindOfUser};

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::issue_otp::{IssueOtpInput, IssueOtpUseCase};
use crate::usecase::verify_otp::{VerifyOtpInput, VerifyOtpUseCase};

// ── POST /auth/otp ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueOtpRequest {
    pub user_id: UserId,
    pub email: String,
}

#[derive(Serialize)]
pub struct IssueOtpResponse {
    pub otp_id: OtpId,
    #[serde(serialize_with = "rentwise_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn issue_otp(
    State(state): State<AppState>,
    Json(body): Json<IssueOtpRequest>,
) -> Result<(StatusCode, Json<IssueOtpResponse>), AuthServiceError> {
    let usecase = IssueOtpUseCase {
        otps: state.otp_repo(),
        profiles: state.profile_repo(),
        ttl: state.otp_ttl,
    };
    let out = usecase
        .execute(IssueOtpInput {
            user_id: body.user_id,
            email: body.email,
            now: Utc::now(),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(IssueOtpResponse {
            otp_id: out.otp_id,
            expires_at: out.expires_at,
        }),
    ))
}

// ── POST /auth/otp/verify ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub user_id: UserId,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub user_id: UserId,
    pub kind: KindOfUser,
    pub destination: Destination,
    pub route: &'static str,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, AuthServiceError> {
    let usecase = VerifyOtpUseCase {
        otps: state.otp_repo(),
        profiles: state.profile_repo(),
    };
    let out = usecase
        .execute(VerifyOtpInput {
            user_id: body.user_id,
            code: body.code,
            now: Utc::now(),
        })
        .await?;
    Ok(Json(VerifyOtpResponse {
        user_id: out.user_id,
        kind: out.kind,
        destination: out.destination,
        route: out.destination.route(),
    }))
}
