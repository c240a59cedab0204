use anyhow::Context as _;
use chrono::Duration;
use serde::Deserialize;

use rentwise_core::config::Config;

/// Longest accepted OTP lifetime: one day.
pub const MAX_OTP_TTL_SECS: u32 = 86_400;

fn default_auth_port() -> u16 {
    3112
}

fn default_otp_ttl_secs() -> u32 {
    300
}

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,
    /// Lifetime of an issued email OTP in seconds (default 300). Env var: `OTP_TTL_SECS`.
    #[serde(default = "default_otp_ttl_secs")]
    pub otp_ttl_secs: u32,
}

impl Config for AuthConfig {}

impl AuthConfig {
    /// OTP lifetime, rejecting zero and anything above [`MAX_OTP_TTL_SECS`].
    pub fn otp_ttl(&self) -> anyhow::Result<Duration> {
        if !(1..=MAX_OTP_TTL_SECS).contains(&self.otp_ttl_secs) {
            anyhow::bail!(
                "OTP_TTL_SECS must be between 1 and {MAX_OTP_TTL_SECS}, got {}",
                self.otp_ttl_secs
            );
        }
        Duration::try_seconds(i64::from(self.otp_ttl_secs)).context("OTP_TTL_SECS out of range")
    }
}
