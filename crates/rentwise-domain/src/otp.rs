//! Email one-time password codes.

use std::fmt;

/// Number of digits in an email OTP.
pub const OTP_LEN: usize = 6;

/// Submitted code did not match `^[0-9]{6}$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("otp code must be exactly {OTP_LEN} ascii digits")]
pub struct InvalidOtpCode;

/// A syntactically valid OTP: exactly six ASCII digits.
///
/// Leading zeros are significant, so the code is kept as a string and compared
/// by exact equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn parse(s: &str) -> Result<Self, InvalidOtpCode> {
        if s.len() == OTP_LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(InvalidOtpCode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are secrets; keep them out of `{:?}` output in logs.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}
