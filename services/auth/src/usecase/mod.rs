pub mod issue_otp;
pub mod verify_otp;
