//! sea-orm entities for the auth service database.

pub mod email_otps;
pub mod outbox_events;
pub mod profiles;
