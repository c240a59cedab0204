//! Service plumbing shared by Rentwise binaries: configuration, tracing,
//! health probes and HTTP middleware.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
