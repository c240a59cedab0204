//! Account kinds and the post-login destination each one routes to.

use serde::{Deserialize, Serialize};

/// Account category stored in `profiles.kind_of_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindOfUser {
    Tenant,
    Landlord,
}

impl KindOfUser {
    /// Parse a stored role tag, ignoring ASCII case. Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("tenant") {
            Some(Self::Tenant)
        } else if tag.eq_ignore_ascii_case("landlord") {
            Some(Self::Landlord)
        } else {
            None
        }
    }

    pub fn destination(self) -> Destination {
        match self {
            Self::Tenant => Destination::TenantHome,
            Self::Landlord => Destination::LandlordHome,
        }
    }
}

/// Where the client navigates after a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    TenantHome,
    LandlordHome,
}

impl Destination {
    /// Client-side route for this destination.
    pub fn route(self) -> &'static str {
        match self {
            Self::TenantHome => "/(tabs)/tenant/explore",
            Self::LandlordHome => "/(tabs)/landlord/upload",
        }
    }
}
