//! Rate tier domain entity

use rust_decimal::Decimal;
use validator::Validate;

use crate::domain::RateTierId;
use crate::shared::validations::{validate_non_negative, validate_not_blank};

/// Whether a tier can be offered for new entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierStatus {
    #[default]
    Active,
    Inactive,
}

impl TierStatus {
    /// Wire value used by the catalog backend.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Active => "Aktif",
            Self::Inactive => "Non-Aktif",
        }
    }

    /// Only the exact active marker counts as active.
    pub fn from_wire(s: &str) -> Self {
        if s.trim() == "Aktif" {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for TierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl std::str::FromStr for TierStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aktif" | "active" => Ok(Self::Active),
            "non-aktif" | "nonaktif" | "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown tier status '{}'", other)),
        }
    }
}

/// Named hourly price applied to a parking session
#[derive(Debug, Clone, PartialEq)]
pub struct RateTier {
    pub id: RateTierId,
    pub name: String,
    pub hourly_rate: Decimal,
    pub status: TierStatus,
}

/// Input for creating a tier
#[derive(Debug, Clone, Validate)]
pub struct NewRateTier {
    #[validate(
        length(max = 100, message = "tier name is too long"),
        custom(function = "validate_not_blank", message = "tier name is required")
    )]
    pub name: String,
    #[validate(custom(function = "validate_non_negative"))]
    pub hourly_rate: Decimal,
    pub status: TierStatus,
}

impl NewRateTier {
    pub fn new(name: impl Into<String>, hourly_rate: Decimal, status: TierStatus) -> Self {
        Self {
            name: name.into().trim().to_string(),
            hourly_rate,
            status,
        }
    }
}
