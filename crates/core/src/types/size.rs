//! Drink size variants.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Cup size for a drink.
///
/// Serialized as the single-letter labels the app has always persisted
/// (`"S"`, `"M"`, `"L"`), so carts written by older versions load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Size {
    #[serde(rename = "S")]
    Small,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl Size {
    /// The single-letter label used in persisted carts and the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" | "s" => Ok(Self::Small),
            "M" | "m" => Ok(Self::Medium),
            "L" | "l" => Ok(Self::Large),
            _ => Err(format!("invalid size: {s} (expected S, M, or L)")),
        }
    }
}
