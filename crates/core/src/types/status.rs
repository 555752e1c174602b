//! Settlement lifecycle states.

use serde::{Deserialize, Serialize};

/// State of a checkout settlement.
///
/// The legal transitions are:
///
/// ```text
/// Idle -> Confirming -> Settling -> Settled
///              |
///              +-> Aborted
/// ```
///
/// `Confirming` is reached only with a non-empty cart; `Aborted` covers both
/// user cancellation and an insufficient-funds rejection, neither of which
/// mutates any persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SettlementState {
    #[default]
    Idle,
    Confirming,
    Settling,
    Settled,
    Aborted,
}

impl SettlementState {
    /// Whether the settlement has finished, successfully or not.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Settled | Self::Aborted)
    }
}

impl std::fmt::Display for SettlementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Confirming => "confirming",
            Self::Settling => "settling",
            Self::Settled => "settled",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
