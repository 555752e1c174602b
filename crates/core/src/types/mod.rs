//! Core types for Brewline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod size;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Money, MoneyError};
pub use size::Size;
pub use status::SettlementState;
