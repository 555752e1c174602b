//! Subcommand implementations.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod notifications;
pub mod profile;
pub mod wallet;
