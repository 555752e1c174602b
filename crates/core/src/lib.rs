//! Brewline Core - Shared domain types.
//!
//! This crate provides the types used across all Brewline components:
//! - `engine` - Cart, wallet, and account services over a key-value store
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage access, no async. The cart ledger lives here because every one of
//! its operations is a total function over in-memory data.
//!
//! # Modules
//!
//! - [`types`] - Money, type-safe IDs, emails, sizes, and settlement states
//! - [`cart`] - Line items, the cart ledger, and ephemeral orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, LineItem, Order, Product};
pub use types::*;
