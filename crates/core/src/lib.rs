//! Greenleaf Core - Shared domain types.
//!
//! This crate provides the types shared by every Greenleaf component:
//! - `cart` - Client-side cart state manager and checkout hand-off
//! - `cli` - Command-line host that drives the cart against on-disk storage
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the product descriptor, and price formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
