//! Go Marketplace Core - Shared cart domain types.
//!
//! This crate provides the types used across all Go Marketplace components:
//! - `cart` - The cart store, its storage backends and configuration
//! - `cli` - Command-line front end for inspecting and editing a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart logic - no I/O, no
//! storage access, no async runtime. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, cart items and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
