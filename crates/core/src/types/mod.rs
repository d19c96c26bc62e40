//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod item;
pub mod price;

pub use cart::{Cart, CartChange, DecrementPolicy, DecrementPolicyError};
pub use id::ProductId;
pub use item::{CartItem, NewCartItem};
pub use price::Price;
