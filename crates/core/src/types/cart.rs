//! The cart and its mutation rules.
//!
//! [`Cart`] holds the ordered list of lines and implements the three cart
//! operations as plain in-memory transformations. Persistence and change
//! notification live in the `go-marketplace-cart` crate; everything here is
//! synchronous and side-effect free so it can be tested exhaustively.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CartItem, NewCartItem, ProductId};

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line's quantity went up.
    Incremented {
        /// Quantity after the change.
        quantity: i64,
    },
    /// An existing line's quantity went down.
    Decremented {
        /// Quantity after the change.
        quantity: i64,
    },
    /// A line was removed (only under [`DecrementPolicy::RemoveAtZero`]).
    Removed,
    /// Every line was dropped by [`Cart::clear`].
    Cleared,
    /// Nothing changed, e.g. the product is not in the cart.
    Unchanged,
}

impl CartChange {
    /// Returns true if the cart was modified.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Errors that can occur when parsing a [`DecrementPolicy`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown decrement policy '{0}' (expected unbounded, floor or remove)")]
pub struct DecrementPolicyError(String);

/// How `decrement` treats lines that are at or near zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecrementPolicy {
    /// Always subtract one; quantities may go negative.
    #[default]
    Unbounded,
    /// Never go below zero; decrementing an empty line is a no-op.
    FloorAtZero,
    /// Remove the line once its quantity reaches zero.
    RemoveAtZero,
}

impl DecrementPolicy {
    /// Configuration name of the policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unbounded => "unbounded",
            Self::FloorAtZero => "floor",
            Self::RemoveAtZero => "remove",
        }
    }
}

impl fmt::Display for DecrementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecrementPolicy {
    type Err = DecrementPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unbounded" => Ok(Self::Unbounded),
            "floor" | "floor_at_zero" => Ok(Self::FloorAtZero),
            "remove" | "remove_at_zero" => Ok(Self::RemoveAtZero),
            _ => Err(DecrementPolicyError(s.to_string())),
        }
    }
}

/// An ordered list of cart lines.
///
/// Serializes as a bare JSON array of [`CartItem`], which is the persisted
/// format. Line IDs are unique as long as the cart is only modified through
/// [`Cart::add`], [`Cart::increment`] and [`Cart::decrement`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals, or `None` if it does not fit in a [`Decimal`].
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.line_total()?))
    }

    /// Add one unit of a product.
    ///
    /// An existing line only has its quantity bumped; the other fields of the
    /// stored line are kept even if `item` carries different ones.
    pub fn add(&mut self, item: NewCartItem) -> CartChange {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity += 1;
            return CartChange::Incremented {
                quantity: existing.quantity,
            };
        }

        self.items.push(CartItem::from(item));
        CartChange::Added
    }

    /// Add one unit to an existing line. Unknown IDs are ignored.
    pub fn increment(&mut self, id: &ProductId) -> CartChange {
        match self.items.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                line.quantity += 1;
                CartChange::Incremented {
                    quantity: line.quantity,
                }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Remove one unit from an existing line. Unknown IDs are ignored.
    pub fn decrement(&mut self, id: &ProductId, policy: DecrementPolicy) -> CartChange {
        let Some(index) = self.items.iter().position(|line| &line.id == id) else {
            return CartChange::Unchanged;
        };
        let Some(line) = self.items.get_mut(index) else {
            return CartChange::Unchanged;
        };

        match policy {
            DecrementPolicy::FloorAtZero if line.quantity <= 0 => CartChange::Unchanged,
            DecrementPolicy::RemoveAtZero if line.quantity <= 1 => {
                self.items.remove(index);
                CartChange::Removed
            }
            _ => {
                line.quantity -= 1;
                CartChange::Decremented {
                    quantity: line.quantity,
                }
            }
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) -> CartChange {
        if self.items.is_empty() {
            return CartChange::Unchanged;
        }
        self.items.clear();
        CartChange::Cleared
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = core::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
