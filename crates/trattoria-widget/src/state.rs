//! # Cart State
//!
//! Shared ownership wrapper around the session cart.
//!
//! ## Thread Safety
//! The core cart is single-threaded by design: every mutation runs to
//! completion before the next one is processed. When the embedder runs
//! the widget off more than one thread, this wrapper is the required
//! serialization point - `Arc` shares the cart, the `Mutex` guarantees
//! one mutation at a time.
//!
//! ## Why Not RwLock?
//! Cart operations are quick and most of them modify state. A RwLock
//! would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use trattoria_core::{Cart, Money, QuantityBounds};

/// Shared handle to the session cart.
#[derive(Debug)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates state around an empty cart.
    pub fn new(delivery_fee_base: Money, bounds: QuantityBounds) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new(delivery_fee_base, bounds))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let line_id = cart_state.with_cart_mut(|cart| cart.add(snapshot));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Clone for CartState {
    /// Clones the handle, not the cart: both handles address the same
    /// underlying cart.
    fn clone(&self) -> Self {
        CartState {
            cart: Arc::clone(&self.cart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use trattoria_core::ConfigurationSnapshot;

    fn state() -> CartState {
        CartState::new(Money::from_major(20), QuantityBounds::new(0, 10).unwrap())
    }

    fn snapshot(quantity: i64) -> ConfigurationSnapshot {
        ConfigurationSnapshot {
            product_id: "cola".to_string(),
            name: "Cola".to_string(),
            unit_price_cents: 500,
            quantity,
            params: BTreeMap::new(),
        }
    }

    #[test]
    fn test_with_cart_mut_mutates_shared_cart() {
        let state = state();
        state.with_cart_mut(|cart| {
            cart.add(snapshot(2));
        });
        assert_eq!(state.with_cart(|cart| cart.totals().subtotal_cents), 1000);
    }

    #[test]
    fn test_clone_shares_the_cart() {
        let state = state();
        let handle = state.clone();
        handle.with_cart_mut(|cart| {
            cart.add(snapshot(1));
        });
        assert_eq!(state.with_cart(|cart| cart.len()), 1);
    }
}
