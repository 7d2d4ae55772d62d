//! # trattoria-core: Pure Business Logic for the Trattoria Ordering Widget
//!
//! This crate is the **heart** of the ordering widget. It contains the
//! pricing/configuration engine and the cart aggregation model as pure
//! logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Trattoria Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (in-browser)                          │   │
//! │  │   Menu UI ──► Option Form ──► Cart UI ──► Order Form            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ data contracts only                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 trattoria-widget (session layer)                │   │
//! │  │    catalog parsing, settings, cart state, order transport seam  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ trattoria-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │  counter  │  │   cart    │  │   order   │  │   │
//! │  │   │ Definition│  │  Bounded  │  │   Cart    │  │  Payload  │  │   │
//! │  │   │ Configur. │  │  Counter  │  │  CartLine │  │  shaping  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DOM • NO NETWORK • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! A product definition plus user selections flows through
//! [`product::ProductConfiguration`] into a frozen
//! [`product::ConfigurationSnapshot`], which [`cart::Cart::add`] turns
//! into a live [`cart::CartLine`]; every cart mutation recomputes the
//! aggregates, and [`cart::Cart::submit`] shapes the final
//! [`order::OrderPayload`].
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input = same output
//! 2. **No I/O**: network, file system, DOM access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Degrade, don't abort**: bad user input keeps the prior valid
//!    state; only malformed construction data surfaces a typed error

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod counter;
pub mod error;
pub mod money;
pub mod order;
pub mod product;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use trattoria_core::Money` instead of
// `use trattoria_core::money::Money`

pub use cart::{Cart, CartLine, CartLineView, CartTotals, LineId};
pub use counter::{BoundedCounter, QuantityBounds};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use order::{CustomerInfo, OrderLine, OrderPayload};
pub use product::{
    CategorySummary, ConfigurationSnapshot, ParamCategory, ParamOption, ProductConfiguration,
    ProductDefinition, SelectionSet,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default starting value for amount pickers.
pub const DEFAULT_AMOUNT: i64 = 1;

/// Default lower bound for amount pickers and cart line quantities.
///
/// Zero, not one: a cart line dropped to zero stays in the cart at no
/// charge until it is removed explicitly.
pub const DEFAULT_MIN_AMOUNT: i64 = 0;

/// Default upper bound for amount pickers and cart line quantities.
///
/// ## Business Reason
/// Prevents accidental over-ordering (typing 100 instead of 10). Larger
/// orders go through whoever answers the phone.
pub const DEFAULT_MAX_AMOUNT: i64 = 10;

/// Default flat delivery fee in cents, applied whenever the cart holds
/// nonzero total quantity.
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 2000;
