//! # Cart Model
//!
//! An ordered collection of priced cart lines with aggregates that are
//! recomputed inside every mutating call, so they are never stale by the
//! time a mutation returns.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Widget Action             Cart Call                Aggregate Effect    │
//! │  ─────────────             ─────────                ────────────────    │
//! │                                                                         │
//! │  Add to cart ────────────► add(snapshot) ─────────► recompute           │
//! │                                                                         │
//! │  Line qty input ─────────► set_line_quantity() ───► recompute           │
//! │                                                                         │
//! │  Line +/- links ─────────► increment_line() /                           │
//! │                            decrement_line() ──────► recompute           │
//! │                                                                         │
//! │  Trash icon ─────────────► remove(line_id) ───────► recompute           │
//! │                                                     (no-op if gone)     │
//! │                                                                         │
//! │  Order form submit ──────► submit(customer) ──────► (read only)         │
//! │                                                                         │
//! │  Every quantity mutation is routed through the owning cart, which       │
//! │  recomputes synchronously in the same call. Watcher channels only       │
//! │  enqueue values, so no collaborator code re-enters a mutation.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Delivery Fee Policy
//! The flat fee applies whenever the cart holds nonzero total quantity. A
//! cart whose lines all sit at quantity zero (but were not removed) pays
//! no fee.

use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::counter::{BoundedCounter, QuantityBounds};
use crate::money::Money;
use crate::order::{CustomerInfo, OrderLine, OrderPayload};
use crate::product::{CategorySummary, ConfigurationSnapshot};

// =============================================================================
// Line Identity
// =============================================================================

/// Opaque handle identifying one cart line.
///
/// Identity, not content, is the removal key: two lines with identical
/// product and options are distinct entries, exactly as they appear as
/// distinct rows in the cart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineId(#[ts(type = "string")] Uuid);

impl LineId {
    fn generate() -> Self {
        LineId(Uuid::new_v4())
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One priced, quantified entry in the cart.
///
/// ## Design Notes
/// - `product_id` / `name` / `unit_price_cents` / `params` are frozen
///   copies taken from the configuration snapshot. Catalog edits after
///   the add never reach an existing line.
/// - `quantity` stays live: the cart line keeps its own counter and its
///   total is recomputed from it on every read, never cached.
#[derive(Debug)]
pub struct CartLine {
    line_id: LineId,
    /// Product id at add time (frozen).
    pub product_id: String,
    /// Product name at add time (frozen).
    pub name: String,
    /// Per-unit price in cents at add time (frozen).
    pub unit_price_cents: i64,
    /// Adjustable quantity; mutations are routed through the owning cart.
    quantity: BoundedCounter,
    /// Selection summary at add time (frozen).
    pub params: BTreeMap<String, CategorySummary>,
    /// When this line was added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_snapshot(snapshot: ConfigurationSnapshot, bounds: &QuantityBounds) -> Self {
        CartLine {
            line_id: LineId::generate(),
            product_id: snapshot.product_id,
            name: snapshot.name,
            unit_price_cents: snapshot.unit_price_cents,
            quantity: bounds.counter(snapshot.quantity),
            params: snapshot.params,
            added_at: Utc::now(),
        }
    }

    /// This line's identity handle.
    #[inline]
    pub fn line_id(&self) -> LineId {
        self.line_id
    }

    /// The per-unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Current quantity value.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity.value()
    }

    /// Line total: unit price times current quantity, recomputed on
    /// demand so it can never go stale after a quantity change.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity.value()
    }
}

/// Serializable projection of a cart line for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineView {
    pub line_id: LineId,
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
    pub params: BTreeMap<String, CategorySummary>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        CartLineView {
            line_id: line.line_id,
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity(),
            line_total_cents: line.line_total().cents(),
            params: line.params.clone(),
        }
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregates derived from the cart lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}

impl CartTotals {
    /// Subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Delivery fee as Money.
    #[inline]
    pub fn delivery_fee(&self) -> Money {
        Money::from_cents(self.delivery_fee_cents)
    }

    /// Grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The session cart: ordered lines plus always-current aggregates.
///
/// ## Invariants
/// - Line order is insertion order (the display order)
/// - `totals` reflects `lines` after every public mutating call
/// - Removal is idempotent: a stale handle is a silent no-op, so a rapid
///   double-click on the trash icon cannot fail
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    delivery_fee_base: Money,
    bounds: QuantityBounds,
    totals: CartTotals,
}

impl Cart {
    /// Creates an empty cart with the given flat delivery fee and the
    /// quantity bounds new lines inherit.
    pub fn new(delivery_fee_base: Money, bounds: QuantityBounds) -> Self {
        Cart {
            lines: Vec::new(),
            delivery_fee_base,
            bounds,
            totals: CartTotals::default(),
        }
    }

    /// Lines in display order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the cart holds no lines at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Current aggregates.
    #[inline]
    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    /// Looks up a line by handle.
    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.line_id == id)
    }

    /// Serializable views of all lines, in display order.
    pub fn line_views(&self) -> Vec<CartLineView> {
        self.lines.iter().map(CartLineView::from).collect()
    }

    /// Appends a new line built from a configuration snapshot and returns
    /// its handle for later removal.
    ///
    /// The snapshot quantity is clamped into the cart's line bounds, the
    /// same absolute-clamp policy every counter write follows.
    pub fn add(&mut self, snapshot: ConfigurationSnapshot) -> LineId {
        let line = CartLine::from_snapshot(snapshot, &self.bounds);
        let id = line.line_id;
        self.lines.push(line);
        self.recompute_aggregates();
        id
    }

    /// Removes the line with the given handle.
    ///
    /// A handle that is not present (already removed, never existed) is a
    /// silent no-op and leaves the lines untouched.
    pub fn remove(&mut self, id: LineId) {
        self.lines.retain(|line| line.line_id != id);
        self.recompute_aggregates();
    }

    /// Sets a line's quantity from raw text input, then recomputes.
    ///
    /// Follows the counter's own policy: unparseable input keeps the
    /// prior quantity, out-of-range input pins to the nearest bound.
    /// Unknown handles are a no-op.
    pub fn set_line_quantity(&mut self, id: LineId, raw: &str) {
        if let Some(line) = self.line_mut(id) {
            line.quantity.set_value(raw);
            self.recompute_aggregates();
        }
    }

    /// Increments a line's quantity, then recomputes.
    pub fn increment_line(&mut self, id: LineId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity.increment();
            self.recompute_aggregates();
        }
    }

    /// Decrements a line's quantity, then recomputes.
    pub fn decrement_line(&mut self, id: LineId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity.decrement();
            self.recompute_aggregates();
        }
    }

    /// Subscribes to a line's quantity changes, for the collaborator
    /// keeping the line's rendered total current. `None` for unknown
    /// handles.
    pub fn subscribe_line(&mut self, id: LineId) -> Option<Receiver<i64>> {
        self.line_mut(id).map(|line| line.quantity.subscribe())
    }

    /// Recomputes the aggregates from the lines.
    ///
    /// A pure function of `lines`: calling it twice in a row without an
    /// intervening mutation yields identical totals. Public mutating
    /// calls invoke it before returning; it is exposed for callers that
    /// want to re-assert the invariant.
    pub fn recompute_aggregates(&mut self) {
        let total_quantity: i64 = self.lines.iter().map(|line| line.quantity()).sum();
        let subtotal: Money = self.lines.iter().map(|line| line.line_total()).sum();
        let delivery_fee = if total_quantity > 0 {
            self.delivery_fee_base
        } else {
            Money::zero()
        };

        self.totals = CartTotals {
            total_quantity,
            subtotal_cents: subtotal.cents(),
            delivery_fee_cents: delivery_fee.cents(),
            total_cents: (subtotal + delivery_fee).cents(),
        };
    }

    /// Shapes the immutable order payload for the submission collaborator.
    ///
    /// Read-only: the cart is left untouched, and whatever the transport
    /// does with the payload afterwards never rolls back cart state.
    pub fn submit(&self, customer: CustomerInfo) -> OrderPayload {
        OrderPayload {
            address: customer.address,
            phone: customer.phone,
            total_price: self.totals.total_cents,
            subtotal_price: self.totals.subtotal_cents,
            total_number: self.totals.total_quantity,
            delivery_fee: self.totals.delivery_fee_cents,
            products: self.lines.iter().map(OrderLine::from).collect(),
            placed_at: Utc::now(),
        }
    }

    fn line_mut(&mut self, id: LineId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.line_id == id)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            id: line.product_id.clone(),
            amount: line.quantity(),
            price: line.line_total().cents(),
            price_single: line.unit_price_cents,
            name: line.name.clone(),
            params: line.params.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
