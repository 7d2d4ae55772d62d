//! # trattoria-widget: Session Layer for the Trattoria Ordering Widget
//!
//! Wires the pure core into a usable widget session: parses the catalog
//! contract, carries runtime settings, owns the thread-safe cart state,
//! and exposes the transport seam submitted orders leave through.
//!
//! Everything visual stays in the embedding frontend. This crate hands
//! it data ([`trattoria_core::CartLineView`], [`trattoria_core::CartTotals`],
//! product definitions) and receives data back (selections, raw quantity
//! input, customer details); no markup, no DOM, no HTTP.
//!
//! ## Modules
//!
//! - [`catalog`] - product definitions parsed from the catalog source
//! - [`settings`] - runtime configuration with environment overrides
//! - [`state`] - shared, mutex-guarded cart state
//! - [`session`] - the top-level [`session::OrderSession`] handle

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod session;
pub mod settings;
pub mod state;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use session::{NoopTransport, OrderSession, OrderTransport};
pub use settings::{AmountWidgetSettings, CartSettings, Settings};
pub use state::CartState;

// Core types embedders need alongside the session.
pub use trattoria_core;
