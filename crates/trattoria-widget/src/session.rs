//! # Order Session
//!
//! One user's ordering session: the loaded catalog, the runtime settings,
//! the shared cart, and the transport seam orders leave through.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Session                                     │
//! │                                                                         │
//! │  configure("margherita") ──► ProductConfiguration                      │
//! │        │                        select / deselect / amount             │
//! │        ▼                                                                │
//! │  add_to_cart(&config) ─────► snapshot ──► Cart.add ──► LineId          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  set_line_quantity / increment_line / decrement_line / remove_line     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  submit(customer) ─────────► OrderPayload ──► OrderTransport.deliver   │
//! │                                                                         │
//! │  The session never awaits the transport: delivery is fire-and-forget   │
//! │  and a failed delivery never rolls the cart back.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};
use trattoria_core::{
    validation, CartLineView, CartTotals, CoreError, CoreResult, CustomerInfo, LineId,
    OrderPayload, ProductConfiguration, QuantityBounds,
};

use crate::catalog::Catalog;
use crate::settings::Settings;
use crate::state::CartState;

// =============================================================================
// Order Transport Seam
// =============================================================================

/// The order-submission collaborator.
///
/// Implementations own the actual transport (HTTP POST, IPC bridge,
/// test recorder). `deliver` must not block the caller for long; whether
/// the order actually arrived is invisible to the session.
pub trait OrderTransport: Send + Sync {
    fn deliver(&self, payload: &OrderPayload);
}

/// Transport that drops every payload. Used headless and in tests.
#[derive(Debug, Default)]
pub struct NoopTransport;

impl OrderTransport for NoopTransport {
    fn deliver(&self, _payload: &OrderPayload) {}
}

// =============================================================================
// Order Session
// =============================================================================

/// The widget's top-level handle, created once per page load.
pub struct OrderSession {
    catalog: Catalog,
    settings: Settings,
    bounds: QuantityBounds,
    cart: CartState,
    transport: Box<dyn OrderTransport>,
}

impl OrderSession {
    /// Creates a session with no outbound transport.
    ///
    /// Fails with [`CoreError::InvalidRange`] when the settings carry an
    /// inverted amount range; that is a deployment configuration error,
    /// not something to limp past.
    pub fn new(catalog: Catalog, settings: Settings) -> CoreResult<Self> {
        Self::with_transport(catalog, settings, Box::new(NoopTransport))
    }

    /// Creates a session delivering submitted orders to `transport`.
    pub fn with_transport(
        catalog: Catalog,
        settings: Settings,
        transport: Box<dyn OrderTransport>,
    ) -> CoreResult<Self> {
        let bounds = settings.amount_widget.bounds()?;
        let cart = CartState::new(settings.cart.delivery_fee(), bounds);
        info!(products = catalog.len(), "order session started");

        Ok(OrderSession {
            catalog,
            settings,
            bounds,
            cart,
            transport,
        })
    }

    /// The loaded catalog.
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active settings.
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A shared handle to the cart, for embedders that drive the cart
    /// directly from another thread.
    pub fn cart_state(&self) -> CartState {
        self.cart.clone()
    }

    /// Starts configuring a product.
    ///
    /// The returned configuration starts at the catalog defaults with the
    /// amount picker at the configured starting value.
    pub fn configure(&self, product_id: &str) -> CoreResult<ProductConfiguration> {
        let definition = self
            .catalog
            .get(product_id)
            .ok_or_else(|| CoreError::UnknownProduct(product_id.to_string()))?;

        debug!(product_id, "configure product");
        let amount = self.bounds.counter(self.settings.amount_widget.default_value);
        Ok(ProductConfiguration::new(definition.clone(), amount))
    }

    /// Freezes a configuration and appends it to the cart.
    ///
    /// Selection entries the product does not know are logged and then
    /// priced as not-selected; stale form state must not break adding.
    pub fn add_to_cart(&self, config: &ProductConfiguration) -> LineId {
        for error in validation::unknown_references(config.definition(), config.selection()) {
            warn!(%error, "ignoring unknown selection reference");
        }

        let snapshot = config.snapshot();
        debug!(
            product_id = %snapshot.product_id,
            quantity = snapshot.quantity,
            unit_price_cents = snapshot.unit_price_cents,
            "add to cart"
        );
        self.cart.with_cart_mut(|cart| cart.add(snapshot))
    }

    /// Removes a cart line. Unknown handles are a silent no-op.
    pub fn remove_line(&self, id: LineId) {
        debug!(?id, "remove cart line");
        self.cart.with_cart_mut(|cart| cart.remove(id));
    }

    /// Sets a line's quantity from raw text input.
    pub fn set_line_quantity(&self, id: LineId, raw: &str) {
        self.cart.with_cart_mut(|cart| cart.set_line_quantity(id, raw));
    }

    /// Increments a line's quantity.
    pub fn increment_line(&self, id: LineId) {
        self.cart.with_cart_mut(|cart| cart.increment_line(id));
    }

    /// Decrements a line's quantity.
    pub fn decrement_line(&self, id: LineId) {
        self.cart.with_cart_mut(|cart| cart.decrement_line(id));
    }

    /// Everything the cart rendering needs: line views plus totals.
    pub fn cart_view(&self) -> (Vec<CartLineView>, CartTotals) {
        self.cart.with_cart(|cart| (cart.line_views(), cart.totals()))
    }

    /// Current aggregates.
    pub fn totals(&self) -> CartTotals {
        self.cart.with_cart(|cart| cart.totals())
    }

    /// Shapes the order payload, hands it to the transport, and returns
    /// it.
    ///
    /// Fire-and-forget: the session does not await, retry, or roll back.
    /// The cart keeps its lines afterwards; clearing after a confirmed
    /// order is the embedder's call, because only it learns the outcome.
    pub fn submit(&self, customer: CustomerInfo) -> OrderPayload {
        let payload = self.cart.with_cart(|cart| cart.submit(customer));
        info!(
            total_number = payload.total_number,
            total_price = payload.total_price,
            lines = payload.products.len(),
            "submitting order"
        );
        self.transport.deliver(&payload);
        payload
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const CATALOG_JSON: &str = r#"[
        {
            "id": "margherita",
            "name": "Margherita",
            "basePriceCents": 3000,
            "params": {
                "sauce": {
                    "label": "Sauce",
                    "options": {
                        "tomato": { "label": "Tomato", "priceDeltaCents": 200, "default": true },
                        "cream": { "label": "Sour cream", "priceDeltaCents": 200 }
                    }
                },
                "toppings": {
                    "label": "Toppings",
                    "options": {
                        "olives": { "label": "Olives", "priceDeltaCents": 200 },
                        "salami": { "label": "Salami", "priceDeltaCents": 300 }
                    }
                }
            }
        },
        { "id": "cola", "name": "Cola", "basePriceCents": 500 }
    ]"#;

    /// Transport that records every delivered payload.
    #[derive(Default)]
    struct RecordingTransport {
        delivered: Arc<Mutex<Vec<OrderPayload>>>,
    }

    impl OrderTransport for RecordingTransport {
        fn deliver(&self, payload: &OrderPayload) {
            self.delivered.lock().unwrap().push(payload.clone());
        }
    }

    fn session() -> OrderSession {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        OrderSession::new(catalog, Settings::default()).unwrap()
    }

    #[test]
    fn test_configure_unknown_product() {
        let err = session().configure("calzone").unwrap_err();
        assert!(matches!(err, CoreError::UnknownProduct(id) if id == "calzone"));
    }

    #[test]
    fn test_configure_starts_at_defaults() {
        let config = session().configure("margherita").unwrap();
        assert_eq!(config.unit_price().cents(), 3000);
        assert_eq!(config.amount().value(), 1);
    }

    #[test]
    fn test_full_ordering_flow() {
        let session = session();

        let mut pizza = session.configure("margherita").unwrap();
        pizza.select("toppings", "olives");
        pizza.amount_mut().set(2);
        let pizza_line = session.add_to_cart(&pizza);

        let mut cola = session.configure("cola").unwrap();
        cola.amount_mut().set(3);
        session.add_to_cart(&cola);

        let (views, totals) = session.cart_view();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].unit_price_cents, 3200);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.subtotal_cents, 2 * 3200 + 3 * 500);
        assert_eq!(totals.delivery_fee_cents, 2000);

        session.set_line_quantity(pizza_line, "1");
        assert_eq!(session.totals().subtotal_cents, 3200 + 3 * 500);

        session.remove_line(pizza_line);
        session.remove_line(pizza_line); // stale handle, still fine
        assert_eq!(session.totals().subtotal_cents, 3 * 500);
    }

    #[test]
    fn test_submit_delivers_payload_and_keeps_cart() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let transport = RecordingTransport {
            delivered: Arc::clone(&delivered),
        };
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let session =
            OrderSession::with_transport(catalog, Settings::default(), Box::new(transport))
                .unwrap();

        let mut cola = session.configure("cola").unwrap();
        cola.amount_mut().set(2);
        session.add_to_cart(&cola);

        let payload = session.submit(CustomerInfo {
            address: "12 Oven Lane".to_string(),
            phone: "555-0321".to_string(),
        });

        assert_eq!(payload.subtotal_price, 1000);
        assert_eq!(payload.total_price, 3000);

        let sent = delivered.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], payload);
        drop(sent);

        // submission does not consume the cart
        assert_eq!(session.totals().total_cents, 3000);
    }

    #[test]
    fn test_unknown_selection_survives_add() {
        let session = session();
        let mut pizza = session.configure("margherita").unwrap();
        pizza.select("extras", "gold-leaf");
        let line = session.add_to_cart(&pizza);

        let (views, _) = session.cart_view();
        assert_eq!(views[0].line_id, line);
        assert_eq!(views[0].unit_price_cents, 3000);
        assert!(!views[0].params.contains_key("extras"));
    }

    #[test]
    fn test_inverted_settings_fail_session_construction() {
        let mut settings = Settings::default();
        settings.amount_widget.min = 5;
        settings.amount_widget.max = 2;
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert!(matches!(
            OrderSession::new(catalog, settings),
            Err(CoreError::InvalidRange { .. })
        ));
    }
}
