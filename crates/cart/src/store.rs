//! The cart store: the single owner of the live cart state.
//!
//! Pages never mutate state directly; they hand a [`CartAction`] to
//! [`CartStore::dispatch`] and read back snapshots through `state()` and
//! `summary()`. Applied events are published on an in-memory bus so the
//! shell can tell when a re-render is due.

use chrono::Utc;
use uuid::Uuid;

use greennest_core::{AggregateRoot, CartId};
use greennest_events::{EventBus, EventEnvelope, InMemoryEventBus, Subscription, execute};

use crate::cart::{Cart, CartAction, CartEvent, CartState};
use crate::views::CartSummary;

pub const AGGREGATE_TYPE: &str = "cart";

/// Outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub envelopes: Vec<EventEnvelope<CartEvent>>,
    /// Store revision after the dispatch.
    pub revision: u64,
}

impl Dispatched {
    /// Whether the dispatch changed anything.
    pub fn changed(&self) -> bool {
        !self.envelopes.is_empty()
    }
}

#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    bus: InMemoryEventBus<EventEnvelope<CartEvent>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::with_id(CartId::new())
    }

    pub fn with_id(id: CartId) -> Self {
        Self {
            cart: Cart::empty(id),
            bus: InMemoryEventBus::new(),
        }
    }

    pub fn id(&self) -> CartId {
        *self.cart.id()
    }

    /// Number of events applied since the store was created.
    pub fn revision(&self) -> u64 {
        self.cart.version()
    }

    pub fn state(&self) -> &CartState {
        self.cart.state()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(self.cart.state())
    }

    /// Receive every envelope applied after this call.
    pub fn subscribe(&self) -> Subscription<EventEnvelope<CartEvent>> {
        self.bus.subscribe()
    }

    /// Apply one action.
    ///
    /// Never fails: unknown ids are silent no-ops that publish nothing and
    /// leave the revision where it was.
    pub fn dispatch(&mut self, action: CartAction) -> Dispatched {
        let base = self.cart.version();
        let events = match execute(&mut self.cart, &action) {
            Ok(events) => events,
            Err(never) => match never {},
        };

        let occurred_at = Utc::now();
        let cart_id = self.id();
        let envelopes: Vec<EventEnvelope<CartEvent>> = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| {
                EventEnvelope::new(
                    Uuid::now_v7(),
                    cart_id,
                    AGGREGATE_TYPE,
                    base + i as u64 + 1,
                    occurred_at,
                    event,
                )
            })
            .collect();

        for envelope in &envelopes {
            if let Err(err) = self.bus.publish(envelope.clone()) {
                tracing::warn!(?err, sequence = envelope.sequence_number(), "failed to publish cart event");
            }
        }

        let revision = self.cart.version();
        tracing::debug!(
            cart_id = %cart_id,
            action = action.kind(),
            product_id = action.product_id().map(|id| id.as_str()),
            events = envelopes.len(),
            revision,
            "dispatched cart action"
        );

        Dispatched { envelopes, revision }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greennest_catalog::{Catalog, Product, ProductId};
    use greennest_core::Money;
    use greennest_events::Event;

    fn product(id: &str) -> Product {
        Catalog::seed()
            .get(&ProductId::new(id).unwrap())
            .cloned()
            .unwrap()
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn dispatch_applies_and_publishes() {
        let mut store = CartStore::new();
        let sub = store.subscribe();

        let out = store.dispatch(CartAction::AddToCart(product("p1")));
        assert!(out.changed());
        assert_eq!(out.revision, 1);
        assert_eq!(store.state().quantity(&pid("p1")), 1);

        let received = sub.drain();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].sequence_number(), 1);
        assert_eq!(received[0].aggregate_type(), AGGREGATE_TYPE);
        assert_eq!(received[0].aggregate_id(), Uuid::from(store.id()));
        assert_eq!(received[0].payload().event_type(), "cart.line.added");
    }

    #[test]
    fn noop_dispatch_keeps_revision_and_publishes_nothing() {
        let mut store = CartStore::new();
        let sub = store.subscribe();

        let out = store.dispatch(CartAction::Increase(pid("p2")));
        assert!(!out.changed());
        assert_eq!(out.revision, 0);
        assert_eq!(store.revision(), 0);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn sequence_numbers_continue_across_dispatches() {
        let mut store = CartStore::new();
        store.dispatch(CartAction::AddToCart(product("p1")));
        store.dispatch(CartAction::AddToCart(product("p2")));
        let out = store.dispatch(CartAction::Decrease(pid("p1")));

        assert_eq!(out.envelopes[0].sequence_number(), 3);
        assert_eq!(
            out.envelopes[0].payload(),
            &CartEvent::LineRemoved { product_id: pid("p1") }
        );
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn summary_reflects_latest_state() {
        let mut store = CartStore::new();
        store.dispatch(CartAction::AddToCart(product("p1")));
        store.dispatch(CartAction::AddToCart(product("p2")));
        store.dispatch(CartAction::AddToCart(product("p2")));

        let summary = store.summary();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total_cost, Money::from_minor(1797));
    }

    #[test]
    fn clear_cart_returns_to_empty_state() {
        let mut store = CartStore::new();
        store.dispatch(CartAction::AddToCart(product("p6")));
        store.dispatch(CartAction::Increase(pid("p6")));
        let out = store.dispatch(CartAction::ClearCart);

        assert!(out.changed());
        assert_eq!(store.state(), &CartState::new());
        assert_eq!(store.summary().item_count, 0);
    }

    #[test]
    fn with_id_uses_given_cart_id() {
        let id = CartId::new();
        assert_eq!(CartStore::with_id(id).id(), id);
    }
}
