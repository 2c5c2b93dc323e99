use std::collections::BTreeSet;
use std::convert::Infallible;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use greennest_catalog::{Product, ProductId};
use greennest_core::{Aggregate, AggregateRoot, CartId, DomainError};
use greennest_events::Event;

/// Cart line: a product snapshot and how many of it are in the cart.
///
/// Quantity is always at least 1 while the line is part of a [`CartState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// Cart contents.
///
/// `lines` keeps insertion order so the cart page lists products in the
/// order they were first added. `added` holds the ids whose listing "Add"
/// action is disabled; it is always a subset of the keys of `lines`.
///
/// Deserializing goes through the same checks: every line has a positive
/// quantity and is keyed by its own product, and `added` names exactly the
/// products that have a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartStateRecord")]
pub struct CartState {
    lines: IndexMap<ProductId, CartLine>,
    added: BTreeSet<ProductId>,
}

/// Unchecked wire shape of a [`CartState`].
#[derive(Deserialize)]
struct CartStateRecord {
    lines: IndexMap<ProductId, CartLine>,
    added: BTreeSet<ProductId>,
}

impl TryFrom<CartStateRecord> for CartState {
    type Error = DomainError;

    fn try_from(record: CartStateRecord) -> Result<Self, Self::Error> {
        for (id, line) in &record.lines {
            line.product.validate()?;
            if line.product.id_typed() != id {
                return Err(DomainError::invariant(format!(
                    "cart line {id} holds product {}",
                    line.product.id_typed()
                )));
            }
            if line.quantity == 0 {
                return Err(DomainError::invariant(format!("cart line {id} has quantity 0")));
            }
            if !record.added.contains(id) {
                return Err(DomainError::invariant(format!("cart line {id} is not marked as added")));
            }
        }

        if let Some(id) = record.added.iter().find(|id| !record.lines.contains_key(*id)) {
            return Err(DomainError::invariant(format!("{id} is marked as added without a cart line")));
        }

        Ok(Self {
            lines: record.lines,
            added: record.added,
        })
    }
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.get(id)
    }

    /// Quantity of `id` in the cart, 0 when there is no line.
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.lines.get(id).map_or(0, |line| line.quantity)
    }

    pub fn is_added(&self, id: &ProductId) -> bool {
        self.added.contains(id)
    }

    pub fn added(&self) -> &BTreeSet<ProductId> {
        &self.added
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.added.is_empty()
    }

    /// Decide which events `action` produces against this state.
    ///
    /// Never mutates. An empty vec means the action is a no-op here (unknown
    /// id for increase/decrease/remove).
    pub fn decide(&self, action: &CartAction) -> Vec<CartEvent> {
        match action {
            CartAction::AddToCart(product) => {
                if self.lines.contains_key(product.id_typed()) {
                    vec![CartEvent::QuantityIncreased {
                        product_id: product.id_typed().clone(),
                    }]
                } else {
                    vec![CartEvent::LineAdded {
                        product: product.clone(),
                    }]
                }
            }
            CartAction::Increase(id) => match self.lines.get(id) {
                Some(_) => vec![CartEvent::QuantityIncreased { product_id: id.clone() }],
                None => Vec::new(),
            },
            CartAction::Decrease(id) => match self.lines.get(id) {
                Some(line) if line.quantity <= 1 => {
                    vec![CartEvent::LineRemoved { product_id: id.clone() }]
                }
                Some(_) => vec![CartEvent::QuantityDecreased { product_id: id.clone() }],
                None => Vec::new(),
            },
            CartAction::RemoveItem(id) => {
                if self.lines.contains_key(id) || self.added.contains(id) {
                    vec![CartEvent::LineRemoved { product_id: id.clone() }]
                } else {
                    Vec::new()
                }
            }
            CartAction::ClearCart => vec![CartEvent::CartCleared],
        }
    }

    /// Evolve state from a single event.
    pub fn evolve(&mut self, event: &CartEvent) {
        match event {
            CartEvent::LineAdded { product } => {
                let id = product.id_typed().clone();
                self.lines
                    .entry(id.clone())
                    .or_insert_with(|| CartLine {
                        product: product.clone(),
                        quantity: 0,
                    })
                    .quantity += 1;
                self.added.insert(id);
            }
            CartEvent::QuantityIncreased { product_id } => {
                if let Some(line) = self.lines.get_mut(product_id) {
                    line.quantity = line.quantity.saturating_add(1);
                }
            }
            CartEvent::QuantityDecreased { product_id } => {
                let depleted = match self.lines.get_mut(product_id) {
                    Some(line) => {
                        line.quantity = line.quantity.saturating_sub(1);
                        line.quantity == 0
                    }
                    None => false,
                };
                if depleted {
                    self.remove(product_id);
                }
            }
            CartEvent::LineRemoved { product_id } => self.remove(product_id),
            CartEvent::CartCleared => {
                self.lines.clear();
                self.added.clear();
            }
        }
    }

    fn remove(&mut self, id: &ProductId) {
        // shift_remove keeps the remaining lines in insertion order.
        self.lines.shift_remove(id);
        self.added.remove(id);
    }
}

/// Pure transition: the state after `action` is applied to `state`.
pub fn reduce(state: &CartState, action: &CartAction) -> CartState {
    let mut next = state.clone();
    for event in state.decide(action) {
        next.evolve(&event);
    }
    next
}

/// Intent dispatched by the pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartAction {
    AddToCart(Product),
    Increase(ProductId),
    Decrease(ProductId),
    RemoveItem(ProductId),
    ClearCart,
}

impl CartAction {
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddToCart(_) => "add_to_cart",
            CartAction::Increase(_) => "increase",
            CartAction::Decrease(_) => "decrease",
            CartAction::RemoveItem(_) => "remove_item",
            CartAction::ClearCart => "clear_cart",
        }
    }

    /// The product the action targets, if any.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            CartAction::AddToCart(product) => Some(product.id_typed()),
            CartAction::Increase(id) | CartAction::Decrease(id) | CartAction::RemoveItem(id) => {
                Some(id)
            }
            CartAction::ClearCart => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    LineAdded { product: Product },
    QuantityIncreased { product_id: ProductId },
    QuantityDecreased { product_id: ProductId },
    LineRemoved { product_id: ProductId },
    CartCleared,
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded { .. } => "cart.line.added",
            CartEvent::QuantityIncreased { .. } => "cart.line.quantity_increased",
            CartEvent::QuantityDecreased { .. } => "cart.line.quantity_decreased",
            CartEvent::LineRemoved { .. } => "cart.line.removed",
            CartEvent::CartCleared => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Aggregate root: Cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    state: CartState,
    version: u64,
}

impl Cart {
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            state: CartState::new(),
            version: 0,
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Cart {
    type Command = CartAction;
    type Event = CartEvent;
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        self.state.evolve(event);
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        Ok(self.state.decide(command))
    }
}
