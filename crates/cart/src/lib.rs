//! Shopping cart domain module.
//!
//! The cart is deterministic domain logic (no IO, no rendering): a pure
//! transition over [`CartState`], the derived views computed from it, and the
//! [`CartStore`] container that owns the single live state and dispatches
//! actions against it.

pub mod cart;
pub mod store;
pub mod views;

pub use cart::{Cart, CartAction, CartEvent, CartLine, CartState, reduce};
pub use store::{CartStore, Dispatched};
pub use views::{CartSummary, total_cost, total_item_count};
