//! Derived views over the cart state.
//!
//! Recomputed on every read; nothing here is stored.

use serde::Serialize;

use greennest_core::Money;

use crate::cart::CartState;

/// Sum of quantities across all lines.
pub fn total_item_count(state: &CartState) -> u64 {
    state.lines().map(|line| u64::from(line.quantity)).sum()
}

/// Sum over lines of `quantity × unit_price`.
pub fn total_cost(state: &CartState) -> Money {
    state
        .lines()
        .map(|line| line.product.unit_price().times(line.quantity))
        .sum()
}

/// The cart figures shown in the header badge and on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub item_count: u64,
    pub total_cost: Money,
    pub line_count: usize,
}

impl CartSummary {
    pub fn of(state: &CartState) -> Self {
        Self {
            item_count: total_item_count(state),
            total_cost: total_cost(state),
            line_count: state.line_count(),
        }
    }
}
