//! Value objects: equality by value, not identity.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// An amount of money in the smallest currency unit (e.g. paise, cents).
///
/// The storefront works in a single currency, so the unit is implied by
/// configuration rather than carried on every value. Arithmetic saturates
/// instead of wrapping.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
