use core::str::FromStr;

use serde::{Deserialize, Serialize};

use greennest_core::{DomainError, DomainResult, Money};

/// Product identifier as it appears in the catalog (e.g. `p1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Build an identifier, rejecting empty or whitespace-bearing values.
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_id(format!(
                "ProductId: whitespace in {id:?}"
            )));
        }
        Ok(Self(id))
    }

    /// Identifier from built-in data that is known to be well formed.
    pub(crate) fn trusted(id: &str) -> Self {
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// An immutable catalog record.
///
/// Cart lines hold a clone of this as their product snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    /// Price in smallest currency unit.
    unit_price: Money,
    category: String,
    image_ref: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            category: category.into(),
            image_ref: image_ref.into(),
        }
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Check the record-level rules a catalog entry must satisfy.
    pub fn validate(&self) -> DomainResult<()> {
        // Deserialized ids bypass `ProductId::new`.
        ProductId::new(self.id.as_str())?;

        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!("product {}: name cannot be empty", self.id)));
        }

        if self.category.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: category cannot be empty",
                self.id
            )));
        }

        Ok(())
    }
}
