//! Per-user shopping cart: item → size → quantity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::ProductId;

/// Nested cart mapping. Sizes with zero quantity are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<ProductId, BTreeMap<String, u32>>);

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item` in `size`. Returns the new quantity.
    pub fn add_one(&mut self, item: &ProductId, size: &str) -> u32 {
        let quantity = self
            .0
            .entry(item.clone())
            .or_default()
            .entry(size.to_string())
            .or_insert(0);
        *quantity += 1;
        *quantity
    }

    /// Set the quantity for `item` in `size`.
    ///
    /// Zero removes the size, and the item once it has no sizes left.
    pub fn set_quantity(
        &mut self,
        item: &ProductId,
        size: &str,
        quantity: i64,
    ) -> Result<(), DomainError> {
        if quantity < 0 {
            return Err(DomainError::NegativeQuantity { quantity });
        }
        if quantity == 0 {
            if let Some(sizes) = self.0.get_mut(item) {
                sizes.remove(size);
                if sizes.is_empty() {
                    self.0.remove(item);
                }
            }
            return Ok(());
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.0
            .entry(item.clone())
            .or_default()
            .insert(size.to_string(), quantity);
        Ok(())
    }

    /// Quantity of `item` in `size`, zero when absent.
    #[must_use]
    pub fn quantity(&self, item: &ProductId, size: &str) -> u32 {
        self.0
            .get(item)
            .and_then(|sizes| sizes.get(size))
            .copied()
            .unwrap_or(0)
    }

    /// Total units across all items and sizes.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.0.values().flat_map(BTreeMap::values).sum()
    }

    /// Iterate `(item, size, quantity)` triples.
    pub fn lines(&self) -> impl Iterator<Item = (&ProductId, &str, u32)> {
        self.0.iter().flat_map(|(item, sizes)| {
            sizes
                .iter()
                .map(move |(size, quantity)| (item, size.as_str(), *quantity))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
