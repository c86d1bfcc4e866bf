//! Cart state and its transitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CartError, CartLineItem};
use crate::PizzaId;

/// The ordered list of cart lines, unique by `pizza_id`.
///
/// Transitions validate before touching the list, so a rejected transition
/// leaves the state unchanged. Lines are replaced by updated values rather
/// than mutated through a lookup reference.
///
/// Serialized as the bare list of lines. Deserializing goes through
/// `From<Vec<CartLineItem>>`, so stored data cannot bypass validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct CartState {
    lines: Vec<CartLineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `pizza_id`, if present.
    #[must_use]
    pub fn line(&self, pizza_id: PizzaId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.pizza_id == pizza_id)
    }

    fn position(&self, pizza_id: PizzaId) -> Option<usize> {
        self.lines.iter().position(|line| line.pizza_id == pizza_id)
    }

    fn replace(&mut self, index: usize, line: CartLineItem) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = line;
        }
    }

    // The cart total with `candidate` in place of the line at `index`
    // (or appended), or `None` if it does not fit in a `Decimal`.
    fn total_with(&self, index: Option<usize>, candidate: &CartLineItem) -> Option<Decimal> {
        self.lines
            .iter()
            .enumerate()
            .filter(|&(i, _)| Some(i) != index)
            .try_fold(candidate.total_price, |acc, (_, line)| {
                acc.checked_add(line.total_price)
            })
    }

    fn ensure_total_fits(
        &self,
        index: Option<usize>,
        candidate: &CartLineItem,
    ) -> Result<(), CartError> {
        self.total_with(index, candidate)
            .map(|_| ())
            .ok_or(CartError::PriceOverflow(candidate.pizza_id))
    }

    // Shared by delete and decrease-to-zero.
    fn remove_line(&mut self, pizza_id: PizzaId) -> Option<CartLineItem> {
        let index = self.position(pizza_id)?;
        Some(self.lines.remove(index))
    }

    /// Add a line, merging into an existing line with the same pizza.
    ///
    /// A merge adds the incoming quantity and total to the existing line.
    ///
    /// # Errors
    ///
    /// Rejects payloads that fail [`CartLineItem::validate`], merges whose
    /// unit price differs from the line in the cart, quantity overflow, and
    /// [`CartError::PriceOverflow`] when the line or cart total would not fit.
    pub fn add_item(&mut self, item: CartLineItem) -> Result<(), CartError> {
        item.validate()?;

        let Some(index) = self.position(item.pizza_id) else {
            self.ensure_total_fits(None, &item)?;
            self.lines.push(item);
            return Ok(());
        };

        let existing = self
            .lines
            .get(index)
            .ok_or(CartError::LineNotFound(item.pizza_id))?;

        if existing.unit_price != item.unit_price {
            return Err(CartError::UnitPriceMismatch {
                pizza_id: item.pizza_id,
                existing: existing.unit_price,
                incoming: item.unit_price,
            });
        }

        let quantity = existing
            .quantity
            .checked_add(item.quantity)
            .ok_or(CartError::QuantityOverflow(item.pizza_id))?;

        let total_price = existing
            .total_price
            .checked_add(item.total_price)
            .ok_or(CartError::PriceOverflow(item.pizza_id))?;

        let merged = CartLineItem {
            quantity,
            total_price,
            ..existing.clone()
        };
        self.ensure_total_fits(Some(index), &merged)?;
        self.replace(index, merged);
        Ok(())
    }

    /// Remove the line for `pizza_id`. Absent ids are ignored.
    ///
    /// Returns the removed line.
    pub fn delete_item(&mut self, pizza_id: PizzaId) -> Option<CartLineItem> {
        self.remove_line(pizza_id)
    }

    /// Add one unit to an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the pizza is not in the cart
    /// [`CartError::QuantityOverflow`] at `u32::MAX`, and
    /// [`CartError::PriceOverflow`] when the line or cart total would not fit.
    pub fn increase_quantity(&mut self, pizza_id: PizzaId) -> Result<(), CartError> {
        let index = self
            .position(pizza_id)
            .ok_or(CartError::LineNotFound(pizza_id))?;
        let line = self
            .lines
            .get(index)
            .ok_or(CartError::LineNotFound(pizza_id))?;

        let quantity = line
            .quantity
            .checked_add(1)
            .ok_or(CartError::QuantityOverflow(pizza_id))?;

        let updated = line.with_quantity(quantity)?;
        self.ensure_total_fits(Some(index), &updated)?;
        self.replace(index, updated);
        Ok(())
    }

    /// Remove one unit from an existing line, dropping the line at zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the pizza is not in the cart.
    pub fn decrease_quantity(&mut self, pizza_id: PizzaId) -> Result<(), CartError> {
        let index = self
            .position(pizza_id)
            .ok_or(CartError::LineNotFound(pizza_id))?;
        let line = self
            .lines
            .get(index)
            .ok_or(CartError::LineNotFound(pizza_id))?;

        match line.quantity.saturating_sub(1) {
            0 => {
                self.remove_line(pizza_id);
            }
            quantity => {
                let updated = line.with_quantity(quantity)?;
                self.replace(index, updated);
            }
        }
        Ok(())
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl From<Vec<CartLineItem>> for CartState {
    /// Rebuild a state from stored lines, keeping the first line per pizza
    /// and dropping lines that would break the cart's invariants.
    fn from(lines: Vec<CartLineItem>) -> Self {
        let mut state = Self::new();
        let mut total = Decimal::ZERO;
        for line in lines {
            if line.validate().is_err() || state.position(line.pizza_id).is_some() {
                continue;
            }
            if let Some(next) = total.checked_add(line.total_price) {
                total = next;
                state.lines.push(line);
            }
        }
        state
    }
}

impl From<CartState> for Vec<CartLineItem> {
    fn from(state: CartState) -> Self {
        state.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i32, quantity: u32, unit_price: i64) -> CartLineItem {
        CartLineItem::new(
            PizzaId::new(id),
            format!("Pizza {id}"),
            quantity,
            Decimal::from(unit_price),
        )
    }

    #[test]
    fn test_add_appends_new_line() {
        let mut state = CartState::new();
        state.add_item(line(1, 2, 10)).unwrap();
        state.add_item(line(2, 1, 15)).unwrap();

        let ids: Vec<i32> = state.lines().iter().map(|l| l.pizza_id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_add_merges_existing_line() {
        let mut state = CartState::new();
        state.add_item(line(12, 2, 10)).unwrap();
        state.add_item(line(12, 1, 10)).unwrap();

        assert_eq!(state.lines().len(), 1);
        let merged = state.line(PizzaId::new(12)).unwrap();
        assert_eq!(merged.quantity, 3);
        assert_eq!(merged.total_price, Decimal::from(30));
    }

    #[test]
    fn test_add_rejects_inconsistent_total_without_change() {
        let mut state = CartState::new();
        state.add_item(line(12, 2, 10)).unwrap();
        let before = state.clone();

        let mut bad = line(12, 1, 10);
        bad.total_price = Decimal::from(99);
        assert!(matches!(
            state.add_item(bad),
            Err(CartError::InconsistentTotal { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_rejects_unit_price_mismatch() {
        let mut state = CartState::new();
        state.add_item(line(12, 2, 10)).unwrap();

        let err = state.add_item(line(12, 1, 12)).unwrap_err();
        assert_eq!(
            err,
            CartError::UnitPriceMismatch {
                pizza_id: PizzaId::new(12),
                existing: Decimal::from(10),
                incoming: Decimal::from(12),
            }
        );
        assert_eq!(state.line(PizzaId::new(12)).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_rejects_quantity_overflow() {
        let mut state = CartState::new();
        state.add_item(line(1, u32::MAX, 0)).unwrap();
        assert_eq!(
            state.add_item(line(1, 1, 0)),
            Err(CartError::QuantityOverflow(PizzaId::new(1)))
        );
        assert_eq!(
            state.increase_quantity(PizzaId::new(1)),
            Err(CartError::QuantityOverflow(PizzaId::new(1)))
        );
    }

    #[test]
    fn test_add_rejects_line_total_overflow() {
        let mut state = CartState::new();
        let item = CartLineItem::new(PizzaId::new(1), "Gold Leaf", 2, Decimal::MAX);
        assert_eq!(
            state.add_item(item),
            Err(CartError::PriceOverflow(PizzaId::new(1)))
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_add_rejects_merge_total_overflow() {
        let mut state = CartState::new();
        let item = CartLineItem::new(PizzaId::new(1), "Gold Leaf", 1, Decimal::MAX);
        state.add_item(item.clone()).unwrap();
        let before = state.clone();

        assert_eq!(
            state.add_item(item),
            Err(CartError::PriceOverflow(PizzaId::new(1)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_rejects_cart_total_overflow() {
        let mut state = CartState::new();
        state
            .add_item(CartLineItem::new(PizzaId::new(1), "Gold Leaf", 1, Decimal::MAX))
            .unwrap();
        let before = state.clone();

        assert_eq!(
            state.add_item(CartLineItem::new(PizzaId::new(2), "Truffle", 1, Decimal::MAX)),
            Err(CartError::PriceOverflow(PizzaId::new(2)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_increase_rejects_price_overflow() {
        let mut state = CartState::new();
        state
            .add_item(CartLineItem::new(PizzaId::new(1), "Gold Leaf", 1, Decimal::MAX))
            .unwrap();
        let before = state.clone();

        assert_eq!(
            state.increase_quantity(PizzaId::new(1)),
            Err(CartError::PriceOverflow(PizzaId::new(1)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_increase_rejects_cart_total_overflow() {
        let price = Decimal::from_i128_with_scale(30_000_000_000_000_000_000_000_000_000, 0);
        let mut state = CartState::new();
        state
            .add_item(CartLineItem::new(PizzaId::new(1), "Gold Leaf", 1, price))
            .unwrap();
        state
            .add_item(CartLineItem::new(PizzaId::new(2), "Truffle", 1, price))
            .unwrap();

        assert_eq!(
            state.increase_quantity(PizzaId::new(1)),
            Err(CartError::PriceOverflow(PizzaId::new(1)))
        );
        assert_eq!(state.line(PizzaId::new(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_delete_removes_line() {
        let mut state = CartState::new();
        state.add_item(line(1, 2, 10)).unwrap();
        state.add_item(line(2, 1, 15)).unwrap();

        let removed = state.delete_item(PizzaId::new(1)).unwrap();
        assert_eq!(removed.pizza_id, PizzaId::new(1));
        assert!(state.line(PizzaId::new(1)).is_none());
        assert_eq!(state.lines().len(), 1);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut state = CartState::new();
        assert!(state.delete_item(PizzaId::new(999)).is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_increase_recomputes_total() {
        let mut state = CartState::new();
        state.add_item(line(5, 1, 8)).unwrap();
        state.increase_quantity(PizzaId::new(5)).unwrap();

        let updated = state.line(PizzaId::new(5)).unwrap();
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.total_price, Decimal::from(16));
    }

    #[test]
    fn test_increase_absent_fails() {
        let mut state = CartState::new();
        assert_eq!(
            state.increase_quantity(PizzaId::new(3)),
            Err(CartError::LineNotFound(PizzaId::new(3)))
        );
    }

    #[test]
    fn test_decrease_recomputes_total() {
        let mut state = CartState::new();
        state.add_item(line(5, 3, 8)).unwrap();
        state.decrease_quantity(PizzaId::new(5)).unwrap();

        let updated = state.line(PizzaId::new(5)).unwrap();
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.total_price, Decimal::from(16));
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let mut state = CartState::new();
        state.add_item(line(5, 1, 8)).unwrap();
        state.add_item(line(6, 1, 9)).unwrap();
        state.decrease_quantity(PizzaId::new(5)).unwrap();

        assert!(state.line(PizzaId::new(5)).is_none());
        assert_eq!(state.lines().len(), 1);
    }

    #[test]
    fn test_decrease_absent_fails() {
        let mut state = CartState::new();
        assert_eq!(
            state.decrease_quantity(PizzaId::new(3)),
            Err(CartError::LineNotFound(PizzaId::new(3)))
        );
    }

    #[test]
    fn test_clear_empties() {
        let mut state = CartState::new();
        state.add_item(line(1, 2, 10)).unwrap();
        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_from_lines_drops_invalid_and_duplicates() {
        let mut corrupt = line(2, 1, 10);
        corrupt.total_price = Decimal::from(7);
        let state = CartState::from(vec![line(1, 2, 10), line(1, 5, 10), corrupt, line(3, 0, 4)]);

        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.line(PizzaId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_from_lines_drops_lines_overflowing_cart_total() {
        let first = CartLineItem::new(PizzaId::new(1), "Gold Leaf", 1, Decimal::MAX);
        let second = CartLineItem::new(PizzaId::new(2), "Truffle", 1, Decimal::MAX);
        let state = CartState::from(vec![first, second, line(3, 0, 4)]);

        let ids: Vec<i32> = state.lines().iter().map(|l| l.pizza_id.as_i32()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_serde_shape() {
        let mut state = CartState::new();
        state.add_item(line(1, 1, 10)).unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json[0]["pizzaId"], 1);
    }

    #[test]
    fn test_deserialize_revalidates_lines() {
        let json = serde_json::json!([
            {"pizzaId": 1, "name": "Margherita", "quantity": 2, "unitPrice": "10", "totalPrice": "20"},
            {"pizzaId": 1, "name": "Margherita", "quantity": 5, "unitPrice": "10", "totalPrice": "50"},
            {"pizzaId": 2, "name": "Diavola", "quantity": 0, "unitPrice": "15", "totalPrice": "0"},
            {"pizzaId": 3, "name": "Funghi", "quantity": 1, "unitPrice": "8", "totalPrice": "99"}
        ]);
        let state: CartState = serde_json::from_value(json).unwrap();

        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.line(PizzaId::new(1)).unwrap().quantity, 2);
    }
}
