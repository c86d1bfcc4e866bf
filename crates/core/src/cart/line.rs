//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CartError;
use crate::PizzaId;

/// One distinct menu item in the cart.
///
/// Lines are keyed by `pizza_id`. While a line is in a cart its quantity is
/// at least 1 and `total_price == quantity * unit_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Menu item this line holds.
    pub pizza_id: PizzaId,
    /// Display name.
    pub name: String,
    /// Number of units.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub total_price: Decimal,
}

impl CartLineItem {
    /// Build a line with a total derived from quantity and unit price.
    ///
    /// A total beyond `Decimal::MAX` saturates; [`Self::validate`] rejects
    /// such a line with [`CartError::PriceOverflow`].
    #[must_use]
    pub fn new(pizza_id: PizzaId, name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            pizza_id,
            name: name.into(),
            quantity,
            unit_price,
            total_price: unit_price.saturating_mul(Decimal::from(quantity)),
        }
    }

    /// `quantity * unit_price`, regardless of the stored total.
    ///
    /// `None` if the product does not fit in a `Decimal`.
    #[must_use]
    pub fn expected_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// The same line at a different quantity, total recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::PriceOverflow`] if the new total does not fit.
    pub fn with_quantity(&self, quantity: u32) -> Result<Self, CartError> {
        let total_price = self
            .unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or(CartError::PriceOverflow(self.pizza_id))?;

        Ok(Self {
            quantity,
            total_price,
            ..self.clone()
        })
    }

    /// Check the payload of an add intent.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is zero, the unit price is negative,
    /// the total cannot be computed, or the total does not equal quantity
    /// times unit price.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.quantity == 0 {
            return Err(CartError::ZeroQuantity(self.pizza_id));
        }

        if self.unit_price.is_sign_negative() && !self.unit_price.is_zero() {
            return Err(CartError::NegativeUnitPrice {
                pizza_id: self.pizza_id,
                unit_price: self.unit_price,
            });
        }

        let expected = self
            .expected_total()
            .ok_or(CartError::PriceOverflow(self.pizza_id))?;
        if self.total_price != expected {
            return Err(CartError::InconsistentTotal {
                pizza_id: self.pizza_id,
                expected,
                actual: self.total_price,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn margherita(quantity: u32) -> CartLineItem {
        CartLineItem::new(PizzaId::new(12), "Margherita", quantity, Decimal::from(10))
    }

    #[test]
    fn test_new_derives_total() {
        let line = margherita(3);
        assert_eq!(line.total_price, Decimal::from(30));
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_with_quantity_recomputes_total() {
        let line = margherita(2).with_quantity(5).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.total_price, Decimal::from(50));
        assert_eq!(line.name, "Margherita");
    }

    #[test]
    fn test_validate_zero_quantity() {
        assert_eq!(
            margherita(0).validate(),
            Err(CartError::ZeroQuantity(PizzaId::new(12)))
        );
    }

    #[test]
    fn test_validate_negative_unit_price() {
        let line = CartLineItem::new(PizzaId::new(1), "Refund", 1, Decimal::from(-5));
        assert!(matches!(
            line.validate(),
            Err(CartError::NegativeUnitPrice { .. })
        ));
    }

    #[test]
    fn test_validate_free_item() {
        let line = CartLineItem::new(PizzaId::new(1), "Dip", 2, Decimal::ZERO);
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_validate_inconsistent_total() {
        let mut line = margherita(2);
        line.total_price = Decimal::from(25);
        assert_eq!(
            line.validate(),
            Err(CartError::InconsistentTotal {
                pizza_id: PizzaId::new(12),
                expected: Decimal::from(20),
                actual: Decimal::from(25),
            })
        );
    }

    #[test]
    fn test_validate_ignores_decimal_scale() {
        let mut line = margherita(2);
        line.total_price = Decimal::new(2000, 2);
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_uncomputable_total() {
        let line = CartLineItem::new(PizzaId::new(9), "Gold Leaf", 2, Decimal::MAX);
        assert_eq!(line.expected_total(), None);
        assert_eq!(line.validate(), Err(CartError::PriceOverflow(PizzaId::new(9))));
    }

    #[test]
    fn test_with_quantity_overflow() {
        let line = CartLineItem::new(PizzaId::new(9), "Gold Leaf", 1, Decimal::MAX);
        assert!(line.validate().is_ok());
        assert_eq!(
            line.with_quantity(2),
            Err(CartError::PriceOverflow(PizzaId::new(9)))
        );
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(margherita(2)).unwrap();
        assert_eq!(json["pizzaId"], 12);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["unitPrice"], "10");
        assert_eq!(json["totalPrice"], "20");
    }
}
