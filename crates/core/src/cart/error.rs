//! Cart transition errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::PizzaId;

/// Reasons a cart transition is rejected.
///
/// A rejected transition never changes the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Increase/decrease addressed a line that is not in the cart.
    #[error("line not found: pizza {0}")]
    LineNotFound(PizzaId),

    /// An added line had a quantity of zero.
    #[error("quantity must be at least 1 (pizza {0})")]
    ZeroQuantity(PizzaId),

    /// An added line had a negative unit price.
    #[error("unit price must not be negative (pizza {pizza_id}: {unit_price})")]
    NegativeUnitPrice {
        /// The offending line.
        pizza_id: PizzaId,
        /// Price supplied by the caller.
        unit_price: Decimal,
    },

    /// An added line's total did not equal quantity times unit price.
    #[error("total price {actual} does not match quantity x unit price {expected} (pizza {pizza_id})")]
    InconsistentTotal {
        /// The offending line.
        pizza_id: PizzaId,
        /// `quantity * unit_price`.
        expected: Decimal,
        /// Total supplied by the caller.
        actual: Decimal,
    },

    /// An added line's unit price differs from the line already in the cart.
    #[error("unit price {incoming} differs from cart price {existing} (pizza {pizza_id})")]
    UnitPriceMismatch {
        /// The line being merged.
        pizza_id: PizzaId,
        /// Unit price already in the cart.
        existing: Decimal,
        /// Unit price supplied by the caller.
        incoming: Decimal,
    },

    /// A quantity would exceed `u32::MAX`.
    #[error("quantity overflow (pizza {0})")]
    QuantityOverflow(PizzaId),

    /// A line total or the cart total would not fit in a `Decimal`.
    #[error("price overflow (pizza {0})")]
    PriceOverflow(PizzaId),
}

impl CartError {
    /// The pizza the rejected transition addressed.
    #[must_use]
    pub const fn pizza_id(&self) -> PizzaId {
        match self {
            Self::LineNotFound(id)
            | Self::ZeroQuantity(id)
            | Self::QuantityOverflow(id)
            | Self::PriceOverflow(id) => *id,
            Self::NegativeUnitPrice { pizza_id, .. }
            | Self::InconsistentTotal { pizza_id, .. }
            | Self::UnitPriceMismatch { pizza_id, .. } => *pizza_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::LineNotFound(PizzaId::new(999));
        assert_eq!(err.to_string(), "line not found: pizza 999");

        let err = CartError::InconsistentTotal {
            pizza_id: PizzaId::new(12),
            expected: Decimal::from(20),
            actual: Decimal::from(25),
        };
        assert_eq!(
            err.to_string(),
            "total price 25 does not match quantity x unit price 20 (pizza 12)"
        );
    }

    #[test]
    fn test_cart_error_pizza_id() {
        let err = CartError::UnitPriceMismatch {
            pizza_id: PizzaId::new(3),
            existing: Decimal::from(10),
            incoming: Decimal::from(12),
        };
        assert_eq!(err.pizza_id(), PizzaId::new(3));
        assert_eq!(CartError::ZeroQuantity(PizzaId::new(4)).pizza_id(), PizzaId::new(4));
        assert_eq!(CartError::PriceOverflow(PizzaId::new(5)).pizza_id(), PizzaId::new(5));
    }
}
