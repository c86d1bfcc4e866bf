//! Cart intents.

use serde::{Deserialize, Serialize};

use super::CartLineItem;
use crate::PizzaId;

/// A request to change the cart, dispatched through [`super::CartStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum CartAction {
    /// Add a line, merging with an existing line for the same pizza.
    AddItem(CartLineItem),
    /// Remove a line; absent ids are ignored.
    DeleteItem(PizzaId),
    /// Add one unit to an existing line.
    IncreaseQuantity(PizzaId),
    /// Remove one unit from an existing line; the line goes at zero.
    DecreaseQuantity(PizzaId),
    /// Remove every line.
    ClearCart,
}

impl CartAction {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::DeleteItem(_) => "delete_item",
            Self::IncreaseQuantity(_) => "increase_quantity",
            Self::DecreaseQuantity(_) => "decrease_quantity",
            Self::ClearCart => "clear_cart",
        }
    }

    /// The pizza the intent addresses, if any.
    #[must_use]
    pub const fn pizza_id(&self) -> Option<PizzaId> {
        match self {
            Self::AddItem(line) => Some(line.pizza_id),
            Self::DeleteItem(id) | Self::IncreaseQuantity(id) | Self::DecreaseQuantity(id) => {
                Some(*id)
            }
            Self::ClearCart => None,
        }
    }
}
