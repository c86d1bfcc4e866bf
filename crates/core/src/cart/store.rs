//! The cart store: one owned [`CartState`] behind a dispatcher.

use core::fmt;

use tracing::{debug, warn};

use super::{CartAction, CartError, CartState};

type Listener = Box<dyn Fn(&CartState) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Owns a cart and applies intents to it one at a time.
///
/// Subscribers see the new state after every successful dispatch. A failed
/// dispatch changes nothing and notifies no one.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: usize,
}

impl CartStore {
    /// A store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding an existing cart.
    #[must_use]
    pub fn from_state(state: CartState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Current cart.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Give up the store, keeping the cart.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }

    /// Apply one intent.
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] of the rejected transition; the cart is left
    /// as it was.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        let name = action.name();
        let pizza_id = action.pizza_id();

        let result = match action {
            CartAction::AddItem(line) => self.state.add_item(line),
            CartAction::DeleteItem(id) => {
                self.state.delete_item(id);
                Ok(())
            }
            CartAction::IncreaseQuantity(id) => self.state.increase_quantity(id),
            CartAction::DecreaseQuantity(id) => self.state.decrease_quantity(id),
            CartAction::ClearCart => {
                self.state.clear();
                Ok(())
            }
        };

        match &result {
            Ok(()) => {
                debug!(
                    action = name,
                    pizza_id = pizza_id.map(|id| id.as_i32()),
                    lines = self.state.lines().len(),
                    "cart action applied"
                );
                for (_, listener) in &self.listeners {
                    listener(&self.state);
                }
            }
            Err(error) => {
                warn!(action = name, %error, "cart action rejected");
            }
        }

        result
    }

    /// Register a listener called with the new state after each dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
