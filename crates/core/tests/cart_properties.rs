//! Property tests for the cart store.
//!
//! Random intent sequences over a small id space, so merges, decreases to
//! zero and misses on absent lines all happen often.

use std::collections::HashSet;

use proptest::prelude::*;
use pizza_cart_core::{CartAction, CartLineItem, CartState, CartStore, PizzaId, selectors};
use rust_decimal::Decimal;

/// Fixed unit price per id, so merges of the same pizza agree on price.
fn unit_price(id: i32) -> Decimal {
    Decimal::new(i64::from(id) * 250 + 799, 2)
}

fn pizza_id() -> impl Strategy<Value = PizzaId> {
    (1..6i32).prop_map(PizzaId::new)
}

fn action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        3 => (pizza_id(), 1..5u32).prop_map(|(id, quantity)| {
            CartAction::AddItem(CartLineItem::new(
                id,
                format!("Pizza {id}"),
                quantity,
                unit_price(id.as_i32()),
            ))
        }),
        1 => pizza_id().prop_map(CartAction::DeleteItem),
        2 => pizza_id().prop_map(CartAction::IncreaseQuantity),
        2 => pizza_id().prop_map(CartAction::DecreaseQuantity),
        1 => Just(CartAction::ClearCart),
    ]
}

fn assert_invariants(state: &CartState) {
    let mut seen = HashSet::new();
    for line in state.lines() {
        assert!(line.quantity >= 1, "line {} at zero", line.pizza_id);
        assert_eq!(Some(line.total_price), line.expected_total());
        assert!(seen.insert(line.pizza_id), "duplicate line {}", line.pizza_id);
    }

    let quantity: u32 = state.lines().iter().map(|line| line.quantity).sum();
    let price: Decimal = state.lines().iter().map(|line| line.total_price).sum();
    assert_eq!(selectors::total_cart_quantity(state), quantity);
    assert_eq!(selectors::total_cart_price(state), price);
}

proptest! {
    #[test]
    fn invariants_hold_after_any_sequence(actions in prop::collection::vec(action(), 0..60)) {
        let mut store = CartStore::new();
        for action in actions {
            let _ = store.dispatch(action);
            assert_invariants(store.state());
        }
    }

    #[test]
    fn rejected_actions_leave_state_unchanged(actions in prop::collection::vec(action(), 0..60)) {
        let mut store = CartStore::new();
        for action in actions {
            let before = store.state().clone();
            if store.dispatch(action).is_err() {
                prop_assert_eq!(store.state(), &before);
            }
        }
    }

    #[test]
    fn clear_restores_baseline(actions in prop::collection::vec(action(), 0..40), probe in pizza_id()) {
        let mut store = CartStore::new();
        for action in actions {
            let _ = store.dispatch(action);
        }
        store.dispatch(CartAction::ClearCart).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let state = store.state();
        prop_assert!(selectors::cart(state).is_empty());
        prop_assert_eq!(selectors::total_cart_quantity(state), 0);
        prop_assert_eq!(selectors::total_cart_price(state), Decimal::ZERO);
        prop_assert_eq!(selectors::current_quantity_by_id(state, probe), 0);
    }

    #[test]
    fn decreasing_a_single_unit_removes_the_line(id in pizza_id()) {
        let mut store = CartStore::new();
        let line = CartLineItem::new(id, "Single", 1, unit_price(id.as_i32()));
        store.dispatch(CartAction::AddItem(line)).map_err(|e| TestCaseError::fail(e.to_string()))?;
        store.dispatch(CartAction::DecreaseQuantity(id)).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert!(store.state().line(id).is_none());
        prop_assert_eq!(selectors::current_quantity_by_id(store.state(), id), 0);
    }

    #[test]
    fn current_quantity_matches_line(actions in prop::collection::vec(action(), 0..40), probe in pizza_id()) {
        let mut store = CartStore::new();
        for action in actions {
            let _ = store.dispatch(action);
        }

        let expected = store.state().line(probe).map_or(0, |line| line.quantity);
        prop_assert_eq!(selectors::current_quantity_by_id(store.state(), probe), expected);
    }
}
