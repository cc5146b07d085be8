//! Property tests for bid ordering.

mod common;

use common::started;
use liars_dice::core::{Bid, GameConfig, PlayerId};
use liars_dice::rules;
use proptest::prelude::*;

fn face() -> impl Strategy<Value = u8> {
    1u8..=6
}

proptest! {
    /// Any bid with a positive quantity and a real face opens a round.
    #[test]
    fn prop_first_bid_accepts_any_legal_bid(quantity in 1u32..50, value in face()) {
        let state = started(&["ann", "bob"], GameConfig::classic(), 1);
        let next = rules::apply_bid(&state, Bid::new("ann", quantity, value), 0).unwrap();
        prop_assert_eq!(next.previous_bids.len(), 1);
        prop_assert_eq!(next.active_player_id, PlayerId::new("bob"));
    }

    /// A follow-up bid is accepted exactly when it raises the quantity, or
    /// keeps it and raises the face.
    #[test]
    fn prop_raise_rule(
        q1 in 1u32..12,
        v1 in face(),
        q2 in 0u32..12,
        v2 in 0u8..=7,
    ) {
        let state = started(&["ann", "bob"], GameConfig::classic(), 1);
        let state = rules::apply_bid(&state, Bid::new("ann", q1, v1), 0).unwrap();

        let raises = q2 > q1 || (q2 == q1 && v2 > v1);
        let legal = q2 >= 1 && (1..=6).contains(&v2);
        let result = rules::apply_bid(&state, Bid::new("bob", q2, v2), 0);

        prop_assert_eq!(result.is_ok(), raises && legal);
        prop_assert_eq!(rules::is_valid_next_bid(&state, &Bid::new("bob", q2, v2)), raises && legal);
        if result.is_err() {
            // The rejected bid leaves the input state as it was.
            prop_assert_eq!(state.previous_bids.len(), 1);
            prop_assert_eq!(&state.active_player_id, &PlayerId::new("bob"));
        }
    }

    /// Any sequence of accepted bids is strictly increasing.
    #[test]
    fn prop_accepted_bids_strictly_increase(
        attempts in prop::collection::vec((1u32..20, face()), 1..40),
    ) {
        let mut state = started(&["ann", "bob", "cat"], GameConfig::classic(), 1);
        for (quantity, value) in attempts {
            let bidder = state.active_player_id.clone();
            if let Ok(next) = rules::apply_bid(&state, Bid::new(bidder, quantity, value), 0) {
                state = next;
            }
        }

        let bids: Vec<&Bid> = state.previous_bids.iter().collect();
        for pair in bids.windows(2) {
            prop_assert!(pair[1].outranks(pair[0]));
            prop_assert!((pair[1].quantity, pair[1].value) > (pair[0].quantity, pair[0].value));
        }
        state.check_invariants().unwrap();
    }

    /// Nobody but the active player may bid.
    #[test]
    fn prop_out_of_turn_bids_rejected(quantity in 1u32..20, value in face()) {
        let state = started(&["ann", "bob", "cat"], GameConfig::classic(), 1);
        prop_assert!(rules::apply_bid(&state, Bid::new("bob", quantity, value), 0).is_err());
        prop_assert!(rules::apply_bid(&state, Bid::new("cat", quantity, value), 0).is_err());
    }
}
