//! Ground-state classification.
//!
//! The ground state for a cardinality is the lowest-energy start: each
//! hand holds a run of consecutive beats, one prop per beat, staggered
//! across hands. Any other valid start is excited.

use crate::state::HandState;

/// Check whether the solved per-hand states form the ground state for
/// the given signed cardinality. Only meaningful for valid patterns.
pub fn is_ground(hands: &[HandState], cardinality: i64) -> bool {
    let hand_count = hands.len() as i64;
    let offset_bit = if cardinality > 0 { 1 } else { 0 };
    let props = cardinality.abs();
    let sign = cardinality.signum();

    for (index, hand) in hands.iter().enumerate() {
        let h = index as i64;
        let expected = props / hand_count + if h < props % hand_count { 1 } else { 0 };

        if hand.occupied() as i64 != expected {
            return false;
        }
        for k in 0..expected {
            let mut beat = h + k * hand_count + offset_bit;
            if cardinality < 0 {
                beat = -beat;
            }
            if !hand.contains(beat) || hand.state_at(beat) != sign {
                return false;
            }
        }
    }
    true
}
