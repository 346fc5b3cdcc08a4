//! Periodicity proof for a normalised pattern.
//!
//! The pattern is valid iff some bi-infinite prop-landing schedule is
//! shifted onto itself by one period. The schedule is pinned to zero
//! outside a finite per-hand window inferred from the throws, the
//! throw/landing deltas are accumulated over that window, and the
//! window is integrated from the zero tail inward. If the assumed zero
//! tail reappears after the shift, the schedule exists.

use crate::error::{Result, SiteswapError};
use crate::pattern::{Event, Pattern};
use crate::state::HandState;

/// Solved per-hand states plus the shift-consistency verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub hands: Vec<HandState>,
    pub consistent: bool,
}

/// Hand an event lands in, relative to the hand that threw it.
fn target_hand(hand: usize, event: &Event, hands: usize) -> usize {
    (hand as i64 + event.value + event.offset as i64).rem_euclid(hands as i64) as usize
}

fn extend(range: &mut Option<(i64, i64)>, beat: i64) {
    *range = match *range {
        None => Some((beat, beat)),
        Some((min, max)) => Some((min.min(beat), max.max(beat))),
    };
}

/// Inclusive beat windows that can hold non-zero initial state, one per
/// hand. The walk mirrors the delta walk beat-for-beat, but since every
/// touched beat is affine in the repetition index only the first and
/// last repetition of each group need visiting.
fn infer_ranges(pattern: &Pattern, hands: usize) -> Vec<(i64, i64)> {
    let mut ranges: Vec<Option<(i64, i64)>> = vec![None; hands];
    let mut position: i64 = 0;

    for group in &pattern.groups {
        let quantity = group.quantity;
        if quantity == 0 {
            continue;
        }
        let offset_bit = if quantity > 0 { 1 } else { 0 };
        let last_rep = quantity.signum() * (quantity.abs() - 1);

        for rep in [0, last_rep] {
            for (index, action) in group.actions.iter().enumerate() {
                let beat = position + rep + offset_bit;
                extend(&mut ranges[index], beat);
                for event in &action.events {
                    let landing = target_hand(index, event, hands);
                    extend(&mut ranges[landing], beat + event.value);
                }
            }
        }
        position += quantity * group.beats();
    }

    ranges.into_iter().map(|r| r.unwrap_or((0, 0))).collect()
}

/// Build the windows, check them against the configured bound, fill the
/// deltas, and integrate. The bound is enforced before any window is
/// allocated, so a pathological quantity costs nothing but the check.
pub fn solve(
    pattern: &Pattern,
    period: i64,
    maximum_length: usize,
    source: &str,
) -> Result<Solution> {
    let hands = pattern.hands_effective();
    let ranges = infer_ranges(pattern, hands);

    for &(min, max) in &ranges {
        let span = (max - min) as usize;
        if span > maximum_length {
            return Err(SiteswapError::StateRangeTooLarge {
                pattern: source.to_string(),
                span,
                maximum: maximum_length,
            });
        }
    }

    let mut states: Vec<HandState> = ranges
        .iter()
        .map(|&(min, max)| HandState::new(min, max))
        .collect();

    let mut position: i64 = 0;
    for group in &pattern.groups {
        let quantity = group.quantity;
        if quantity == 0 {
            continue;
        }
        let increment = quantity.signum();
        let offset_bit = if quantity > 0 { 1 } else { 0 };

        let mut rep: i64 = 0;
        while rep.abs() < quantity.abs() {
            for (index, action) in group.actions.iter().enumerate() {
                let beat = position + rep + offset_bit;
                states[index].add_delta(beat, -(action.throw_count() * increment));
                for event in &action.events {
                    let landing = target_hand(index, event, hands);
                    states[landing].add_delta(beat + event.value, event.quantity * increment);
                }
            }
            rep += increment;
        }
        position += quantity * group.beats();
    }

    let mut consistent = true;
    for state in &mut states {
        state.solve(period);
        if !state.tail_is_zero(period) {
            consistent = false;
        }
    }

    Ok(Solution {
        hands: states,
        consistent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Action, Group};

    fn throws(values: &[i64]) -> Pattern {
        let groups = values
            .iter()
            .map(|&v| Group::bare(Action::new(vec![Event::new(v, 0, 1)]), 1))
            .collect();
        Pattern::new(groups)
    }

    fn solved(pattern: &Pattern, period: i64) -> Solution {
        solve(pattern, period, 100, "test").unwrap()
    }

    #[test]
    fn test_cascade_is_consistent() {
        let pattern = throws(&[5, 3, 1]);
        let solution = solved(&pattern, 3);
        assert!(solution.consistent);
        assert_eq!(solution.hands[0].state, vec![1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_collision_is_inconsistent() {
        let pattern = throws(&[3, 2, 1]);
        let solution = solved(&pattern, 3);
        assert!(!solution.consistent);
    }

    #[test]
    fn test_multiplex_counts_every_prop() {
        let multiplex = Group::bare(
            Action::new(vec![Event::new(3, 0, 1), Event::new(4, 0, 1)]),
            1,
        );
        let rest = throws(&[2, 3]);
        let mut groups = vec![multiplex];
        groups.extend(rest.groups);
        let pattern = Pattern::new(groups);

        let solution = solved(&pattern, 3);
        assert!(solution.consistent);
        assert_eq!(solution.hands[0].state_at(1), 2);
        let props: i64 = solution.hands[0].state.iter().sum();
        assert_eq!(props, 4);
    }

    #[test]
    fn test_synchronous_fountain() {
        let tuple = Group::tuple(
            vec![
                Action::new(vec![Event::new(4, 0, 1)]),
                Action::new(vec![Event::new(4, 0, 1)]),
            ],
            0,
            1,
        );
        let mut pattern = Pattern::new(vec![tuple]);
        pattern.hands = Some(2);

        let solution = solved(&pattern, 2);
        assert!(solution.consistent);
        for hand in &solution.hands {
            assert_eq!(hand.state_at(1), 1);
            assert_eq!(hand.state_at(3), 1);
            assert_eq!(hand.occupied(), 2);
        }
    }

    #[test]
    fn test_inverse_quantity_runs_backwards() {
        let mut pattern = throws(&[5]);
        pattern.groups[0].quantity = -1;
        let solution = solved(&pattern, -1);
        assert!(solution.consistent);
        assert_eq!(solution.hands[0].min, 0);
        assert_eq!(solution.hands[0].state, vec![0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_negative_throw_occupies_the_past() {
        let pattern = throws(&[-5]);
        let solution = solved(&pattern, 1);
        assert!(solution.consistent);
        assert_eq!(solution.hands[0].min, -4);
        let mass: i64 = solution.hands[0].state.iter().sum();
        assert_eq!(mass, -5);
    }

    #[test]
    fn test_range_bound_fires_before_allocation() {
        let mut pattern = throws(&[1, 2, 0]);
        pattern.groups[0].quantity = 99;
        let err = solve(&pattern, 101, 100, "1^{99}20").unwrap_err();
        match err {
            SiteswapError::StateRangeTooLarge { span, maximum, .. } => {
                assert!(span > maximum);
            }
            other => panic!("expected StateRangeTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_group_window_covers_every_repetition() {
        let mut pattern = throws(&[4]);
        pattern.groups[0].quantity = 6;
        let solution = solved(&pattern, 6);
        assert!(solution.consistent);
        assert_eq!(solution.hands[0].min, 1);
        assert_eq!(solution.hands[0].max, 10);
    }
}
