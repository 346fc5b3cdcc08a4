//! The analysis pipeline.
//!
//! [`analyse`] takes raw pattern text and either proves it juggles or
//! explains why not. Structural problems (not siteswap notation at all,
//! impossible crossing offsets, …) come back as [`SiteswapError`]s;
//! well-formed patterns that fail to juggle come back as an
//! [`Analysis`] with `valid: false`. Callers rely on that split to tell
//! "not a siteswap" apart from "invalid siteswap".

use crate::formatter;
use crate::parser;
use siteswap_core::{
    is_ground, solve, Analysis, AnalyseOptions, Pattern, Result, SiteswapError,
};

/// Lexical normalisation: strip all whitespace, lowercase the rest.
pub fn preprocess(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Analyse one pattern under the given options.
pub fn analyse(input: &str, options: &AnalyseOptions) -> Result<Analysis> {
    let text = preprocess(input);
    if text.is_empty() {
        return Ok(Analysis::empty());
    }

    let mut pattern =
        parser::parse(&text).map_err(|e| SiteswapError::SyntacticallyInvalid {
            pattern: text.clone(),
            detail: e.to_string(),
        })?;

    if !options.allow_theoretical_patterns {
        gate_theoretical(&text, &pattern)?;
    }

    infer_hands(&mut pattern, &text)?;
    check_suppression(&pattern, &text)?;
    check_offsets(&pattern, &text)?;

    let hands = pattern.hands;
    let raw_period = pattern.period();
    let raw_mass = pattern.mass();

    if raw_period == 0 {
        return Ok(Analysis::zero_period(text, hands));
    }
    if raw_mass % raw_period != 0 {
        return Ok(Analysis::invalid(text, hands));
    }
    let cardinality = raw_mass / raw_period;

    pattern.normalise();
    let period = pattern.period();

    let solution = solve(&pattern, period, options.maximum_length, &text)?;
    if !solution.consistent {
        return Ok(Analysis::invalid(text, hands));
    }

    let ground = is_ground(&solution.hands, cardinality);
    let normalised = formatter::format(&pattern);
    Ok(Analysis::valid(
        text,
        period,
        cardinality,
        hands,
        normalised,
        ground,
    ))
}

/// Theoretical constructs are gated on the raw text (so a `-` buried in
/// an exponent is caught without interpreting it) plus the one case a
/// sign scan cannot see: a zero throw asked to cross hands.
fn gate_theoretical(text: &str, pattern: &Pattern) -> Result<()> {
    let crossing_zero = pattern
        .groups
        .iter()
        .flat_map(|g| g.actions.iter())
        .flat_map(|a| a.events.iter())
        .any(|e| e.value == 0 && e.offset > 0);

    if text.contains('-') || crossing_zero {
        return Err(SiteswapError::TheoreticalDisallowed {
            pattern: text.to_string(),
        });
    }
    Ok(())
}

/// Fix the hand count from the explicit tuples and assign a hand to
/// every implicit group: the counter rotates over the hands, resets
/// after each explicit tuple, and the leading run of implicit groups is
/// re-assigned from the end-of-pattern counter so the cycle closes over
/// the pattern boundary.
fn infer_hands(pattern: &mut Pattern, text: &str) -> Result<()> {
    let mut hands: Option<usize> = None;
    for group in &pattern.groups {
        if group.implicit {
            continue;
        }
        match hands {
            None => hands = Some(group.actions.len()),
            Some(expected) if expected != group.actions.len() => {
                return Err(SiteswapError::InconsistentHandCount {
                    pattern: text.to_string(),
                    expected,
                    found: group.actions.len(),
                });
            }
            Some(_) => {}
        }
    }
    pattern.hands = hands;
    let effective = pattern.hands_effective();

    let mut counter = 0usize;
    for group in &mut pattern.groups {
        if group.implicit {
            group.hand = counter % effective;
            counter += 1;
        } else {
            counter = 0;
        }
    }

    if hands.is_some() {
        let end_counter = counter;
        for (lead, group) in pattern.groups.iter_mut().enumerate() {
            if !group.implicit {
                break;
            }
            group.hand = (end_counter + lead) % effective;
        }
    }
    Ok(())
}

fn check_suppression(pattern: &Pattern, text: &str) -> Result<()> {
    for group in &pattern.groups {
        if group.suppression >= group.actions.len() {
            return Err(SiteswapError::InvalidSuppression {
                pattern: text.to_string(),
                suppression: group.suppression,
                actions: group.actions.len(),
            });
        }
    }
    Ok(())
}

fn check_offsets(pattern: &Pattern, text: &str) -> Result<()> {
    let hands = pattern.hands_effective();
    for group in &pattern.groups {
        for action in &group.actions {
            for event in &action.events {
                if event.offset >= hands {
                    return Err(SiteswapError::OffsetExceedsHands {
                        pattern: text.to_string(),
                        offset: event.offset,
                        hands,
                    });
                }
            }
        }
    }
    Ok(())
}
