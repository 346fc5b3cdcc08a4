// Formatter: render a normalised pattern back to canonical notation
use siteswap_core::{render_integer, Action, Event, Pattern};

/// Quantities below this render by repetition, everything else (and
/// every negative) as an explicit `^value` exponent.
const QUANTITY_CUTOFF: i64 = 2;

/// Offsets below this render as repeated `x` marks.
const OFFSET_CUTOFF: usize = 2;

/// Render a pattern as canonical notation. Meaningful on normalised
/// patterns; the output of [`analyse`](crate::analyse) always is.
pub fn format(pattern: &Pattern) -> String {
    let explicit = pattern.hands.is_some();
    pattern
        .groups
        .iter()
        .map(|group| {
            let rendered = if group.actions.len() > 1 || explicit {
                let actions: Vec<String> = group.actions.iter().map(format_action).collect();
                format!("({}){}", actions.join(","), "!".repeat(group.suppression))
            } else {
                format_action(&group.actions[0])
            };
            apply_quantity(rendered, group.quantity)
        })
        .collect()
}

fn format_action(action: &Action) -> String {
    if let [event] = action.events.as_slice() {
        if event.quantity == 1 {
            return format_event(event);
        }
    }
    let events: String = action
        .events
        .iter()
        .map(|event| apply_quantity(format_event(event), event.quantity))
        .collect();
    format!("[{}]", events)
}

fn format_event(event: &Event) -> String {
    let marker = if event.offset < OFFSET_CUTOFF {
        "x".repeat(event.offset)
    } else {
        format!("x^{}", render_integer(event.offset as i64))
    };
    format!("{}{}", render_integer(event.value), marker)
}

fn apply_quantity(rendered: String, quantity: i64) -> String {
    if quantity < 0 || quantity >= QUANTITY_CUTOFF {
        format!("{}^{}", rendered, render_integer(quantity))
    } else {
        rendered.repeat(quantity as usize)
    }
}
