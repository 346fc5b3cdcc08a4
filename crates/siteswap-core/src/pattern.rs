use serde::{Deserialize, Serialize};

/// A single throw: height, crossing offset, repetition quantity.
///
/// `offset` counts trailing `x` marks and addresses the destination hand
/// relative to the throwing one. `quantity` is the exponent multiplier;
/// a negative quantity is the time-reversed inverse throw and only
/// survives the semantic gate in theoretical mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub value: i64,
    pub offset: usize,
    pub quantity: i64,
}

impl Event {
    pub fn new(value: i64, offset: usize, quantity: i64) -> Self {
        Event {
            value,
            offset,
            quantity,
        }
    }

    /// The non-crossing zero carries no prop and no information.
    pub fn is_redundant_zero(&self) -> bool {
        self.value == 0 && self.offset == 0
    }
}

/// Simultaneous throws by one hand on one beat (a multiplex when it
/// holds more than one event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub events: Vec<Event>,
}

impl Action {
    pub fn new(events: Vec<Event>) -> Self {
        Action { events }
    }

    /// The empty hand: a single `(0, 0, 1)` placeholder.
    pub fn placeholder() -> Self {
        Action {
            events: vec![Event::new(0, 0, 1)],
        }
    }

    /// Signed number of props leaving the hand, counting quantities.
    pub fn throw_count(&self) -> i64 {
        self.events.iter().map(|e| e.quantity).sum()
    }

    /// Drop redundant zeros, sort by value, merge adjacent duplicates,
    /// drop emptied events, and fall back to the placeholder.
    pub fn normalise(&mut self) {
        self.events.retain(|e| !e.is_redundant_zero());
        self.events.sort_by_key(|e| e.value);

        let mut merged: Vec<Event> = Vec::with_capacity(self.events.len());
        for event in self.events.drain(..) {
            match merged.last_mut() {
                Some(last) if last.value == event.value && last.offset == event.offset => {
                    last.quantity += event.quantity;
                }
                _ => merged.push(event),
            }
        }
        merged.retain(|e| e.quantity != 0);

        if merged.is_empty() {
            merged.push(Event::new(0, 0, 1));
        }
        self.events = merged;
    }
}

/// One synchronous tuple of per-hand actions, optionally followed by
/// `!` suppression marks, with its chain quantity.
///
/// A bare action outside parentheses parses as an implicit group; the
/// hand it belongs to is assigned by rotation before normalisation and
/// is only meaningful while `implicit` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub actions: Vec<Action>,
    pub suppression: usize,
    pub quantity: i64,
    pub implicit: bool,
    pub hand: usize,
}

impl Group {
    pub fn tuple(actions: Vec<Action>, suppression: usize, quantity: i64) -> Self {
        Group {
            actions,
            suppression,
            quantity,
            implicit: false,
            hand: 0,
        }
    }

    pub fn bare(action: Action, quantity: i64) -> Self {
        Group {
            actions: vec![action],
            suppression: 0,
            quantity,
            implicit: true,
            hand: 0,
        }
    }

    /// Beats one repetition of this group occupies.
    pub fn beats(&self) -> i64 {
        self.actions.len() as i64 - self.suppression as i64
    }

    /// Structural equality ignoring the quantity, used when collapsing
    /// adjacent repetitions into one chain entry.
    pub fn same_shape(&self, other: &Group) -> bool {
        self.actions == other.actions
            && self.suppression == other.suppression
            && self.implicit == other.implicit
            && (!self.implicit || self.hand == other.hand)
    }
}

/// A parsed pattern: the group chain plus the explicit hand count, if a
/// synchronous tuple fixed one (`None` means one-handed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub groups: Vec<Group>,
    pub hands: Option<usize>,
}

impl Pattern {
    pub fn new(groups: Vec<Group>) -> Self {
        Pattern {
            groups,
            hands: None,
        }
    }

    pub fn hands_effective(&self) -> usize {
        self.hands.unwrap_or(1)
    }

    /// Total signed beat count: Σ quantity × (actions − suppression).
    pub fn period(&self) -> i64 {
        self.groups.iter().map(|g| g.quantity * g.beats()).sum()
    }

    /// Total signed throw mass: Σ quantity × Σ value × event quantity.
    pub fn mass(&self) -> i64 {
        self.groups
            .iter()
            .map(|g| {
                let throws: i64 = g
                    .actions
                    .iter()
                    .flat_map(|a| a.events.iter())
                    .map(|e| e.value * e.quantity)
                    .sum();
                g.quantity * throws
            })
            .sum()
    }

    /// Reduce to canonical minimal-period form: clean every action,
    /// collapse adjacent repeats, cut the group list to its smallest
    /// period, then widen implicit groups to full tuples when the hand
    /// count is explicit.
    pub fn normalise(&mut self) {
        for group in &mut self.groups {
            for action in &mut group.actions {
                action.normalise();
            }
        }
        self.collapse_groups();
        self.reduce_period();
        if self.hands.is_some() {
            self.expand_implicit();
        }
    }

    /// Merge adjacent structurally-equal groups by summing quantities.
    /// A stack keeps cascades honest: a pair that cancels to quantity 0
    /// disappears and may expose a new adjacent pair.
    fn collapse_groups(&mut self) {
        let mut collapsed: Vec<Group> = Vec::with_capacity(self.groups.len());
        for group in self.groups.drain(..) {
            if group.quantity == 0 {
                continue;
            }
            match collapsed.last_mut() {
                Some(last) if last.same_shape(&group) => {
                    last.quantity += group.quantity;
                    if last.quantity == 0 {
                        collapsed.pop();
                    }
                }
                _ => collapsed.push(group),
            }
        }
        self.groups = collapsed;
    }

    /// Cut the group list to the smallest divisor `p` of its length for
    /// which every entry matches its image `p` steps earlier. With a
    /// single surviving group the quantity itself reduces to its sign.
    fn reduce_period(&mut self) {
        let len = self.groups.len();
        if len == 0 {
            return;
        }
        for p in 1..=len {
            if len % p != 0 {
                continue;
            }
            if (p..len).all(|i| self.groups[i] == self.groups[i % p]) {
                self.groups.truncate(p);
                break;
            }
        }
        if self.groups.len() == 1 {
            let sole = &mut self.groups[0];
            sole.quantity = sole.quantity.signum();
        }
    }

    /// Turn each surviving implicit group into a tuple of
    /// `hands_effective` actions with the original throw at its hand's
    /// slot, empty hands elsewhere, and enough suppression to keep the
    /// group at one beat.
    fn expand_implicit(&mut self) {
        let hands = self.hands_effective();
        for group in &mut self.groups {
            if !group.implicit {
                continue;
            }
            let original = group.actions.pop().unwrap_or_else(Action::placeholder);
            let slot = group.hand % hands;
            group.actions = (0..hands)
                .map(|h| {
                    if h == slot {
                        original.clone()
                    } else {
                        Action::placeholder()
                    }
                })
                .collect();
            group.suppression = hands - 1;
            group.implicit = false;
            group.hand = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(value: i64, quantity: i64) -> Group {
        Group::bare(Action::new(vec![Event::new(value, 0, 1)]), quantity)
    }

    #[test]
    fn test_action_normalise_sorts_and_merges() {
        let mut action = Action::new(vec![
            Event::new(4, 0, 1),
            Event::new(3, 0, 1),
            Event::new(4, 0, 2),
        ]);
        action.normalise();
        assert_eq!(
            action.events,
            vec![Event::new(3, 0, 1), Event::new(4, 0, 3)]
        );
    }

    #[test]
    fn test_action_normalise_keeps_crossing_zero() {
        let mut action = Action::new(vec![Event::new(0, 1, 1), Event::new(0, 0, 1)]);
        action.normalise();
        assert_eq!(action.events, vec![Event::new(0, 1, 1)]);
    }

    #[test]
    fn test_action_normalise_placeholder() {
        let mut action = Action::new(vec![Event::new(0, 0, 4)]);
        action.normalise();
        assert_eq!(action.events, vec![Event::new(0, 0, 1)]);

        let mut cancelled = Action::new(vec![Event::new(5, 0, 2), Event::new(5, 0, -2)]);
        cancelled.normalise();
        assert_eq!(cancelled.events, vec![Event::new(0, 0, 1)]);
    }

    #[test]
    fn test_collapse_adjacent_groups() {
        let mut pattern = Pattern::new(vec![bare(3, 1), bare(3, 1), bare(3, 1)]);
        pattern.normalise();
        assert_eq!(pattern.groups.len(), 1);
        // A single surviving group reduces its quantity to its sign.
        assert_eq!(pattern.groups[0].quantity, 1);
    }

    #[test]
    fn test_collapse_cascades_through_cancellation() {
        let mut pattern = Pattern::new(vec![bare(4, 1), bare(3, 1), bare(3, -1), bare(4, 1)]);
        pattern.collapse_groups();
        assert_eq!(pattern.groups.len(), 1);
        assert_eq!(pattern.groups[0].quantity, 2);
        assert_eq!(pattern.groups[0].actions[0].events[0].value, 4);
    }

    #[test]
    fn test_reduce_period_finds_smallest_divisor() {
        let mut pattern = Pattern::new(vec![bare(3, 1), bare(4, 1), bare(3, 1), bare(4, 1)]);
        pattern.normalise();
        assert_eq!(pattern.groups.len(), 2);
        assert_eq!(pattern.period(), 2);
    }

    #[test]
    fn test_reduce_period_keeps_aperiodic_lists() {
        let mut pattern = Pattern::new(vec![bare(5, 1), bare(3, 1), bare(1, 1)]);
        pattern.normalise();
        assert_eq!(pattern.groups.len(), 3);
        assert_eq!(pattern.period(), 3);
    }

    #[test]
    fn test_distinct_hands_do_not_collapse() {
        let mut left = bare(3, 1);
        let mut right = bare(3, 1);
        left.hand = 0;
        right.hand = 1;
        let mut pattern = Pattern::new(vec![left, right]);
        pattern.hands = Some(2);
        pattern.normalise();
        assert_eq!(pattern.groups.len(), 2);
    }

    #[test]
    fn test_expand_implicit_builds_suppressed_tuple() {
        let mut group = bare(3, 1);
        group.hand = 1;
        let mut pattern = Pattern::new(vec![group]);
        pattern.hands = Some(2);
        pattern.normalise();

        let expanded = &pattern.groups[0];
        assert!(!expanded.implicit);
        assert_eq!(expanded.actions.len(), 2);
        assert_eq!(expanded.suppression, 1);
        assert_eq!(expanded.beats(), 1);
        assert_eq!(expanded.actions[0], Action::placeholder());
        assert_eq!(expanded.actions[1].events[0].value, 3);
    }

    #[test]
    fn test_period_and_mass_accumulators() {
        let tuple = Group::tuple(
            vec![
                Action::new(vec![Event::new(4, 0, 1)]),
                Action::new(vec![Event::new(4, 0, 1)]),
            ],
            1,
            1,
        );
        let pattern = Pattern::new(vec![tuple]);
        assert_eq!(pattern.period(), 1);
        assert_eq!(pattern.mass(), 8);
    }

    #[test]
    fn test_negative_quantity_counts_backwards() {
        let pattern = Pattern::new(vec![bare(5, 1), bare(5, -1)]);
        assert_eq!(pattern.period(), 0);
        assert_eq!(pattern.mass(), 0);
    }
}
