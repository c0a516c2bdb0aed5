//! Subset construction algorithm for converting an epsilon-free NFA to a DFA.

use crate::automaton::{Automaton, Transitions};
use crate::state::{StateId, StateSet};
use crate::symbol::alphabet;
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, trace};
use std::collections::VecDeque;

/// Convert an epsilon-free NFA to a DFA using the powerset construction.
///
/// Each output state stands for a set of input states. Sets are keyed by their
/// sorted member list and receive dense ids in the order they are first seen,
/// so `{start}` is always state 0. Empty successor sets produce no transition:
/// the result is deterministic but may be partial.
///
/// Epsilon transitions are ignored; run epsilon elimination first.
pub fn subset_construction(nfa: &Automaton) -> Automaton {
    let capacity = nfa.num_states() as usize;

    // Each DFA state corresponds to a set of NFA states
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut transitions = Transitions::new();
    let mut accepting = StateSet::default();

    let initial_set = StateSet::singleton(nfa.start(), capacity);
    state_mapping.insert(initial_set.to_vec(), 0);

    let mut worklist: VecDeque<(StateId, StateSet)> = VecDeque::new();
    worklist.push_back((0, initial_set));

    while let Some((current, current_set)) = worklist.pop_front() {
        if current_set.intersects(nfa.accepting()) {
            accepting.insert(current);
        }

        for symbol in alphabet() {
            let mut next_set = StateSet::with_capacity(capacity);
            for state in current_set.iter() {
                if let Some(destinations) = nfa.targets(state, symbol) {
                    next_set.union_with(destinations);
                }
            }

            if next_set.is_empty() {
                continue;
            }

            let next_id = state_mapping.len() as StateId;
            let next = match state_mapping.entry(next_set.to_vec()) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    trace!("subset {next_id} = {next_set:?}");
                    entry.insert(next_id);
                    worklist.push_back((next_id, next_set));
                    next_id
                }
            };

            transitions.insert((current, symbol), StateSet::singleton(next, capacity));
        }
    }

    let num_states = state_mapping.len() as StateId;
    debug!(
        "subset construction: {} nfa states -> {} dfa states",
        nfa.num_states(),
        num_states
    );
    Automaton::from_parts(num_states, 0, transitions, accepting)
}

impl Automaton {
    /// Determinization stage. See [`subset_construction`].
    pub fn determinize(self) -> Automaton {
        subset_construction(&self)
    }
}
