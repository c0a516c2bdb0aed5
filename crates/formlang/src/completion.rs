//! Completion of a deterministic automaton with a sink state.

use crate::automaton::Automaton;
use crate::state::StateSet;
use crate::symbol::alphabet;
use log::debug;

/// Make every `(state, letter)` pair defined.
///
/// Missing transitions are redirected to one new non-accepting sink state
/// (id `num_states`) that loops to itself on every letter. When nothing is
/// missing the automaton is returned as is and no sink is added.
pub fn complete(automaton: &Automaton) -> Automaton {
    let num_states = automaton.num_states();
    let sink = num_states;
    let mut transitions = automaton.transition_table().clone();
    let mut missing = 0usize;

    for state in 0..num_states {
        for symbol in alphabet() {
            if automaton.targets(state, symbol).is_none() {
                transitions.insert((state, symbol), StateSet::singleton(sink, sink as usize + 1));
                missing += 1;
            }
        }
    }

    if missing == 0 {
        debug!("automaton is already total");
        return automaton.clone();
    }

    for symbol in alphabet() {
        transitions.insert((sink, symbol), StateSet::singleton(sink, sink as usize + 1));
    }

    debug!("completed automaton: {missing} transitions redirected to sink {sink}");
    Automaton::from_parts(
        num_states + 1,
        automaton.start(),
        transitions,
        automaton.accepting().clone(),
    )
}

impl Automaton {
    /// Completion stage. See [`complete`].
    pub fn complete(self) -> Automaton {
        complete(&self)
    }
}
