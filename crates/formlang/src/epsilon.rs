//! Epsilon closure and epsilon elimination.

use crate::automaton::{Automaton, Transitions};
use crate::state::{StateId, StateSet};
use crate::symbol::{EPSILON, alphabet, is_epsilon};
use log::{debug, trace};

/// Compute the epsilon closure of a single state using an explicit DFS stack.
///
/// The result always contains `state` itself; epsilon cycles are fine.
pub fn epsilon_closure_single(automaton: &Automaton, state: StateId) -> StateSet {
    epsilon_closure(
        automaton,
        &StateSet::singleton(state, automaton.num_states() as usize),
    )
}

/// Get the epsilon closure of a set of states.
pub fn epsilon_closure(automaton: &Automaton, states: &StateSet) -> StateSet {
    let mut closure = StateSet::with_capacity(automaton.num_states() as usize);
    let mut stack: Vec<StateId> = states.iter().collect();

    while let Some(s) = stack.pop() {
        if !closure.insert(s) {
            continue;
        }
        if let Some(destinations) = automaton.targets(s, EPSILON) {
            stack.extend(destinations.iter().filter(|&d| !closure.contains(d)));
        }
    }

    closure
}

/// Remove every epsilon transition while preserving the language.
///
/// States keep their ids. A state becomes accepting when its closure reaches
/// an accepting state, and inherits the letter transitions of every other
/// state in its closure.
pub fn eliminate_epsilon(automaton: &Automaton) -> Automaton {
    let num_states = automaton.num_states();
    let mut accepting = automaton.accepting().clone();
    let mut transitions: Transitions = automaton
        .transition_table()
        .iter()
        .filter(|&(&(_, sym), dsts)| !is_epsilon(sym) && !dsts.is_empty())
        .map(|(&key, dsts)| (key, dsts.clone()))
        .collect();

    for state in 0..num_states {
        if automaton.targets(state, EPSILON).is_none() {
            continue;
        }

        let closure = epsilon_closure_single(automaton, state);
        trace!("epsilon closure of {state}: {closure:?}");

        if closure.intersects(automaton.accepting()) {
            accepting.insert(state);
        }

        for to in closure.iter().filter(|&to| to != state) {
            for symbol in alphabet() {
                // Read from the input table: closures are already transitive.
                if let Some(reached) = automaton.targets(to, symbol) {
                    transitions
                        .entry((state, symbol))
                        .or_insert_with(|| StateSet::with_capacity(num_states as usize))
                        .union_with(reached);
                }
            }
        }
    }

    let result = Automaton::from_parts(num_states, automaton.start(), transitions, accepting);
    debug!(
        "eliminated epsilon transitions: {} states, {} -> {} edges",
        num_states,
        automaton.num_edges(),
        result.num_edges()
    );
    result
}

impl Automaton {
    /// Epsilon elimination stage. See [`eliminate_epsilon`].
    pub fn eliminate_epsilon(self) -> Automaton {
        eliminate_epsilon(&self)
    }
}
