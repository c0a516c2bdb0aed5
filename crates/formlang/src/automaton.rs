//! The automaton model shared by every transformation stage.
//!
//! An [`Automaton`] is built once, either from an edge list with
//! [`Automaton::new`] or by the regex compiler, and afterwards only replaced
//! wholesale by the stages:
//! [`eliminate_epsilon`](Automaton::eliminate_epsilon),
//! [`determinize`](Automaton::determinize), [`complete`](Automaton::complete)
//! and [`minimize`](Automaton::minimize).

use crate::error::{Error, Result};
use crate::state::{StateId, StateSet};
use crate::symbol::{SymbolId, alphabet, is_epsilon, is_letter, symbol_from_char};
use std::collections::BTreeMap;

/// Transition table: (source, symbol) -> set of destinations.
///
/// Keyed by a `BTreeMap` so iteration is in ascending `(source, symbol)` order.
pub(crate) type Transitions = BTreeMap<(StateId, SymbolId), StateSet>;

/// A labeled edge `from --symbol--> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub from: StateId,
    pub to: StateId,
    pub symbol: SymbolId,
}

impl Edge {
    /// Create an edge from a character label (`'a'..='z'` or `'$'` for epsilon).
    pub fn new(from: StateId, to: StateId, ch: char) -> Result<Self> {
        Ok(Self {
            from,
            to,
            symbol: symbol_from_char(ch)?,
        })
    }
}

/// A finite automaton over `a..=z` with optional epsilon transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    /// Start state
    start: StateId,
    /// Transitions: (source, symbol) -> set of destination states.
    /// Deterministic automata hold at most one destination per key.
    transitions: Transitions,
    /// Final (accepting) states
    accepting: StateSet,
}

impl Automaton {
    /// Build an automaton from an edge list and accepting states.
    ///
    /// Fails with [`Error::InvalidAutomaton`] if the start state, an edge
    /// endpoint or an accepting state is not below `num_states`, and with
    /// [`Error::UnknownSymbol`] if an edge carries a symbol outside the alphabet.
    pub fn new<E, A>(num_states: StateId, start: StateId, edges: E, accepting: A) -> Result<Self>
    where
        E: IntoIterator<Item = Edge>,
        A: IntoIterator<Item = StateId>,
    {
        let check = |state: StateId| {
            if state < num_states {
                Ok(state)
            } else {
                Err(Error::InvalidAutomaton { state, num_states })
            }
        };

        check(start)?;

        let mut transitions = Transitions::new();
        for edge in edges {
            check(edge.from)?;
            check(edge.to)?;
            if !is_letter(edge.symbol) && !is_epsilon(edge.symbol) {
                return Err(Error::UnknownSymbol {
                    symbol: edge.symbol as char,
                    position: None,
                });
            }
            transitions
                .entry((edge.from, edge.symbol))
                .or_insert_with(|| StateSet::with_capacity(num_states as usize))
                .insert(edge.to);
        }

        let mut accepting_set = StateSet::with_capacity(num_states as usize);
        for state in accepting {
            accepting_set.insert(check(state)?);
        }

        Ok(Self::from_parts(num_states, start, transitions, accepting_set))
    }

    /// Assemble an automaton from parts produced by a transformation stage.
    pub(crate) fn from_parts(
        num_states: StateId,
        start: StateId,
        transitions: Transitions,
        accepting: StateSet,
    ) -> Self {
        debug_assert!(start < num_states, "start state out of range");
        debug_assert!(accepting.iter().all(|s| s < num_states));
        debug_assert!(
            transitions
                .iter()
                .all(|(&(src, _), dsts)| src < num_states && dsts.iter().all(|d| d < num_states))
        );
        Self {
            num_states,
            start,
            transitions,
            accepting,
        }
    }

    pub(crate) fn transition_table(&self) -> &Transitions {
        &self.transitions
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Get the accepting states.
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    /// Check if `state` is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Destinations of `state` on `symbol`, if any transition exists.
    pub fn targets(&self, state: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions
            .get(&(state, symbol))
            .filter(|dsts| !dsts.is_empty())
    }

    /// The (first) destination of `state` on `symbol`. On a deterministic
    /// automaton this is the unique successor.
    pub fn transition(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        self.targets(state, symbol).and_then(StateSet::first)
    }

    /// All transitions as `(source, symbol, destination)` triples, in ascending
    /// `(source, symbol)` order with destinations ascending within a symbol.
    pub fn edges(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dsts)| dsts.iter().map(move |dst| (src, sym, dst)))
    }

    /// Total number of `(source, symbol, destination)` triples.
    pub fn num_edges(&self) -> usize {
        self.transitions.values().map(StateSet::len).sum()
    }

    pub fn has_epsilon(&self) -> bool {
        self.transitions
            .iter()
            .any(|(&(_, sym), dsts)| is_epsilon(sym) && !dsts.is_empty())
    }

    /// True if there are no epsilon transitions and every `(state, letter)`
    /// pair has at most one destination.
    pub fn is_deterministic(&self) -> bool {
        !self.has_epsilon() && self.transitions.values().all(|dsts| dsts.len() <= 1)
    }

    /// True if the automaton is deterministic and every `(state, letter)` pair
    /// has exactly one destination.
    pub fn is_total(&self) -> bool {
        self.is_deterministic()
            && (0..self.num_states)
                .all(|state| alphabet().all(|sym| self.targets(state, sym).is_some()))
    }

    /// Check if the automaton accepts no strings at all.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut stack = vec![self.start];

        while let Some(state) = stack.pop() {
            if !visited.insert(state) {
                continue;
            }
            if self.accepting.contains(state) {
                return false;
            }
            for (_, dsts) in self.transitions.range((state, 0)..=(state, SymbolId::MAX)) {
                stack.extend(dsts.iter().filter(|&d| !visited.contains(d)));
            }
        }

        true
    }

    /// Epsilon elimination followed by subset construction.
    pub fn to_dfa(self) -> Automaton {
        self.eliminate_epsilon().determinize()
    }
}
