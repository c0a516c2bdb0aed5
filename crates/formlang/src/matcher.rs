//! Running words through an automaton.

use crate::automaton::Automaton;
use crate::epsilon::epsilon_closure;
use crate::state::StateSet;
use crate::symbol::SymbolId;

/// Map an input character to a letter symbol, if it is one.
fn letter(ch: char) -> Option<SymbolId> {
    ch.is_ascii_lowercase().then_some(ch as SymbolId)
}

impl Automaton {
    /// Length of the longest prefix of `input` that a deterministic walk ends
    /// in an accepting state.
    ///
    /// The walk starts at [`start`](Automaton::start) and stops at the first
    /// character without a transition; a partial automaton is fine. The empty
    /// prefix counts as 0, so 0 is also the answer when nothing matches.
    pub fn prefix_match(&self, input: &str) -> usize {
        let mut state = self.start();
        let mut longest = 0;

        for (consumed, ch) in input.chars().enumerate() {
            let Some(next) = letter(ch).and_then(|sym| self.transition(state, sym)) else {
                break;
            };
            state = next;
            if self.is_accepting(state) {
                longest = consumed + 1;
            }
        }

        longest
    }

    /// Check whether the whole `word` is accepted.
    ///
    /// Simulates the automaton as an epsilon-NFA, so it gives the same answer
    /// before and after every transformation stage.
    pub fn accepts(&self, word: &str) -> bool {
        let capacity = self.num_states() as usize;
        let mut current = epsilon_closure(self, &StateSet::singleton(self.start(), capacity));

        for ch in word.chars() {
            let Some(symbol) = letter(ch) else {
                return false;
            };
            let mut reached = StateSet::with_capacity(capacity);
            for state in current.iter() {
                if let Some(destinations) = self.targets(state, symbol) {
                    reached.union_with(destinations);
                }
            }
            if reached.is_empty() {
                return false;
            }
            current = epsilon_closure(self, &reached);
        }

        current.intersects(self.accepting())
    }
}
