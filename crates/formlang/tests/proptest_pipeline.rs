// Property-based tests for the transformation pipeline.
//
// Random small epsilon-NFAs over {a, b, c} are pushed through every stage and
// compared against the epsilon-aware simulation of the input automaton.

use formlang::symbol::{EPSILON, alphabet};
use formlang::{Automaton, Edge, StateId};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

// ============================================================================
// GENERATORS
// ============================================================================

fn symbol() -> impl Strategy<Value = u8> {
    prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(EPSILON)]
}

/// Generate an automaton with 1..=6 states and up to 14 edges.
fn automaton() -> impl Strategy<Value = Automaton> {
    (1u32..=6).prop_flat_map(|num_states| {
        let edge = (0..num_states, 0..num_states, symbol()).prop_map(|(from, to, symbol)| Edge {
            from,
            to,
            symbol,
        });
        (
            Just(num_states),
            0..num_states,
            prop::collection::vec(edge, 0..14),
            prop::collection::vec(0..num_states, 0..=num_states as usize),
        )
            .prop_map(|(num_states, start, edges, accepting)| {
                Automaton::new(num_states, start, edges, accepting).unwrap()
            })
    })
}

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abcd]{0,7}", 1..12)
}

// ============================================================================
// HELPERS
// ============================================================================

/// True if some accepting state is reachable from `state`.
fn live(dfa: &Automaton, state: StateId) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![state];
    while let Some(s) = stack.pop() {
        if !seen.insert(s) {
            continue;
        }
        if dfa.is_accepting(s) {
            return true;
        }
        stack.extend(alphabet().filter_map(|sym| dfa.transition(s, sym)));
    }
    false
}

/// Search for a word on which `p` and `q` disagree (product BFS).
fn distinguishable(dfa: &Automaton, p: StateId, q: StateId) -> bool {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([(p, q)]);

    while let Some((x, y)) = queue.pop_front() {
        if !seen.insert((x, y)) {
            continue;
        }
        if dfa.is_accepting(x) != dfa.is_accepting(y) {
            return true;
        }
        for symbol in alphabet() {
            match (dfa.transition(x, symbol), dfa.transition(y, symbol)) {
                (Some(nx), Some(ny)) => queue.push_back((nx, ny)),
                (None, None) => {}
                (Some(n), None) | (None, Some(n)) => {
                    if live(dfa, n) {
                        return true;
                    }
                }
            }
        }
    }

    false
}

/// Renumber states in breadth-first discovery order from the start state.
/// Two deterministic automata are isomorphic iff their canonical forms match.
fn canonical_form(dfa: &Automaton) -> (Vec<bool>, Vec<(usize, u8, usize)>) {
    let mut order = vec![None; dfa.num_states() as usize];
    let mut queue = VecDeque::from([dfa.start()]);
    let mut next = 0;
    order[dfa.start() as usize] = Some(next);
    next += 1;

    let mut accepting = Vec::new();
    let mut edges = Vec::new();
    while let Some(state) = queue.pop_front() {
        accepting.push(dfa.is_accepting(state));
        let from = order[state as usize].unwrap();
        for symbol in alphabet() {
            if let Some(to) = dfa.transition(state, symbol) {
                let to_id = *order[to as usize].get_or_insert_with(|| {
                    queue.push_back(to);
                    next += 1;
                    next - 1
                });
                edges.push((from, symbol, to_id));
            }
        }
    }

    (accepting, edges)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn epsilon_elimination_preserves_language(nfa in automaton(), words in words()) {
        let epsilon_free = nfa.clone().eliminate_epsilon();
        prop_assert!(!epsilon_free.has_epsilon());
        prop_assert_eq!(epsilon_free.num_states(), nfa.num_states());
        prop_assert_eq!(epsilon_free.start(), nfa.start());
        for word in &words {
            prop_assert_eq!(nfa.accepts(word), epsilon_free.accepts(word), "word {:?}", word);
        }
    }

    #[test]
    fn determinization_preserves_language(nfa in automaton(), words in words()) {
        let dfa = nfa.clone().to_dfa();
        prop_assert!(dfa.is_deterministic());
        prop_assert_eq!(dfa.start(), 0);
        for word in &words {
            prop_assert_eq!(nfa.accepts(word), dfa.accepts(word), "word {:?}", word);
        }
    }

    #[test]
    fn completion_is_total(nfa in automaton(), words in words()) {
        let dfa = nfa.clone().to_dfa();
        let total = dfa.clone().complete();
        prop_assert!(total.is_total());

        if total.num_states() > dfa.num_states() {
            let sink = dfa.num_states();
            prop_assert_eq!(total.num_states(), sink + 1);
            prop_assert!(!total.is_accepting(sink));
            prop_assert!(alphabet().all(|sym| total.transition(sink, sym) == Some(sink)));
        } else {
            prop_assert_eq!(&total, &dfa);
        }

        for word in &words {
            prop_assert_eq!(nfa.accepts(word), total.accepts(word), "word {:?}", word);
        }
    }

    #[test]
    fn minimization_preserves_language(nfa in automaton(), words in words()) {
        let minimal = nfa.clone().to_dfa().complete().minimize();
        prop_assert!(minimal.is_total());
        for word in &words {
            prop_assert_eq!(nfa.accepts(word), minimal.accepts(word), "word {:?}", word);
        }
    }

    #[test]
    fn minimization_is_idempotent(nfa in automaton()) {
        let once = nfa.to_dfa().complete().minimize();
        prop_assert_eq!(&once.clone().complete().minimize(), &once);

        let again = once.clone().determinize().complete().minimize();
        prop_assert_eq!(once.num_states(), again.num_states());
        prop_assert_eq!(canonical_form(&once), canonical_form(&again));
    }

    #[test]
    fn minimal_states_are_distinguishable(nfa in automaton()) {
        let minimal = nfa.to_dfa().complete().minimize();
        for p in 0..minimal.num_states() {
            for q in (p + 1)..minimal.num_states() {
                prop_assert!(
                    distinguishable(&minimal, p, q),
                    "states {} and {} are equivalent",
                    p,
                    q
                );
            }
        }
    }

    #[test]
    fn prefix_match_agrees_with_acceptance(nfa in automaton(), words in words()) {
        let dfa = nfa.to_dfa();
        for word in &words {
            let longest = dfa.prefix_match(word);
            prop_assert!(longest <= word.len());
            if longest > 0 {
                prop_assert!(dfa.accepts(&word[..longest]));
            }
            for len in (longest + 1)..=word.len() {
                prop_assert!(!dfa.accepts(&word[..len]), "prefix {:?}", &word[..len]);
            }
        }
    }
}
